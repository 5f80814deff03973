//! Gridwalk: a seeded dungeon crawl
//!
//! Driver binary. Everything here is plumbing: CLI parsing, terminal
//! setup/teardown, the poll-draw loop, and process exit. Game rules live
//! in gw-core, persistence in gw-save, rendering in gw-ui.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use thiserror::Error;

use gw_core::dungeon::{GenerationError, generate};
use gw_core::world::{Direction, World};
use gw_core::{DEFAULT_HEIGHT, DEFAULT_WIDTH, WorldRng};
use gw_save::{SaveDir, SaveError, SessionError};
use gw_ui::{App, LoopResult};

#[derive(Parser)]
#[command(name = "gridwalk", about = "A seeded dungeon crawl in the terminal", version)]
struct Cli {
    /// Directory holding save files (defaults to the per-user data dir)
    #[arg(long, global = true)]
    save_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a fresh world and play it
    New {
        /// Generation seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: usize,
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: usize,
    },
    /// Resume the previously saved world
    Load,
    /// Regenerate the saved world from its seed and replay the recorded moves
    Replay {
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: usize,
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: usize,
    },
    /// Run a command script headlessly and print the final grid
    Script {
        /// Session script, e.g. "N123SWWAASSDD:Q"
        commands: String,
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: usize,
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: usize,
    },
}

#[derive(Debug, Error)]
enum DriverError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridwalk: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), DriverError> {
    let dir = cli
        .save_dir
        .map(SaveDir::new)
        .unwrap_or_else(SaveDir::default_dir);

    match cli.command {
        Command::New {
            seed,
            width,
            height,
        } => {
            let seed = seed.unwrap_or_else(|| WorldRng::from_entropy().seed());
            let world = generate(width, height, seed)?;
            // Record the seed up front so a replay works even if this
            // session never saves
            dir.ensure_exists()?;
            gw_save::save_seed(seed, &dir.seed_path())?;
            play(world, &dir, &[])
        }
        Command::Load => {
            let world = gw_save::load_session(&dir)?.ok_or(SessionError::NoSavedWorld)?;
            play(world, &dir, &[])
        }
        Command::Replay { width, height } => {
            let Some(seed) = gw_save::load_seed(&dir.seed_path())? else {
                return Err(SessionError::NoSavedWorld.into());
            };
            let moves = gw_save::load_actions(&dir.actions_path())?.unwrap_or_default();
            let world = generate(width, height, seed)?;
            play(world, &dir, &moves)
        }
        Command::Script {
            commands,
            width,
            height,
        } => {
            let outcome = gw_save::play_script(&commands, width, height, &dir)?;
            print!("{}", outcome.world.to_ascii());
            if outcome.saved {
                eprintln!("Session saved.");
            }
            Ok(())
        }
    }
}

/// Run an interactive terminal session, optionally animating a recorded
/// move sequence first. The terminal is restored on every exit path.
fn play(world: World, dir: &SaveDir, replay_moves: &[Direction]) -> Result<(), DriverError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_session(&mut terminal, world, dir, replay_moves);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_session(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    world: World,
    dir: &SaveDir,
    replay_moves: &[Direction],
) -> Result<(), DriverError> {
    let mut app = App::new(world);

    // Replay animation: one recorded move per frame
    for &direction in replay_moves {
        app.replay_step(direction);
        terminal.draw(|frame| app.render(frame))?;
        std::thread::sleep(Duration::from_millis(100));
    }

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;

            if let Some(action) = app.handle_event(event) {
                match app.execute(action) {
                    LoopResult::Continue => {}
                    LoopResult::SaveAndQuit => {
                        gw_save::save_session(app.world(), dir)?;
                        break;
                    }
                }
            }

            if app.should_quit() {
                break;
            }
        }
    }

    Ok(())
}
