//! Application state and main UI controller

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout};

use gw_core::world::{Direction, MoveOutcome, World};

use crate::input::key_to_direction;
use crate::widgets::{MapWidget, StatusWidget};

/// What the driving loop should do after executing an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopResult {
    Continue,
    SaveAndQuit,
}

/// A key event resolved to a game action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Move(Direction),
    SaveQuit,
}

/// UI controller owning the world for the duration of a session
pub struct App {
    world: World,
    pending_colon: bool,
    should_quit: bool,
    message: String,
}

impl App {
    pub fn new(world: World) -> Self {
        Self {
            world,
            pending_colon: false,
            should_quit: false,
            message: "Welcome to Gridwalk.".to_string(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Hand the world back to the driver, e.g. for saving
    pub fn into_world(self) -> World {
        self.world
    }

    /// True after Ctrl-C: quit without saving
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Resolve a terminal event. `:` arms the quit sequence; a following
    /// `q` requests save-and-quit; anything else falls through to the
    /// movement mapping.
    pub fn handle_event(&mut self, event: Event) -> Option<AppAction> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if self.pending_colon {
            self.pending_colon = false;
            if matches!(key.code, KeyCode::Char('q' | 'Q')) {
                return Some(AppAction::SaveQuit);
            }
        }
        if key.code == KeyCode::Char(':') {
            self.pending_colon = true;
            return None;
        }

        key_to_direction(key).map(AppAction::Move)
    }

    pub fn execute(&mut self, action: AppAction) -> LoopResult {
        match action {
            AppAction::Move(direction) => {
                match self.world.step(direction) {
                    MoveOutcome::Moved => self.message.clear(),
                    MoveOutcome::Ate => {
                        self.message = format!(
                            "You eat a wanderer; {} remain.",
                            self.world.wanderers().len()
                        );
                    }
                    MoveOutcome::Blocked => {
                        self.message = "You bump into the sand.".to_string();
                    }
                }
                LoopResult::Continue
            }
            AppAction::SaveQuit => LoopResult::SaveAndQuit,
        }
    }

    /// Apply one recorded move during replay animation
    pub fn replay_step(&mut self, direction: Direction) {
        self.execute(AppAction::Move(direction));
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());

        frame.render_widget(MapWidget::new(&self.world), chunks[0]);
        frame.render_widget(StatusWidget::new(&self.world, &self.message), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use gw_core::dungeon::generate;
    use gw_core::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

    fn app() -> App {
        App::new(generate(DEFAULT_WIDTH, DEFAULT_HEIGHT, 42).unwrap())
    }

    fn press(app: &mut App, c: char) -> Option<AppAction> {
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
    }

    #[test]
    fn test_colon_q_requests_save_quit() {
        let mut app = app();
        assert_eq!(press(&mut app, ':'), None);
        assert_eq!(press(&mut app, 'q'), Some(AppAction::SaveQuit));
    }

    #[test]
    fn test_colon_then_move_disarms_quit() {
        let mut app = app();
        assert_eq!(press(&mut app, ':'), None);
        assert_eq!(press(&mut app, 'w'), Some(AppAction::Move(Direction::Up)));
        // The earlier colon no longer applies
        assert_eq!(press(&mut app, 'q'), None);
    }

    #[test]
    fn test_plain_q_does_nothing() {
        let mut app = app();
        assert_eq!(press(&mut app, 'q'), None);
    }

    #[test]
    fn test_ctrl_c_quits_without_saving() {
        let mut app = app();
        let action = app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(action, None);
        assert!(app.should_quit());
    }
}
