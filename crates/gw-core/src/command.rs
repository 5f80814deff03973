//! Command-string grammar
//!
//! A session script is consumed left to right: `N<seed>S` starts a new
//! world, `L` loads the previous one, then `W A S D` move and `:Q` cuts
//! processing short with a save request. Everything is case-insensitive;
//! characters that mean nothing are skipped without being logged.

use thiserror::Error;

use crate::world::Direction;

/// Script parse failures. The caller never receives a partially built
/// session out of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command string is empty")]
    Empty,

    #[error("command must start with 'N' or 'L', got {0:?}")]
    UnknownMode(char),

    #[error("new-world command is missing the 'S' seed terminator")]
    UnterminatedSeed,

    #[error("seed {0:?} is not a decimal integer")]
    InvalidSeed(String),
}

/// How a scripted session begins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStart {
    /// Generate a fresh world from this seed
    New { seed: u64 },
    /// Restore the previously saved world
    Load,
}

/// A fully parsed session script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub start: SessionStart,
    pub moves: Vec<Direction>,
    /// True when a `:Q` terminated the script
    pub save_requested: bool,
}

/// Parse a complete session script.
pub fn parse_script(input: &str) -> Result<Script, CommandError> {
    let mut chars = input.chars();

    let start = match chars.next() {
        None => return Err(CommandError::Empty),
        Some('n' | 'N') => {
            let rest = chars.as_str();
            let end = rest
                .find(['s', 'S'])
                .ok_or(CommandError::UnterminatedSeed)?;
            let digits = &rest[..end];
            let seed = digits
                .parse::<u64>()
                .map_err(|_| CommandError::InvalidSeed(digits.to_string()))?;
            chars = rest[end + 1..].chars();
            SessionStart::New { seed }
        }
        Some('l' | 'L') => SessionStart::Load,
        Some(other) => return Err(CommandError::UnknownMode(other)),
    };

    let mut moves = Vec::new();
    let mut save_requested = false;
    let mut pending_colon = false;

    for c in chars {
        if pending_colon && matches!(c, 'q' | 'Q') {
            save_requested = true;
            break;
        }
        pending_colon = c == ':';
        if let Some(direction) = Direction::from_char(c) {
            moves.push(direction);
        }
    }

    Ok(Script {
        start,
        moves,
        save_requested,
    })
}
