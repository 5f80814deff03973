//! Input handling - convert key events to movement directions

use crossterm::event::{KeyCode, KeyEvent};
use gw_core::world::Direction;

/// Map a key event to a movement direction (WASD or arrow keys).
/// Keys that are not moves return `None` and never reach the world.
pub fn key_to_direction(key: KeyEvent) -> Option<Direction> {
    match key.code {
        KeyCode::Char('w' | 'W') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('a' | 'A') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('s' | 'S') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('d' | 'D') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}
