//! gw-ui: Terminal UI layer using ratatui
//!
//! Renders grid snapshots and turns key events into game actions. The world
//! itself is only mutated through [`App::execute`]; saving and process exit
//! stay with the driver.

pub mod app;
pub mod input;
pub mod widgets;

mod display;

pub use app::{App, AppAction, LoopResult};
