//! gw-core: Core game logic for Gridwalk
//!
//! This crate contains the tile vocabulary, the seeded world generator, the
//! live world state with its movement rules, and the command-string grammar.
//! It performs no I/O; persistence lives in `gw-save` and rendering in
//! `gw-ui`.

pub mod command;
pub mod dungeon;
pub mod tile;
pub mod world;

mod consts;
mod rng;

pub use consts::*;
pub use rng::WorldRng;
