//! Dungeon generation
//!
//! Rooms, hallways, wall inference, and entity placement, all driven by a
//! single seeded [`WorldRng`](crate::WorldRng) in a fixed draw order.

mod generation;
mod room;

pub use generation::{GenerationError, generate};
pub use room::Room;
