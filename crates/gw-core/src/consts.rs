//! World generation constants.

/// Default map dimensions
pub const DEFAULT_WIDTH: usize = 50;
pub const DEFAULT_HEIGHT: usize = 50;

/// Room count bounds, half-open: a world has [10, 20) rooms
pub const ROOM_COUNT_MIN: usize = 10;
pub const ROOM_COUNT_MAX: usize = 20;

/// Room side-length bounds; generated sides fall in [MIN + 1, MAX)
pub const ROOM_MIN_SIZE: usize = 4;
pub const ROOM_MAX_SIZE: usize = 10;

/// Number of wanderers placed at generation time
pub const WANDERER_COUNT: usize = 20;

/// Draw attempts allowed per entity placement before generation fails
pub const PLACEMENT_ATTEMPT_LIMIT: usize = 4096;

/// Smallest grid the generator accepts; below this the room origin
/// range `[2, W - ROOM_MAX_SIZE - 1)` is empty
pub const MIN_GRID_SIZE: usize = ROOM_MAX_SIZE + 4;
