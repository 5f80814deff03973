//! Room rectangles
//!
//! Rooms exist only during generation: they are painted onto the grid, used
//! once more to pick hallway endpoints, then dropped.

use crate::rng::WorldRng;
use crate::world::Pos;

/// Axis-aligned room rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Pick a strictly interior point, drawing x then y.
    ///
    /// Requires sides of at least 3 so the interior is non-empty; the
    /// generator only produces sides of 5 or more.
    pub fn random_interior(&self, rng: &mut WorldRng) -> Pos {
        let x = self.x + 1 + rng.below((self.width - 2) as u32) as usize;
        let y = self.y + 1 + rng.below((self.height - 2) as u32) as usize;
        Pos { x, y }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_interior_stays_inside() {
        let room = Room::new(4, 7, 6, 5);
        let mut rng = WorldRng::new(7);
        for _ in 0..200 {
            let p = room.random_interior(&mut rng);
            assert!(room.contains(p));
            // Never on the room's own edge
            assert!(p.x > room.x && p.x < room.x + room.width - 1);
            assert!(p.y > room.y && p.y < room.y + room.height - 1);
        }
    }
}
