//! Live world state
//!
//! The [`World`] owns the tile grid, the controlled position, the wanderer
//! positions, and the log of accepted moves. [`World::step`] is the only
//! operation that mutates position state.

use serde::{Deserialize, Serialize};
use strum::EnumIter;
use thiserror::Error;

use crate::tile::TileKind;

/// Grid coordinate; y grows upward, renderers flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

/// Movement direction for the controlled entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit delta; up is +y
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse a move character (case-insensitive WASD)
    pub const fn from_char(c: char) -> Option<Direction> {
        match c {
            'w' | 'W' => Some(Direction::Up),
            'a' | 'A' => Some(Direction::Left),
            's' | 'S' => Some(Direction::Down),
            'd' | 'D' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Canonical move character, used in action logs
    pub const fn as_char(self) -> char {
        match self {
            Direction::Up => 'W',
            Direction::Left => 'A',
            Direction::Down => 'S',
            Direction::Right => 'D',
        }
    }
}

/// Result of a single [`World::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Moved onto an ordinary cell
    Moved,
    /// Moved onto a wanderer and consumed it
    Ate,
    /// Target was out of bounds or a boundary; nothing changed
    Blocked,
}

/// Errors reassembling a world from persisted parts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("cell data does not match the declared {width}x{height} dimensions")]
    DimensionMismatch { width: usize, height: usize },

    #[error("entity position ({x}, {y}) is outside the grid")]
    EntityOutOfBounds { x: usize, y: usize },

    #[error("no avatar tile under entity position ({x}, {y})")]
    MissingEntity { x: usize, y: usize },
}

/// The world aggregate: grid, entities, and the accepted-move log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    width: usize,
    height: usize,
    seed: u64,
    cells: Vec<Vec<TileKind>>,
    player: Pos,
    wanderers: Vec<Pos>,
    actions: Vec<Direction>,
}

impl World {
    /// Assemble a freshly generated world. The generator guarantees the
    /// invariants the public `restore` constructor checks.
    pub(crate) fn from_parts(
        width: usize,
        height: usize,
        seed: u64,
        cells: Vec<Vec<TileKind>>,
        player: Pos,
        wanderers: Vec<Pos>,
    ) -> Self {
        Self {
            width,
            height,
            seed,
            cells,
            player,
            wanderers,
            actions: Vec::new(),
        }
    }

    /// Reassemble a world from persisted parts, validating every invariant
    /// so a half-restored world can never escape.
    pub fn restore(
        width: usize,
        height: usize,
        seed: u64,
        cells: Vec<Vec<TileKind>>,
        player: Pos,
        wanderers: Vec<Pos>,
        actions: Vec<Direction>,
    ) -> Result<Self, WorldError> {
        if width == 0
            || height == 0
            || cells.len() != width
            || cells.iter().any(|col| col.len() != height)
        {
            return Err(WorldError::DimensionMismatch { width, height });
        }

        for &pos in wanderers.iter().chain(Some(&player)) {
            if pos.x >= width || pos.y >= height {
                return Err(WorldError::EntityOutOfBounds { x: pos.x, y: pos.y });
            }
            if !cells[pos.x][pos.y].is_avatar() {
                return Err(WorldError::MissingEntity { x: pos.x, y: pos.y });
            }
        }

        Ok(Self {
            width,
            height,
            seed,
            cells,
            player,
            wanderers,
            actions,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only view of the full grid, column-major (`tiles()[x][y]`)
    pub fn tiles(&self) -> &[Vec<TileKind>] {
        &self.cells
    }

    pub fn tile(&self, x: usize, y: usize) -> TileKind {
        self.cells[x][y]
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn wanderers(&self) -> &[Pos] {
        &self.wanderers
    }

    /// Accepted moves in chronological order
    pub fn recorded_actions(&self) -> &[Direction] {
        &self.actions
    }

    /// Action log as its persisted character form
    pub fn action_string(&self) -> String {
        self.actions.iter().map(|d| d.as_char()).collect()
    }

    /// Move the controlled entity one cell.
    ///
    /// A target outside the grid or on a boundary tile is rejected without
    /// any state change or log entry. Entering a wanderer's cell consumes
    /// it. The vacated cell always reverts to floor.
    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        let (dx, dy) = direction.delta();
        let nx = self.player.x as i64 + dx;
        let ny = self.player.y as i64 + dy;

        if nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64 {
            return MoveOutcome::Blocked;
        }
        let target = Pos {
            x: nx as usize,
            y: ny as usize,
        };
        if self.cells[target.x][target.y] == TileKind::Boundary {
            return MoveOutcome::Blocked;
        }

        let ate = match self.wanderers.iter().position(|&p| p == target) {
            Some(i) => {
                self.wanderers.remove(i);
                true
            }
            None => false,
        };

        self.cells[self.player.x][self.player.y] = TileKind::Floor;
        self.cells[target.x][target.y] = TileKind::Avatar;
        self.player = target;
        self.actions.push(direction);

        if ate { MoveOutcome::Ate } else { MoveOutcome::Moved }
    }

    /// Apply a sequence of moves, ignoring rejections.
    pub fn apply_moves(&mut self, moves: &[Direction]) {
        for &direction in moves {
            self.step(direction);
        }
    }

    /// Render the grid as text, top row first.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                out.push(self.cells[x][y].glyph());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 5x5 test world: floor interior ringed by boundary, player at center.
    ///
    ///   y=4  #####
    ///   y=3  #...#
    ///   y=2  #.@w#      w = wanderer at (3, 2)
    ///   y=1  #...#
    ///   y=0  #####
    fn tiny_world() -> World {
        let mut cells = vec![vec![TileKind::Boundary; 5]; 5];
        for x in 1..4 {
            for y in 1..4 {
                cells[x][y] = TileKind::Floor;
            }
        }
        let player = Pos { x: 2, y: 2 };
        let wanderer = Pos { x: 3, y: 2 };
        cells[player.x][player.y] = TileKind::Avatar;
        cells[wanderer.x][wanderer.y] = TileKind::Avatar;

        World::restore(5, 5, 0, cells, player, vec![wanderer], Vec::new()).unwrap()
    }

    #[test]
    fn test_move_onto_floor() {
        let mut w = tiny_world();
        assert_eq!(w.step(Direction::Up), MoveOutcome::Moved);
        assert_eq!(w.player(), Pos { x: 2, y: 3 });
        assert_eq!(w.tile(2, 2), TileKind::Floor);
        assert_eq!(w.tile(2, 3), TileKind::Avatar);
        assert_eq!(w.recorded_actions(), &[Direction::Up]);
    }

    #[test]
    fn test_blocked_by_boundary() {
        let mut w = tiny_world();
        w.step(Direction::Up);
        let before = w.clone();

        assert_eq!(w.step(Direction::Up), MoveOutcome::Blocked);
        assert_eq!(w, before, "rejected move must not change any state");
    }

    #[test]
    fn test_blocked_at_grid_edge() {
        let mut cells = vec![vec![TileKind::Floor; 2]; 2];
        cells[0][0] = TileKind::Avatar;
        let mut w = World::restore(
            2,
            2,
            0,
            cells,
            Pos { x: 0, y: 0 },
            Vec::new(),
            Vec::new(),
        )
        .unwrap();

        assert_eq!(w.step(Direction::Left), MoveOutcome::Blocked);
        assert_eq!(w.step(Direction::Down), MoveOutcome::Blocked);
        assert_eq!(w.player(), Pos { x: 0, y: 0 });
        assert!(w.recorded_actions().is_empty());
    }

    #[test]
    fn test_eating_removes_exactly_one_wanderer() {
        let mut w = tiny_world();
        assert_eq!(w.wanderers().len(), 1);

        assert_eq!(w.step(Direction::Right), MoveOutcome::Ate);
        assert!(w.wanderers().is_empty());
        assert_eq!(w.player(), Pos { x: 3, y: 2 });
        // The wanderer's tile now carries the player, the old cell is floor
        assert_eq!(w.tile(3, 2), TileKind::Avatar);
        assert_eq!(w.tile(2, 2), TileKind::Floor);
    }

    #[test]
    fn test_wanderers_only_shrink() {
        let mut w = tiny_world();
        let mut last = w.wanderers().len();
        for direction in [
            Direction::Right,
            Direction::Left,
            Direction::Up,
            Direction::Down,
            Direction::Down,
            Direction::Right,
        ] {
            w.step(direction);
            assert!(w.wanderers().len() <= last);
            last = w.wanderers().len();
        }
    }

    #[test]
    fn test_only_accepted_moves_are_logged() {
        let mut w = tiny_world();
        w.step(Direction::Up); // accepted
        w.step(Direction::Up); // blocked
        w.step(Direction::Left); // accepted
        assert_eq!(w.action_string(), "WA");
    }

    #[test]
    fn test_restore_rejects_bad_dimensions() {
        let cells = vec![vec![TileKind::Floor; 4]; 5];
        let err = World::restore(5, 5, 0, cells, Pos { x: 0, y: 0 }, Vec::new(), Vec::new());
        assert_eq!(
            err,
            Err(WorldError::DimensionMismatch {
                width: 5,
                height: 5
            })
        );
    }

    #[test]
    fn test_restore_rejects_floating_entities() {
        let mut cells = vec![vec![TileKind::Floor; 3]; 3];
        cells[1][1] = TileKind::Avatar;
        let player = Pos { x: 1, y: 1 };

        let off_grid = World::restore(
            3,
            3,
            0,
            cells.clone(),
            Pos { x: 9, y: 0 },
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(off_grid, Err(WorldError::EntityOutOfBounds { x: 9, y: 0 }));

        let no_tile = World::restore(
            3,
            3,
            0,
            cells,
            player,
            vec![Pos { x: 0, y: 0 }],
            Vec::new(),
        );
        assert_eq!(no_tile, Err(WorldError::MissingEntity { x: 0, y: 0 }));
    }

    #[test]
    fn test_direction_chars_round_trip() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(Direction::from_char(direction.as_char()), Some(direction));
            assert_eq!(
                Direction::from_char(direction.as_char().to_ascii_lowercase()),
                Some(direction)
            );
        }
        assert_eq!(Direction::from_char('x'), None);
    }

    #[test]
    fn test_to_ascii_flips_rows() {
        let w = tiny_world();
        let ascii = w.to_ascii();
        let rows: Vec<&str> = ascii.lines().collect();
        assert_eq!(rows.len(), 5);
        // Top line is y = 4, all boundary glyphs (spaces)
        assert_eq!(rows[0], "     ");
        // Center row: boundary, floor, player, wanderer, boundary
        assert_eq!(rows[2], " ·@@ ");
    }
}
