//! World generation
//!
//! Four phases consume the seeded RNG in a fixed order: room placement,
//! hallway carving, wall inference, entity placement. Any change to the
//! number or order of draws changes every world generated from a given seed.

use thiserror::Error;

use crate::consts::{
    MIN_GRID_SIZE, PLACEMENT_ATTEMPT_LIMIT, ROOM_COUNT_MAX, ROOM_COUNT_MIN, ROOM_MAX_SIZE,
    ROOM_MIN_SIZE, WANDERER_COUNT,
};
use crate::rng::WorldRng;
use crate::tile::TileKind;
use crate::world::{Pos, World};

use super::room::Room;

/// Generation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("grid {width}x{height} is too small to place rooms (minimum {}x{})", MIN_GRID_SIZE, MIN_GRID_SIZE)]
    GridTooSmall { width: usize, height: usize },

    #[error("no free floor cell found for {role} after {} attempts", PLACEMENT_ATTEMPT_LIMIT)]
    PlacementStarved { role: &'static str },
}

/// Generate a fully populated world from dimensions and a seed.
pub fn generate(width: usize, height: usize, seed: u64) -> Result<World, GenerationError> {
    if width < MIN_GRID_SIZE || height < MIN_GRID_SIZE {
        return Err(GenerationError::GridTooSmall { width, height });
    }

    let mut rng = WorldRng::new(seed);
    let mut cells = vec![vec![TileKind::Empty; height]; width];

    let rooms = place_rooms(&mut cells, width, height, &mut rng);
    carve_hallways(&mut cells, width, height, &rooms, &mut rng);
    infer_walls(&mut cells, width, height);

    let wanderers = place_wanderers(&mut cells, width, height, &mut rng)?;
    let player = place_player(&mut cells, width, height, &mut rng)?;

    Ok(World::from_parts(width, height, seed, cells, player, wanderers))
}

/// Phase 1: paint [10, 20) overlapping rooms; later paints overwrite.
fn place_rooms(
    cells: &mut [Vec<TileKind>],
    width: usize,
    height: usize,
    rng: &mut WorldRng,
) -> Vec<Room> {
    let count = ROOM_COUNT_MIN + rng.below((ROOM_COUNT_MAX - ROOM_COUNT_MIN) as u32) as usize;
    let mut rooms = Vec::with_capacity(count);

    for _ in 0..count {
        // Draw order: origin x, origin y, height, width
        let x = 2 + rng.below((width - ROOM_MAX_SIZE - 3) as u32) as usize;
        let y = 2 + rng.below((height - ROOM_MAX_SIZE - 3) as u32) as usize;
        let side_range = (ROOM_MAX_SIZE - ROOM_MIN_SIZE - 1) as u32;
        let h = ROOM_MIN_SIZE + 1 + rng.below(side_range) as usize;
        let w = ROOM_MIN_SIZE + 1 + rng.below(side_range) as usize;

        let room = Room::new(x, y, w, h);
        for cx in room.x..room.x + room.width {
            for cy in room.y..room.y + room.height {
                cells[cx][cy] = TileKind::Floor;
            }
        }
        rooms.push(room);
    }

    rooms
}

/// Phase 2: connect each room to the next in generation order.
///
/// The walk corrects x until aligned, then y, so hallways are L-shaped at
/// most. Endpoints are interior points, so the path cannot leave the grid;
/// the bounds check mirrors the painting rule all the same.
fn carve_hallways(
    cells: &mut [Vec<TileKind>],
    width: usize,
    height: usize,
    rooms: &[Room],
    rng: &mut WorldRng,
) {
    for pair in rooms.windows(2) {
        let from = pair[0].random_interior(rng);
        let to = pair[1].random_interior(rng);

        let (mut cx, mut cy) = (from.x, from.y);
        while cx != to.x || cy != to.y {
            if cx < to.x {
                cx += 1;
            } else if cx > to.x {
                cx -= 1;
            } else if cy < to.y {
                cy += 1;
            } else {
                cy -= 1;
            }

            if cx < width && cy < height {
                cells[cx][cy] = TileKind::Floor;
            }
        }
    }
}

/// Phase 3: every Empty 8-neighbor of a Floor cell becomes Boundary.
///
/// Runs once, after all Floor painting. Floor is never overwritten, so the
/// scan order cannot change the result.
fn infer_walls(cells: &mut [Vec<TileKind>], width: usize, height: usize) {
    for x in 1..width - 1 {
        for y in 1..height - 1 {
            if cells[x][y] != TileKind::Floor {
                continue;
            }
            for nx in x - 1..=x + 1 {
                for ny in y - 1..=y + 1 {
                    if (nx, ny) != (x, y) && cells[nx][ny] == TileKind::Empty {
                        cells[nx][ny] = TileKind::Boundary;
                    }
                }
            }
        }
    }
}

/// Phase 4a: scatter wanderers onto free floor cells.
///
/// Rejected draws consume the RNG and are retried; an accepted cell becomes
/// avatar-kind so later draws cannot land on it again.
fn place_wanderers(
    cells: &mut [Vec<TileKind>],
    width: usize,
    height: usize,
    rng: &mut WorldRng,
) -> Result<Vec<Pos>, GenerationError> {
    let mut wanderers = Vec::with_capacity(WANDERER_COUNT);

    for _ in 0..WANDERER_COUNT {
        let pos = find_floor_cell(cells, width, height, rng, "wanderer")?;
        cells[pos.x][pos.y] = TileKind::Avatar;
        wanderers.push(pos);
    }

    Ok(wanderers)
}

/// Phase 4b: place the controlled entity on a free floor cell.
fn place_player(
    cells: &mut [Vec<TileKind>],
    width: usize,
    height: usize,
    rng: &mut WorldRng,
) -> Result<Pos, GenerationError> {
    let pos = find_floor_cell(cells, width, height, rng, "player")?;
    cells[pos.x][pos.y] = TileKind::Avatar;
    Ok(pos)
}

fn find_floor_cell(
    cells: &[Vec<TileKind>],
    width: usize,
    height: usize,
    rng: &mut WorldRng,
    role: &'static str,
) -> Result<Pos, GenerationError> {
    for _ in 0..PLACEMENT_ATTEMPT_LIMIT {
        let x = rng.below(width as u32) as usize;
        let y = rng.below(height as u32) as usize;
        if cells[x][y] == TileKind::Floor {
            return Ok(Pos { x, y });
        }
    }
    Err(GenerationError::PlacementStarved { role })
}
