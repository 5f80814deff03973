//! Property tests over arbitrary seeds and move sequences.

use proptest::prelude::*;
use strum::IntoEnumIterator;

use gw_core::dungeon::generate;
use gw_core::tile::TileKind;
use gw_core::world::Direction;
use gw_core::{DEFAULT_HEIGHT, DEFAULT_WIDTH, WANDERER_COUNT};

fn moves() -> impl Strategy<Value = Vec<Direction>> {
    let directions: Vec<Direction> = Direction::iter().collect();
    prop::collection::vec(prop::sample::select(directions), 0..64)
}

proptest! {
    #[test]
    fn generation_invariants_hold(seed in any::<u64>()) {
        let world = generate(DEFAULT_WIDTH, DEFAULT_HEIGHT, seed).unwrap();

        prop_assert_eq!(world.wanderers().len(), WANDERER_COUNT);

        let player = world.player();
        prop_assert!(world.tile(player.x, player.y).is_avatar());

        // Walls are closed: no floor cell touches raw emptiness
        for x in 1..DEFAULT_WIDTH - 1 {
            for y in 1..DEFAULT_HEIGHT - 1 {
                if world.tile(x, y) != TileKind::Floor {
                    continue;
                }
                for nx in x - 1..=x + 1 {
                    for ny in y - 1..=y + 1 {
                        prop_assert_ne!(world.tile(nx, ny), TileKind::Empty);
                    }
                }
            }
        }
    }

    #[test]
    fn movement_stays_on_walkable_cells(seed in any::<u64>(), moves in moves()) {
        let mut world = generate(DEFAULT_WIDTH, DEFAULT_HEIGHT, seed).unwrap();

        for &direction in &moves {
            world.step(direction);
            let p = world.player();
            prop_assert!(p.x < DEFAULT_WIDTH && p.y < DEFAULT_HEIGHT);
            prop_assert_ne!(world.tile(p.x, p.y), TileKind::Boundary);
            prop_assert!(world.tile(p.x, p.y).is_avatar());
        }
    }

    #[test]
    fn wanderers_never_multiply(seed in any::<u64>(), moves in moves()) {
        let mut world = generate(DEFAULT_WIDTH, DEFAULT_HEIGHT, seed).unwrap();
        let mut remaining = world.wanderers().len();

        for &direction in &moves {
            world.step(direction);
            prop_assert!(world.wanderers().len() <= remaining);
            remaining = world.wanderers().len();
        }
    }

    #[test]
    fn replaying_the_log_reproduces_the_state(seed in any::<u64>(), moves in moves()) {
        let mut played = generate(DEFAULT_WIDTH, DEFAULT_HEIGHT, seed).unwrap();
        played.apply_moves(&moves);

        let mut replayed = generate(DEFAULT_WIDTH, DEFAULT_HEIGHT, seed).unwrap();
        replayed.apply_moves(played.recorded_actions());

        prop_assert_eq!(played.tiles(), replayed.tiles());
        prop_assert_eq!(played.player(), replayed.player());
        prop_assert_eq!(played.wanderers(), replayed.wanderers());
    }
}
