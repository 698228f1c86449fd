use std::collections::BTreeSet;

use battle_core::geometry::{aoe_cells, line_cells, wall_cells};
use battle_core::{
    Arena, Battle, Cell, ContentPack, Direction, EnemyGroup, EnemyKind, InputFrame, Phase,
    PlayerSpec, Squad, keys,
};
use proptest::prelude::*;

fn any_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

proptest! {
    #[test]
    fn line_cells_are_pure_sized_and_exclude_the_origin(
        y in -50i32..50,
        x in -50i32..50,
        direction in any_direction(),
        range in 0u32..24,
    ) {
        let origin = Cell { y, x };
        let first = line_cells(origin, direction, range);
        let second = line_cells(origin, direction, range);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), range as usize);
        prop_assert!(!first.contains(&origin));
        let unique: BTreeSet<Cell> = first.iter().copied().collect();
        prop_assert_eq!(unique.len(), first.len());
    }

    #[test]
    fn aoe_cells_fill_the_chebyshev_square_exactly(
        y in -50i32..50,
        x in -50i32..50,
        radius in 0u32..12,
    ) {
        let center = Cell { y, x };
        let cells = aoe_cells(center, radius);
        let side = 2 * radius as usize + 1;
        prop_assert_eq!(cells.len(), side * side);
        for cell in &cells {
            let chebyshev = (cell.y - center.y).abs().max((cell.x - center.x).abs());
            prop_assert!(chebyshev <= radius as i32);
        }
        let unique: BTreeSet<Cell> = cells.iter().copied().collect();
        prop_assert_eq!(unique.len(), cells.len());
    }

    #[test]
    fn wall_cells_form_a_duplicate_free_rectangle(
        y in -50i32..50,
        x in -50i32..50,
        direction in any_direction(),
        range in 1u32..12,
        thickness in 1u32..8,
    ) {
        let origin = Cell { y, x };
        let cells = wall_cells(origin, direction, range, thickness);
        prop_assert_eq!(cells.len(), (range * thickness) as usize);
        let unique: BTreeSet<Cell> = cells.iter().copied().collect();
        prop_assert_eq!(unique.len(), cells.len());

        // every cell sits within `range` ahead and `thickness` across
        let ahead = direction.delta();
        let across = direction.perpendicular().delta();
        for cell in &cells {
            let dy = cell.y - origin.y;
            let dx = cell.x - origin.x;
            let depth = dy * ahead.y + dx * ahead.x;
            let lateral = dy * across.y + dx * across.x;
            prop_assert!(depth >= 1 && depth <= range as i32);
            prop_assert!(lateral >= -((thickness as i32 - 1) / 2));
            prop_assert!(lateral <= thickness as i32 / 2);
        }
    }

    #[test]
    fn geometry_output_is_order_independent_of_prior_calls(
        y in -20i32..20,
        x in -20i32..20,
        direction in any_direction(),
        range in 0u32..10,
    ) {
        let origin = Cell { y, x };
        // interleave unrelated calls; the shape must not retain state
        let before = line_cells(origin, direction, range);
        let _ = aoe_cells(Cell { y: x, x: y }, 3);
        let _ = wall_cells(origin, direction.perpendicular(), 2, 2);
        let after = line_cells(origin, direction, range);
        prop_assert_eq!(before, after);
    }

    #[test]
    fn phase_exit_fires_iff_every_player_is_out_of_actions(
        party_size in 1usize..=4,
        defenders in proptest::collection::vec(any::<bool>(), 4),
    ) {
        let content = ContentPack::default();
        let party: Vec<PlayerSpec> = (0..party_size)
            .map(|i| PlayerSpec {
                name: format!("scout_{i}"),
                max_hp: 20,
                max_mana: 8,
                base_actions: 3,
                speed: 2,
                tactics: vec![String::from(keys::TACTIC_DEFEND)],
            })
            .collect();
        let squad = Squad {
            groups: vec![EnemyGroup { kind: EnemyKind::Husk, count: 2 }],
        };
        let mut battle =
            Battle::new(&content, &party, &squad, Arena::standard()).expect("battle");

        // defend zeroes one player's actions; apply it to the chosen subset
        let players = battle.state().players.clone();
        let mut zeroed = 0;
        for (i, &id) in players.iter().enumerate() {
            if defenders[i] {
                battle.start_attack(id, 0).expect("defend");
                zeroed += 1;
            }
        }
        for &id in &players {
            let combatant = &battle.state().combatants[id];
            prop_assert!(combatant.actions <= combatant.base_actions);
        }

        battle.tick(&InputFrame::idle());
        let expect_exit = zeroed == players.len();
        prop_assert_eq!(battle.phase() == Phase::Enemy, expect_exit);
    }
}
