//! Shared fixtures for the battle submodule test suites.
//! This module exists to avoid repeating arena and roster setup per test.
//! It does not own production battle logic.

use super::*;
use crate::content::{ContentPack, EnemyGroup, PlayerSpec, Squad, keys};
use crate::state::Arena;

/// A flat lane arena: players spawn on the left file, enemies to the right.
pub(crate) fn lane_arena() -> Arena {
    Arena {
        x_bounds: (0, 9),
        y_bounds: (0, 3),
        player_spawns: vec![Cell { y: 0, x: 0 }, Cell { y: 1, x: 0 }],
        enemy_spawns: vec![
            Cell { y: 0, x: 3 },
            Cell { y: 1, x: 3 },
            Cell { y: 0, x: 4 },
            Cell { y: 1, x: 4 },
        ],
    }
}

pub(crate) fn scout_spec(name: &str) -> PlayerSpec {
    PlayerSpec {
        name: String::from(name),
        max_hp: 20,
        max_mana: 8,
        base_actions: 3,
        speed: 2,
        tactics: vec![
            String::from(keys::TACTIC_MOVE),
            String::from(keys::TACTIC_DEFEND),
            String::from(keys::WEAPON_SABER),
            String::from(keys::WEAPON_PIKE),
            String::from(keys::WEAPON_MORTAR),
        ],
    }
}

/// A fresh battle on the lane arena: `players` scouts vs `enemies` marauders.
pub(crate) fn skirmish(players: usize, enemies: usize) -> Battle {
    let content = ContentPack::default();
    let party: Vec<PlayerSpec> = (0..players).map(|i| scout_spec(&format!("scout_{i}"))).collect();
    let squad = Squad {
        groups: vec![EnemyGroup { kind: EnemyKind::Marauder, count: enemies as u32 }],
    };
    Battle::new(&content, &party, &squad, lane_arena()).expect("fixture battle")
}

/// Index of the combatant's tactic slot holding the given catalog key.
pub(crate) fn slot_for(battle: &Battle, id: CombatantId, key: &str) -> usize {
    battle.state().combatants[id]
        .tactics
        .iter()
        .position(|slot| slot.weapon.key == key)
        .expect("fixture kit carries the tactic")
}

pub(crate) fn at(cell: Cell) -> PlanePoint {
    PlanePoint { x: cell.x as f32, y: cell.y as f32 }
}

/// Ticks through the attack-start delay, then answers the minigame wait.
pub(crate) fn run_minigame(battle: &mut Battle, success: bool) {
    for _ in 0..(ATTACK_START_DELAY_TICKS + 5) {
        match battle.tick(&InputFrame::idle()) {
            TickStatus::AwaitMinigame { signal, .. } => {
                battle.resolve_minigame(signal, success).expect("minigame resolves");
                return;
            }
            TickStatus::Running => {}
            other => panic!("expected the minigame wait, got {other:?}"),
        }
    }
    panic!("minigame wait never surfaced");
}
