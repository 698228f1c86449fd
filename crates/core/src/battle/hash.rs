//! Stable fingerprinting of battle state for in-process verification.
//! This module exists to keep hashing concerns out of the turn flow; the
//! tests lean on it for idempotence checks.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Battle {
    /// Hash of the durable battle state: rosters, combatant stats, phase,
    /// selection, and session footprint. Tick and signal counters are left
    /// out so two gameplay-identical states compare equal.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u32(self.turn);
        hasher.write_u8(match self.phase {
            Phase::Player => 0,
            Phase::Enemy => 1,
        });
        hasher.write_u8(match self.flow {
            TurnFlow::PlayerPhase => 0,
            TurnFlow::EnemyPhase { .. } => 1,
            TurnFlow::Over(BattleOutcome::Win) => 2,
            TurnFlow::Over(BattleOutcome::Loss) => 3,
        });
        if let TurnFlow::EnemyPhase { next, .. } = self.flow {
            hasher.write_usize(next);
        }
        hasher.write_u8(u8::from(self.lock_battle));
        hasher.write_u8(u8::from(self.selected.is_some()));

        hasher.write_usize(self.state.players.len());
        hasher.write_usize(self.state.enemies.len());
        for id in self.state.registry_order() {
            let combatant = &self.state.combatants[id];
            hasher.write_i32(combatant.pos.y);
            hasher.write_i32(combatant.pos.x);
            hasher.write_i32(combatant.hp);
            hasher.write_i32(combatant.mana);
            hasher.write_u32(combatant.actions);
            hasher.write_u8(u8::from(combatant.acting));
            hasher.write_u8(u8::from(combatant.guarding));
            for slot in &combatant.tactics {
                hasher.write_u8(u8::from(slot.used));
            }
        }

        match &self.session {
            None => hasher.write_u8(0),
            Some(session) => {
                hasher.write_u8(1);
                hasher.write_usize(session.markers.len());
                for marker in &session.markers {
                    hasher.write_i32(marker.cell.y);
                    hasher.write_i32(marker.cell.x);
                }
            }
        }
        hasher.finish()
    }
}
