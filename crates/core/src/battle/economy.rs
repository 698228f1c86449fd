//! Per-phase action-point and tactic bookkeeping for player combatants.
//! This module does not own when refreshes happen; the turn sequencer calls
//! them exactly once per player-phase entry.

use super::*;
use crate::content::Weapon;
use crate::state::TacticSlot;

impl Battle {
    pub(crate) fn refresh_actions(&mut self) {
        for &id in &self.state.players {
            if let Some(player) = self.state.combatants.get_mut(id) {
                player.actions = player.base_actions;
            }
        }
    }

    pub(crate) fn refresh_tactics(&mut self) {
        for &id in &self.state.players {
            if let Some(player) = self.state.combatants.get_mut(id) {
                for slot in &mut player.tactics {
                    slot.used = false;
                }
            }
        }
    }

    pub(crate) fn clear_guard_stances(&mut self) {
        for &id in &self.state.players {
            if let Some(player) = self.state.combatants.get_mut(id) {
                player.guarding = false;
            }
        }
    }

    /// Force-zeroes every player's action points. The phase exit itself fires
    /// on the next tick evaluation, keeping a single transition path.
    pub fn end_turn_now(&mut self) -> Result<(), BattleError> {
        if self.lock_battle {
            return Err(BattleError::BattleLocked);
        }
        self.deselect();
        for &id in &self.state.players {
            if let Some(player) = self.state.combatants.get_mut(id) {
                player.actions = 0;
            }
        }
        Ok(())
    }

    /// Adds a catalog tactic to every player's kit, unused.
    pub fn grant_tactic(&mut self, weapon: &Weapon) {
        for &id in &self.state.players {
            if let Some(player) = self.state.combatants.get_mut(id) {
                player.tactics.push(TacticSlot { weapon: weapon.clone(), used: false });
            }
        }
    }
}
