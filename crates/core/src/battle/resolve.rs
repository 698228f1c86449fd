//! Attack commitment and resolution: a confirmed selection becomes damage,
//! pushes, and the acting combatant's retired action. This module does not
//! own marker geometry or the minigame wait countdown.

use std::collections::BTreeSet;

use super::targeting::SessionStage;
use super::*;

impl Battle {
    /// Locks the battle, charges the weapon's cost, and schedules the
    /// minigame after the fixed start delay. Targets are captured here, from
    /// whoever stands on the marker set at confirm time.
    pub(crate) fn commit_attack(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let actor = session.actor;
        let slot = session.slot;
        let Some(weapon) =
            self.state.combatants.get(actor).and_then(|c| c.tactics.get(slot)).map(|t| t.weapon.clone())
        else {
            self.deselect();
            return;
        };

        // a weapon without a runnable minigame is a content defect, not a
        // crash; report it and walk the selection back at no cost
        let style = weapon.style.filter(|style| self.minigames.contains(style));
        let Some(style) = style else {
            self.log.push(LogEvent::MissingMinigameHandler { weapon: weapon.name });
            self.deselect();
            return;
        };

        let marker_cells: BTreeSet<Cell> = {
            let Some(session) = &self.session else {
                return;
            };
            session.markers.iter().map(|marker| marker.cell).collect()
        };
        let targets: Vec<CombatantId> = self
            .state
            .registry_order()
            .filter(|id| marker_cells.contains(&self.state.combatants[*id].pos))
            .collect();

        if let Some(session) = self.session.as_mut() {
            session.targets = targets;
            session.markers.clear();
            session.stage = SessionStage::Resolving;
        }
        if let Some(combatant) = self.state.combatants.get_mut(actor) {
            combatant.mana = (combatant.mana - weapon.cost).max(0);
        }

        self.lock_battle = true;
        self.pending_wait = Some(PendingWait::AttackDelay {
            style,
            actor,
            ticks_left: ATTACK_START_DELAY_TICKS,
        });
    }

    /// Applies the committed attack's outcome and retires the action. Runs
    /// for success, failure, and minigame timeout alike; only the damage and
    /// pushes are conditional on success.
    pub(crate) fn end_attack(&mut self, success: bool) {
        self.lock_battle = false;
        self.pending_wait = None;
        let Some(session) = self.session.take() else {
            return;
        };
        let actor = session.actor;
        let Some(actor_pos) = self.state.combatants.get(actor).map(|c| c.pos) else {
            self.selected = None;
            return;
        };
        let weapon = match self
            .state
            .combatants
            .get(actor)
            .and_then(|c| c.tactics.get(session.slot))
            .map(|t| t.weapon.clone())
        {
            Some(weapon) => weapon,
            None => {
                self.selected = None;
                return;
            }
        };

        if success {
            for &target in &session.targets {
                if !self.state.combatants.contains_key(target) {
                    continue;
                }
                self.strike(target, weapon.damage);
                if self.state.combatants.contains_key(target) {
                    self.push_combatant(target, session.direction, weapon.push_distance);
                }
                if !weapon.multi_target {
                    break;
                }
            }
            self.log.push(LogEvent::FloatingText { text: "NICE!", cell: actor_pos });
        } else {
            self.log.push(LogEvent::FloatingText { text: "MISS...", cell: actor_pos });
        }

        if let Some(combatant) = self.state.combatants.get_mut(actor) {
            combatant.actions = combatant.actions.saturating_sub(1);
            combatant.acting = false;
            if let Some(tactic) = combatant.tactics.get_mut(session.slot) {
                tactic.used = true;
            }
        }
        self.log.push(LogEvent::TacticUsed { combatant: actor, weapon: weapon.name });
        self.selected = None;
    }

    /// Damages a combatant, clamping health to `[0, max]`, and removes it
    /// from the registry the moment health reaches zero. Negative amounts
    /// heal, clamped to max. Exposed so the enemy-act collaborator can apply
    /// its own effects through the same bookkeeping.
    pub fn apply_damage(&mut self, id: CombatantId, amount: i32) -> Result<(), BattleError> {
        if !self.state.combatants.contains_key(id) {
            return Err(BattleError::UnknownCombatant);
        }
        self.strike(id, amount);
        Ok(())
    }

    fn strike(&mut self, id: CombatantId, amount: i32) {
        let Some(combatant) = self.state.combatants.get_mut(id) else {
            return;
        };
        combatant.hp = (combatant.hp - amount).clamp(0, combatant.max_hp);
        let remaining = combatant.hp;
        self.log.push(LogEvent::CombatantDamaged { combatant: id, amount, remaining });
        if remaining == 0 && self.state.remove(id) {
            self.log.push(LogEvent::CombatantDefeated { combatant: id });
        }
    }

    /// Pushes a combatant up to `distance` cells, stopping at the arena edge
    /// or in front of an occupied cell.
    fn push_combatant(&mut self, id: CombatantId, direction: Direction, distance: u32) {
        if distance == 0 {
            return;
        }
        let Some(from) = self.state.combatants.get(id).map(|c| c.pos) else {
            return;
        };
        let mut to = from;
        for _ in 0..distance {
            let next = to.offset(direction, 1);
            if !self.state.arena.contains(next) || self.state.combatant_at(next).is_some() {
                break;
            }
            to = next;
        }
        if to != from {
            if let Some(combatant) = self.state.combatants.get_mut(id) {
                combatant.pos = to;
            }
            self.log.push(LogEvent::CombatantPushed { combatant: id, from, to });
        }
    }
}
