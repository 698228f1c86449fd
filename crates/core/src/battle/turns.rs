//! Phase sequencing and the per-tick cooperative step.
//! This module owns every `TurnFlow` transition and the bounded waits on
//! external collaborators. It does not own attack consequences or targeting.

use super::*;

impl Battle {
    /// One cooperative step. The host calls this once per frame, passing the
    /// current input; external work is surfaced through the returned status
    /// and answered with [`Battle::resolve_enemy_act`] /
    /// [`Battle::resolve_minigame`].
    pub fn tick(&mut self, input: &InputFrame) -> TickStatus {
        if let TurnFlow::Over(outcome) = self.flow {
            return TickStatus::Over(outcome);
        }
        self.tick += 1;

        let status = if self.pending_wait.is_some() {
            self.pending_wait_tick()
        } else if matches!(self.flow, TurnFlow::PlayerPhase) {
            self.player_phase_tick(input)
        } else {
            self.enemy_phase_tick()
        };

        if let TurnFlow::Over(outcome) = self.flow {
            return TickStatus::Over(outcome);
        }
        status.unwrap_or(TickStatus::Running)
    }

    /// The enemy-act collaborator reports completion for the given wait.
    /// A stale or superseded signal is refused without touching state.
    pub fn resolve_enemy_act(&mut self, signal: SignalId) -> Result<(), BattleError> {
        match self.pending_wait {
            Some(PendingWait::EnemyAct { signal: live, combatant, .. }) if live == signal => {
                if let Some(enemy) = self.state.combatants.get_mut(combatant) {
                    enemy.acting = false;
                }
                self.pending_wait = None;
                self.advance_enemy_queue();
                Ok(())
            }
            _ => Err(BattleError::SignalMismatch),
        }
    }

    /// The attack-minigame collaborator reports its outcome for the given
    /// wait. A stale or superseded signal is refused without touching state.
    pub fn resolve_minigame(&mut self, signal: SignalId, success: bool) -> Result<(), BattleError> {
        match self.pending_wait {
            Some(PendingWait::Minigame { signal: live, .. }) if live == signal => {
                self.pending_wait = None;
                self.end_attack(success);
                Ok(())
            }
            _ => Err(BattleError::SignalMismatch),
        }
    }

    fn pending_wait_tick(&mut self) -> Option<TickStatus> {
        let wait = self.pending_wait?;
        match wait {
            PendingWait::AttackDelay { style, actor, ticks_left } => {
                if ticks_left > 1 {
                    self.pending_wait =
                        Some(PendingWait::AttackDelay { style, actor, ticks_left: ticks_left - 1 });
                    Some(TickStatus::Running)
                } else {
                    let signal = self.next_signal();
                    self.pending_wait =
                        Some(PendingWait::Minigame { signal, style, actor, waited: 0 });
                    Some(TickStatus::AwaitMinigame { signal, style, actor })
                }
            }
            PendingWait::Minigame { signal, style, actor, waited } => {
                if waited >= MINIGAME_TIMEOUT_TICKS {
                    self.log.push(LogEvent::MinigameTimedOut { actor });
                    self.pending_wait = None;
                    self.end_attack(false);
                    Some(TickStatus::Running)
                } else {
                    self.pending_wait =
                        Some(PendingWait::Minigame { signal, style, actor, waited: waited + 1 });
                    Some(TickStatus::AwaitMinigame { signal, style, actor })
                }
            }
            PendingWait::EnemyAct { signal, combatant, waited } => {
                if waited >= ENEMY_ACT_TIMEOUT_TICKS {
                    self.log.push(LogEvent::EnemyActTimedOut { combatant });
                    if let Some(enemy) = self.state.combatants.get_mut(combatant) {
                        enemy.acting = false;
                    }
                    self.pending_wait = None;
                    self.advance_enemy_queue();
                    Some(TickStatus::Running)
                } else {
                    self.pending_wait =
                        Some(PendingWait::EnemyAct { signal, combatant, waited: waited + 1 });
                    Some(TickStatus::AwaitEnemyAct { signal, combatant })
                }
            }
        }
    }

    fn player_phase_tick(&mut self, input: &InputFrame) -> Option<TickStatus> {
        if self.state.enemies.is_empty() {
            self.finish(BattleOutcome::Win);
            return None;
        }
        if self.state.players.is_empty() {
            self.finish(BattleOutcome::Loss);
            return None;
        }

        if input.cancel && !self.lock_battle {
            self.deselect();
        }
        self.session_tick(input);

        // the exit is evaluated once per tick, after combatant state settled
        if !self.state.any_player_has_actions() && self.pending_wait.is_none() {
            self.enter_enemy_phase();
        }
        None
    }

    fn enemy_phase_tick(&mut self) -> Option<TickStatus> {
        if self.state.enemies.is_empty() {
            self.finish(BattleOutcome::Win);
            return None;
        }
        if self.state.players.is_empty() {
            self.finish(BattleOutcome::Loss);
            return None;
        }

        let (queue, mut index) = match &self.flow {
            TurnFlow::EnemyPhase { queue, next } => (queue.clone(), *next),
            _ => return None,
        };
        while let Some(&id) = queue.get(index) {
            if self.state.combatants.contains_key(id) {
                break;
            }
            index += 1;
        }
        let Some(&combatant) = queue.get(index) else {
            if self.state.players.is_empty() {
                self.finish(BattleOutcome::Loss);
            } else {
                self.enter_player_phase();
            }
            return None;
        };

        self.flow = TurnFlow::EnemyPhase { queue, next: index };
        let signal = self.next_signal();
        if let Some(enemy) = self.state.combatants.get_mut(combatant) {
            enemy.acting = true;
        }
        self.log.push(LogEvent::EnemyActing { combatant });
        self.pending_wait = Some(PendingWait::EnemyAct { signal, combatant, waited: 0 });
        Some(TickStatus::AwaitEnemyAct { signal, combatant })
    }

    pub(crate) fn enter_player_phase(&mut self) {
        self.phase = Phase::Player;
        self.turn += 1;
        self.log.push(LogEvent::PhaseChanged { phase: Phase::Player, turn: self.turn });
        if self.state.players.is_empty() {
            self.finish(BattleOutcome::Loss);
            return;
        }
        self.refresh_actions();
        self.refresh_tactics();
        self.clear_guard_stances();
        self.flow = TurnFlow::PlayerPhase;
        if self.state.enemies.is_empty() {
            self.finish(BattleOutcome::Win);
        }
    }

    fn enter_enemy_phase(&mut self) {
        self.deselect();
        self.phase = Phase::Enemy;
        self.log.push(LogEvent::PhaseChanged { phase: Phase::Enemy, turn: self.turn });
        self.flow = TurnFlow::EnemyPhase { queue: self.state.enemies.clone(), next: 0 };
    }

    pub(crate) fn advance_enemy_queue(&mut self) {
        if let TurnFlow::EnemyPhase { next, .. } = &mut self.flow {
            *next += 1;
        }
    }
}
