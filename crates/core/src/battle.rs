//! Battle session state and submodule wiring for the turn engine.
//! This file owns the `Battle` struct and the shared bookkeeping the focused
//! submodules build on.

use crate::state::BattleState;
use crate::types::*;

mod bootstrap;
mod economy;
mod hash;
mod resolve;
mod targeting;
mod turns;

#[cfg(test)]
pub(crate) mod test_support;

pub use targeting::{RangeMarker, TargetingSession};

/// Ticks between committing an attack and the minigame wait being surfaced,
/// so resolution cannot land before the host's presentation settles.
pub const ATTACK_START_DELAY_TICKS: u32 = 120;
/// Tick budget for one enemy's act before the sequencer skips it.
pub const ENEMY_ACT_TIMEOUT_TICKS: u32 = 600;
/// Tick budget for a minigame answer before the attack resolves as a miss.
pub const MINIGAME_TIMEOUT_TICKS: u32 = 1800;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TurnFlow {
    PlayerPhase,
    EnemyPhase { queue: Vec<CombatantId>, next: usize },
    Over(BattleOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PendingWait {
    EnemyAct { signal: SignalId, combatant: CombatantId, waited: u32 },
    AttackDelay { style: AttackStyle, actor: CombatantId, ticks_left: u32 },
    Minigame { signal: SignalId, style: AttackStyle, actor: CombatantId, waited: u32 },
}

/// One battle from roster spawn to win or loss. Owned by the host scene and
/// driven one cooperative step at a time through [`Battle::tick`].
pub struct Battle {
    pub(crate) state: BattleState,
    pub(crate) minigames: Vec<AttackStyle>,
    pub(crate) phase: Phase,
    pub(crate) flow: TurnFlow,
    pub(crate) selected: Option<CombatantId>,
    pub(crate) session: Option<TargetingSession>,
    pub(crate) pending_wait: Option<PendingWait>,
    pub(crate) lock_battle: bool,
    pub(crate) tick: u64,
    pub(crate) turn: u32,
    pub(crate) next_signal_seq: u64,
    pub(crate) log: Vec<LogEvent>,
}

impl Battle {
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.flow {
            TurnFlow::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Player-phase entries so far; starts at 1 for the opening phase.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn selected(&self) -> Option<CombatantId> {
        self.selected
    }

    pub fn session(&self) -> Option<&TargetingSession> {
        self.session.as_ref()
    }

    /// True while an attack is resolving and all selection input is refused.
    pub fn is_locked(&self) -> bool {
        self.lock_battle
    }

    pub(crate) fn next_signal(&mut self) -> SignalId {
        let signal = SignalId(self.next_signal_seq);
        self.next_signal_seq += 1;
        signal
    }

    pub(crate) fn finish(&mut self, outcome: BattleOutcome) {
        if matches!(self.flow, TurnFlow::Over(_)) {
            return;
        }
        self.deselect();
        self.pending_wait = None;
        self.lock_battle = false;
        self.flow = TurnFlow::Over(outcome);
        self.log.push(LogEvent::BattleEnded { outcome });
    }
}
