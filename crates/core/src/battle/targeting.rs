//! Cursor-driven targeting sessions: from a chosen weapon to confirmed cells.
//! This module owns selection guards, direction quantization, and the range
//! marker lifecycle. It does not own damage application or the minigame wait.

use super::*;
use crate::geometry;

/// One targetable cell while a session is live, annotated with whoever is
/// standing on it. The whole set is regenerated on any parameter change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeMarker {
    pub cell: Cell,
    pub occupant: Option<CombatantId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::battle) enum SessionStage {
    AwaitingInput,
    Resolving,
}

/// The single live targeting operation. At most one exists per battle;
/// starting another tears this one down first.
pub struct TargetingSession {
    pub(in crate::battle) actor: CombatantId,
    pub(in crate::battle) slot: usize,
    pub(in crate::battle) shape: ShapeKind,
    pub(in crate::battle) direction: Direction,
    pub(in crate::battle) hover: Option<Cell>,
    pub(in crate::battle) markers: Vec<RangeMarker>,
    pub(in crate::battle) targets: Vec<CombatantId>,
    pub(in crate::battle) stage: SessionStage,
}

impl TargetingSession {
    pub fn actor(&self) -> CombatantId {
        self.actor
    }

    pub fn tactic_slot(&self) -> usize {
        self.slot
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn markers(&self) -> &[RangeMarker] {
        &self.markers
    }

    pub fn is_resolving(&self) -> bool {
        self.stage == SessionStage::Resolving
    }
}

/// Dominant-axis quantization of a cursor point into a cardinal aim.
/// Ties go to the vertical axis; a zero offset aims up.
fn quantize_direction(origin: Cell, point: PlanePoint) -> Direction {
    let dx = point.x - origin.x as f32;
    let dy = point.y - origin.y as f32;
    if dx.abs() > dy.abs() {
        if dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if dy >= 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

impl Battle {
    /// Focuses a player combatant. Refused while any tactic is in use; an
    /// explicit cancel or a new `start_attack` is the way out of a session.
    pub fn select_combatant(&mut self, id: CombatantId) -> Result<(), BattleError> {
        if self.phase != Phase::Player {
            return Err(BattleError::NotPlayerPhase);
        }
        if self.lock_battle {
            return Err(BattleError::BattleLocked);
        }
        if self.session.is_some() {
            return Err(BattleError::CombatantActing);
        }
        let Some(combatant) = self.state.combatants.get(id) else {
            return Err(BattleError::UnknownCombatant);
        };
        if combatant.team != Team::Player {
            return Err(BattleError::NotPlayerControlled);
        }
        if combatant.acting {
            return Err(BattleError::CombatantActing);
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Returns the battle to neutral selection state: tears down any live
    /// session, releases its markers, and clears the acting flag. Safe to
    /// call repeatedly; the second call finds nothing to do.
    pub fn deselect(&mut self) {
        if let Some(session) = self.session.take()
            && let Some(actor) = self.state.combatants.get_mut(session.actor)
        {
            actor.acting = false;
        }
        self.selected = None;
    }

    /// Binds a weapon to an acting combatant and opens the targeting session
    /// for it. Any earlier session is cancelled before new markers are drawn.
    pub fn start_attack(&mut self, actor: CombatantId, slot: usize) -> Result<(), BattleError> {
        if self.phase != Phase::Player {
            return Err(BattleError::NotPlayerPhase);
        }
        if self.lock_battle {
            return Err(BattleError::BattleLocked);
        }
        let Some(combatant) = self.state.combatants.get(actor) else {
            return Err(BattleError::UnknownCombatant);
        };
        if combatant.team != Team::Player {
            return Err(BattleError::NotPlayerControlled);
        }
        let Some(tactic) = combatant.tactics.get(slot) else {
            return Err(BattleError::InvalidTacticSlot);
        };
        if tactic.used {
            return Err(BattleError::TacticAlreadyUsed);
        }
        if combatant.actions == 0 {
            return Err(BattleError::NoActionsLeft);
        }
        let shape = tactic.weapon.shape;

        self.deselect();
        self.selected = Some(actor);

        if shape == ShapeKind::SpecialDefend {
            // defend-in-place: a zero-target selection, confirmed on the spot
            if let Some(combatant) = self.state.combatants.get_mut(actor) {
                combatant.guarding = true;
                combatant.actions = 0;
            }
            self.log.push(LogEvent::DefendRaised { combatant: actor });
            self.deselect();
            return Ok(());
        }

        if let Some(combatant) = self.state.combatants.get_mut(actor) {
            combatant.acting = true;
        }
        self.session = Some(TargetingSession {
            actor,
            slot,
            shape,
            direction: Direction::Up,
            hover: None,
            markers: Vec::new(),
            targets: Vec::new(),
            stage: SessionStage::AwaitingInput,
        });
        self.rebuild_markers();
        Ok(())
    }

    /// One input step of the live session: re-aim, re-center, confirm.
    pub(crate) fn session_tick(&mut self, input: &InputFrame) {
        let Some(session) = &self.session else {
            return;
        };
        if session.stage == SessionStage::Resolving {
            return;
        }
        let shape = session.shape;
        let Some(actor_pos) = self.state.combatants.get(session.actor).map(|c| c.pos) else {
            self.deselect();
            return;
        };

        match shape {
            ShapeKind::Line | ShapeKind::Wall => {
                if let Some(point) = input.cursor {
                    let aim = quantize_direction(actor_pos, point);
                    if self.session.as_ref().is_some_and(|s| s.direction != aim) {
                        if let Some(session) = self.session.as_mut() {
                            session.direction = aim;
                        }
                        self.rebuild_markers();
                    }
                }
            }
            ShapeKind::Aoe => {
                // the candidate center follows the hovered cell continuously
                if let Some(point) = input.cursor {
                    let center = point.nearest_cell();
                    if self.session.as_ref().is_some_and(|s| s.hover != Some(center)) {
                        if let Some(session) = self.session.as_mut() {
                            session.hover = Some(center);
                        }
                        self.rebuild_markers();
                    }
                }
            }
            ShapeKind::SpecialMove | ShapeKind::SpecialDefend => {}
        }

        if input.confirm
            && let Some(point) = input.cursor
        {
            let cell = point.nearest_cell();
            let picked = self
                .session
                .as_ref()
                .and_then(|s| s.markers.iter().find(|marker| marker.cell == cell).copied());
            // a confirm off the marker set is ignored and the session stays open
            if let Some(marker) = picked {
                self.select_space(marker);
            }
        }
    }

    fn select_space(&mut self, marker: RangeMarker) {
        let Some(session) = &self.session else {
            return;
        };
        let actor = session.actor;
        match session.shape {
            ShapeKind::SpecialMove => {
                if marker.occupant.is_some() {
                    return;
                }
                let Some(combatant) = self.state.combatants.get_mut(actor) else {
                    self.deselect();
                    return;
                };
                let from = combatant.pos;
                combatant.pos = marker.cell;
                combatant.actions = combatant.actions.saturating_sub(1);
                self.log.push(LogEvent::CombatantMoved { combatant: actor, from, to: marker.cell });
                self.deselect();
            }
            ShapeKind::SpecialDefend => {}
            ShapeKind::Line | ShapeKind::Aoe | ShapeKind::Wall => self.commit_attack(),
        }
    }

    /// Regenerates the marker set from the session's current geometry inputs,
    /// clipped to the arena. Always wholesale; markers are never patched.
    pub(crate) fn rebuild_markers(&mut self) {
        let markers = {
            let Some(session) = &self.session else {
                return;
            };
            let Some(actor) = self.state.combatants.get(session.actor) else {
                return;
            };
            let Some(tactic) = actor.tactics.get(session.slot) else {
                return;
            };
            let weapon = &tactic.weapon;
            let cells = match session.shape {
                ShapeKind::Line => geometry::line_cells(actor.pos, session.direction, weapon.range),
                ShapeKind::Wall => {
                    geometry::wall_cells(actor.pos, session.direction, weapon.range, weapon.thickness)
                }
                ShapeKind::Aoe => match session.hover {
                    Some(center) => geometry::aoe_cells(center, weapon.range),
                    None => Vec::new(),
                },
                ShapeKind::SpecialMove => geometry::aoe_cells(actor.pos, actor.speed),
                ShapeKind::SpecialDefend => Vec::new(),
            };
            cells
                .into_iter()
                .filter(|cell| self.state.arena.contains(*cell))
                .map(|cell| RangeMarker { cell, occupant: self.state.combatant_at(cell) })
                .collect()
        };
        if let Some(session) = self.session.as_mut() {
            session.markers = markers;
        }
    }
}
