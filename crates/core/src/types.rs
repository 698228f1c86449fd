use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct CombatantId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub y: i32,
    pub x: i32,
}

impl Cell {
    pub fn offset(self, direction: Direction, steps: i32) -> Cell {
        let delta = direction.delta();
        Cell { y: self.y + delta.y * steps, x: self.x + delta.x * steps }
    }
}

/// Cardinal aim direction on the arena plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> Cell {
        match self {
            Direction::Up => Cell { y: 1, x: 0 },
            Direction::Down => Cell { y: -1, x: 0 },
            Direction::Left => Cell { y: 0, x: -1 },
            Direction::Right => Cell { y: 0, x: 1 },
        }
    }

    pub fn perpendicular(self) -> Direction {
        match self {
            Direction::Up | Direction::Down => Direction::Right,
            Direction::Left | Direction::Right => Direction::Up,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Team {
    Player,
    Enemy,
}

/// The currently acting side. Mutated only by the turn sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BattleOutcome {
    Win,
    Loss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Aoe,
    Wall,
    SpecialMove,
    SpecialDefend,
}

/// Attack-minigame family a weapon dispatches to. The host registers the
/// handlers it can actually run; an unregistered style is a configuration
/// defect surfaced as a warning, never a crash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttackStyle {
    Slash,
    Pierce,
    Burst,
    Sweep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Husk,
    Marauder,
    Warden,
}

/// Identifier for one external wait (enemy act, attack minigame). Issued from
/// a monotone sequence; answering with anything but the live id is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignalId(pub u64);

/// Cursor position projected onto the arena plane by the host's camera.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlanePoint {
    pub x: f32,
    pub y: f32,
}

impl PlanePoint {
    pub fn nearest_cell(self) -> Cell {
        Cell { y: self.y.round() as i32, x: self.x.round() as i32 }
    }
}

/// One frame of player input. `confirm` and `cancel` are edge-triggered:
/// the host reports a press on exactly one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub cursor: Option<PlanePoint>,
    pub confirm: bool,
    pub cancel: bool,
}

impl InputFrame {
    pub fn idle() -> InputFrame {
        InputFrame::default()
    }

    pub fn hover(point: PlanePoint) -> InputFrame {
        InputFrame { cursor: Some(point), confirm: false, cancel: false }
    }

    pub fn confirm_at(point: PlanePoint) -> InputFrame {
        InputFrame { cursor: Some(point), confirm: true, cancel: false }
    }

    pub fn cancel_press() -> InputFrame {
        InputFrame { cursor: None, confirm: false, cancel: true }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    AwaitEnemyAct { signal: SignalId, combatant: CombatantId },
    AwaitMinigame { signal: SignalId, style: AttackStyle, actor: CombatantId },
    Over(BattleOutcome),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleError {
    NotPlayerPhase,
    BattleLocked,
    UnknownCombatant,
    NotPlayerControlled,
    CombatantActing,
    NoActionsLeft,
    InvalidTacticSlot,
    TacticAlreadyUsed,
    UnknownTactic(String),
    SignalMismatch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    PhaseChanged { phase: Phase, turn: u32 },
    EnemyActing { combatant: CombatantId },
    EnemyActTimedOut { combatant: CombatantId },
    MinigameTimedOut { actor: CombatantId },
    MissingMinigameHandler { weapon: &'static str },
    FloatingText { text: &'static str, cell: Cell },
    CombatantDamaged { combatant: CombatantId, amount: i32, remaining: i32 },
    CombatantDefeated { combatant: CombatantId },
    CombatantPushed { combatant: CombatantId, from: Cell, to: Cell },
    CombatantMoved { combatant: CombatantId, from: Cell, to: Cell },
    DefendRaised { combatant: CombatantId },
    TacticUsed { combatant: CombatantId, weapon: &'static str },
    BattleEnded { outcome: BattleOutcome },
}
