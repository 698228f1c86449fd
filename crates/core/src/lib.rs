pub mod battle;
pub mod content;
pub mod geometry;
pub mod state;
pub mod types;

pub use battle::{Battle, RangeMarker, TargetingSession};
pub use content::{ContentPack, EnemyGroup, PlayerSpec, Squad, Weapon, keys};
pub use state::{Arena, BattleState, Combatant, TacticSlot};
pub use types::*;
