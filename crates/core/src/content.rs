use serde::{Deserialize, Serialize};

use crate::types::{AttackStyle, EnemyKind, ShapeKind};

pub mod keys {
    pub const TACTIC_MOVE: &str = "tactic_move";
    pub const TACTIC_DEFEND: &str = "tactic_defend";

    pub const WEAPON_SABER: &str = "weapon_saber";
    pub const WEAPON_PIKE: &str = "weapon_pike";
    pub const WEAPON_MORTAR: &str = "weapon_mortar";
    pub const WEAPON_SHOCKWALL: &str = "weapon_shockwall";
}

/// Catalog entry for a selectable tactic. Shared, immutable data; the
/// per-phase `used` flag lives on the combatant's `TacticSlot`.
#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub key: &'static str,
    pub name: &'static str,
    pub shape: ShapeKind,
    pub style: Option<AttackStyle>,
    pub range: u32,
    pub thickness: u32,
    pub damage: i32,
    pub cost: i32,
    pub push_distance: u32,
    pub multi_target: bool,
}

pub struct EnemyStats {
    pub hp: i32,
    pub attack: i32,
    pub speed: u32,
}

pub fn enemy_stats(kind: EnemyKind) -> EnemyStats {
    match kind {
        EnemyKind::Husk => EnemyStats { hp: 12, attack: 2, speed: 8 },
        EnemyKind::Marauder => EnemyStats { hp: 20, attack: 4, speed: 6 },
        EnemyKind::Warden => EnemyStats { hp: 30, attack: 6, speed: 4 },
    }
}

pub fn enemy_name(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Husk => "Husk",
        EnemyKind::Marauder => "Marauder",
        EnemyKind::Warden => "Warden",
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub max_hp: i32,
    pub max_mana: i32,
    pub base_actions: u32,
    pub speed: u32,
    pub tactics: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnemyGroup {
    pub kind: EnemyKind,
    pub count: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Squad {
    pub groups: Vec<EnemyGroup>,
}

pub struct ContentPack {
    pub weapons: Vec<Weapon>,
    pub minigames: Vec<AttackStyle>,
}

impl ContentPack {
    pub fn build_default() -> ContentPack {
        ContentPack {
            weapons: vec![
                Weapon {
                    key: keys::TACTIC_MOVE,
                    name: "Move",
                    shape: ShapeKind::SpecialMove,
                    style: None,
                    range: 0,
                    thickness: 0,
                    damage: 0,
                    cost: 0,
                    push_distance: 0,
                    multi_target: false,
                },
                Weapon {
                    key: keys::TACTIC_DEFEND,
                    name: "Defend",
                    shape: ShapeKind::SpecialDefend,
                    style: None,
                    range: 0,
                    thickness: 0,
                    damage: 0,
                    cost: 0,
                    push_distance: 0,
                    multi_target: false,
                },
                Weapon {
                    key: keys::WEAPON_SABER,
                    name: "Saber",
                    shape: ShapeKind::Line,
                    style: Some(AttackStyle::Slash),
                    range: 2,
                    thickness: 0,
                    damage: 10,
                    cost: 1,
                    push_distance: 1,
                    multi_target: false,
                },
                Weapon {
                    key: keys::WEAPON_PIKE,
                    name: "Pike",
                    shape: ShapeKind::Line,
                    style: Some(AttackStyle::Pierce),
                    range: 3,
                    thickness: 0,
                    damage: 8,
                    cost: 2,
                    push_distance: 2,
                    multi_target: false,
                },
                Weapon {
                    key: keys::WEAPON_MORTAR,
                    name: "Mortar",
                    shape: ShapeKind::Aoe,
                    style: Some(AttackStyle::Burst),
                    range: 1,
                    thickness: 0,
                    damage: 12,
                    cost: 3,
                    push_distance: 1,
                    multi_target: true,
                },
                Weapon {
                    key: keys::WEAPON_SHOCKWALL,
                    name: "Shockwall",
                    shape: ShapeKind::Wall,
                    style: Some(AttackStyle::Sweep),
                    range: 2,
                    thickness: 3,
                    damage: 6,
                    cost: 2,
                    push_distance: 2,
                    multi_target: true,
                },
            ],
            minigames: vec![
                AttackStyle::Slash,
                AttackStyle::Pierce,
                AttackStyle::Burst,
                AttackStyle::Sweep,
            ],
        }
    }

    pub fn weapon(&self, key: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|weapon| weapon.key == key)
    }

    pub fn has_minigame(&self, style: AttackStyle) -> bool {
        self.minigames.contains(&style)
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::build_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_resolves_every_key() {
        let content = ContentPack::default();
        for key in [
            keys::TACTIC_MOVE,
            keys::TACTIC_DEFEND,
            keys::WEAPON_SABER,
            keys::WEAPON_PIKE,
            keys::WEAPON_MORTAR,
            keys::WEAPON_SHOCKWALL,
        ] {
            assert!(content.weapon(key).is_some(), "catalog is missing {key}");
        }
    }

    #[test]
    fn special_tactics_have_no_minigame_style() {
        let content = ContentPack::default();
        for key in [keys::TACTIC_MOVE, keys::TACTIC_DEFEND] {
            let weapon = content.weapon(key).expect("special tactic");
            assert_eq!(weapon.style, None, "{key} should bypass the minigame pipeline");
        }
    }

    #[test]
    fn every_catalog_style_has_a_registered_minigame() {
        let content = ContentPack::default();
        for weapon in &content.weapons {
            if let Some(style) = weapon.style {
                assert!(content.has_minigame(style), "{} has no handler", weapon.key);
            }
        }
    }

    #[test]
    fn player_spec_round_trips_through_json() {
        let raw = r#"{
            "name": "Wren",
            "max_hp": 24,
            "max_mana": 6,
            "base_actions": 3,
            "speed": 2,
            "tactics": ["tactic_move", "weapon_saber"]
        }"#;
        let spec: PlayerSpec = serde_json::from_str(raw).expect("player spec");
        assert_eq!(spec.name, "Wren");
        assert_eq!(spec.tactics.len(), 2);
        let back = serde_json::to_string(&spec).expect("serialize");
        let again: PlayerSpec = serde_json::from_str(&back).expect("reparse");
        assert_eq!(again.base_actions, 3);
    }
}
