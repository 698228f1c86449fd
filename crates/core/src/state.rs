use slotmap::SlotMap;

use crate::content::Weapon;
use crate::types::*;

#[derive(Clone, Debug)]
pub struct TacticSlot {
    pub weapon: Weapon,
    pub used: bool,
}

#[derive(Clone, Debug)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub team: Team,
    pub kind: Option<EnemyKind>,
    pub pos: Cell,
    pub hp: i32,
    pub max_hp: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub actions: u32,
    pub base_actions: u32,
    pub speed: u32,
    pub acting: bool,
    pub guarding: bool,
    pub tactics: Vec<TacticSlot>,
}

#[derive(Clone, Debug)]
pub struct Arena {
    pub x_bounds: (i32, i32),
    pub y_bounds: (i32, i32),
    pub player_spawns: Vec<Cell>,
    pub enemy_spawns: Vec<Cell>,
}

impl Arena {
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x_bounds.0
            && cell.x <= self.x_bounds.1
            && cell.y >= self.y_bounds.0
            && cell.y <= self.y_bounds.1
    }

    /// The stock arena: players enter from the left file, enemies from the right.
    pub fn standard() -> Arena {
        Arena {
            x_bounds: (0, 11),
            y_bounds: (0, 7),
            player_spawns: vec![
                Cell { y: 3, x: 1 },
                Cell { y: 4, x: 1 },
                Cell { y: 2, x: 1 },
                Cell { y: 5, x: 1 },
            ],
            enemy_spawns: vec![
                Cell { y: 3, x: 9 },
                Cell { y: 4, x: 9 },
                Cell { y: 2, x: 9 },
                Cell { y: 5, x: 9 },
                Cell { y: 3, x: 10 },
                Cell { y: 4, x: 10 },
            ],
        }
    }
}

pub struct BattleState {
    pub arena: Arena,
    pub combatants: SlotMap<CombatantId, Combatant>,
    pub players: Vec<CombatantId>,
    pub enemies: Vec<CombatantId>,
}

impl BattleState {
    /// Ids in registry order: players first, then enemies, each in spawn order.
    pub fn registry_order(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.players.iter().chain(self.enemies.iter()).copied()
    }

    pub fn combatant_at(&self, cell: Cell) -> Option<CombatantId> {
        self.registry_order().find(|id| self.combatants[*id].pos == cell)
    }

    pub fn any_player_has_actions(&self) -> bool {
        self.players.iter().any(|id| self.combatants[*id].actions > 0)
    }

    /// Removes a combatant from the registry and its team roster. Returns
    /// false when the id is already gone, so removal happens exactly once.
    pub fn remove(&mut self, id: CombatantId) -> bool {
        let Some(combatant) = self.combatants.remove(id) else {
            return false;
        };
        let roster = match combatant.team {
            Team::Player => &mut self.players,
            Team::Enemy => &mut self.enemies,
        };
        roster.retain(|other| *other != id);
        true
    }
}
