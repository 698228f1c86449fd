//! Roster spawning and initial phase entry for a new battle.
//! This module exists to isolate construction from runtime turn flow.
//! It does not own phase transitions once the battle is underway.

use slotmap::SlotMap;

use super::*;
use crate::content::{ContentPack, PlayerSpec, Squad, enemy_name, enemy_stats};
use crate::state::{Arena, BattleState, Combatant, TacticSlot};

impl Battle {
    /// Builds a battle from a party, a squad, and an arena. Party members
    /// beyond the player spawn points and squad members beyond the enemy
    /// spawn points are left out, as the arena simply has no room for them.
    pub fn new(
        content: &ContentPack,
        party: &[PlayerSpec],
        squad: &Squad,
        arena: Arena,
    ) -> Result<Battle, BattleError> {
        let mut combatants = SlotMap::with_key();
        let mut players = Vec::new();

        for (spec, spawn) in party.iter().zip(arena.player_spawns.iter()) {
            let mut tactics = Vec::with_capacity(spec.tactics.len());
            for key in &spec.tactics {
                let weapon = content
                    .weapon(key)
                    .ok_or_else(|| BattleError::UnknownTactic(key.clone()))?;
                tactics.push(TacticSlot { weapon: weapon.clone(), used: false });
            }
            let player = Combatant {
                id: CombatantId::default(),
                name: spec.name.clone(),
                team: Team::Player,
                kind: None,
                pos: *spawn,
                hp: spec.max_hp,
                max_hp: spec.max_hp,
                mana: spec.max_mana,
                max_mana: spec.max_mana,
                actions: 0,
                base_actions: spec.base_actions,
                speed: spec.speed,
                acting: false,
                guarding: false,
                tactics,
            };
            let id = combatants.insert(player);
            combatants[id].id = id;
            players.push(id);
        }

        let mut enemies = Vec::new();
        let mut spawn_index = 0;
        'squad: for group in &squad.groups {
            for _ in 0..group.count {
                let Some(&spawn) = arena.enemy_spawns.get(spawn_index) else {
                    break 'squad;
                };
                let stats = enemy_stats(group.kind);
                let enemy = Combatant {
                    id: CombatantId::default(),
                    name: String::from(enemy_name(group.kind)),
                    team: Team::Enemy,
                    kind: Some(group.kind),
                    pos: spawn,
                    hp: stats.hp,
                    max_hp: stats.hp,
                    mana: 0,
                    max_mana: 0,
                    actions: 0,
                    base_actions: 0,
                    speed: stats.speed,
                    acting: false,
                    guarding: false,
                    tactics: Vec::new(),
                };
                let id = combatants.insert(enemy);
                combatants[id].id = id;
                enemies.push(id);
                spawn_index += 1;
            }
        }

        let mut battle = Battle {
            state: BattleState { arena, combatants, players, enemies },
            minigames: content.minigames.clone(),
            phase: Phase::Player,
            flow: TurnFlow::PlayerPhase,
            selected: None,
            session: None,
            pending_wait: None,
            lock_battle: false,
            tick: 0,
            turn: 0,
            next_signal_seq: 0,
            log: Vec::new(),
        };
        battle.enter_player_phase();
        Ok(battle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::test_support::*;
    use crate::content::EnemyGroup;
    use crate::types::EnemyKind;

    #[test]
    fn new_battle_opens_in_player_phase_with_refreshed_actions() {
        let battle = skirmish(2, 2);
        assert_eq!(battle.phase(), Phase::Player);
        assert_eq!(battle.turn(), 1);
        for &id in &battle.state().players {
            let player = &battle.state().combatants[id];
            assert_eq!(player.actions, player.base_actions);
        }
    }

    #[test]
    fn party_and_squad_are_capped_by_spawn_points() {
        let content = ContentPack::default();
        let party: Vec<PlayerSpec> = (0..9).map(|i| scout_spec(&format!("p{i}"))).collect();
        let squad = Squad {
            groups: vec![EnemyGroup { kind: EnemyKind::Husk, count: 40 }],
        };
        let arena = Arena::standard();
        let player_room = arena.player_spawns.len();
        let enemy_room = arena.enemy_spawns.len();
        let battle = Battle::new(&content, &party, &squad, arena).expect("battle");
        assert_eq!(battle.state().players.len(), player_room);
        assert_eq!(battle.state().enemies.len(), enemy_room);
    }

    #[test]
    fn unknown_tactic_key_is_reported_not_skipped() {
        let content = ContentPack::default();
        let mut spec = scout_spec("Wren");
        spec.tactics.push(String::from("weapon_unforged"));
        let squad = Squad {
            groups: vec![EnemyGroup { kind: EnemyKind::Husk, count: 1 }],
        };
        let result = Battle::new(&content, &[spec], &squad, Arena::standard());
        assert_eq!(
            result.err(),
            Some(BattleError::UnknownTactic(String::from("weapon_unforged")))
        );
    }

    #[test]
    fn empty_party_is_an_immediate_loss() {
        let content = ContentPack::default();
        let squad = Squad {
            groups: vec![EnemyGroup { kind: EnemyKind::Husk, count: 1 }],
        };
        let battle = Battle::new(&content, &[], &squad, Arena::standard()).expect("battle");
        assert_eq!(battle.outcome(), Some(BattleOutcome::Loss));
    }

    #[test]
    fn empty_squad_is_an_immediate_win() {
        let content = ContentPack::default();
        let party = [scout_spec("Wren")];
        let squad = Squad { groups: Vec::new() };
        let battle = Battle::new(&content, &party, &squad, Arena::standard()).expect("battle");
        assert_eq!(battle.outcome(), Some(BattleOutcome::Win));
    }

    #[test]
    fn enemy_rosters_spawn_in_group_order() {
        let content = ContentPack::default();
        let party = [scout_spec("Wren")];
        let squad = Squad {
            groups: vec![
                EnemyGroup { kind: EnemyKind::Marauder, count: 1 },
                EnemyGroup { kind: EnemyKind::Husk, count: 2 },
            ],
        };
        let battle = Battle::new(&content, &party, &squad, Arena::standard()).expect("battle");
        let kinds: Vec<Option<EnemyKind>> = battle
            .state()
            .enemies
            .iter()
            .map(|id| battle.state().combatants[*id].kind)
            .collect();
        assert_eq!(
            kinds,
            vec![Some(EnemyKind::Marauder), Some(EnemyKind::Husk), Some(EnemyKind::Husk)]
        );
        let first = battle.state().enemies[0];
        assert!(battle.state().combatants[first].tactics.is_empty());
    }
}
