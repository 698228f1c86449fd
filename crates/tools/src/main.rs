use std::fs;

use anyhow::{Context, Result};
use battle_core::content::enemy_stats;
use battle_core::{
    Arena, Battle, BattleOutcome, CombatantId, ContentPack, InputFrame, Phase, PlanePoint,
    PlayerSpec, Squad, TickStatus, keys,
};
use clap::Parser;
use serde::Deserialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scenario JSON file to run
    #[arg(short, long)]
    scenario: String,

    /// Resolve every attack minigame as a miss
    #[arg(long)]
    miss: bool,

    /// Tick budget before the run is abandoned
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    party: Vec<PlayerSpec>,
    squad: Squad,
}

fn load_scenario(path: &str) -> Result<Scenario> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file: {path}"))?;
    serde_json::from_str(&data).with_context(|| "Failed to deserialize scenario JSON")
}

/// Starts a mortar shot for the first player still holding one, or yields
/// the turn. The mortar's cursor-centered footprint reaches the whole arena,
/// so the scripted driver never needs to reposition.
fn plan_player_action(battle: &mut Battle) {
    let players = battle.state().players.clone();
    for id in players {
        let combatant = &battle.state().combatants[id];
        if combatant.actions == 0 {
            continue;
        }
        let ready = combatant
            .tactics
            .iter()
            .position(|slot| slot.weapon.key == keys::WEAPON_MORTAR && !slot.used);
        if let Some(slot) = ready
            && battle.start_attack(id, slot).is_ok()
        {
            return;
        }
    }
    let _ = battle.end_turn_now();
}

fn aim_input(battle: &Battle) -> InputFrame {
    let Some(session) = battle.session() else {
        return InputFrame::idle();
    };
    if session.is_resolving() {
        return InputFrame::idle();
    }
    let Some(&enemy) = battle.state().enemies.first() else {
        return InputFrame::idle();
    };
    let target = battle.state().combatants[enemy].pos;
    let point = PlanePoint { x: target.x as f32, y: target.y as f32 };
    if session.markers().iter().any(|marker| marker.cell == target) {
        InputFrame::confirm_at(point)
    } else {
        InputFrame::hover(point)
    }
}

/// Stand-in for the enemy AI collaborator: one flat strike on the leading
/// player, scaled by the enemy kind's attack stat.
fn enemy_act(battle: &mut Battle, enemy: CombatantId) {
    let attack = battle
        .state()
        .combatants
        .get(enemy)
        .and_then(|combatant| combatant.kind)
        .map(|kind| enemy_stats(kind).attack)
        .unwrap_or(0);
    if let Some(&target) = battle.state().players.first() {
        let _ = battle.apply_damage(target, attack);
    }
}

fn drive(battle: &mut Battle, hit: bool, max_ticks: u64) -> Option<BattleOutcome> {
    for _ in 0..max_ticks {
        if battle.phase() == Phase::Player
            && battle.session().is_none()
            && !battle.is_locked()
            && battle.outcome().is_none()
        {
            plan_player_action(battle);
        }
        let input = aim_input(battle);
        match battle.tick(&input) {
            TickStatus::Over(outcome) => return Some(outcome),
            TickStatus::AwaitEnemyAct { signal, combatant } => {
                enemy_act(battle, combatant);
                battle.resolve_enemy_act(signal).ok()?;
            }
            TickStatus::AwaitMinigame { signal, .. } => {
                battle.resolve_minigame(signal, hit).ok()?;
            }
            TickStatus::Running => {}
        }
    }
    None
}

fn main() -> Result<()> {
    let args = Args::parse();

    let scenario = load_scenario(&args.scenario)?;
    let content = ContentPack::default();
    let mut battle = Battle::new(&content, &scenario.party, &scenario.squad, Arena::standard())
        .map_err(|e| anyhow::anyhow!("Battle setup failed: {e:?}"))?;

    let outcome = drive(&mut battle, !args.miss, args.max_ticks)
        .ok_or_else(|| anyhow::anyhow!("Battle did not finish within {} ticks", args.max_ticks))?;

    println!("Battle complete.");
    println!("Outcome: {outcome:?}");
    println!("Turns: {}", battle.turn());
    println!("Ticks: {}", battle.current_tick());
    println!("Survivors: {}", battle.state().players.len());
    for event in battle.log() {
        println!("  {event:?}");
    }

    Ok(())
}
