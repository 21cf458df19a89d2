use super::*;
use crate::actions::apply_action;
use crate::engine::{process_turn, IdlePolicy};

#[test]
fn test_idle_turn_advances_state() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    let mut log = new_log(&rules);
    let mut rng = make_rng();
    let mut policy = IdlePolicy;

    let result = process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    assert!(result.success);
    assert!(result.combat_events.is_empty());
    assert!(!result.game_ended);
    assert_eq!(state.turn, 2);
    assert_eq!(state.player.resources.metal, 10_091);
    assert_eq!(state.ai.resources.energy, 10_072);
    assert!(log.is_empty());
}

#[test]
fn test_phase_transitions_follow_turn_count() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    let mut log = new_log(&rules);
    let mut rng = make_rng();
    let mut policy = IdlePolicy;

    assert_eq!(state.phase, GamePhase::Early);
    for _ in 0..9 {
        process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    }
    assert_eq!(state.turn, 10);
    assert_eq!(state.phase, GamePhase::Mid);
}

#[test]
fn test_attack_pipeline_launch_resolve_return() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    let mut log = new_log(&rules);
    let mut rng = make_rng();
    let mut policy = IdlePolicy;

    let attack = Action::Attack {
        fleet: fleet(5, 0, 0),
    };
    let result = apply_action(&mut state, Side::Player, &attack, &mut rng, &rules).unwrap();
    assert!(result.success);
    assert_eq!(state.player.home_fleet, fleet(5, 5, 2));
    assert_eq!(state.player.movements.len(), 1);

    // Turn 1: the fleet is still outbound, nothing resolves.
    let turn1 = process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    assert!(turn1.combat_events.is_empty());
    assert_eq!(state.turn, 2);

    // Turn 2: arrival. One engagement against the AI home fleet.
    let turn2 = process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    assert_eq!(turn2.combat_events.len(), 1);
    let event = turn2.combat_events[0];
    assert_eq!(event.turn, 2);
    assert_eq!(event.attacker, Side::Player);
    assert_eq!(event.attacker_fleet, fleet(5, 0, 0));
    assert_eq!(event.defender_fleet, fleet(10, 5, 2));
    assert_conserved(&event.attacker_fleet, &event.attacker_report);
    assert_conserved(&event.defender_fleet, &event.defender_report);
    assert!(state.ai.has_been_attacked);
    assert!(!state.player.has_been_attacked);
    assert_eq!(state.combat_log.len(), 1);
    assert_eq!(state.ai.home_fleet, event.defender_report.survivors);

    // Turn 3: survivors, if any, merge back into the home fleet.
    process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    assert!(state.player.movements.is_empty());
    let survivors = event.attacker_report.survivors.total();
    assert_eq!(state.player.home_fleet.total(), 12 + survivors);
}

#[test]
fn test_casualty_refund_credited_to_both_sides() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    let mut log = new_log(&rules);
    let mut rng = make_rng();
    let mut policy = IdlePolicy;

    let attack = Action::Attack {
        fleet: fleet(0, 5, 2),
    };
    apply_action(&mut state, Side::Player, &attack, &mut rng, &rules).unwrap();
    process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);

    let player_metal_before = state.player.resources.metal;
    let ai_metal_before = state.ai.resources.metal;
    let player_income = state.player.resources.metal_income;

    let turn2 = process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    let event = turn2.combat_events[0];
    let (player_refund, _) = crate::economy::casualty_refund(&event.attacker_report.casualties, &rules);
    let (ai_refund, _) = crate::economy::casualty_refund(&event.defender_report.casualties, &rules);

    // Income for turn 2 lands first, then the refund.
    assert_eq!(
        state.player.resources.metal,
        player_metal_before + player_income + player_refund
    );
    assert_eq!(
        state.ai.resources.metal,
        ai_metal_before + state.ai.resources.metal_income + ai_refund
    );
}

#[test]
fn test_ai_policy_decision_is_applied() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    let mut log = new_log(&rules);
    let mut rng = make_rng();
    let mut policy = ScriptedPolicy::new([Decision::Act(Action::Build {
        item: Buildable::Unit(UnitClass::Frigate),
        quantity: 5,
    })]);

    let result = process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    assert!(result.success);
    assert_eq!(state.ai.economy.build_queue.len(), 1);
    // Income (91/72) lands before the decision, then the cost (20/10).
    assert_eq!(state.ai.resources.metal, 10_071);
    assert_eq!(state.ai.resources.energy, 10_062);
    assert!(log.is_empty());
}

#[test]
fn test_invalid_ai_decision_is_logged_and_dropped() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    let mut log = new_log(&rules);
    let mut rng = make_rng();
    let mut policy = ScriptedPolicy::new([Decision::Act(Action::Attack {
        fleet: fleet(999, 0, 0),
    })]);

    let result = process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    // The turn still succeeds; the bad decision only leaves a log entry.
    assert!(result.success);
    assert!(result.errors.is_empty());
    assert!(state.ai.movements.is_empty());
    assert_eq!(log.len(), 1);
    let entry = log.entries().next().unwrap();
    assert_eq!(entry.kind, LogKind::AiDecision);
    assert_eq!(entry.turn, 1);
}

#[test]
fn test_economic_defeat_of_ai() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    let mut log = new_log(&rules);
    let mut rng = make_rng();
    let mut policy = IdlePolicy;

    // Upkeep of 200 battleships swamps the AI's income; its stock is already
    // near the floor.
    state.ai.home_fleet = fleet(0, 0, 200);
    state.ai.resources.metal = -900;
    state.ai.resources.energy = -900;

    let result = process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    assert!(result.game_ended);
    assert_eq!(result.winner, Some(Side::Player));
    assert_eq!(result.victory, Some(VictoryKind::Economic));
    assert!(state.is_game_over());
    // The turn counter freezes once the game ends.
    assert_eq!(state.turn, 1);
}

#[test]
fn test_military_defeat_requires_prior_attack() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    let mut log = new_log(&rules);
    let mut rng = make_rng();
    let mut policy = IdlePolicy;

    state.ai.home_fleet = FleetComposition::default();
    let result = process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    // An empty fleet that was never attacked is not a defeat.
    assert!(!result.game_ended);

    state.ai.has_been_attacked = true;
    let result = process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    assert!(result.game_ended);
    assert_eq!(result.winner, Some(Side::Player));
    assert_eq!(result.victory, Some(VictoryKind::Military));
}

#[test]
fn test_economic_defeat_checked_before_military() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    let mut log = new_log(&rules);
    let mut rng = make_rng();
    let mut policy = IdlePolicy;

    // Player is economically dead; the AI is militarily dead. The economic
    // check runs first, so the AI takes the game.
    state.player.home_fleet = fleet(0, 0, 200);
    state.player.resources.metal = -900;
    state.player.resources.energy = -900;
    state.ai.home_fleet = FleetComposition::default();
    state.ai.has_been_attacked = true;

    let result = process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    assert!(result.game_ended);
    assert_eq!(result.winner, Some(Side::Ai));
    assert_eq!(result.victory, Some(VictoryKind::Economic));
}

#[test]
fn test_turn_after_game_over_fails() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    let mut log = new_log(&rules);
    let mut rng = make_rng();
    let mut policy = IdlePolicy;

    state.outcome = Some(GameOutcome {
        winner: Side::Player,
        victory: VictoryKind::Military,
    });
    let result = process_turn(&mut state, &mut policy, &mut log, &mut rng, &rules);
    assert!(!result.success);
    assert!(result.game_ended);
    assert_eq!(result.winner, Some(Side::Player));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(log.len(), 1);
    assert_eq!(log.entries().next().unwrap().kind, LogKind::TurnProcessing);
    // Nothing was processed.
    assert_eq!(state.turn, 1);
    assert_eq!(state.player.resources.metal, 10_000);
}
