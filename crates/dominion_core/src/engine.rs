//! Turn orchestration.
//!
//! Phase order is fixed and never reordered:
//! Income → AI decision → Combat → Victory check → Turn increment.
//! Player actions were already applied when they were submitted.

use crate::actions::apply_action;
use crate::economy::{calculate_income, casualty_refund, is_economy_stalled, process_construction};
use crate::fleet::resolve_combat;
use crate::movement::{fleet_eliminated, partition_movements, returning_fleet};
use crate::{
    CombatEvent, Decision, ErrorLog, GameOutcome, GamePhase, GameRules, GameState, LogKind, Side,
    TurnError, TurnResult, VictoryKind,
};
use rand::{Rng, RngCore};

/// One interchangeable AI policy. Invoked once per turn, after income and
/// construction have been applied, with full visibility of the game state.
pub trait DecisionPolicy {
    fn decide(&mut self, state: &GameState, rules: &GameRules, rng: &mut dyn RngCore) -> Decision;
}

/// Policy that never acts. Useful as a baseline and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdlePolicy;

impl DecisionPolicy for IdlePolicy {
    fn decide(
        &mut self,
        _state: &GameState,
        _rules: &GameRules,
        _rng: &mut dyn RngCore,
    ) -> Decision {
        Decision::Wait
    }
}

/// Income phase: income and construction for both players. Intelligence ages
/// implicitly — staleness is derived from the turn delta, nothing is stored.
fn income_phase(state: &mut GameState, rules: &GameRules) {
    for side in [Side::Player, Side::Ai] {
        let player = state.side_mut(side);
        calculate_income(player, rules);
        process_construction(player);
    }
}

/// AI phase: ask the policy for a decision and apply it through the same
/// validation path as player actions. An invalid decision is downgraded to a
/// wait and logged, never surfaced to the player.
fn ai_phase(
    state: &mut GameState,
    policy: &mut dyn DecisionPolicy,
    log: &mut ErrorLog,
    rng: &mut impl Rng,
    rules: &GameRules,
) {
    let decision = policy.decide(state, rules, rng);
    let Decision::Act(action) = decision else {
        return;
    };
    if let Err(errors) = apply_action(state, Side::Ai, &action, rng, rules) {
        for error in errors {
            log.record(state.turn, LogKind::AiDecision, error.to_string());
        }
    }
}

fn resolve_side_combat(
    state: &mut GameState,
    attacker_side: Side,
    rng: &mut impl Rng,
    rules: &GameRules,
    events: &mut Vec<CombatEvent>,
) {
    let turn = state.turn;
    let movements = std::mem::take(&mut state.side_mut(attacker_side).movements);
    let partition = partition_movements(movements, turn);
    state.side_mut(attacker_side).movements = partition.in_transit;

    for movement in partition.combat_due {
        let defender_side = attacker_side.opponent();
        let defender_fleet = state.side(defender_side).home_fleet;
        let result = resolve_combat(&movement.fleet, &defender_fleet, None, rng, rules);

        let defender = state.side_mut(defender_side);
        defender.home_fleet = result.defender.survivors;
        defender.has_been_attacked = true;
        let (metal, energy) = casualty_refund(&result.defender.casualties, rules);
        defender.resources.metal += metal;
        defender.resources.energy += energy;

        let attacker = state.side_mut(attacker_side);
        let (metal, energy) = casualty_refund(&result.attacker.casualties, rules);
        attacker.resources.metal += metal;
        attacker.resources.energy += energy;
        if let Some(returning) = returning_fleet(result.attacker.survivors, turn) {
            attacker.movements.push(returning);
        }

        let event = CombatEvent {
            turn,
            attacker: attacker_side,
            attacker_fleet: movement.fleet,
            defender_fleet,
            outcome: result.outcome,
            attacker_report: result.attacker,
            defender_report: result.defender,
            strength_ratio: result.strength_ratio,
        };
        state.combat_log.push(event);
        events.push(event);
    }

    for movement in partition.return_due {
        state
            .side_mut(attacker_side)
            .home_fleet
            .add(&movement.fleet);
    }
}

/// Combat phase: resolve every movement due this turn against the defender's
/// current home fleet, credit upkeep of all casualties back to each owner,
/// queue survivor returns, and merge arrived returns. Player-side movements
/// resolve before AI-side movements.
fn combat_phase(
    state: &mut GameState,
    rng: &mut impl Rng,
    rules: &GameRules,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    for attacker_side in [Side::Player, Side::Ai] {
        resolve_side_combat(state, attacker_side, rng, rules, &mut events);
    }
    events
}

fn economic_defeat(state: &GameState, side: Side) -> bool {
    let player = state.side(side);
    is_economy_stalled(player) && player.resources.metal <= 0 && player.resources.energy <= 0
}

fn military_defeat(state: &GameState, side: Side) -> bool {
    let player = state.side(side);
    fleet_eliminated(&player.home_fleet, &player.movements) && player.has_been_attacked
}

/// Economic defeat is evaluated before military defeat; when both sides
/// qualify for either category at once, the AI wins by convention.
fn victory_phase(state: &GameState) -> Option<GameOutcome> {
    if economic_defeat(state, Side::Player) {
        return Some(GameOutcome {
            winner: Side::Ai,
            victory: VictoryKind::Economic,
        });
    }
    if economic_defeat(state, Side::Ai) {
        return Some(GameOutcome {
            winner: Side::Player,
            victory: VictoryKind::Economic,
        });
    }
    if military_defeat(state, Side::Player) {
        return Some(GameOutcome {
            winner: Side::Ai,
            victory: VictoryKind::Military,
        });
    }
    if military_defeat(state, Side::Ai) {
        return Some(GameOutcome {
            winner: Side::Player,
            victory: VictoryKind::Military,
        });
    }
    None
}

/// Advance the game by one full turn.
///
/// Mutations applied before a failure are retained — there is no rollback
/// of a partially processed turn.
pub fn process_turn(
    state: &mut GameState,
    policy: &mut dyn DecisionPolicy,
    log: &mut ErrorLog,
    rng: &mut impl Rng,
    rules: &GameRules,
) -> TurnResult {
    if state.is_game_over() {
        let error = TurnError::GameAlreadyOver;
        log.record(state.turn, LogKind::TurnProcessing, error.to_string());
        return TurnResult {
            success: false,
            combat_events: Vec::new(),
            game_ended: true,
            winner: state.outcome.map(|o| o.winner),
            victory: state.outcome.map(|o| o.victory),
            errors: vec![error.to_string()],
        };
    }

    income_phase(state, rules);
    ai_phase(state, policy, log, rng, rules);
    let combat_events = combat_phase(state, rng, rules);
    state.outcome = victory_phase(state);

    if state.outcome.is_none() {
        state.turn += 1;
        state.phase = GamePhase::from_turn(state.turn, rules);
    }

    TurnResult {
        success: true,
        combat_events,
        game_ended: state.outcome.is_some(),
        winner: state.outcome.map(|o| o.winner),
        victory: state.outcome.map(|o| o.victory),
        errors: Vec::new(),
    }
}
