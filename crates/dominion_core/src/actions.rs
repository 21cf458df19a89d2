//! Action validation and immediate application.
//!
//! Both the player's submitted actions and applied AI decisions flow through
//! `apply_action`; only the error handling differs at the call sites.

use crate::economy::{add_build_order, build_cost};
use crate::intel::perform_scan;
use crate::movement::launch_attack;
use crate::{
    Action, ExecutionResult, FleetComposition, GameRules, GameState, ScanReport, Side,
    ValidationError, UNIT_CLASSES,
};
use rand::Rng;

fn validate_attack_fleet(
    home: &FleetComposition,
    fleet: &FleetComposition,
) -> Result<(), Vec<ValidationError>> {
    if fleet.is_empty() {
        return Err(vec![ValidationError::EmptyAttackFleet]);
    }
    let mut errors = Vec::new();
    for class in UNIT_CLASSES {
        let requested = fleet.count(class);
        let available = home.count(class);
        if requested > available {
            errors.push(ValidationError::FleetUnavailable {
                class,
                requested,
                available,
            });
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn scan_summary(report: &ScanReport) -> String {
    match report {
        ScanReport::Basic { estimated_total } => {
            format!("basic scan: roughly {estimated_total} enemy ships")
        }
        ScanReport::Deep {
            fleet,
            mines,
            solar_plants,
        } => format!(
            "deep scan: {} frigates, {} cruisers, {} battleships; {mines} mines, {solar_plants} solar plants",
            fleet.frigates, fleet.cruisers, fleet.battleships
        ),
        ScanReport::Advanced { intent, .. } => {
            format!("advanced scan: enemy posture reads as {intent:?}")
        }
    }
}

/// Validate one action and apply it immediately to the acting side's state.
/// Rejection returns the full itemized error list with nothing mutated.
pub fn apply_action(
    state: &mut GameState,
    side: Side,
    action: &Action,
    rng: &mut impl Rng,
    rules: &GameRules,
) -> Result<ExecutionResult, Vec<ValidationError>> {
    if state.is_game_over() {
        return Err(vec![ValidationError::GameOver]);
    }
    match action {
        Action::Build { item, quantity } => {
            let actor = state.side_mut(side);
            let (metal, energy) = build_cost(*item, *quantity, actor, rules);
            add_build_order(actor, *item, *quantity, rules)?;
            Ok(ExecutionResult {
                success: true,
                message: format!("queued {quantity} x {item} ({metal} metal, {energy} energy)"),
                state_changed: true,
            })
        }
        Action::Attack { fleet } => {
            let turn = state.turn;
            let actor = state.side_mut(side);
            validate_attack_fleet(&actor.home_fleet, fleet)?;
            actor.home_fleet = actor.home_fleet.saturating_sub(fleet);
            let movement = launch_attack(*fleet, turn, rules);
            let arrival = movement.arrival_turn;
            actor.movements.push(movement);
            Ok(ExecutionResult {
                success: true,
                message: format!("fleet launched, arriving turn {arrival}"),
                state_changed: true,
            })
        }
        Action::Scan { kind } => {
            let turn = state.turn;
            let (scanner, target) = match side {
                Side::Player => (&mut state.player, &state.ai),
                Side::Ai => (&mut state.ai, &state.player),
            };
            let report = perform_scan(scanner, target, *kind, turn, rng, rules)?;
            Ok(ExecutionResult {
                success: true,
                message: scan_summary(&report),
                state_changed: true,
            })
        }
    }
}
