//! `dominion_core` — deterministic turn-simulation core.
//!
//! No IO, no network, no globals. All randomness comes in through the
//! caller's Rng; seeding it makes whole games reproducible.

mod actions;
mod economy;
mod engine;
mod errors;
mod fleet;
mod intel;
mod movement;
mod session;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use actions::apply_action;
pub use economy::{
    add_build_order, build_cost, calculate_income, cancel_build_order, casualty_refund,
    fleet_upkeep, is_economy_stalled, process_construction, projected_income, structure_cost,
    unit_cost,
};
pub use engine::{process_turn, DecisionPolicy, IdlePolicy};
pub use errors::{ErrorLog, LogEntry, LogKind, TurnError, ValidationError};
pub use fleet::{
    battle_outcome, casualties, draw_loss_fraction, effectiveness, fleet_strength, resolve_combat,
    unit_effectiveness, CombatFactors, CombatResult, StrengthFactors,
};
pub use intel::{perform_scan, scan_age};
pub use movement::{
    fleet_eliminated, fleet_presence, launch_attack, partition_movements, returning_fleet,
    MovementPartition, PresenceOutcome,
};
pub use session::GameSession;
pub use types::*;
