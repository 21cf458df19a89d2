//! `dominion_ai` — the AI decision engine.
//!
//! Four interchangeable archetype policies behind the core's
//! `DecisionPolicy` trait, plus the shared assessment helpers they all
//! recompute each turn. Policies read the game state and return a single
//! `Decision`; they never mutate the state themselves.

use dominion_core::{
    effectiveness, fleet_strength, FleetComposition, GameRules, PlayerState, Resources,
    StrengthFactors, UnitClass, UNIT_CLASSES,
};
use serde::{Deserialize, Serialize};

mod archetypes;

pub use archetypes::{Aggressor, Economist, Hybrid, Trickster, TricksterMode};

/// The closed set of AI behavior policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchetypeKind {
    Aggressor,
    Economist,
    Trickster,
    Hybrid,
}

impl ArchetypeKind {
    /// Construct the archetype's policy with its default weights.
    pub fn build_policy(self) -> Box<dyn dominion_core::DecisionPolicy> {
        match self {
            ArchetypeKind::Aggressor => Box::new(Aggressor::default()),
            ArchetypeKind::Economist => Box::new(Economist::default()),
            ArchetypeKind::Trickster => Box::new(Trickster::default()),
            ArchetypeKind::Hybrid => Box::new(Hybrid::default()),
        }
    }
}

impl std::fmt::Display for ArchetypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchetypeKind::Aggressor => f.write_str("aggressor"),
            ArchetypeKind::Economist => f.write_str("economist"),
            ArchetypeKind::Trickster => f.write_str("trickster"),
            ArchetypeKind::Hybrid => f.write_str("hybrid"),
        }
    }
}

/// Probability-like weights in [0, 1] biasing an archetype's random
/// branching. They tilt coin flips, they are never hard thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyWeights {
    pub military_focus: f64,
    pub economic_focus: f64,
    pub aggression_level: f64,
    pub deception_chance: f64,
    pub adaptive_variation: f64,
}

// ---------------------------------------------------------------------------
// Shared assessment helpers
// ---------------------------------------------------------------------------

/// Opposing fleet strength over own, clamped to [0, 1]. An empty own fleet
/// against any opposition reads as maximum threat.
pub fn threat_level(own: &FleetComposition, enemy: &FleetComposition) -> f64 {
    if enemy.is_empty() {
        return 0.0;
    }
    let neutral = StrengthFactors::neutral();
    let own_strength = fleet_strength(own, enemy, &neutral);
    if own_strength <= 0.0 {
        return 1.0;
    }
    let enemy_strength = fleet_strength(enemy, own, &neutral);
    (enemy_strength / own_strength).clamp(0.0, 1.0)
}

/// Normalized income differential in [-1, 1]. Positive means the assessed
/// side out-earns its opponent.
pub fn economic_advantage(own: &Resources, enemy: &Resources) -> f64 {
    let own_total = own.metal_income + own.energy_income;
    let enemy_total = enemy.metal_income + enemy.energy_income;
    let scale = own_total.abs().max(enemy_total.abs()).max(1);
    ((own_total - enemy_total) as f64 / scale as f64).clamp(-1.0, 1.0)
}

/// The most numerous class in a fleet, or `None` when the fleet is empty.
/// Ties resolve toward the heavier class.
pub fn dominant_class(fleet: &FleetComposition) -> Option<UnitClass> {
    if fleet.is_empty() {
        return None;
    }
    UNIT_CLASSES
        .into_iter()
        .max_by_key(|&class| fleet.count(class))
}

/// The class that counters `class` at full effectiveness.
pub fn counter_class(class: UnitClass) -> UnitClass {
    strongest_against(class, 1.5)
}

/// The class whose effectiveness against `class` is worst. The deliberately
/// bad pick a deceptive policy builds to mislead observers.
pub fn weak_counter_class(class: UnitClass) -> UnitClass {
    strongest_against(class, 0.7)
}

fn strongest_against(target: UnitClass, wanted: f64) -> UnitClass {
    UNIT_CLASSES
        .into_iter()
        .find(|&attacker| (effectiveness(attacker, target) - wanted).abs() < f64::EPSILON)
        .unwrap_or(target)
}

/// Whether current stock covers an upfront cost.
pub fn can_afford(resources: &Resources, metal: i64, energy: i64) -> bool {
    resources.metal >= metal && resources.energy >= energy
}

/// Largest unit batch of `class` the stock can pay for, capped at `limit`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn affordable_quantity(
    state: &PlayerState,
    class: UnitClass,
    limit: u32,
    rules: &GameRules,
) -> u32 {
    let unit = rules.unit(class);
    let by_metal = if unit.metal_cost > 0 {
        (state.resources.metal.max(0) / unit.metal_cost) as u32
    } else {
        limit
    };
    let by_energy = if unit.energy_cost > 0 {
        (state.resources.energy.max(0) / unit.energy_cost) as u32
    } else {
        limit
    };
    by_metal.min(by_energy).min(limit)
}
