//! Fleet strength and combat resolution.
//!
//! Pure functions over fleet compositions. All randomness comes in through
//! the passed-in `Rng` or through explicit `CombatFactors` for reproducible
//! resolution.

use crate::{
    BattleOutcome, FleetComposition, GameRules, LossRange, SideReport, UnitClass, UNIT_CLASSES,
};
use rand::Rng;

/// Cyclic dominance matrix: frigates over cruisers, cruisers over
/// battleships, battleships over frigates at 1.5×; the reverse pairings at
/// 0.7×; mirror matchups at 1.0×.
pub fn effectiveness(attacker: UnitClass, defender: UnitClass) -> f64 {
    use UnitClass::{Battleship, Cruiser, Frigate};
    match (attacker, defender) {
        (Frigate, Cruiser) | (Cruiser, Battleship) | (Battleship, Frigate) => 1.5,
        (Cruiser, Frigate) | (Battleship, Cruiser) | (Frigate, Battleship) => 0.7,
        _ => 1.0,
    }
}

/// Enemy-composition-weighted effectiveness of one unit class.
///
/// Returns 0.0 for an absent class and 1.0 against an empty enemy fleet.
pub fn unit_effectiveness(class: UnitClass, count: u32, enemy: &FleetComposition) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let total = enemy.total();
    if total == 0 {
        return 1.0;
    }
    UNIT_CLASSES
        .iter()
        .map(|&defender| {
            effectiveness(class, defender) * f64::from(enemy.count(defender)) / f64::from(total)
        })
        .sum()
}

/// Per-class random strength multipliers, sampled independently per class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthFactors {
    pub frigate: f64,
    pub cruiser: f64,
    pub battleship: f64,
}

impl StrengthFactors {
    pub fn neutral() -> Self {
        Self {
            frigate: 1.0,
            cruiser: 1.0,
            battleship: 1.0,
        }
    }

    pub fn sample(rng: &mut impl Rng, rules: &GameRules) -> Self {
        let range = rules.strength_factor_min..=rules.strength_factor_max;
        Self {
            frigate: rng.gen_range(range.clone()),
            cruiser: rng.gen_range(range.clone()),
            battleship: rng.gen_range(range),
        }
    }

    pub fn factor(&self, class: UnitClass) -> f64 {
        match class {
            UnitClass::Frigate => self.frigate,
            UnitClass::Cruiser => self.cruiser,
            UnitClass::Battleship => self.battleship,
        }
    }
}

/// Total attack strength of `attacker` against `defender`.
///
/// Per attacker class: count × Σ(effectiveness × defender count) × factor.
/// An empty defender counts as a 1.0× weight; an empty attacker scores 0.
pub fn fleet_strength(
    attacker: &FleetComposition,
    defender: &FleetComposition,
    factors: &StrengthFactors,
) -> f64 {
    if attacker.is_empty() {
        return 0.0;
    }
    UNIT_CLASSES
        .iter()
        .map(|&class| {
            let count = attacker.count(class);
            if count == 0 {
                return 0.0;
            }
            let weight = if defender.is_empty() {
                1.0
            } else {
                UNIT_CLASSES
                    .iter()
                    .map(|&d| effectiveness(class, d) * f64::from(defender.count(d)))
                    .sum()
            };
            f64::from(count) * weight * factors.factor(class)
        })
        .sum()
}

/// Classify the engagement by strength ratio. The same decisive constant
/// applies symmetrically to both sides; zero-vs-zero falls to the defender
/// by convention.
pub fn battle_outcome(
    attacker_strength: f64,
    defender_strength: f64,
    rules: &GameRules,
) -> BattleOutcome {
    if attacker_strength <= 0.0 {
        return BattleOutcome::DecisiveDefender;
    }
    if defender_strength <= 0.0 {
        return BattleOutcome::DecisiveAttacker;
    }
    let ratio = attacker_strength / defender_strength;
    if ratio > rules.decisive_ratio {
        BattleOutcome::DecisiveAttacker
    } else if ratio < 1.0 / rules.decisive_ratio {
        BattleOutcome::DecisiveDefender
    } else {
        BattleOutcome::CloseBattle
    }
}

fn loss_range(outcome: BattleOutcome, is_winner: bool, rules: &GameRules) -> LossRange {
    match outcome {
        BattleOutcome::CloseBattle => rules.close_battle_loss,
        BattleOutcome::DecisiveAttacker | BattleOutcome::DecisiveDefender => {
            if is_winner {
                rules.decisive_winner_loss
            } else {
                rules.decisive_loser_loss
            }
        }
    }
}

/// Draw the single loss fraction for one side of a resolved battle.
pub fn draw_loss_fraction(
    outcome: BattleOutcome,
    is_winner: bool,
    rng: &mut impl Rng,
    rules: &GameRules,
) -> f64 {
    let range = loss_range(outcome, is_winner, rules);
    rng.gen_range(range.min..=range.max)
}

/// Apply one loss fraction uniformly across every unit class. Per-class
/// casualties are floored; the remainder survives, so
/// `casualties + survivors == original` holds per class exactly.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn casualties(fleet: &FleetComposition, fraction: f64) -> SideReport {
    let mut report = SideReport {
        casualties: FleetComposition::default(),
        survivors: FleetComposition::default(),
    };
    for class in UNIT_CLASSES {
        let count = fleet.count(class);
        let lost = (f64::from(count) * fraction).floor() as u32;
        let lost = lost.min(count);
        *report.casualties.count_mut(class) = lost;
        *report.survivors.count_mut(class) = count - lost;
    }
    report
}

/// Result of one resolved engagement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatResult {
    pub outcome: BattleOutcome,
    pub strength_ratio: f64,
    pub attacker: SideReport,
    pub defender: SideReport,
}

/// Explicit inputs for deterministic combat resolution. Any field left
/// unset is drawn from the RNG.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CombatFactors {
    pub attacker_factors: Option<StrengthFactors>,
    pub defender_factors: Option<StrengthFactors>,
    pub attacker_loss: Option<f64>,
    pub defender_loss: Option<f64>,
}

/// Resolve one engagement: strengths, outcome, then casualties for both
/// sides. The attacker is the winner only on a decisive-attacker outcome;
/// in a close battle both sides use the close-battle loss range.
pub fn resolve_combat(
    attacker: &FleetComposition,
    defender: &FleetComposition,
    factors: Option<&CombatFactors>,
    rng: &mut impl Rng,
    rules: &GameRules,
) -> CombatResult {
    let supplied = factors.copied().unwrap_or_default();
    let attacker_factors = supplied
        .attacker_factors
        .unwrap_or_else(|| StrengthFactors::sample(rng, rules));
    let defender_factors = supplied
        .defender_factors
        .unwrap_or_else(|| StrengthFactors::sample(rng, rules));

    let attacker_strength = fleet_strength(attacker, defender, &attacker_factors);
    let defender_strength = fleet_strength(defender, attacker, &defender_factors);
    let outcome = battle_outcome(attacker_strength, defender_strength, rules);

    let strength_ratio = if defender_strength > 0.0 {
        attacker_strength / defender_strength
    } else if attacker_strength > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    let attacker_fraction = supplied.attacker_loss.unwrap_or_else(|| {
        draw_loss_fraction(outcome, outcome == BattleOutcome::DecisiveAttacker, rng, rules)
    });
    let defender_fraction = supplied.defender_loss.unwrap_or_else(|| {
        draw_loss_fraction(outcome, outcome == BattleOutcome::DecisiveDefender, rng, rules)
    });

    CombatResult {
        outcome,
        strength_ratio,
        attacker: casualties(attacker, attacker_fraction),
        defender: casualties(defender, defender_fraction),
    }
}
