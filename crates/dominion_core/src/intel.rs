//! Scanning: noisy estimates of the opposing player.

use crate::{
    FleetComposition, FleetEstimate, GameRules, Intelligence, PlayerState, ScanKind, ScanReport,
    StrategicIntent, ValidationError,
};
use rand::Rng;

/// Turns since the last scan, if any. Stored estimates never expire; staleness
/// is surfaced for display only.
pub fn scan_age(intel: &Intelligence, turn: u64) -> Option<u64> {
    intel.last_scan_turn.map(|last| turn.saturating_sub(last))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn perturbed(count: u32, factor: f64) -> u32 {
    (f64::from(count) * factor).round().max(0.0) as u32
}

/// Coarse total: a fraction of the true count, rounded.
fn basic_report(target: &PlayerState, rng: &mut impl Rng, rules: &GameRules) -> ScanReport {
    let factor = rng.gen_range(rules.basic_scan_factor_min..=rules.basic_scan_factor_max);
    ScanReport::Basic {
        estimated_total: perturbed(target.home_fleet.total(), factor),
    }
}

/// Per-class counts, each independently perturbed, plus exact structure
/// counts.
fn deep_report(target: &PlayerState, rng: &mut impl Rng, rules: &GameRules) -> ScanReport {
    let noise = rules.deep_scan_noise;
    let fleet = &target.home_fleet;
    ScanReport::Deep {
        fleet: FleetComposition::new(
            perturbed(fleet.frigates, rng.gen_range(1.0 - noise..=1.0 + noise)),
            perturbed(fleet.cruisers, rng.gen_range(1.0 - noise..=1.0 + noise)),
            perturbed(fleet.battleships, rng.gen_range(1.0 - noise..=1.0 + noise)),
        ),
        mines: target.economy.mines,
        solar_plants: target.economy.solar_plants,
    }
}

/// Qualitative intent read from fleet size, income, and structure count,
/// plus a fixed-ratio split of the fleet total.
fn advanced_report(target: &PlayerState, rules: &GameRules) -> ScanReport {
    let fleet_total = target.home_fleet.total();
    let income = target.resources.metal_income + target.resources.energy_income;
    let structures = target.economy.total_structures();

    let intent = if fleet_total >= rules.intent_fleet_threshold {
        StrategicIntent::MilitaryBuildup
    } else if structures >= rules.intent_structure_threshold
        || income >= rules.intent_income_threshold
    {
        StrategicIntent::EconomicExpansion
    } else if fleet_total <= rules.vulnerable_fleet_threshold {
        StrategicIntent::Vulnerable
    } else {
        StrategicIntent::Balanced
    };

    let [frigate_share, cruiser_share, battleship_share] = rules.advanced_scan_split;
    ScanReport::Advanced {
        intent,
        estimated_fleet: FleetComposition::new(
            perturbed(fleet_total, frigate_share),
            perturbed(fleet_total, cruiser_share),
            perturbed(fleet_total, battleship_share),
        ),
    }
}

fn estimate_from_report(report: &ScanReport) -> FleetEstimate {
    match report {
        ScanReport::Basic { estimated_total } => FleetEstimate {
            total: *estimated_total,
            per_class: None,
        },
        ScanReport::Deep { fleet, .. } => FleetEstimate {
            total: fleet.total(),
            per_class: Some(*fleet),
        },
        ScanReport::Advanced {
            estimated_fleet, ..
        } => FleetEstimate {
            total: estimated_fleet.total(),
            per_class: Some(*estimated_fleet),
        },
    }
}

/// Run one scan against the opponent's true state. The energy cost is
/// validated first; once the scan runs the cost is deducted unconditionally
/// and the scanner's stored intelligence is refreshed.
pub fn perform_scan(
    scanner: &mut PlayerState,
    target: &PlayerState,
    kind: ScanKind,
    turn: u64,
    rng: &mut impl Rng,
    rules: &GameRules,
) -> Result<ScanReport, Vec<ValidationError>> {
    let cost = rules.scan(kind).energy_cost;
    if scanner.resources.energy < cost {
        return Err(vec![ValidationError::InsufficientEnergy {
            required: cost,
            available: scanner.resources.energy,
        }]);
    }
    scanner.resources.energy -= cost;

    let report = match kind {
        ScanKind::Basic => basic_report(target, rng, rules),
        ScanKind::Deep => deep_report(target, rng, rules),
        ScanKind::Advanced => advanced_report(target, rules),
    };

    scanner.intel = Intelligence {
        last_scan_turn: Some(turn),
        known_enemy_fleet: Some(estimate_from_report(&report)),
        scan_accuracy: rules.scan(kind).accuracy,
    };
    Ok(report)
}
