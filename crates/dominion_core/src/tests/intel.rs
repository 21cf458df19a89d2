use super::*;
use crate::intel::{perform_scan, scan_age};

#[test]
fn test_scan_age() {
    let mut intel = Intelligence::default();
    assert_eq!(scan_age(&intel, 5), None);
    intel.last_scan_turn = Some(3);
    assert_eq!(scan_age(&intel, 7), Some(4));
    assert_eq!(scan_age(&intel, 3), Some(0));
}

#[test]
fn test_scan_rejects_insufficient_energy() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    state.player.resources.energy = 10;
    let result = perform_scan(
        &mut state.player,
        &state.ai,
        ScanKind::Basic,
        1,
        &mut make_rng(),
        &rules,
    );
    assert_eq!(
        result,
        Err(vec![ValidationError::InsufficientEnergy {
            required: 25,
            available: 10,
        }])
    );
    // Rejection leaves stored intelligence untouched.
    assert_eq!(state.player.intel, Intelligence::default());
    assert_eq!(state.player.resources.energy, 10);
}

#[test]
fn test_basic_scan_bounds_and_bookkeeping() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    let mut rng = make_rng();
    let report = perform_scan(&mut state.player, &state.ai, ScanKind::Basic, 4, &mut rng, &rules)
        .unwrap();

    // True total is 17; the reported total is a 0.4–1.0 fraction of it.
    let ScanReport::Basic { estimated_total } = report else {
        panic!("expected a basic report, got {report:?}");
    };
    assert!((7..=17).contains(&estimated_total), "got {estimated_total}");

    assert_eq!(state.player.resources.energy, 9975);
    assert_eq!(state.player.intel.last_scan_turn, Some(4));
    assert!((state.player.intel.scan_accuracy - 0.4).abs() < 1e-9);
    let estimate = state.player.intel.known_enemy_fleet.unwrap();
    assert_eq!(estimate.total, estimated_total);
    assert_eq!(estimate.per_class, None);
}

#[test]
fn test_deep_scan_noise_and_exact_structures() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    state.ai.home_fleet = fleet(100, 100, 100);
    state.ai.economy.mines = 5;
    state.ai.economy.solar_plants = 7;
    let mut rng = make_rng();

    let report =
        perform_scan(&mut state.player, &state.ai, ScanKind::Deep, 2, &mut rng, &rules).unwrap();
    let ScanReport::Deep {
        fleet: estimated,
        mines,
        solar_plants,
    } = report
    else {
        panic!("expected a deep report, got {report:?}");
    };

    // Per-class noise is ±10%.
    for class in UNIT_CLASSES {
        let count = estimated.count(class);
        assert!((90..=110).contains(&count), "{class} estimate {count}");
    }
    assert_eq!(mines, 5);
    assert_eq!(solar_plants, 7);

    assert_eq!(state.player.resources.energy, 9925);
    assert!((state.player.intel.scan_accuracy - 0.9).abs() < 1e-9);
    let estimate = state.player.intel.known_enemy_fleet.unwrap();
    assert_eq!(estimate.per_class, Some(estimated));
}

fn advanced_intent(target: &PlayerState, rules: &GameRules) -> StrategicIntent {
    let mut scanner = PlayerState::new(rules);
    let report = perform_scan(
        &mut scanner,
        target,
        ScanKind::Advanced,
        1,
        &mut make_rng(),
        rules,
    )
    .unwrap();
    match report {
        ScanReport::Advanced { intent, .. } => intent,
        other => panic!("expected an advanced report, got {other:?}"),
    }
}

#[test]
fn test_advanced_scan_intent_classification() {
    let rules = test_rules();
    let mut target = PlayerState::new(&rules);

    // Fleet at or above the buildup threshold dominates everything else.
    target.home_fleet = fleet(40, 0, 0);
    assert_eq!(
        advanced_intent(&target, &rules),
        StrategicIntent::MilitaryBuildup
    );

    // Heavy structure count reads as expansion.
    target.home_fleet = fleet(3, 0, 0);
    target.economy.mines = 6;
    target.economy.solar_plants = 4;
    assert_eq!(
        advanced_intent(&target, &rules),
        StrategicIntent::EconomicExpansion
    );

    // Strong income alone also reads as expansion.
    target.economy.mines = 2;
    target.economy.solar_plants = 2;
    target.resources.metal_income = 80;
    target.resources.energy_income = 60;
    assert_eq!(
        advanced_intent(&target, &rules),
        StrategicIntent::EconomicExpansion
    );

    // Tiny fleet with nothing else going on is vulnerable.
    target.resources.metal_income = 0;
    target.resources.energy_income = 0;
    assert_eq!(advanced_intent(&target, &rules), StrategicIntent::Vulnerable);

    // The starting position is balanced.
    target.home_fleet = fleet(10, 5, 2);
    assert_eq!(advanced_intent(&target, &rules), StrategicIntent::Balanced);
}

#[test]
fn test_advanced_scan_split() {
    let rules = test_rules();
    let mut state = test_state(&rules);
    state.ai.home_fleet = fleet(0, 0, 20);

    let report = perform_scan(
        &mut state.player,
        &state.ai,
        ScanKind::Advanced,
        1,
        &mut make_rng(),
        &rules,
    )
    .unwrap();
    let ScanReport::Advanced {
        estimated_fleet, ..
    } = report
    else {
        panic!("expected an advanced report, got {report:?}");
    };
    // Total 20 split 50/30/20 regardless of the true composition.
    assert_eq!(estimated_fleet, fleet(10, 6, 4));
    assert_eq!(state.player.resources.energy, 9850);
}
