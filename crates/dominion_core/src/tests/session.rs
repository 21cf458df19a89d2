use super::*;
use crate::engine::IdlePolicy;
use crate::GameSession;

fn idle_session(rules: GameRules) -> GameSession<rand_chacha::ChaCha8Rng> {
    GameSession::with_rng(rules, make_rng(), Box::new(IdlePolicy))
}

#[test]
fn test_opening_turns_end_to_end() {
    let mut session = idle_session(test_rules());
    assert_eq!(session.state().turn, 1);
    assert!(!session.is_game_over());

    let result = session.submit_action(&Action::Build {
        item: Buildable::Unit(UnitClass::Frigate),
        quantity: 10,
    });
    assert!(result.success);
    assert!(result.state_changed);
    assert!(result.message.contains("queued 10 x frigate"));
    assert_eq!(session.state().player.resources.metal, 9960);
    assert_eq!(session.state().player.resources.energy, 9980);

    let turn1 = session.end_turn();
    assert!(turn1.success);
    assert!(turn1.combat_events.is_empty());
    // Frigates take one turn; the batch lands in this turn's income phase.
    assert_eq!(session.state().player.home_fleet.frigates, 20);

    let turn2 = session.end_turn();
    assert!(turn2.success);
    assert_eq!(session.state().turn, 3);
    assert!(session.error_log().is_empty());
    assert_eq!(session.winner(), None);
    assert_eq!(session.victory_type(), None);
}

#[test]
fn test_rejected_action_is_logged_not_applied() {
    let mut session = idle_session(test_rules());
    let result = session.submit_action(&Action::Attack {
        fleet: fleet(100, 0, 0),
    });
    assert!(!result.success);
    assert!(!result.state_changed);
    assert!(result.message.contains("not enough frigates"));

    assert_eq!(session.state().player.home_fleet, fleet(10, 5, 2));
    assert!(session.state().player.movements.is_empty());
    assert_eq!(session.error_log().len(), 1);
    let entry = session.error_log().entries().next().unwrap();
    assert_eq!(entry.kind, LogKind::Validation);
}

#[test]
fn test_scan_through_session() {
    let mut session = idle_session(test_rules());
    let result = session.submit_action(&Action::Scan {
        kind: ScanKind::Basic,
    });
    assert!(result.success);
    assert!(result.message.starts_with("basic scan"));
    assert_eq!(session.state().player.resources.energy, 9975);
    assert!(session.state().player.intel.known_enemy_fleet.is_some());
}

#[test]
fn test_error_log_evicts_oldest() {
    let mut rules = test_rules();
    rules.error_log_capacity = 2;
    let mut session = idle_session(rules);

    for _ in 0..3 {
        session.submit_action(&Action::Build {
            item: Buildable::Unit(UnitClass::Frigate),
            quantity: 0,
        });
    }
    assert_eq!(session.error_log().len(), 2);
    assert_eq!(session.error_log().capacity(), 2);
}

#[test]
fn test_seeded_sessions_are_reproducible() {
    let run = || {
        let mut session = idle_session(test_rules());
        session.submit_action(&Action::Attack {
            fleet: fleet(8, 3, 1),
        });
        for _ in 0..4 {
            session.end_turn();
        }
        (session.game_id(), session.state().clone())
    };
    let (id_a, state_a) = run();
    let (id_b, state_b) = run();
    assert_eq!(id_a, id_b);
    assert_eq!(state_a, state_b);
}
