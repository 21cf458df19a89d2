//! The four archetype policies.
//!
//! Each policy reads the full game state from the AI's side, recomputes its
//! threat and economic assessments, and returns one decision. Invalid
//! decisions are dropped by the orchestrator, so the policies aim to emit
//! affordable ones but do not re-run full validation.

use crate::{
    affordable_quantity, counter_class, dominant_class, economic_advantage, threat_level,
    weak_counter_class, PolicyWeights,
};
use dominion_core::{
    projected_income, scan_age, structure_cost, Action, Buildable, Decision, DecisionPolicy,
    GameRules, GameState, PlayerState, ScanKind, StructureKind, UnitClass,
};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Largest unit batch an archetype will queue in one order.
const UNIT_BATCH_CAP: u32 = 10;

fn own_and_enemy(state: &GameState) -> (&PlayerState, &PlayerState) {
    (&state.ai, &state.player)
}

/// A unit build order sized so the stock covers it and the ongoing drain
/// stays within projected income. `None` when even a single unit is too much.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn build_units(own: &PlayerState, class: UnitClass, rules: &GameRules) -> Option<Action> {
    let unit = rules.unit(class);
    let (metal_income, energy_income) = projected_income(own, rules);
    let by_metal_drain = if unit.metal_drain > 0 {
        (metal_income.max(0) / unit.metal_drain) as u32
    } else {
        UNIT_BATCH_CAP
    };
    let by_energy_drain = if unit.energy_drain > 0 {
        (energy_income.max(0) / unit.energy_drain) as u32
    } else {
        UNIT_BATCH_CAP
    };
    let quantity = affordable_quantity(own, class, UNIT_BATCH_CAP, rules)
        .min(by_metal_drain)
        .min(by_energy_drain);
    if quantity == 0 {
        return None;
    }
    Some(Action::Build {
        item: Buildable::Unit(class),
        quantity,
    })
}

/// A single-structure order, only when the stock and the projected income
/// can carry it.
fn build_structure(own: &PlayerState, kind: StructureKind, rules: &GameRules) -> Option<Action> {
    let owned = own.economy.structure_count(kind);
    let (metal_cost, energy_cost) = structure_cost(kind, owned, rules);
    if own.resources.metal < metal_cost || own.resources.energy < energy_cost {
        return None;
    }
    let structure = rules.structure(kind);
    let (metal_income, energy_income) = projected_income(own, rules);
    if metal_income < structure.metal_drain || energy_income < structure.energy_drain {
        return None;
    }
    Some(Action::Build {
        item: Buildable::Structure(kind),
        quantity: 1,
    })
}

/// Whichever structure shores up the weaker projected income.
fn build_weaker_income_structure(own: &PlayerState, rules: &GameRules) -> Option<Action> {
    let (metal_income, energy_income) = projected_income(own, rules);
    let first = if metal_income <= energy_income {
        StructureKind::Mine
    } else {
        StructureKind::SolarPlant
    };
    let second = match first {
        StructureKind::Mine => StructureKind::SolarPlant,
        StructureKind::SolarPlant => StructureKind::Mine,
    };
    build_structure(own, first, rules).or_else(|| build_structure(own, second, rules))
}

/// All-in attack with the entire home fleet.
fn full_fleet_attack(own: &PlayerState) -> Option<Action> {
    if own.home_fleet.is_empty() {
        return None;
    }
    Some(Action::Attack {
        fleet: own.home_fleet,
    })
}

/// The class that best answers the enemy's current composition. Frigates as
/// the default against an empty or unreadable fleet.
fn answer_class(enemy: &PlayerState) -> UnitClass {
    dominant_class(&enemy.home_fleet).map_or(UnitClass::Frigate, counter_class)
}

// ---------------------------------------------------------------------------
// Aggressor
// ---------------------------------------------------------------------------

/// Attacks whenever it holds any fleet advantage; invests in its economy
/// only as an afterthought.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggressor {
    pub weights: PolicyWeights,
}

impl Default for Aggressor {
    fn default() -> Self {
        Self {
            weights: PolicyWeights {
                military_focus: 0.9,
                economic_focus: 0.1,
                aggression_level: 0.85,
                deception_chance: 0.0,
                adaptive_variation: 0.15,
            },
        }
    }
}

impl DecisionPolicy for Aggressor {
    fn decide(&mut self, state: &GameState, rules: &GameRules, rng: &mut dyn RngCore) -> Decision {
        let (own, enemy) = own_and_enemy(state);
        let threat = threat_level(&own.home_fleet, &enemy.home_fleet);
        let advantage = economic_advantage(&own.resources, &enemy.resources);

        let holds_edge = threat < 1.0 || enemy.home_fleet.is_empty();
        if holds_edge && own.movements.is_empty() && rng.gen_bool(self.weights.aggression_level) {
            if let Some(action) = full_fleet_attack(own) {
                return Decision::Act(action);
            }
        }
        // Grudging economic investment, and only while falling behind.
        if advantage <= 0.0 && rng.gen_bool(self.weights.economic_focus) {
            if let Some(action) = build_weaker_income_structure(own, rules) {
                return Decision::Act(action);
            }
        }
        if let Some(action) = build_units(own, answer_class(enemy), rules) {
            return Decision::Act(action);
        }
        Decision::Wait
    }
}

// ---------------------------------------------------------------------------
// Economist
// ---------------------------------------------------------------------------

/// Grows income toward a per-resource target before anything else; attacks
/// only when the opponent looks defenseless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Economist {
    pub weights: PolicyWeights,
    /// Per-resource projected income the policy builds toward.
    pub income_target: i64,
}

impl Default for Economist {
    fn default() -> Self {
        Self {
            weights: PolicyWeights {
                military_focus: 0.15,
                economic_focus: 0.9,
                aggression_level: 0.1,
                deception_chance: 0.0,
                adaptive_variation: 0.2,
            },
            income_target: 150,
        }
    }
}

impl DecisionPolicy for Economist {
    fn decide(&mut self, state: &GameState, rules: &GameRules, rng: &mut dyn RngCore) -> Decision {
        let (own, enemy) = own_and_enemy(state);

        // Opportunistic strike on a defenseless opponent.
        let vulnerable = enemy.home_fleet.total() <= rules.vulnerable_fleet_threshold
            && own.home_fleet.total() > 2 * enemy.home_fleet.total();
        if vulnerable && own.movements.is_empty() && rng.gen_bool(self.weights.aggression_level) {
            if let Some(action) = full_fleet_attack(own) {
                return Decision::Act(action);
            }
        }

        let (metal_income, energy_income) = projected_income(own, rules);
        if (metal_income < self.income_target || energy_income < self.income_target)
            && rng.gen_bool(self.weights.economic_focus)
        {
            if let Some(action) = build_weaker_income_structure(own, rules) {
                return Decision::Act(action);
            }
        }

        // Income targets met (or a structure is unaffordable): keep a modest
        // defensive fleet growing.
        if rng.gen_bool(self.weights.military_focus) {
            if let Some(action) = build_units(own, answer_class(enemy), rules) {
                return Decision::Act(action);
            }
        }
        Decision::Wait
    }
}

// ---------------------------------------------------------------------------
// Trickster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TricksterMode {
    /// Optimal play, used to punish an opponent that stopped watching.
    Straightforward,
    /// Misleading builds and decoy scans.
    Deceptive,
}

/// Two-mode state machine. Plays deceptively while the opponent keeps
/// scanning; probabilistically drops the act once the opponent goes blind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trickster {
    pub weights: PolicyWeights,
    pub mode: TricksterMode,
    /// Turns until the next decoy scan is allowed.
    pub decoy_cooldown: u32,
    /// An enemy scan within this many turns counts as "recent".
    pub scan_recency_window: u64,
}

impl Trickster {
    const DECOY_COOLDOWN_TURNS: u32 = 4;
}

impl Default for Trickster {
    fn default() -> Self {
        Self {
            weights: PolicyWeights {
                military_focus: 0.5,
                economic_focus: 0.4,
                aggression_level: 0.5,
                deception_chance: 0.6,
                adaptive_variation: 0.4,
            },
            mode: TricksterMode::Deceptive,
            decoy_cooldown: 0,
            scan_recency_window: 5,
        }
    }
}

impl DecisionPolicy for Trickster {
    fn decide(&mut self, state: &GameState, rules: &GameRules, rng: &mut dyn RngCore) -> Decision {
        let (own, enemy) = own_and_enemy(state);
        self.decoy_cooldown = self.decoy_cooldown.saturating_sub(1);

        let enemy_scanned_recently = scan_age(&enemy.intel, state.turn)
            .is_some_and(|age| age <= self.scan_recency_window);
        if enemy_scanned_recently {
            self.mode = TricksterMode::Deceptive;
        } else if self.mode == TricksterMode::Deceptive
            && rng.gen_bool(self.weights.adaptive_variation)
        {
            // Nobody is watching: drop the act.
            self.mode = TricksterMode::Straightforward;
        }

        match self.mode {
            TricksterMode::Straightforward => {
                let threat = threat_level(&own.home_fleet, &enemy.home_fleet);
                if threat < 0.8
                    && own.movements.is_empty()
                    && rng.gen_bool(self.weights.aggression_level)
                {
                    if let Some(action) = full_fleet_attack(own) {
                        return Decision::Act(action);
                    }
                }
                if let Some(action) = build_units(own, answer_class(enemy), rules) {
                    return Decision::Act(action);
                }
            }
            TricksterMode::Deceptive => {
                if self.decoy_cooldown == 0 && rng.gen_bool(self.weights.deception_chance * 0.5) {
                    self.decoy_cooldown = Self::DECOY_COOLDOWN_TURNS;
                    return Decision::Act(Action::Scan {
                        kind: ScanKind::Basic,
                    });
                }
                // Build the matchup a watching opponent would least expect.
                let misleading = dominant_class(&enemy.home_fleet)
                    .map_or(UnitClass::Cruiser, weak_counter_class);
                if let Some(action) = build_units(own, misleading, rules) {
                    return Decision::Act(action);
                }
            }
        }
        Decision::Wait
    }
}

// ---------------------------------------------------------------------------
// Hybrid
// ---------------------------------------------------------------------------

/// Splits each turn between military and economic play by a weighted coin
/// flip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hybrid {
    pub weights: PolicyWeights,
}

impl Default for Hybrid {
    fn default() -> Self {
        Self {
            weights: PolicyWeights {
                military_focus: 0.5,
                economic_focus: 0.5,
                aggression_level: 0.5,
                deception_chance: 0.1,
                adaptive_variation: 0.3,
            },
        }
    }
}

impl DecisionPolicy for Hybrid {
    fn decide(&mut self, state: &GameState, rules: &GameRules, rng: &mut dyn RngCore) -> Decision {
        let (own, enemy) = own_and_enemy(state);
        let total = self.weights.military_focus + self.weights.economic_focus;
        let military_share = if total > 0.0 {
            self.weights.military_focus / total
        } else {
            0.5
        };

        if rng.gen_bool(military_share) {
            let threat = threat_level(&own.home_fleet, &enemy.home_fleet);
            if threat < 0.7
                && own.movements.is_empty()
                && rng.gen_bool(self.weights.aggression_level)
            {
                if let Some(action) = full_fleet_attack(own) {
                    return Decision::Act(action);
                }
            }
            if let Some(action) = build_units(own, answer_class(enemy), rules) {
                return Decision::Act(action);
            }
        } else if let Some(action) = build_weaker_income_structure(own, rules) {
            return Decision::Act(action);
        }
        Decision::Wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dominion_core::test_fixtures::{base_rules, base_state, fleet, make_rng};
    use dominion_core::Intelligence;

    fn decide_n(
        policy: &mut dyn DecisionPolicy,
        state: &GameState,
        rules: &GameRules,
        n: usize,
    ) -> Vec<Decision> {
        let mut rng = make_rng();
        (0..n).map(|_| policy.decide(state, rules, &mut rng)).collect()
    }

    #[test]
    fn test_aggressor_attacks_with_the_advantage() {
        let rules = base_rules();
        let mut state = base_state(&rules);
        state.ai.home_fleet = fleet(100, 50, 20);
        state.player.home_fleet = fleet(2, 0, 0);

        let mut policy = Aggressor::default();
        let decisions = decide_n(&mut policy, &state, &rules, 10);
        assert!(
            decisions.iter().any(|d| matches!(
                d,
                Decision::Act(Action::Attack { fleet }) if *fleet == state.ai.home_fleet
            )),
            "expected at least one full-fleet attack, got {decisions:?}"
        );
    }

    #[test]
    fn test_aggressor_holds_back_when_outmatched() {
        let rules = base_rules();
        let mut state = base_state(&rules);
        state.ai.home_fleet = fleet(2, 0, 0);
        state.player.home_fleet = fleet(100, 50, 20);

        let mut policy = Aggressor::default();
        let decisions = decide_n(&mut policy, &state, &rules, 10);
        assert!(
            decisions
                .iter()
                .all(|d| !matches!(d, Decision::Act(Action::Attack { .. }))),
            "an outmatched aggressor must not attack, got {decisions:?}"
        );
    }

    #[test]
    fn test_economist_builds_toward_income_target() {
        let rules = base_rules();
        let state = base_state(&rules);

        let mut policy = Economist::default();
        let decisions = decide_n(&mut policy, &state, &rules, 10);
        assert!(
            decisions.iter().any(|d| matches!(
                d,
                Decision::Act(Action::Build {
                    item: Buildable::Structure(_),
                    ..
                })
            )),
            "expected a structure build below target, got {decisions:?}"
        );
        assert!(
            decisions
                .iter()
                .all(|d| !matches!(d, Decision::Act(Action::Attack { .. }))),
            "no opportunistic attack against a healthy fleet, got {decisions:?}"
        );
    }

    #[test]
    fn test_economist_strikes_a_defenseless_opponent() {
        let rules = base_rules();
        let mut state = base_state(&rules);
        state.player.home_fleet = fleet(1, 0, 0);

        let mut policy = Economist {
            weights: PolicyWeights {
                aggression_level: 0.5,
                ..Economist::default().weights
            },
            ..Economist::default()
        };
        let decisions = decide_n(&mut policy, &state, &rules, 20);
        assert!(
            decisions
                .iter()
                .any(|d| matches!(d, Decision::Act(Action::Attack { .. }))),
            "expected an opportunistic attack, got {decisions:?}"
        );
    }

    #[test]
    fn test_trickster_stays_deceptive_while_watched() {
        let rules = base_rules();
        let mut state = base_state(&rules);
        state.turn = 6;
        state.player.intel = Intelligence {
            last_scan_turn: Some(5),
            known_enemy_fleet: None,
            scan_accuracy: 0.4,
        };

        let mut policy = Trickster {
            decoy_cooldown: 10,
            ..Trickster::default()
        };
        let mut rng = make_rng();
        for _ in 0..5 {
            let decision = policy.decide(&state, &rules, &mut rng);
            assert_eq!(policy.mode, TricksterMode::Deceptive);
            // Opponent leads with frigates; the deceptive answer is the
            // class frigates beat.
            assert_eq!(
                decision,
                Decision::Act(Action::Build {
                    item: Buildable::Unit(UnitClass::Cruiser),
                    quantity: 10,
                })
            );
        }
    }

    #[test]
    fn test_trickster_drops_the_act_when_unobserved() {
        let rules = base_rules();
        let state = base_state(&rules);

        let mut policy = Trickster::default();
        let mut rng = make_rng();
        for _ in 0..20 {
            policy.decide(&state, &rules, &mut rng);
            if policy.mode == TricksterMode::Straightforward {
                return;
            }
        }
        panic!("trickster never switched to straightforward play");
    }

    #[test]
    fn test_trickster_decoy_scan_respects_cooldown() {
        let rules = base_rules();
        let mut state = base_state(&rules);
        state.player.intel.last_scan_turn = Some(1);

        let mut policy = Trickster {
            weights: PolicyWeights {
                deception_chance: 1.0,
                ..Trickster::default().weights
            },
            ..Trickster::default()
        };
        let mut rng = make_rng();
        let mut scans_in_window = 0;
        for _ in 0..4 {
            let decision = policy.decide(&state, &rules, &mut rng);
            if matches!(decision, Decision::Act(Action::Scan { .. })) {
                scans_in_window += 1;
            }
        }
        // With a four-turn cooldown at most one decoy fits in four turns.
        assert!(scans_in_window <= 1, "got {scans_in_window} decoy scans");
    }

    #[test]
    fn test_hybrid_mixes_military_and_economic_play() {
        let rules = base_rules();
        let state = base_state(&rules);

        let mut policy = Hybrid::default();
        let decisions = decide_n(&mut policy, &state, &rules, 30);
        let unit_builds = decisions
            .iter()
            .filter(|d| {
                matches!(
                    d,
                    Decision::Act(Action::Build {
                        item: Buildable::Unit(_),
                        ..
                    })
                )
            })
            .count();
        let structure_builds = decisions
            .iter()
            .filter(|d| {
                matches!(
                    d,
                    Decision::Act(Action::Build {
                        item: Buildable::Structure(_),
                        ..
                    })
                )
            })
            .count();
        assert!(unit_builds > 0, "no military builds in {decisions:?}");
        assert!(structure_builds > 0, "no economic builds in {decisions:?}");
    }
}
