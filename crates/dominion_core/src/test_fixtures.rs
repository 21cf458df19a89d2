//! Shared test fixtures for dominion_core and downstream crates.
//!
//! `base_rules()` is the canonical balance; tests override individual fields
//! where a scenario needs it. `make_rng()` gives every test the same seeded
//! stream so outcomes are reproducible.

use crate::engine::DecisionPolicy;
use crate::{Decision, FleetComposition, GameRules, GameState};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

pub fn base_rules() -> GameRules {
    GameRules::default()
}

pub fn base_state(rules: &GameRules) -> GameState {
    GameState::new(rules)
}

/// Deterministic RNG seeded with 42.
pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

pub fn fleet(frigates: u32, cruisers: u32, battleships: u32) -> FleetComposition {
    FleetComposition::new(frigates, cruisers, battleships)
}

/// Replays a fixed decision sequence, then waits forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPolicy {
    decisions: VecDeque<Decision>,
}

impl ScriptedPolicy {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
        }
    }
}

impl DecisionPolicy for ScriptedPolicy {
    fn decide(
        &mut self,
        _state: &GameState,
        _rules: &GameRules,
        _rng: &mut dyn RngCore,
    ) -> Decision {
        self.decisions.pop_front().unwrap_or(Decision::Wait)
    }
}
