//! The session facade consumed by presentation layers.
//!
//! Owns the canonical `GameState`, the rules, the RNG, the AI policy, and
//! the bounded diagnostic log. External callers get exactly four operations:
//! submit an action, end the turn, snapshot the state, and query game-over
//! status.

use crate::actions::apply_action;
use crate::engine::{process_turn, DecisionPolicy};
use crate::{
    Action, ErrorLog, ExecutionResult, GameRules, GameState, LogKind, Side, TurnResult,
    VictoryKind,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

pub struct GameSession<R: Rng> {
    game_id: Uuid,
    state: GameState,
    rules: GameRules,
    rng: R,
    policy: Box<dyn DecisionPolicy>,
    log: ErrorLog,
}

impl GameSession<StdRng> {
    pub fn new(rules: GameRules, policy: Box<dyn DecisionPolicy>) -> Self {
        Self::with_rng(rules, StdRng::from_entropy(), policy)
    }
}

impl<R: Rng> GameSession<R> {
    /// Build a session over an explicit RNG. Seeded RNGs make entire games
    /// reproducible.
    pub fn with_rng(rules: GameRules, mut rng: R, policy: Box<dyn DecisionPolicy>) -> Self {
        let bytes: [u8; 16] = rng.gen();
        let game_id = uuid::Builder::from_random_bytes(bytes).into_uuid();
        let state = GameState::new(&rules);
        let log = ErrorLog::new(rules.error_log_capacity);
        Self {
            game_id,
            state,
            rules,
            rng,
            policy,
            log,
        }
    }

    /// Validate and apply one player action immediately. Rejections are
    /// itemized in the message and recorded in the log; state is untouched.
    pub fn submit_action(&mut self, action: &Action) -> ExecutionResult {
        match apply_action(
            &mut self.state,
            Side::Player,
            action,
            &mut self.rng,
            &self.rules,
        ) {
            Ok(result) => result,
            Err(errors) => {
                let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
                for message in &messages {
                    self.log
                        .record(self.state.turn, LogKind::Validation, message.clone());
                }
                ExecutionResult {
                    success: false,
                    message: messages.join("; "),
                    state_changed: false,
                }
            }
        }
    }

    /// Run the full turn pipeline once.
    pub fn end_turn(&mut self) -> TurnResult {
        let Self {
            state,
            rules,
            rng,
            policy,
            log,
            ..
        } = self;
        process_turn(state, policy.as_mut(), log, rng, rules)
    }

    /// Read-only snapshot of the canonical state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.log
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.outcome.map(|o| o.winner)
    }

    pub fn victory_type(&self) -> Option<VictoryKind> {
        self.state.outcome.map(|o| o.victory)
    }
}

impl<R: Rng> std::fmt::Debug for GameSession<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("game_id", &self.game_id)
            .field("turn", &self.state.turn)
            .field("game_over", &self.state.is_game_over())
            .finish_non_exhaustive()
    }
}
