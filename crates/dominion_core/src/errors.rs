//! Error taxonomy and the bounded diagnostic log.

use crate::UnitClass;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// A rejected action. Validation never mutates state; callers receive the
/// full itemized list, not just the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("insufficient metal: need {required}, have {available}")]
    InsufficientMetal { required: i64, available: i64 },
    #[error("insufficient energy: need {required}, have {available}")]
    InsufficientEnergy { required: i64, available: i64 },
    #[error("order would drive projected {resource} income negative")]
    NegativeProjectedIncome { resource: &'static str },
    #[error("quantity must be greater than zero")]
    ZeroQuantity,
    #[error("attack fleet is empty")]
    EmptyAttackFleet,
    #[error("not enough {class}s at home: requested {requested}, have {available}")]
    FleetUnavailable {
        class: UnitClass,
        requested: u32,
        available: u32,
    },
    #[error("no build order at index {index}")]
    UnknownBuildOrder { index: usize },
    #[error("the game is already over")]
    GameOver,
}

/// A failure while advancing a turn. Partial mutations applied before the
/// failure are retained — turn processing is not transactional.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("cannot process a turn: the game is already over")]
    GameAlreadyOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Validation,
    AiDecision,
    TurnProcessing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u64,
    pub kind: LogKind,
    pub message: String,
}

/// Bounded ring buffer of diagnostic entries. Explicitly owned by the
/// session and passed by reference — never a process-wide global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl ErrorLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest when full.
    pub fn record(&mut self, turn: u64, kind: LogKind, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            turn,
            kind,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
