//! Engine error type.
//!
//! Configuration and snapshot errors surface when a game or state is built
//! and are final for that instance. `InvalidAction` is recoverable: the state
//! is untouched and the caller may retry with a legal action.

use thiserror::Error;

use super::action::Action;
use super::state::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurakError {
    /// `init_deck` is not a permutation of the 36 card ids.
    #[error("malformed init_deck: {reason}")]
    MalformedDeckConfig { reason: String },

    /// Unknown game parameter, or a value that does not parse.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The action is not in the legal set of the current state.
    #[error("action {action} is not legal in phase {phase:?}")]
    InvalidAction { action: Action, phase: Phase },

    /// A raw action id outside the action space.
    #[error("action id {id} is outside the action space")]
    UnknownActionId { id: u32 },

    /// The engine does not support this operation.
    #[error("{operation} is not supported")]
    UnsupportedOperation { operation: &'static str },

    /// A snapshot that does not describe a reachable state.
    #[error("corrupt snapshot: {reason}")]
    CorruptSnapshot { reason: String },
}

impl DurakError {
    pub(crate) fn malformed_deck(reason: impl Into<String>) -> Self {
        Self::MalformedDeckConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptSnapshot {
            reason: reason.into(),
        }
    }
}

/// Engine result type.
pub type Result<T> = std::result::Result<T, DurakError>;
