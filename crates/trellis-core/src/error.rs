//! Error types for Trellis.

use thiserror::Error;

/// The main error type for Trellis operations.
///
/// The taxonomy is deliberately small: a call either received an argument it
/// can never accept, or the tree was not in a state that allows the call.
/// Conditions that commonly arise from benign ordering (focusing a widget
/// that is not attached to a host yet, for instance) are not errors at all;
/// they are logged and ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrellisError {
    /// Malformed input: negative geometry, an unsupported placement, or a
    /// container operation on a widget that is not a panel.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation's preconditions are not met by the current tree state.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl TrellisError {
    /// Build an [`InvalidArgument`](Self::InvalidArgument) error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Build an [`InvalidState`](Self::InvalidState) error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Check whether this is an argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check whether this is a state error.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

/// A specialized Result type for Trellis operations.
pub type TrellisResult<T> = std::result::Result<T, TrellisError>;
