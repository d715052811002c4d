//! Error type shared by every fallible operation in the crate.
//!
//! Grammar mismatches are *not* errors: [`crate::syntax::Match::False`] is an
//! ordinary outcome. The variants below are the failures that abort the
//! operation that raised them.

use thiserror::Error;

/// Failure of a value operation.
#[derive(Debug, Error)]
pub enum ValueError {
    /// Malformed lexical input, or a token of the wrong kind where a specific
    /// one is required. Fatal to the value under construction.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// A value was asked to accept a type it structurally cannot hold.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A mutation that is not allowed on this value (e.g. a subproperty value
    /// that must be modified through its owning shorthand declaration).
    #[error("invalid modification: {0}")]
    InvalidModification(String),

    /// A conversion the value cannot perform deterministically.
    #[error("unsupported conversion: {0}")]
    UnsupportedConversion(String),

    /// An expression could not be reduced to a number.
    #[error("evaluation failed: {0}")]
    Evaluation(String),

    /// The serialization sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ValueError {
    /// Create a [`ValueError::Syntax`].
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Create a [`ValueError::TypeMismatch`].
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch(message.into())
    }

    /// Create a [`ValueError::InvalidModification`].
    pub fn invalid_modification(message: impl Into<String>) -> Self {
        Self::InvalidModification(message.into())
    }

    /// Create a [`ValueError::UnsupportedConversion`].
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedConversion(message.into())
    }

    /// Create a [`ValueError::Evaluation`].
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = ValueError> = std::result::Result<T, E>;
