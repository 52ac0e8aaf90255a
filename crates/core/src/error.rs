//! Core error model.

use thiserror::Error;

/// Result type used across the core crate.
pub type CoreResult<T> = Result<T, CoreError>;

/// Core-level error.
///
/// Keep this focused on local, deterministic failures (parsing identifiers).
/// Transport and service failures belong to the client crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A string did not name any variant of a wire enum.
    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

impl CoreError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}
