//! # Session Error Type
//!
//! Unified error type at the shell edge: everything a display-session
//! operation can surface to the host UI.
//!
//! ## Design
//! Core errors stay typed all the way up; the shell only wraps, never
//! stringifies. Classifier warnings are NOT errors and ride on
//! [`lane_core::Classification`] instead.

use thiserror::Error;

use crate::config::ConfigError;
use lane_core::CoreError;

/// Errors surfaced by display-session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Basket mutation or validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration load failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience type alias for Results with SessionError.
pub type SessionResult<T> = Result<T, SessionError>;
