//! # State Error Types
//!
//! Errors for the parts of mesa-state that touch the outside world.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  PosState mutations ──► CoreError (unknown id, illegal transition)     │
//! │                                                                         │
//! │  Config / session  ──► io, toml, serde_json errors                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StateError (this module) ← adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  View shows a notification or falls back to defaults                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mesa_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for config and session operations.
pub type StateResult<T> = Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    /// Domain rule violation bubbled up from a state operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// No home directory to derive config/data paths from.
    #[error("Could not determine the application directories")]
    NoProjectDirs,

    // =========================================================================
    // Storage Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session data: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationError> for StateError {
    fn from(err: ValidationError) -> Self {
        StateError::Core(err.into())
    }
}

impl StateError {
    /// Storage problems are recoverable by falling back to defaults.
    pub fn is_storage(&self) -> bool {
        matches!(self, StateError::Io(_) | StateError::Json(_))
    }
}
