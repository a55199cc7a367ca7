//! Error types for parameter registries and solver facades.
//!
//! Registry errors (`DuplicateKey`, `UnknownKey`, `TypeMismatch`) are programmer
//! errors: they point at a mis-registered or misspelled parameter and are
//! surfaced immediately. Backend errors carry the raw hypre error code.

use crate::backend::{Chooser, HypreInt, SolverKind};
use crate::parameters::ValueKind;
use thiserror::Error;

/// Errors that can occur while configuring or invoking a hypre solver.
#[derive(Debug, Error)]
pub enum HypreError {
    /// `add` was called with a name that is already registered.
    #[error("parameter '{name}' already exists; use set() to change its value")]
    DuplicateKey {
        /// The duplicated parameter name
        name: String,
    },

    /// `set` or `remove` was called with a name that is not registered.
    #[error("parameter '{name}' does not exist; use add() to register it")]
    UnknownKey {
        /// The missing parameter name
        name: String,
    },

    /// The value shape does not match the call signature of its setter.
    #[error("parameter '{name}': setter expects {expected} but value is {found}")]
    TypeMismatch {
        /// Parameter name
        name: String,
        /// Argument signature of the setter
        expected: &'static str,
        /// Kind of the stored value
        found: ValueKind,
    },

    /// A value derived from a parameter does not fit in a hypre integer.
    #[error("parameter '{name}': {value} does not fit in a hypre integer")]
    ValueOutOfRange {
        /// Parameter name
        name: String,
        /// The offending value
        value: usize,
    },

    /// A hypre entry point returned a nonzero error code.
    #[error("hypre {chooser} call failed with error code {code}")]
    Backend {
        /// Handle the call was made on
        chooser: Chooser,
        /// Raw hypre error code
        code: HypreInt,
    },

    /// The requested solver cannot be used in this role.
    #[error("solver {kind:?} cannot be used as {role}")]
    UnsupportedSolver {
        /// The rejected solver
        kind: SolverKind,
        /// Role it was requested for
        role: &'static str,
    },

    /// Matrix and vector sizes do not agree.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// A configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for hypre configuration and solves.
pub type Result<T> = std::result::Result<T, HypreError>;

impl HypreError {
    /// Returns `true` for errors raised by registry bookkeeping.
    ///
    /// This includes `DuplicateKey`, `UnknownKey`, `TypeMismatch` and
    /// `ValueOutOfRange`.
    pub fn is_registry_error(&self) -> bool {
        matches!(
            self,
            HypreError::DuplicateKey { .. }
                | HypreError::UnknownKey { .. }
                | HypreError::TypeMismatch { .. }
                | HypreError::ValueOutOfRange { .. }
        )
    }

    /// Returns `true` if this error came from the external library.
    pub fn is_backend_error(&self) -> bool {
        matches!(self, HypreError::Backend { .. })
    }

    /// Returns `true` if this is a type mismatch between value and setter.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, HypreError::TypeMismatch { .. })
    }
}

impl From<std::io::Error> for HypreError {
    fn from(err: std::io::Error) -> Self {
        HypreError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for HypreError {
    fn from(err: serde_json::Error) -> Self {
        HypreError::Config(err.to_string())
    }
}
