//! Result and error types for Mutcov.

use crate::coverage::CodeUnitId;
use thiserror::Error;

/// Result type for Mutcov operations
pub type MutcovResult<T> = Result<T, MutcovError>;

/// Errors that can occur in Mutcov
///
/// Only lifecycle misuse and contract violations surface here. Ordinary
/// "not found" outcomes are modelled as `Option`s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutcovError {
    /// The process-wide store was used before `init`
    #[error("Coverage store is not initialized; call init() first")]
    NotInitialized,

    /// `init` was called while a store is already active
    #[error("Coverage store is already initialized; call reset_all_static_state() before re-initializing")]
    AlreadyInitialized,

    /// Every non-negative `i32` id has been handed out
    #[error("Code unit registry exhausted after {count} registrations")]
    RegistryExhausted {
        /// Number of registered code units
        count: usize,
    },

    /// The id was never handed out by `register_class`
    #[error("Unknown code unit {id}")]
    UnknownCodeUnit {
        /// Offending id
        id: CodeUnitId,
    },

    /// Probe tables are immutable once registered
    #[error("Probes for code unit {id} are already registered")]
    ProbesAlreadyRegistered {
        /// Offending id
        id: CodeUnitId,
    },

    /// Probe index outside the registered probe table
    #[error("Probe {probe} is out of range for code unit {id} ({len} probes registered)")]
    ProbeOutOfRange {
        /// Code unit the probe belongs to
        id: CodeUnitId,
        /// Requested probe index
        probe: i32,
        /// Number of registered probes
        len: usize,
    },
}

impl MutcovError {
    /// Create an unknown code unit error
    #[must_use]
    pub const fn unknown_code_unit(id: CodeUnitId) -> Self {
        Self::UnknownCodeUnit { id }
    }

    /// Whether the error comes from lifecycle sequencing rather than bad input
    #[must_use]
    pub const fn is_lifecycle(&self) -> bool {
        matches!(self, Self::NotInitialized | Self::AlreadyInitialized)
    }
}
