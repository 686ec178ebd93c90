//! Common error infrastructure for explore-core.
//!
//! Domain-specific errors (e.g. `MapError`, `StopEngineError`) live next to the
//! code that produces them. This module provides the shared classification.
//!
//! Expected outcomes of play (an impassable destination, an unreachable route,
//! a stale queued route, a player quitting a prompt) are not errors at all:
//! they are reported through the driving surface. Only collaborator failures
//! and precondition violations surface as `Err`.

use crate::state::{FeatureId, Point};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: zero-cost terrain in a configuration file
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: mover missing from the master map, feature id collision
    Internal,

    /// Fatal error - a precondition of the API was violated.
    ///
    /// Examples: evaluating stop conditions before they were configured
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or a broken collaborator.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    pub mover: Option<FeatureId>,
    pub point: Option<Point>,
    /// Step counter of the session when the error happened.
    pub step: u64,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(step: u64) -> Self {
        Self {
            mover: None,
            point: None,
            step,
        }
    }

    #[must_use]
    pub const fn with_mover(mut self, mover: FeatureId) -> Self {
        self.mover = Some(mover);
        self
    }

    #[must_use]
    pub const fn with_point(mut self, point: Point) -> Self {
        self.point = Some(point);
        self
    }
}

/// Common trait for all explore-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
