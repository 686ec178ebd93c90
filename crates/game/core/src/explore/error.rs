use crate::env::{MapError, OracleError};
use crate::error::{ErrorContext, ErrorSeverity, GameError};

/// Part of an exploration step that talked to a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StepPhase {
    Locate,
    Move,
    Discover,
    Propagate,
}

/// Failures that end a step without a recoverable report.
///
/// Ordinary play outcomes (impassable tiles, unreachable or stale routes,
/// quitting a prompt) never show up here.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExploreError {
    #[error("{phase} failed: {error}")]
    Map {
        phase: StepPhase,
        context: ErrorContext,
        #[source]
        error: MapError,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ExploreError {
    pub fn map(phase: StepPhase, error: MapError) -> Self {
        Self::Map {
            phase,
            context: ErrorContext::default(),
            error,
        }
    }

    /// Records where the step was when it failed. Oracle failures carry no context.
    #[must_use]
    pub fn with_context(mut self, step_context: ErrorContext) -> Self {
        if let ExploreError::Map { context, .. } = &mut self {
            *context = step_context;
        }
        self
    }
}

impl GameError for ExploreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExploreError::Map { error, .. } => error.severity(),
            ExploreError::Oracle(error) => error.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            ExploreError::Map { context, .. } => Some(context),
            ExploreError::Oracle(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExploreError::Map { error, .. } => error.error_code(),
            ExploreError::Oracle(error) => error.error_code(),
        }
    }
}
