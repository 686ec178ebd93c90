//! Rules that interrupt automated route-following.
mod condition;
mod engine;

pub use condition::{
    FEATURE_PLACEHOLDER, PLAYER_PLACEHOLDER, StopCondition, StopRule, StopTemplate, StopTemplates,
};
pub use engine::{EngineState, StopConditionEngine};

use crate::error::{ErrorSeverity, GameError};
use crate::state::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StopEngineError {
    #[error("stop conditions are not configured for {0}")]
    NotConfigured(PlayerId),
}

impl GameError for StopEngineError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            StopEngineError::NotConfigured(_) => "STOP_NOT_CONFIGURED",
        }
    }
}
