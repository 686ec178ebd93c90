//! Collaborator access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{FeatureId, Point};

/// A collaborator required by the current step was not supplied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("PathPlanner not available")]
    PlannerNotAvailable,

    #[error("WildlifeOracle not available")]
    WildlifeNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::PlannerNotAvailable => "ORACLE_PLANNER_NOT_AVAILABLE",
            OracleError::WildlifeNotAvailable => "ORACLE_WILDLIFE_NOT_AVAILABLE",
        }
    }
}

/// Failures reported by a map collaborator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("point {0} is outside the map")]
    OutOfBounds(Point),

    #[error("feature {0} is not on this map")]
    FeatureNotFound(FeatureId),

    #[error("refusing to store an ephemeral feature at {0}")]
    EphemeralFeature(Point),
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MapError::OutOfBounds(_) => ErrorSeverity::Validation,
            MapError::FeatureNotFound(_) | MapError::EphemeralFeature(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MapError::OutOfBounds(_) => "MAP_OUT_OF_BOUNDS",
            MapError::FeatureNotFound(_) => "MAP_FEATURE_NOT_FOUND",
            MapError::EphemeralFeature(_) => "MAP_EPHEMERAL_FEATURE",
        }
    }
}
