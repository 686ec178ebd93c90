//! Collaborators the exploration core talks to.
//!
//! The map copies, the route planner, the hunting/fishing tables and the
//! random source are all external. This module defines the contracts the core
//! needs from them and [`ExploreEnv`], which bundles the read-only ones so a
//! step can reach everything without hard coupling to concrete implementations.
mod error;
mod grid;
mod map;
mod path;
mod rng;
mod wildlife;

pub use error::{MapError, OracleError};
pub use grid::GridMap;
pub use map::{MapDimensions, MapMutator, MapView, MoveOutcome};
pub use path::{PathPlanner, PlannedRoute};
pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed};
pub use wildlife::{Encounter, Encounters, WildlifeOracle};

use crate::config::ExploreConfig;

/// Aggregates the read-only collaborators of an exploration step.
#[derive(Clone, Copy)]
pub struct ExploreEnv<'a> {
    config: &'a ExploreConfig,
    rng: &'a dyn RngOracle,
    planner: Option<&'a dyn PathPlanner>,
    wildlife: Option<&'a dyn WildlifeOracle>,
}

impl<'a> ExploreEnv<'a> {
    pub fn new(config: &'a ExploreConfig, rng: &'a dyn RngOracle) -> Self {
        Self {
            config,
            rng,
            planner: None,
            wildlife: None,
        }
    }

    #[must_use]
    pub fn with_planner(mut self, planner: &'a dyn PathPlanner) -> Self {
        self.planner = Some(planner);
        self
    }

    #[must_use]
    pub fn with_wildlife(mut self, wildlife: &'a dyn WildlifeOracle) -> Self {
        self.wildlife = Some(wildlife);
        self
    }

    pub fn config(&self) -> &'a ExploreConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    /// Returns the PathPlanner, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PlannerNotAvailable` if no planner was provided.
    pub fn planner(&self) -> Result<&'a dyn PathPlanner, OracleError> {
        self.planner.ok_or(OracleError::PlannerNotAvailable)
    }

    /// Returns the WildlifeOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::WildlifeNotAvailable` if no wildlife tables were provided.
    pub fn wildlife(&self) -> Result<&'a dyn WildlifeOracle, OracleError> {
        self.wildlife.ok_or(OracleError::WildlifeNotAvailable)
    }
}

impl core::fmt::Debug for ExploreEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExploreEnv")
            .field("config", self.config)
            .field("planner", &self.planner.is_some())
            .field("wildlife", &self.wildlife.is_some())
            .finish_non_exhaustive()
    }
}
