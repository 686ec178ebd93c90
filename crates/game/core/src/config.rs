//! Tunable parameters of the exploration rules.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Terrain;

/// Invalid configuration values. Always a validation failure at load time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("base cost for {0} must be at least 1")]
    ZeroTerrainCost(Terrain),

    #[error("notice die must have at least 2 sides, got {0}")]
    NoticeDieTooSmall(u32),

    #[error("acting in place must cost at least 1 point")]
    ZeroInPlaceCost,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ZeroTerrainCost(_) => "CONFIG_ZERO_TERRAIN_COST",
            ConfigError::NoticeDieTooSmall(_) => "CONFIG_NOTICE_DIE_TOO_SMALL",
            ConfigError::ZeroInPlaceCost => "CONFIG_ZERO_IN_PLACE_COST",
        }
    }
}

/// Base movement costs per passable terrain plus tile-feature adjustments.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostTable {
    pub plains: u32,
    pub tundra: u32,
    pub hills: u32,
    pub desert: u32,
    pub swamp: u32,
    pub shallows: u32,
    /// Added when the destination is forested.
    pub forest_surcharge: u32,
    /// Added when the destination is mountainous.
    pub mountain_surcharge: u32,
    /// Subtracted when a river runs through the destination.
    pub river_relief: u32,
}

impl CostTable {
    /// Base cost of entering `terrain`, or `None` if it cannot be entered.
    pub fn base(&self, terrain: Terrain) -> Option<u32> {
        match terrain {
            Terrain::Unexplored | Terrain::DeepWater => None,
            Terrain::Plains => Some(self.plains),
            Terrain::Tundra => Some(self.tundra),
            Terrain::Hills => Some(self.hills),
            Terrain::Desert => Some(self.desert),
            Terrain::Swamp => Some(self.swamp),
            Terrain::Shallows => Some(self.shallows),
        }
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            plains: 2,
            tundra: 3,
            hills: 3,
            desert: 4,
            swamp: 5,
            shallows: 6,
            forest_surcharge: 2,
            mountain_surcharge: 4,
            river_relief: 1,
        }
    }
}

/// Exploration rules configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExploreConfig {
    /// Base seed mixed into every random roll of a session.
    pub seed: u64,
    /// Sides of the die rolled when checking whether a feature is noticed.
    pub notice_die: u32,
    /// Cost of acting in place (`Direction::Nowhere`).
    pub in_place_cost: u32,
    pub costs: CostTable,
}

impl ExploreConfig {
    pub const DEFAULT_NOTICE_DIE: u32 = 20;
    pub const DEFAULT_IN_PLACE_COST: u32 = 1;

    /// Points charged for attempting to enter an impassable tile.
    pub const IMPASSABLE_CHARGE: u32 = 1;

    pub fn new() -> Self {
        Self {
            seed: 0,
            notice_die: Self::DEFAULT_NOTICE_DIE,
            in_place_cost: Self::DEFAULT_IN_PLACE_COST,
            costs: CostTable::default(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the values a loader cannot express through types alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notice_die < 2 {
            return Err(ConfigError::NoticeDieTooSmall(self.notice_die));
        }
        if self.in_place_cost == 0 {
            return Err(ConfigError::ZeroInPlaceCost);
        }
        for terrain in [
            Terrain::Plains,
            Terrain::Tundra,
            Terrain::Hills,
            Terrain::Desert,
            Terrain::Swamp,
            Terrain::Shallows,
        ] {
            if self.costs.base(terrain) == Some(0) {
                return Err(ConfigError::ZeroTerrainCost(terrain));
            }
        }
        Ok(())
    }
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self::new()
    }
}
