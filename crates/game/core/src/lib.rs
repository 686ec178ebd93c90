//! Turn-based exploration rules shared by every driver.
//!
//! `explore-core` moves a mover across a grid world one step at a time,
//! charges movement points, decides what the mover notices and keeps the
//! per-player copies of the map in step with the master. Storage, route
//! search and wildlife tables stay behind the traits in [`env`]; user
//! interaction goes through [`surface::DrivingSurface`].
pub mod config;
pub mod discovery;
pub mod env;
pub mod error;
pub mod explore;
pub mod movement;
pub mod state;
pub mod stop;
pub mod surface;

pub use config::{ConfigError, CostTable, ExploreConfig};
pub use discovery::{
    Discovery, DiscoverySelector, Partition, Preselected, RollKey, Visibility, VisibilityModel,
};
pub use env::{
    Encounter, Encounters, ExploreEnv, FixedRng, GridMap, MapDimensions, MapError, MapMutator,
    MapView, MoveOutcome, OracleError, PathPlanner, PcgRng, PlannedRoute, RngOracle,
    WildlifeOracle, compute_seed,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use explore::{
    ExplorationSession, ExploreError, SessionState, StepOutcome, StepPhase, WorldMaps, copy_mode,
};
pub use movement::{MoveCost, MovementCostModel};
pub use state::{
    CopyMode, Direction, FeatureId, FeatureKind, Mover, Owner, PlayerId, Point, Resource,
    RiverSides, RoadQuality, Roads, Settlement, SettlementKind, Speed, Terrain, TerrainFeature,
    TileFeature, TileSummary, UnitFeature, Wildlife,
};
pub use stop::{
    EngineState, StopCondition, StopConditionEngine, StopEngineError, StopRule, StopTemplate,
    StopTemplates,
};
pub use surface::{
    Abort, Answer, DirectionInput, DrivingSurface, PlaceAction, Report, ScriptedSurface,
};
