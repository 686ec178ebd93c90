//! Value types describing the explored world.
//!
//! Points, directions, terrain summaries and tile features are plain data.
//! Storage lives behind the map traits in [`crate::env`]; the exploration
//! session only ever holds these values for the duration of one step.
pub mod types;

pub use types::{
    CopyMode, Direction, FeatureId, FeatureKind, Mover, Owner, PlayerId, Point, Resource,
    RiverSides, RoadQuality, Roads, Settlement, SettlementKind, Speed, Terrain, TerrainFeature,
    TileFeature, TileSummary, UnitFeature, Wildlife,
};
