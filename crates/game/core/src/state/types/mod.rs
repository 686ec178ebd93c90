pub mod common;
pub mod direction;
pub mod feature;
pub mod mover;
pub mod terrain;

pub use common::{FeatureId, Owner, PlayerId, Point};
pub use direction::{Direction, Speed};
pub use feature::{
    CopyMode, FeatureKind, Resource, Settlement, SettlementKind, TerrainFeature, TileFeature,
    UnitFeature, Wildlife,
};
pub use mover::Mover;
pub use terrain::{RiverSides, RoadQuality, Roads, Terrain, TileSummary};
