use super::MapError;
use crate::movement::{MoveCost, MovementCostModel};
use crate::state::{
    CopyMode, Direction, FeatureId, Point, Speed, TerrainFeature, TileFeature, TileSummary,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub rows: u32,
    pub cols: u32,
}

impl MapDimensions {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row >= 0
            && point.col >= 0
            && (point.row as u32) < self.rows
            && (point.col as u32) < self.cols
    }

    pub(crate) fn index(&self, point: Point) -> Option<usize> {
        self.contains(point)
            .then(|| point.row as usize * self.cols as usize + point.col as usize)
    }

    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of asking a map to move a feature one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mover is now at `to` (equal to `from` when acting in place).
    Moved { from: Point, to: Point, cost: u32 },
    /// The destination cannot be entered; nothing moved.
    Impossible { destination: Point },
    /// The destination lies beyond the map edge; nothing moved.
    OffMap { destination: Point },
}

/// Read access to one copy of the world (master or per-player).
pub trait MapView {
    fn dimensions(&self) -> MapDimensions;

    /// Terrain summary at `point`, or `None` when the point is off the map.
    fn tile(&self, point: Point) -> Option<TileSummary>;

    /// Features at `point`; empty when there are none or the point is off the map.
    fn features(&self, point: Point) -> &[TileFeature];

    /// Where the feature with `id` currently is.
    fn locate(&self, id: FeatureId) -> Option<Point>;

    fn contains(&self, point: Point) -> bool {
        self.dimensions().contains(point)
    }

    fn distance(&self, from: Point, to: Point) -> u32 {
        from.distance(to)
    }

    fn feature(&self, point: Point, id: FeatureId) -> Option<&TileFeature> {
        self.features(point).iter().find(|feature| feature.id == id)
    }

    fn has_terrain_feature(&self, point: Point, kind: TerrainFeature) -> bool {
        self.features(point)
            .iter()
            .any(|feature| feature.terrain_feature() == Some(kind))
    }
}

/// Mutations against one copy of the world.
pub trait MapMutator: MapView {
    /// Moves an existing feature to `to`.
    fn relocate(&mut self, id: FeatureId, to: Point) -> Result<(), MapError>;

    /// Stores `feature.copy(mode)` at `point`, replacing any feature with the
    /// same id wherever it currently is.
    fn upsert_feature(
        &mut self,
        point: Point,
        feature: &TileFeature,
        mode: CopyMode,
    ) -> Result<(), MapError>;

    fn remove_feature(&mut self, point: Point, id: FeatureId) -> Option<TileFeature>;

    /// Overwrites the terrain summary at `point`.
    fn reveal_tile(&mut self, point: Point, tile: &TileSummary) -> Result<(), MapError>;

    /// Hands out an id that is unused on this map.
    fn allocate_feature_id(&mut self) -> FeatureId;

    /// Attempts to move `mover` one step in `direction`.
    ///
    /// Impassable and off-map destinations are ordinary outcomes, not errors.
    fn attempt_move(
        &mut self,
        mover: FeatureId,
        direction: Direction,
        speed: Speed,
        model: &MovementCostModel,
    ) -> Result<MoveOutcome, MapError> {
        let from = self.locate(mover).ok_or(MapError::FeatureNotFound(mover))?;
        if direction.is_nowhere() {
            return Ok(MoveOutcome::Moved {
                from,
                to: from,
                cost: model.in_place(),
            });
        }

        let to = from.step(direction);
        let Some(destination) = self.tile(to) else {
            return Ok(MoveOutcome::OffMap { destination: to });
        };
        let origin = self.tile(from).ok_or(MapError::OutOfBounds(from))?;
        let forest = self.has_terrain_feature(to, TerrainFeature::Forest);
        let mountain =
            destination.mountain || self.has_terrain_feature(to, TerrainFeature::Mountain);
        let river =
            destination.has_river() || self.has_terrain_feature(to, TerrainFeature::River);

        let base = model.cost(destination.terrain, forest, mountain, river, speed);
        match MovementCostModel::with_road(base, origin.roads.quality(direction)) {
            MoveCost::Impossible => Ok(MoveOutcome::Impossible { destination: to }),
            MoveCost::Points(cost) => {
                self.relocate(mover, to)?;
                Ok(MoveOutcome::Moved { from, to, cost })
            }
        }
    }
}
