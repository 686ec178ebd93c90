//! In-memory map storage.
//!
//! `GridMap` backs the master map in tools and tests and doubles as the
//! per-player copy: [`GridMap::redacted`] yields a blank map of the same shape.

use std::collections::{BTreeMap, HashMap};

use super::{MapDimensions, MapError, MapMutator, MapView};
use crate::state::{CopyMode, FeatureId, Point, Terrain, TileFeature, TileSummary};

#[derive(Clone, Debug)]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<TileSummary>,
    features: BTreeMap<Point, Vec<TileFeature>>,
    index: HashMap<FeatureId, Point>,
    next_id: u64,
}

impl GridMap {
    /// Creates a map where every tile has terrain `fill` and no features.
    pub fn new(dimensions: MapDimensions, fill: Terrain) -> Self {
        Self {
            dimensions,
            tiles: vec![TileSummary::new(fill); dimensions.len()],
            features: BTreeMap::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Blank copy of the same dimensions: all terrain unexplored, no features.
    pub fn redacted(&self) -> Self {
        Self::new(self.dimensions, Terrain::Unexplored)
    }

    pub fn set_tile(&mut self, point: Point, tile: TileSummary) -> Result<(), MapError> {
        let index = self
            .dimensions
            .index(point)
            .ok_or(MapError::OutOfBounds(point))?;
        self.tiles[index] = tile;
        Ok(())
    }

    /// Adds a feature, allocating a persistent id when it has none yet.
    pub fn place(&mut self, point: Point, feature: TileFeature) -> Result<FeatureId, MapError> {
        let feature = if feature.id.is_ephemeral() {
            let id = self.allocate_feature_id();
            feature.with_id(id)
        } else {
            feature
        };
        let id = feature.id;
        self.upsert_feature(point, &feature, CopyMode::Keep)?;
        Ok(id)
    }

    /// Total number of stored features.
    pub fn feature_count(&self) -> usize {
        self.index.len()
    }

    fn detach(&mut self, id: FeatureId) -> Option<(Point, TileFeature)> {
        let point = self.index.remove(&id)?;
        let slot = self.features.get_mut(&point)?;
        let position = slot.iter().position(|feature| feature.id == id)?;
        let feature = slot.remove(position);
        if slot.is_empty() {
            self.features.remove(&point);
        }
        Some((point, feature))
    }

    fn attach(&mut self, point: Point, feature: TileFeature) {
        if let FeatureId::Persistent(raw) = feature.id {
            self.next_id = self.next_id.max(raw + 1);
        }
        self.index.insert(feature.id, point);
        self.features.entry(point).or_default().push(feature);
    }
}

impl MapView for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, point: Point) -> Option<TileSummary> {
        let index = self.dimensions.index(point)?;
        self.tiles.get(index).cloned()
    }

    fn features(&self, point: Point) -> &[TileFeature] {
        self.features.get(&point).map_or(&[], Vec::as_slice)
    }

    fn locate(&self, id: FeatureId) -> Option<Point> {
        self.index.get(&id).copied()
    }
}

impl MapMutator for GridMap {
    fn relocate(&mut self, id: FeatureId, to: Point) -> Result<(), MapError> {
        if !self.dimensions.contains(to) {
            return Err(MapError::OutOfBounds(to));
        }
        let (_, feature) = self.detach(id).ok_or(MapError::FeatureNotFound(id))?;
        self.attach(to, feature);
        Ok(())
    }

    fn upsert_feature(
        &mut self,
        point: Point,
        feature: &TileFeature,
        mode: CopyMode,
    ) -> Result<(), MapError> {
        if !self.dimensions.contains(point) {
            return Err(MapError::OutOfBounds(point));
        }
        if feature.id.is_ephemeral() {
            return Err(MapError::EphemeralFeature(point));
        }
        self.detach(feature.id);
        self.attach(point, feature.copy(mode));
        Ok(())
    }

    fn remove_feature(&mut self, point: Point, id: FeatureId) -> Option<TileFeature> {
        if self.index.get(&id) != Some(&point) {
            return None;
        }
        self.detach(id).map(|(_, feature)| feature)
    }

    fn reveal_tile(&mut self, point: Point, tile: &TileSummary) -> Result<(), MapError> {
        self.set_tile(point, tile.clone())
    }

    fn allocate_feature_id(&mut self) -> FeatureId {
        let id = FeatureId::Persistent(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Owner, PlayerId, SettlementKind};

    fn map() -> GridMap {
        GridMap::new(MapDimensions::new(4, 4), Terrain::Plains)
    }

    #[test]
    fn place_assigns_fresh_ids() {
        let mut map = map();
        let a = map
            .place(Point::new(0, 0), TileFeature::wildlife(FeatureId::Ephemeral, "elk", 2, 8))
            .unwrap();
        let b = map
            .place(Point::new(0, 0), TileFeature::wildlife(FeatureId::Ephemeral, "elk", 1, 8))
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(map.features(Point::new(0, 0)).len(), 2);
    }

    #[test]
    fn upsert_moves_feature_with_same_id() {
        let mut map = map();
        let scout = TileFeature::unit(
            FeatureId::Persistent(9),
            Owner::Player(PlayerId(2)),
            "Ilsa",
            "scout",
            10,
        );
        map.upsert_feature(Point::new(0, 0), &scout, CopyMode::Keep)
            .unwrap();
        map.upsert_feature(Point::new(2, 3), &scout, CopyMode::Zero)
            .unwrap();

        assert!(map.features(Point::new(0, 0)).is_empty());
        assert_eq!(map.locate(scout.id), Some(Point::new(2, 3)));
        assert_eq!(
            map.feature(Point::new(2, 3), scout.id).map(|f| f.owner),
            Some(Owner::Unknown)
        );
        assert_eq!(map.feature_count(), 1);
    }

    #[test]
    fn refuses_ephemeral_features() {
        let mut map = map();
        let tracks = TileFeature::tracks_of(&TileFeature::wildlife(
            FeatureId::Persistent(3),
            "boar",
            1,
            6,
        ));
        assert_eq!(
            map.upsert_feature(Point::new(1, 1), &tracks, CopyMode::Keep),
            Err(MapError::EphemeralFeature(Point::new(1, 1)))
        );
    }

    #[test]
    fn allocation_skips_explicit_ids() {
        let mut map = map();
        let village = TileFeature::settlement(
            FeatureId::Persistent(40),
            Owner::Independent,
            SettlementKind::Village,
            "Oak Ford",
            60,
            4,
        );
        map.upsert_feature(Point::new(3, 3), &village, CopyMode::Keep)
            .unwrap();
        assert_eq!(map.allocate_feature_id(), FeatureId::Persistent(41));
    }

    #[test]
    fn redacted_copy_is_blank() {
        let mut master = map();
        master
            .place(Point::new(1, 1), TileFeature::resource(FeatureId::Ephemeral, "iron", 30, 12))
            .unwrap();
        let copy = master.redacted();

        assert_eq!(copy.dimensions(), master.dimensions());
        assert_eq!(copy.tile(Point::new(1, 1)).map(|t| t.terrain), Some(Terrain::Unexplored));
        assert_eq!(copy.feature_count(), 0);
    }

    #[test]
    fn off_map_queries_are_empty() {
        let map = map();
        assert_eq!(map.tile(Point::new(4, 0)), None);
        assert!(map.features(Point::INVALID).is_empty());
    }
}
