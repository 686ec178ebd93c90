use crate::env::{MapError, MapMutator};
use crate::state::{CopyMode, Point, TileFeature, TileSummary};

/// The master map plus the per-player copies kept in step with it.
pub struct WorldMaps<'m> {
    master: &'m mut dyn MapMutator,
    subordinates: Vec<&'m mut dyn MapMutator>,
}

impl<'m> WorldMaps<'m> {
    pub fn new(master: &'m mut dyn MapMutator) -> Self {
        Self {
            master,
            subordinates: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_subordinate(mut self, map: &'m mut dyn MapMutator) -> Self {
        self.subordinates.push(map);
        self
    }

    pub fn master(&self) -> &dyn MapMutator {
        &*self.master
    }

    pub fn master_mut(&mut self) -> &mut dyn MapMutator {
        &mut *self.master
    }

    pub fn subordinate_count(&self) -> usize {
        self.subordinates.len()
    }

    /// Writes `tile` into every subordinate copy.
    pub fn reveal(&mut self, point: Point, tile: &TileSummary) -> Result<(), MapError> {
        for map in &mut self.subordinates {
            map.reveal_tile(point, tile)?;
        }
        Ok(())
    }

    /// Copies `feature` into every subordinate copy.
    pub fn propagate(
        &mut self,
        point: Point,
        feature: &TileFeature,
        mode: CopyMode,
    ) -> Result<(), MapError> {
        for map in &mut self.subordinates {
            map.upsert_feature(point, feature, mode)?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for WorldMaps<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WorldMaps")
            .field("master", &self.master.dimensions())
            .field("subordinates", &self.subordinates.len())
            .finish()
    }
}
