//! Cost of entering a tile.
//!
//! Formula:
//! - raw = base(terrain) + forest surcharge + mountain surcharge - river relief
//! - scaled = ceil(max(raw, 1) × speed numerator / speed denominator), at least 1
//! - a road leaving the origin in the travel direction subtracts its quality,
//!   never going below 1
//!
//! Acting in place bypasses the table and costs the configured fixed amount.

use crate::config::{CostTable, ExploreConfig};
use crate::state::{RoadQuality, Speed, Terrain};

/// Movement points needed to enter a tile, or the distinguished "impossible".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveCost {
    Points(u32),
    Impossible,
}

impl MoveCost {
    pub const fn is_impossible(self) -> bool {
        matches!(self, MoveCost::Impossible)
    }

    pub const fn points(self) -> Option<u32> {
        match self {
            MoveCost::Points(points) => Some(points),
            MoveCost::Impossible => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovementCostModel {
    table: CostTable,
    in_place: u32,
}

impl MovementCostModel {
    pub fn new(config: &ExploreConfig) -> Self {
        Self {
            table: config.costs.clone(),
            in_place: config.in_place_cost.max(1),
        }
    }

    /// Cost of entering a tile with the given terrain and features.
    pub fn cost(
        &self,
        terrain: Terrain,
        has_forest: bool,
        has_mountain: bool,
        has_river: bool,
        speed: Speed,
    ) -> MoveCost {
        let Some(base) = self.table.base(terrain) else {
            return MoveCost::Impossible;
        };

        let mut raw = base;
        if has_forest {
            raw += self.table.forest_surcharge;
        }
        if has_mountain {
            raw += self.table.mountain_surcharge;
        }
        if has_river {
            raw = raw.saturating_sub(self.table.river_relief);
        }

        let (num, den) = speed.cost_scale();
        let scaled = (raw.max(1) * num).div_ceil(den);
        MoveCost::Points(scaled.max(1))
    }

    /// Fixed cost of acting in place.
    pub fn in_place(&self) -> u32 {
        self.in_place
    }

    /// Applies road relief for the segment leaving the origin toward the destination.
    pub fn with_road(cost: MoveCost, road: RoadQuality) -> MoveCost {
        match cost {
            MoveCost::Points(points) => {
                MoveCost::Points(points.saturating_sub(u32::from(road.0)).max(1))
            }
            MoveCost::Impossible => MoveCost::Impossible,
        }
    }
}

impl Default for MovementCostModel {
    fn default() -> Self {
        Self::new(&ExploreConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn model() -> MovementCostModel {
        MovementCostModel::default()
    }

    #[test]
    fn impassable_terrain_is_always_impossible() {
        let model = model();
        for terrain in [Terrain::DeepWater, Terrain::Unexplored] {
            for speed in Speed::iter() {
                for flags in 0..8u8 {
                    let cost = model.cost(
                        terrain,
                        flags & 1 != 0,
                        flags & 2 != 0,
                        flags & 4 != 0,
                        speed,
                    );
                    assert_eq!(cost, MoveCost::Impossible, "{terrain} {speed} {flags}");
                }
            }
        }
    }

    #[test]
    fn rough_terrain_costs_more_than_open() {
        let model = model();
        let open = model.cost(Terrain::Plains, false, false, false, Speed::Normal);
        let forest = model.cost(Terrain::Plains, true, false, false, Speed::Normal);
        let mountain = model.cost(Terrain::Plains, false, true, false, Speed::Normal);
        let desert = model.cost(Terrain::Desert, false, false, false, Speed::Normal);

        let open = open.points().unwrap();
        assert!(forest.points().unwrap() > open);
        assert!(mountain.points().unwrap() > open);
        assert!(desert.points().unwrap() > open);
    }

    #[test]
    fn river_reduces_cost() {
        let model = model();
        let dry = model.cost(Terrain::Hills, false, false, false, Speed::Normal);
        let wet = model.cost(Terrain::Hills, false, false, true, Speed::Normal);
        assert!(wet.points().unwrap() < dry.points().unwrap());
    }

    #[test]
    fn speed_scales_but_never_frees() {
        let model = model();
        let slow = model.cost(Terrain::Plains, false, false, true, Speed::Slow);
        let normal = model.cost(Terrain::Plains, false, false, true, Speed::Normal);
        let fast = model.cost(Terrain::Plains, false, false, true, Speed::Fast);

        assert_eq!(normal, MoveCost::Points(1));
        assert_eq!(fast, MoveCost::Points(1));
        assert_eq!(slow, MoveCost::Points(2));

        let fast_swamp = model.cost(Terrain::Swamp, false, false, false, Speed::Fast);
        assert_eq!(fast_swamp, MoveCost::Points(4));
    }

    #[test]
    fn roads_relieve_but_never_free() {
        let cost = MovementCostModel::with_road(MoveCost::Points(3), RoadQuality(5));
        assert_eq!(cost, MoveCost::Points(1));
        assert_eq!(
            MovementCostModel::with_road(MoveCost::Impossible, RoadQuality(2)),
            MoveCost::Impossible
        );
    }

    #[test]
    fn acting_in_place_has_fixed_cost() {
        let config = ExploreConfig {
            in_place_cost: 2,
            ..ExploreConfig::default()
        };
        assert_eq!(MovementCostModel::new(&config).in_place(), 2);
    }
}
