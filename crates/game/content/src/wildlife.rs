//! Static hunting and fishing tables.

use std::collections::HashMap;

use explore_core::{
    Encounter, Encounters, FeatureId, MapView, Point, Terrain, TileFeature, WildlifeOracle,
};

struct Species {
    weight: u32,
    name: &'static str,
    count: u32,
    dc: u8,
}

const fn species(weight: u32, name: &'static str, count: u32, dc: u8) -> Species {
    Species {
        weight,
        name,
        count,
        dc,
    }
}

const PLAINS: &[Species] = &[
    species(60, "red deer", 4, 8),
    species(45, "hare", 6, 10),
    species(30, "wild boar", 2, 9),
    species(15, "wolf", 3, 11),
];
const HILLS: &[Species] = &[
    species(50, "mountain goat", 5, 10),
    species(25, "lynx", 1, 13),
];
const DESERT: &[Species] = &[species(35, "jackal", 2, 11), species(20, "oryx", 3, 12)];
const SWAMP: &[Species] = &[species(55, "heron", 3, 9), species(25, "crocodile", 1, 12)];
const TUNDRA: &[Species] = &[
    species(50, "reindeer", 8, 7),
    species(20, "white fox", 1, 12),
];
const WATER: &[Species] = &[
    species(70, "trout shoal", 20, 9),
    species(40, "eel", 5, 11),
    species(20, "pike", 2, 12),
];

fn land_table(terrain: Terrain) -> &'static [Species] {
    match terrain {
        Terrain::Plains => PLAINS,
        Terrain::Hills => HILLS,
        Terrain::Desert => DESERT,
        Terrain::Swamp => SWAMP,
        Terrain::Tundra => TUNDRA,
        Terrain::Unexplored | Terrain::DeepWater | Terrain::Shallows => &[],
    }
}

/// Endless walk through `table`, starting at an offset derived from `point`.
fn encounters(table: &'static [Species], point: Point) -> Encounters<'static> {
    if table.is_empty() {
        return Box::new(std::iter::empty());
    }
    let spread = point.row.unsigned_abs() as usize * 7 + point.col.unsigned_abs() as usize * 3;
    Box::new(
        table
            .iter()
            .cycle()
            .skip(spread % table.len())
            .map(|entry| {
                Encounter::new(
                    entry.weight,
                    TileFeature::wildlife(FeatureId::Ephemeral, entry.name, entry.count, entry.dc),
                )
            }),
    )
}

/// Wildlife oracle backed by fixed per-terrain tables.
///
/// Hunting looks the terrain up in a snapshot taken by [`WildlifeTables::for_map`];
/// points outside the snapshot hunt as plains.
#[derive(Clone, Debug, Default)]
pub struct WildlifeTables {
    terrain: HashMap<Point, Terrain>,
}

impl WildlifeTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_map(map: &(impl MapView + ?Sized)) -> Self {
        let dimensions = map.dimensions();
        let mut terrain = HashMap::with_capacity(dimensions.len());
        for row in 0..dimensions.rows as i32 {
            for col in 0..dimensions.cols as i32 {
                let point = Point::new(row, col);
                if let Some(tile) = map.tile(point) {
                    terrain.insert(point, tile.terrain);
                }
            }
        }
        Self { terrain }
    }
}

impl WildlifeOracle for WildlifeTables {
    fn hunt(&self, point: Point) -> Encounters<'_> {
        let terrain = self.terrain.get(&point).copied().unwrap_or(Terrain::Plains);
        encounters(land_table(terrain), point)
    }

    fn fish(&self, point: Point) -> Encounters<'_> {
        encounters(WATER, point)
    }

    fn encounter_at(&self, point: Point, terrain: Terrain) -> Encounters<'_> {
        if terrain.is_water() {
            self.fish(point)
        } else {
            encounters(land_table(terrain), point)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explore_core::{FeatureKind, GridMap, MapDimensions};

    fn species_of(encounter: &Encounter) -> String {
        match &encounter.animal.kind {
            FeatureKind::Wildlife(wildlife) => wildlife.species.clone(),
            other => panic!("not wildlife: {other:?}"),
        }
    }

    #[test]
    fn hunting_never_runs_dry() {
        let tables = WildlifeTables::new();
        assert_eq!(tables.hunt(Point::new(3, 3)).take(25).count(), 25);
    }

    #[test]
    fn encounters_are_ephemeral() {
        let tables = WildlifeTables::new();
        let first = tables.fish(Point::new(0, 0)).next().unwrap();
        assert!(first.animal.id.is_ephemeral());
        assert_eq!(species_of(&first), "trout shoal");
    }

    #[test]
    fn water_is_fished() {
        let tables = WildlifeTables::new();
        let point = Point::new(2, 5);
        let fished = tables.encounter_at(point, Terrain::Shallows).next().unwrap();
        assert_eq!(fished, tables.fish(point).next().unwrap());
    }

    #[test]
    fn hunting_follows_the_snapshot_terrain() {
        let mut map = GridMap::new(MapDimensions::new(2, 2), Terrain::Tundra);
        map.set_tile(Point::new(1, 1), explore_core::TileSummary::new(Terrain::Unexplored))
            .unwrap();
        let tables = WildlifeTables::for_map(&map);

        let first = tables.hunt(Point::new(0, 0)).next().unwrap();
        assert!(["reindeer", "white fox"].contains(&species_of(&first).as_str()));
        assert!(tables.hunt(Point::new(1, 1)).next().is_none());
    }

    #[test]
    fn neighbouring_points_start_at_different_entries() {
        let tables = WildlifeTables::new();
        let a = tables.hunt(Point::new(0, 0)).next().unwrap();
        let b = tables.hunt(Point::new(0, 1)).next().unwrap();
        assert_ne!(species_of(&a), species_of(&b));
    }
}
