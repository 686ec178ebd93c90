use crate::state::{Point, Terrain, TileFeature};

/// One possible animal encounter, weighted by how likely the animal itself
/// (rather than only its traces) is there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encounter {
    /// Percent chance (0-100) that the animal is actually present.
    pub weight: u32,
    pub animal: TileFeature,
}

impl Encounter {
    pub fn new(weight: u32, animal: TileFeature) -> Self {
        Self { weight, animal }
    }
}

pub type Encounters<'a> = Box<dyn Iterator<Item = Encounter> + 'a>;

/// Hunting and fishing tables.
///
/// Both sequences are lazy; the exploration step only ever takes the first
/// element, so implementations may be infinite.
pub trait WildlifeOracle: Send + Sync {
    fn hunt(&self, point: Point) -> Encounters<'_>;

    fn fish(&self, point: Point) -> Encounters<'_>;

    /// Fishing on open water, hunting everywhere else.
    fn encounter_at(&self, point: Point, terrain: Terrain) -> Encounters<'_> {
        if terrain.is_water() {
            self.fish(point)
        } else {
            self.hunt(point)
        }
    }
}
