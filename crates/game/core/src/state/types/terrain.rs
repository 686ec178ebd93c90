use arrayvec::ArrayVec;
use bitflags::bitflags;

use super::Direction;

/// Base terrain class of a tile.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Terrain {
    /// Not yet seen by the owner of this map copy.
    #[default]
    Unexplored,
    DeepWater,
    Shallows,
    Plains,
    Hills,
    Desert,
    Swamp,
    Tundra,
}

impl Terrain {
    pub const fn is_passable(self) -> bool {
        !matches!(self, Terrain::Unexplored | Terrain::DeepWater)
    }

    /// Open water: encounters here are fished rather than hunted.
    pub const fn is_water(self) -> bool {
        matches!(self, Terrain::DeepWater | Terrain::Shallows)
    }
}

bitflags! {
    /// Sides of a tile touched by a river.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RiverSides: u8 {
        const NORTH      = 1 << 0;
        const NORTH_EAST = 1 << 1;
        const EAST       = 1 << 2;
        const SOUTH_EAST = 1 << 3;
        const SOUTH      = 1 << 4;
        const SOUTH_WEST = 1 << 5;
        const WEST       = 1 << 6;
        const NORTH_WEST = 1 << 7;
    }
}

impl RiverSides {
    pub const fn side(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::NORTH,
            Direction::NorthEast => Self::NORTH_EAST,
            Direction::East => Self::EAST,
            Direction::SouthEast => Self::SOUTH_EAST,
            Direction::South => Self::SOUTH,
            Direction::SouthWest => Self::SOUTH_WEST,
            Direction::West => Self::WEST,
            Direction::NorthWest => Self::NORTH_WEST,
            Direction::Nowhere => Self::empty(),
        }
    }

    /// Compass directions in which this tile has river banks.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::MOVES
            .into_iter()
            .filter(move |direction| self.contains(Self::side(*direction)))
    }
}

/// Quality of a road segment. Zero means "no road"; higher is better.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadQuality(pub u8);

/// Road segments leaving a tile, at most one per compass direction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roads {
    segments: ArrayVec<(Direction, RoadQuality), 8>,
}

impl Roads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the road quality toward `direction`; zero quality removes the segment.
    pub fn set(&mut self, direction: Direction, quality: RoadQuality) {
        if direction.is_nowhere() {
            return;
        }
        self.segments.retain(|(existing, _)| *existing != direction);
        if quality.0 > 0 {
            self.segments.push((direction, quality));
        }
    }

    #[must_use]
    pub fn with(mut self, direction: Direction, quality: u8) -> Self {
        self.set(direction, RoadQuality(quality));
        self
    }

    pub fn quality(&self, direction: Direction) -> RoadQuality {
        self.segments
            .iter()
            .find(|(existing, _)| *existing == direction)
            .map(|(_, quality)| *quality)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, RoadQuality)> + '_ {
        self.segments.iter().copied()
    }
}

/// Everything about a tile that is not a discrete feature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileSummary {
    pub terrain: Terrain,
    pub mountain: bool,
    pub rivers: RiverSides,
    pub roads: Roads,
}

impl TileSummary {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mountain(mut self) -> Self {
        self.mountain = true;
        self
    }

    #[must_use]
    pub fn with_rivers(mut self, rivers: RiverSides) -> Self {
        self.rivers = rivers;
        self
    }

    #[must_use]
    pub fn with_roads(mut self, roads: Roads) -> Self {
        self.roads = roads;
        self
    }

    #[inline]
    pub fn has_river(&self) -> bool {
        !self.rivers.is_empty()
    }
}
