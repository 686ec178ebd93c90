use super::Point;

/// Compass direction of a single step, or `Nowhere` to act in place.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[strum(serialize = "N")]
    North,
    #[strum(serialize = "NE")]
    NorthEast,
    #[strum(serialize = "E")]
    East,
    #[strum(serialize = "SE")]
    SouthEast,
    #[strum(serialize = "S")]
    South,
    #[strum(serialize = "SW")]
    SouthWest,
    #[strum(serialize = "W")]
    West,
    #[strum(serialize = "NW")]
    NorthWest,
    #[strum(serialize = "-")]
    Nowhere,
}

impl Direction {
    /// The eight directions that actually change position, clockwise from north.
    pub const MOVES: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Row/column offset. Rows grow southward.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::Nowhere => (0, 0),
        }
    }

    #[inline]
    pub const fn is_nowhere(self) -> bool {
        matches!(self, Direction::Nowhere)
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::Nowhere => Direction::Nowhere,
        }
    }

    /// Finds the single step that leads from `origin` to `target`.
    ///
    /// Returns `None` when `target` is not one of the eight neighbours.
    pub fn toward(origin: Point, target: Point) -> Option<Direction> {
        Self::MOVES
            .into_iter()
            .find(|direction| origin.step(*direction) == target)
    }
}

/// Travel pace of the mover.
///
/// Slower travel costs more movement points but gives better odds of noticing
/// hidden features along the way.
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
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    /// Bonus added to every notice roll made at this pace.
    pub const fn notice_modifier(self) -> i32 {
        match self {
            Speed::Slow => 6,
            Speed::Normal => 0,
            Speed::Fast => -6,
        }
    }

    /// Cost multiplier as a `(numerator, denominator)` pair.
    pub const fn cost_scale(self) -> (u32, u32) {
        match self {
            Speed::Slow => (3, 2),
            Speed::Normal => (1, 1),
            Speed::Fast => (2, 3),
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Speed::Slow => "slow (searching)",
            Speed::Normal => "normal",
            Speed::Fast => "fast (forced march)",
        }
    }
}
