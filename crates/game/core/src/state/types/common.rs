use std::fmt;

use super::Direction;

/// Identifier of a player (faction) that can own movers, settlements and map copies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Ownership of a piece of map content.
///
/// `Unknown` is what redacted copies carry once the real owner has been
/// stripped; it is never present on the master map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Owner {
    Unknown,
    #[default]
    Independent,
    Player(PlayerId),
}

impl Owner {
    #[inline]
    pub const fn is_independent(self) -> bool {
        matches!(self, Owner::Independent)
    }

    /// Returns true if the owner is a player other than `player`.
    #[inline]
    pub fn is_other_player(self, player: PlayerId) -> bool {
        matches!(self, Owner::Player(owner) if owner != player)
    }

    #[inline]
    pub fn is_player(self, player: PlayerId) -> bool {
        self == Owner::Player(player)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Unknown => f.write_str("unknown"),
            Owner::Independent => f.write_str("independent"),
            Owner::Player(player) => write!(f, "{player}"),
        }
    }
}

/// Map-unique identifier of a tile feature.
///
/// `Ephemeral` marks features synthesized for a single step (UI placeholders,
/// tracks standing in for an unnoticed animal). Maps refuse to store them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeatureId {
    Persistent(u64),
    Ephemeral,
}

impl FeatureId {
    #[inline]
    pub const fn is_ephemeral(self) -> bool {
        matches!(self, FeatureId::Ephemeral)
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::Persistent(id) => write!(f, "#{id}"),
            FeatureId::Ephemeral => f.write_str("#~"),
        }
    }
}

/// Grid coordinate expressed as (row, column).
///
/// Ordering is row-major: rows compare first, then columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    /// Sentinel for "no location".
    pub const INVALID: Self = Self { row: -1, col: -1 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// Neighbouring point in `direction`. `Nowhere` returns the point itself.
    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    /// Chebyshev distance: diagonal steps cost the same as orthogonal ones.
    pub fn distance(self, other: Point) -> u32 {
        self.row
            .abs_diff(other.row)
            .max(self.col.abs_diff(other.col))
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
