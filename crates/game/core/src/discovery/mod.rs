//! Deciding what a mover notices on arrival.
//!
//! [`VisibilityModel`] sorts a tile's features into constants (always seen),
//! possibles (seen on a successful notice roll) and hidden ones.
//! [`DiscoverySelector`] then rolls for the possibles, with one extra wildlife
//! candidate drawn from the hunting/fishing tables.
mod selector;
mod visibility;

pub use selector::{Discovery, DiscoverySelector, Preselected};
pub use visibility::{Partition, Visibility, VisibilityModel};

use crate::env::compute_seed;
use crate::state::Point;

/// Identifies the family of rolls made for one tile in one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollKey {
    pub base_seed: u64,
    pub step: u64,
    pub point: Point,
    /// Incremented each time the same tile is searched again within a step.
    pub pass: u32,
}

impl RollKey {
    pub const fn new(base_seed: u64, step: u64, point: Point) -> Self {
        Self {
            base_seed,
            step,
            point,
            pass: 0,
        }
    }

    /// Key for searching the same tile again with fresh rolls.
    #[must_use]
    pub const fn next_pass(self) -> Self {
        Self {
            pass: self.pass.wrapping_add(1),
            ..self
        }
    }

    pub fn seed(&self, context: u32) -> u64 {
        let base = self.base_seed ^ u64::from(self.pass).wrapping_mul(0xd6e8_feb8_6659_fd93);
        compute_seed(base, self.step, self.point, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_pass_rolls_differently() {
        let key = RollKey::new(7, 3, Point::new(2, 2));
        assert_eq!(key.seed(0), compute_seed(7, 3, Point::new(2, 2), 0));
        assert_ne!(key.seed(0), key.next_pass().seed(0));
        assert_eq!(key.next_pass().pass, 1);
    }
}
