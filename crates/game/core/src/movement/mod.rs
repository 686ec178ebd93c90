//! Movement point accounting.
mod cost;

pub use cost::{MoveCost, MovementCostModel};
