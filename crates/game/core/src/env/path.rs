use crate::state::Point;

/// Route returned by a [`PathPlanner`].
///
/// `points` runs from the first step after the origin to the destination.
/// An empty sequence means no route is known.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlannedRoute {
    pub total_cost: u32,
    pub points: Vec<Point>,
}

impl PlannedRoute {
    pub fn new(total_cost: u32, points: Vec<Point>) -> Self {
        Self { total_cost, points }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Route search between two points. Search internals are the planner's business.
pub trait PathPlanner: Send + Sync {
    fn route(&self, origin: Point, destination: Point) -> PlannedRoute;
}
