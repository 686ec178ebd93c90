use std::fmt;

use crate::state::{Point, Speed, Terrain, TileFeature, TileSummary};

/// Everything the core tells the user. Recoverable conditions end up here
/// instead of in an `Err`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    SpeedChanged(Speed),
    RoutePlanned {
        destination: Point,
        steps: usize,
        total_cost: u32,
    },
    Unreachable {
        destination: Point,
    },
    /// The next queued point is not adjacent to the mover; the route was dropped.
    StaleRoute {
        at: Point,
        expected: Point,
    },
    OffMap {
        destination: Point,
    },
    Impassable {
        destination: Point,
        terrain: Terrain,
    },
    Arrived {
        point: Point,
        tile: TileSummary,
        cost: u32,
        remaining: u32,
    },
    Discovered {
        feature: TileFeature,
        /// True for features that could not have been missed.
        constant: bool,
    },
    Claimed {
        feature: TileFeature,
    },
    GroundRevealed {
        found: usize,
    },
    Stopped {
        explanation: String,
    },
    RouteComplete {
        destination: Point,
    },
    Exhausted,
    Aborted,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::SpeedChanged(speed) => write!(f, "Now travelling at {}.", speed.display_name()),
            Report::RoutePlanned {
                destination,
                steps,
                total_cost,
            } => write!(
                f,
                "Route to {destination}: {steps} steps, about {total_cost} points."
            ),
            Report::Unreachable { destination } => {
                write!(f, "No known route to {destination}.")
            }
            Report::StaleRoute { at, expected } => write!(
                f,
                "Queued route no longer fits: {expected} is not next to {at}. Route dropped."
            ),
            Report::OffMap { destination } => write!(f, "{destination} is off the map."),
            Report::Impassable {
                destination,
                terrain,
            } => write!(f, "Cannot enter {destination} ({terrain})."),
            Report::Arrived {
                point,
                tile,
                cost,
                remaining,
            } => {
                write!(f, "At {point}: {}", tile.terrain)?;
                if tile.mountain {
                    f.write_str(", mountains")?;
                }
                let rivers: Vec<_> = tile.rivers.directions().map(|d| d.to_string()).collect();
                if !rivers.is_empty() {
                    write!(f, ", river ({})", rivers.join(" "))?;
                }
                let roads: Vec<_> = tile
                    .roads
                    .iter()
                    .map(|(direction, quality)| format!("{direction}:{}", quality.0))
                    .collect();
                if !roads.is_empty() {
                    write!(f, ", roads ({})", roads.join(" "))?;
                }
                write!(f, ". Spent {cost}, {remaining} left.")
            }
            Report::Discovered { feature, constant } => {
                let marker = if *constant { "*" } else { "+" };
                write!(f, "  {marker} {}", feature.description())
            }
            Report::Claimed { feature } => write!(f, "Claimed {}.", feature.description()),
            Report::GroundRevealed { found } => write!(f, "Searched the ground: {found} found."),
            Report::Stopped { explanation } => write!(f, "Stopped: {explanation}"),
            Report::RouteComplete { destination } => write!(f, "Reached {destination}."),
            Report::Exhausted => f.write_str("No movement points left."),
            Report::Aborted => f.write_str("Exploration aborted."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Direction, RiverSides, Roads};

    #[test]
    fn arrival_lists_terrain_rivers_and_roads() {
        let tile = TileSummary::new(Terrain::Hills)
            .with_mountain()
            .with_rivers(RiverSides::EAST)
            .with_roads(Roads::new().with(Direction::North, 2));
        let report = Report::Arrived {
            point: Point::new(1, 2),
            tile,
            cost: 7,
            remaining: 3,
        };
        assert_eq!(
            report.to_string(),
            "At (1, 2): hills, mountains, river (E), roads (N:2). Spent 7, 3 left."
        );
    }
}
