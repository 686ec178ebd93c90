//! A small hand-made world for trying the exploration rules.

use std::collections::HashMap;

use explore_core::{
    Direction, FeatureId, FeatureKind, GridMap, MapDimensions, MapError, MapView, MoveCost,
    MovementCostModel, Mover, Owner, PathPlanner, PlannedRoute, PlayerId, Point, RiverSides, Roads,
    SettlementKind, Speed, Terrain, TerrainFeature, TileFeature, TileSummary,
};

/// Master map of the demo plus the mover that explores it.
#[derive(Clone, Debug)]
pub struct DemoWorld {
    pub master: GridMap,
    pub mover: Mover,
    /// Players that keep a subordinate copy; the mover belongs to the first.
    pub players: Vec<PlayerId>,
}

impl DemoWorld {
    pub const DIMENSIONS: MapDimensions = MapDimensions::new(10, 14);
    pub const START: Point = Point::new(5, 1);

    /// Builds the demo for `players` players (at least one).
    pub fn build(players: u32) -> Result<Self, MapError> {
        let players: Vec<_> = (1..=players.max(1)).map(PlayerId).collect();
        let mut master = GridMap::new(Self::DIMENSIONS, Terrain::Plains);
        lay_terrain(&mut master)?;
        place_features(&mut master)?;

        let owner = players[0];
        let id = master.place(
            Self::START,
            TileFeature::unit(FeatureId::Ephemeral, Owner::Player(owner), "Ilsa", "scout", 0),
        )?;
        let mover = Mover::new(id, owner, "scout", "Ilsa");

        Ok(Self {
            master,
            mover,
            players,
        })
    }

    /// One blank copy per player, in player order.
    pub fn subordinates(&self) -> Vec<GridMap> {
        self.players.iter().map(|_| self.master.redacted()).collect()
    }
}

fn fill(
    map: &mut GridMap,
    rows: std::ops::RangeInclusive<i32>,
    cols: std::ops::RangeInclusive<i32>,
    terrain: Terrain,
) -> Result<(), MapError> {
    for row in rows {
        for col in cols.clone() {
            map.set_tile(Point::new(row, col), TileSummary::new(terrain))?;
        }
    }
    Ok(())
}

fn lay_terrain(map: &mut GridMap) -> Result<(), MapError> {
    fill(map, 0..=9, 13..=13, Terrain::DeepWater)?;
    fill(map, 0..=9, 12..=12, Terrain::Shallows)?;
    fill(map, 0..=2, 3..=6, Terrain::Hills)?;
    fill(map, 0..=1, 9..=11, Terrain::Tundra)?;
    fill(map, 6..=9, 9..=11, Terrain::Desert)?;
    fill(map, 7..=9, 4..=7, Terrain::Swamp)?;

    for col in [4, 5] {
        let point = Point::new(1, col);
        map.set_tile(point, TileSummary::new(Terrain::Hills).with_mountain())?;
    }
    // River along row 4, flowing into the shallows.
    for col in 2..=11 {
        let point = Point::new(4, col);
        map.set_tile(
            point,
            TileSummary::new(Terrain::Plains).with_rivers(RiverSides::EAST | RiverSides::WEST),
        )?;
    }
    // Road from the start eastward along row 5.
    for col in 1..=8 {
        let mut roads = Roads::new();
        if col < 8 {
            roads = roads.with(Direction::East, 1);
        }
        if col > 1 {
            roads = roads.with(Direction::West, 1);
        }
        map.set_tile(
            Point::new(5, col),
            TileSummary::new(Terrain::Plains).with_roads(roads),
        )?;
    }
    Ok(())
}

fn abandoned(mut town: TileFeature) -> TileFeature {
    if let FeatureKind::Settlement(settlement) = &mut town.kind {
        settlement.active = false;
    }
    town
}

fn immortal(mut unit: TileFeature) -> TileFeature {
    if let FeatureKind::Unit(details) = &mut unit.kind {
        details.immortal = true;
    }
    unit
}

fn hidden(feature: TerrainFeature, dc: u8) -> TileFeature {
    TileFeature::new(FeatureId::Ephemeral, Owner::Independent, dc, FeatureKind::Terrain(feature))
}

fn place_features(map: &mut GridMap) -> Result<(), MapError> {
    let own = Owner::Player(PlayerId(1));
    let rival = Owner::Player(PlayerId(2));
    let new = FeatureId::Ephemeral;

    let features = [
        (Point::new(3, 2), TileFeature::terrain(new, TerrainFeature::Forest)),
        (Point::new(3, 3), TileFeature::terrain(new, TerrainFeature::Forest)),
        (Point::new(6, 3), TileFeature::terrain(new, TerrainFeature::Forest)),
        (Point::new(1, 3), hidden(TerrainFeature::Cave, 11)),
        (Point::new(3, 6), hidden(TerrainFeature::Spring, 7)),
        (Point::new(2, 4), TileFeature::terrain(new, TerrainFeature::Ground)),
        (
            Point::new(5, 1),
            TileFeature::settlement(new, own, SettlementKind::Fortress, "Greyhold", 220, 2),
        ),
        (
            Point::new(5, 5),
            TileFeature::settlement(
                new,
                Owner::Independent,
                SettlementKind::Village,
                "Ashford",
                60,
                6,
            ),
        ),
        (
            Point::new(2, 8),
            TileFeature::settlement(new, rival, SettlementKind::Town, "Varn", 340, 4),
        ),
        (
            Point::new(3, 10),
            TileFeature::settlement(new, rival, SettlementKind::Village, "Brackwater", 45, 7),
        ),
        (
            Point::new(8, 10),
            abandoned(TileFeature::settlement(
                new,
                Owner::Independent,
                SettlementKind::Town,
                "Old Mere",
                0,
                10,
            )),
        ),
        (Point::new(4, 7), TileFeature::unit(new, rival, "Orrin", "knight", 8)),
        (Point::new(1, 2), TileFeature::unit(new, Owner::Independent, "Tam", "hermit", 12)),
        (
            Point::new(8, 5),
            immortal(TileFeature::unit(
                new,
                Owner::Independent,
                "the Pale Warden",
                "wraith",
                14,
            )),
        ),
        (Point::new(1, 5), TileFeature::resource(new, "iron seam", 40, 13)),
        (Point::new(7, 10), TileFeature::resource(new, "salt flat", 300, 9)),
        (
            Point::new(6, 6),
            TileFeature::new(
                new,
                Owner::Independent,
                9,
                FeatureKind::Landmark("standing stones".into()),
            ),
        ),
    ];
    for (point, feature) in features {
        map.place(point, feature)?;
    }
    Ok(())
}

/// Route planner that follows the straight line toward the destination and
/// gives up at the first impassable tile.
#[derive(Clone, Debug)]
pub struct LinePlanner {
    dimensions: MapDimensions,
    /// Normal-speed cost of entering each passable point.
    costs: HashMap<Point, u32>,
}

impl LinePlanner {
    pub fn new(map: &(impl MapView + ?Sized), model: &MovementCostModel) -> Self {
        let dimensions = map.dimensions();
        let mut costs = HashMap::new();
        for row in 0..dimensions.rows as i32 {
            for col in 0..dimensions.cols as i32 {
                let point = Point::new(row, col);
                let Some(tile) = map.tile(point) else {
                    continue;
                };
                let cost = model.cost(
                    tile.terrain,
                    map.has_terrain_feature(point, TerrainFeature::Forest),
                    tile.mountain || map.has_terrain_feature(point, TerrainFeature::Mountain),
                    tile.has_river() || map.has_terrain_feature(point, TerrainFeature::River),
                    Speed::Normal,
                );
                if let MoveCost::Points(points) = cost {
                    costs.insert(point, points);
                }
            }
        }
        Self { dimensions, costs }
    }
}

impl PathPlanner for LinePlanner {
    fn route(&self, origin: Point, destination: Point) -> PlannedRoute {
        if !self.dimensions.contains(destination) {
            return PlannedRoute::unreachable();
        }

        let mut at = origin;
        let mut points = Vec::new();
        let mut total_cost = 0;
        while at != destination {
            let toward = (
                (destination.row - at.row).signum(),
                (destination.col - at.col).signum(),
            );
            let Some(direction) = Direction::MOVES
                .into_iter()
                .find(|direction| direction.delta() == toward)
            else {
                break;
            };
            at = at.step(direction);
            let Some(cost) = self.costs.get(&at) else {
                return PlannedRoute::unreachable();
            };
            total_cost += cost;
            points.push(at);
        }
        PlannedRoute::new(total_cost, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explore_core::ExploreConfig;

    fn model() -> MovementCostModel {
        MovementCostModel::new(&ExploreConfig::default())
    }

    #[test]
    fn demo_world_has_a_mover_at_the_start() {
        let world = DemoWorld::build(2).unwrap();
        assert_eq!(world.master.locate(world.mover.id), Some(DemoWorld::START));
        assert_eq!(world.players, vec![PlayerId(1), PlayerId(2)]);
        assert_eq!(world.subordinates().len(), 2);
        assert!(
            world
                .subordinates()
                .iter()
                .all(|copy| copy.feature_count() == 0)
        );
    }

    #[test]
    fn at_least_one_player_is_created() {
        let world = DemoWorld::build(0).unwrap();
        assert_eq!(world.players, vec![PlayerId(1)]);
        assert_eq!(world.mover.owner, PlayerId(1));
    }

    #[test]
    fn line_planner_walks_diagonals_first() {
        let world = DemoWorld::build(1).unwrap();
        let planner = LinePlanner::new(&world.master, &model());

        let route = planner.route(Point::new(5, 1), Point::new(7, 4));
        assert_eq!(
            route.points,
            vec![Point::new(6, 2), Point::new(7, 3), Point::new(7, 4)]
        );
        assert!(route.total_cost >= 3);
    }

    #[test]
    fn line_planner_refuses_deep_water_and_off_map() {
        let world = DemoWorld::build(1).unwrap();
        let planner = LinePlanner::new(&world.master, &model());

        assert!(planner.route(Point::new(5, 1), Point::new(5, 13)).is_empty());
        assert!(planner.route(Point::new(5, 1), Point::new(-1, 0)).is_empty());
    }
}
