use std::collections::VecDeque;

use tracing::{debug, info, warn};

use super::propagate::{copy_mode, persist};
use super::{ExploreError, StepPhase, WorldMaps};
use crate::config::ExploreConfig;
use crate::discovery::{Discovery, DiscoverySelector, Partition, RollKey, VisibilityModel};
use crate::env::{ExploreEnv, MapError, MoveOutcome, OracleError, PlannedRoute};
use crate::error::ErrorContext;
use crate::movement::MovementCostModel;
use crate::state::{
    Direction, FeatureId, Mover, Owner, Point, Speed, TerrainFeature, TileFeature, TileSummary,
};
use crate::stop::StopConditionEngine;
use crate::surface::{Abort, DirectionInput, DrivingSurface, PlaceAction, Report};

/// Where the next direction comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    /// Read from the driving surface.
    #[default]
    AwaitingInput,
    /// Popped from the queued route.
    FollowingPath,
}

/// How the driven loop should proceed after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StepOutcome {
    Continue,
    /// No movement points left.
    Exhausted,
    /// The user quit or input ended; points were zeroed.
    Aborted,
}

/// Why a step ended before running to completion.
enum Halt {
    Aborted,
    Failed(ExploreError),
}

impl From<Abort> for Halt {
    fn from(_: Abort) -> Self {
        Halt::Aborted
    }
}

impl From<ExploreError> for Halt {
    fn from(error: ExploreError) -> Self {
        Halt::Failed(error)
    }
}

impl From<OracleError> for Halt {
    fn from(error: OracleError) -> Self {
        Halt::Failed(error.into())
    }
}

fn in_phase(phase: StepPhase) -> impl Fn(MapError) -> ExploreError {
    move |error| ExploreError::map(phase, error)
}

/// Exploration of one mover, constructed fresh per session.
///
/// Holds everything that changes while the mover travels: speed, the
/// movement-points ledger and the queued route. The maps and collaborators
/// are passed to each [`advance`](Self::advance) call.
#[derive(Clone, Debug)]
pub struct ExplorationSession {
    mover: Mover,
    speed: Speed,
    points: u32,
    route: VecDeque<Point>,
    state: SessionState,
    costs: MovementCostModel,
    visibility: VisibilityModel,
    steps: u64,
}

impl ExplorationSession {
    pub fn new(mover: Mover, config: &ExploreConfig) -> Self {
        Self {
            mover,
            speed: Speed::default(),
            points: 0,
            route: VecDeque::new(),
            state: SessionState::AwaitingInput,
            costs: MovementCostModel::new(config),
            visibility: VisibilityModel::new(config),
            steps: 0,
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn remaining_points(&self) -> u32 {
        self.points
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_following_route(&self) -> bool {
        self.state == SessionState::FollowingPath
    }

    /// Points still queued, nearest first.
    pub fn queued_route(&self) -> impl Iterator<Item = Point> + '_ {
        self.route.iter().copied()
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// Reads the movement-point budget from the surface.
    pub fn start(&mut self, surface: &mut dyn DrivingSurface) -> StepOutcome {
        match surface.read_movement_points() {
            Ok(points) => {
                info!(mover = %self.mover.name, points, "exploration started");
                self.points = points;
                if points == 0 {
                    StepOutcome::Exhausted
                } else {
                    StepOutcome::Continue
                }
            }
            Err(Abort) => {
                self.abort(surface);
                StepOutcome::Aborted
            }
        }
    }

    /// Drives one step.
    ///
    /// # Errors
    ///
    /// Only collaborator failures are returned; every expected outcome is
    /// reported through `surface`.
    pub fn advance(
        &mut self,
        maps: &mut WorldMaps<'_>,
        env: &ExploreEnv<'_>,
        stops: &mut StopConditionEngine,
        surface: &mut dyn DrivingSurface,
    ) -> Result<StepOutcome, ExploreError> {
        if self.points == 0 {
            return Ok(StepOutcome::Exhausted);
        }

        self.steps += 1;
        match self.step(maps, env, stops, surface) {
            Ok(()) if self.points == 0 => {
                info!(mover = %self.mover.name, steps = self.steps, "movement points exhausted");
                surface.report(Report::Exhausted);
                Ok(StepOutcome::Exhausted)
            }
            Ok(()) => Ok(StepOutcome::Continue),
            Err(Halt::Aborted) => {
                self.abort(surface);
                Ok(StepOutcome::Aborted)
            }
            Err(Halt::Failed(error)) => {
                let mut context = ErrorContext::new(self.steps).with_mover(self.mover.id);
                if let Some(point) = maps.master().locate(self.mover.id) {
                    context = context.with_point(point);
                }
                warn!(%error, step = self.steps, "exploration step failed");
                Err(error.with_context(context))
            }
        }
    }

    /// Advances until the points run out or the user quits.
    pub fn run_until_idle(
        &mut self,
        maps: &mut WorldMaps<'_>,
        env: &ExploreEnv<'_>,
        stops: &mut StopConditionEngine,
        surface: &mut dyn DrivingSurface,
    ) -> Result<StepOutcome, ExploreError> {
        loop {
            match self.advance(maps, env, stops, surface)? {
                StepOutcome::Continue => {}
                outcome => return Ok(outcome),
            }
        }
    }

    fn step(
        &mut self,
        maps: &mut WorldMaps<'_>,
        env: &ExploreEnv<'_>,
        stops: &mut StopConditionEngine,
        surface: &mut dyn DrivingSurface,
    ) -> Result<(), Halt> {
        let from = maps
            .master()
            .locate(self.mover.id)
            .ok_or(MapError::FeatureNotFound(self.mover.id))
            .map_err(in_phase(StepPhase::Locate))?;

        let routed = self.is_following_route();
        let direction = if routed {
            match self.next_route_direction(from, surface) {
                Some(direction) => direction,
                None => return Ok(()),
            }
        } else {
            match surface.read_direction(from, self.speed)? {
                DirectionInput::Move(direction) => direction,
                DirectionInput::ChangeSpeed => {
                    self.speed = surface.choose_speed(self.speed)?;
                    debug!(speed = %self.speed, "speed changed");
                    surface.report(Report::SpeedChanged(self.speed));
                    return Ok(());
                }
                DirectionInput::RouteTo => {
                    let destination = surface.read_destination(from)?;
                    self.plan_route(from, destination, env, surface)?;
                    return Ok(());
                }
            }
        };

        debug!(step = self.steps, %from, %direction, speed = %self.speed, "attempting move");
        let outcome = maps
            .master_mut()
            .attempt_move(self.mover.id, direction, self.speed, &self.costs)
            .map_err(in_phase(StepPhase::Move))?;

        match outcome {
            MoveOutcome::OffMap { destination } => {
                self.drop_route();
                surface.report(Report::OffMap { destination });
            }
            MoveOutcome::Impossible { destination } => {
                self.blocked(maps, destination, surface)?;
            }
            MoveOutcome::Moved { to, cost, .. } => {
                self.charge(cost);
                let noticed = self.arrive(maps, env, surface, to, cost, direction)?;
                if routed {
                    self.check_stop(stops, surface, to, &noticed)?;
                }
            }
        }
        Ok(())
    }

    fn next_route_direction(
        &mut self,
        from: Point,
        surface: &mut dyn DrivingSurface,
    ) -> Option<Direction> {
        let Some(next) = self.route.pop_front() else {
            self.drop_route();
            return None;
        };
        let direction = Direction::toward(from, next);
        if direction.is_none() {
            warn!(%from, %next, "queued route is stale");
            self.drop_route();
            surface.report(Report::StaleRoute {
                at: from,
                expected: next,
            });
        }
        direction
    }

    fn plan_route(
        &mut self,
        from: Point,
        destination: Point,
        env: &ExploreEnv<'_>,
        surface: &mut dyn DrivingSurface,
    ) -> Result<(), OracleError> {
        let PlannedRoute { total_cost, points } = env.planner()?.route(from, destination);
        if points.is_empty() {
            info!(%from, %destination, "no route");
            surface.report(Report::Unreachable { destination });
            return Ok(());
        }

        let mut queue = VecDeque::from(points);
        if queue.front() == Some(&from) {
            queue.pop_front();
        }
        if queue.is_empty() {
            surface.report(Report::RouteComplete { destination });
            return Ok(());
        }

        info!(%from, %destination, steps = queue.len(), total_cost, "route planned");
        surface.report(Report::RoutePlanned {
            destination,
            steps: queue.len(),
            total_cost,
        });
        self.route = queue;
        self.state = SessionState::FollowingPath;
        Ok(())
    }

    /// Charges for an impassable destination and marks it on every copy.
    fn blocked(
        &mut self,
        maps: &mut WorldMaps<'_>,
        destination: Point,
        surface: &mut dyn DrivingSurface,
    ) -> Result<(), ExploreError> {
        self.charge(ExploreConfig::IMPASSABLE_CHARGE);
        self.drop_route();

        let tile = maps
            .master()
            .tile(destination)
            .ok_or(MapError::OutOfBounds(destination))
            .map_err(in_phase(StepPhase::Move))?;
        maps.reveal(destination, &tile)
            .map_err(in_phase(StepPhase::Propagate))?;

        warn!(%destination, terrain = %tile.terrain, "destination impassable");
        surface.report(Report::Impassable {
            destination,
            terrain: tile.terrain,
        });
        Ok(())
    }

    fn arrive(
        &mut self,
        maps: &mut WorldMaps<'_>,
        env: &ExploreEnv<'_>,
        surface: &mut dyn DrivingSurface,
        to: Point,
        cost: u32,
        direction: Direction,
    ) -> Result<Vec<TileFeature>, Halt> {
        let master = maps.master();
        let tile = master
            .tile(to)
            .ok_or(MapError::OutOfBounds(to))
            .map_err(in_phase(StepPhase::Discover))?;
        let mut partition = VisibilityModel::partition(&self.mover, self.speed, master.features(to));

        let key = RollKey::new(env.config().seed, self.steps, to);
        let selector = DiscoverySelector::new(env.rng(), self.visibility, key);
        let encounters = env.wildlife()?.encounter_at(to, tile.terrain);
        if let Some(candidate) = selector.wildlife_candidate(encounters) {
            partition.possibles.push(candidate);
        }
        let mut discovery = selector.select(&partition.constants, &partition.possibles, self.speed);

        let mut claimed = Vec::new();
        if direction.is_nowhere() {
            self.place_menu(selector, &mut partition, &mut discovery, &mut claimed, surface)?;
        }

        // No prompts from here on: propagation either completes or never starts.
        surface.report(Report::Arrived {
            point: to,
            tile: tile.clone(),
            cost,
            remaining: self.points,
        });
        let noticed = self.propagate(maps, surface, to, &tile, discovery, &claimed)?;
        Ok(noticed)
    }

    /// Offers the act-in-place actions until declined.
    ///
    /// Choices only edit the pending discovery; nothing touches a map here.
    fn place_menu(
        &self,
        mut selector: DiscoverySelector<'_>,
        partition: &mut Partition,
        discovery: &mut Discovery,
        claimed: &mut Vec<FeatureId>,
        surface: &mut dyn DrivingSurface,
    ) -> Result<(), Abort> {
        while let Some(action) = surface.choose_place_action(&PlaceAction::ALL)? {
            debug!(%action, "place action");
            match action {
                PlaceAction::ClaimSettlements => {
                    self.claim_settlements(partition, discovery, claimed);
                }
                PlaceAction::RevealGround => {
                    let found = reveal_ground(partition, discovery);
                    surface.report(Report::GroundRevealed { found });
                }
                PlaceAction::Rediscover => {
                    selector = selector.next_pass();
                    *discovery =
                        selector.select(&partition.constants, &partition.possibles, self.speed);
                }
            }
        }
        Ok(())
    }

    /// Hands every independent settlement on the tile to the mover's owner.
    ///
    /// Claimed settlements become constants so a later search keeps them.
    fn claim_settlements(
        &self,
        partition: &mut Partition,
        discovery: &mut Discovery,
        claimed: &mut Vec<FeatureId>,
    ) {
        let owner = Owner::Player(self.mover.owner);
        let (settlements, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut partition.possibles)
            .into_iter()
            .partition(|feature| feature.is_settlement() && feature.owner.is_independent());
        partition.possibles = rest;

        let independent_constants = partition
            .constants
            .iter_mut()
            .filter(|feature| feature.is_settlement() && feature.owner.is_independent());
        for feature in independent_constants {
            feature.owner = owner;
            claimed.push(feature.id);
            replace_in(discovery, feature);
        }
        for mut feature in settlements {
            feature.owner = owner;
            claimed.push(feature.id);
            discovery.possibles.retain(|found| found.id != feature.id);
            discovery.constants.push(feature.clone());
            partition.constants.push(feature);
        }
    }

    /// Records the discovery on every map and returns the master records of
    /// what the mover noticed.
    fn propagate(
        &self,
        maps: &mut WorldMaps<'_>,
        surface: &mut dyn DrivingSurface,
        point: Point,
        tile: &TileSummary,
        discovery: Discovery,
        claimed: &[FeatureId],
    ) -> Result<Vec<TileFeature>, ExploreError> {
        let failed = in_phase(StepPhase::Propagate);
        maps.reveal(point, tile).map_err(&failed)?;

        let Discovery {
            constants,
            possibles,
        } = discovery;
        let found = constants.len() + possibles.len();
        let tagged = constants
            .into_iter()
            .map(|feature| (feature, true))
            .chain(possibles.into_iter().map(|feature| (feature, false)));
        let mut noticed = Vec::with_capacity(found);
        for (feature, constant) in tagged {
            let Some(stored) = persist(maps.master_mut(), point, &feature).map_err(&failed)?
            else {
                debug!(%point, feature = %feature.description(), "tracks reported only");
                surface.report(Report::Discovered { feature, constant });
                continue;
            };
            maps.propagate(point, &stored, copy_mode(&stored, &self.mover))
                .map_err(&failed)?;
            if claimed.contains(&stored.id) {
                info!(feature = %stored.description(), "settlement claimed");
                surface.report(Report::Claimed {
                    feature: stored.clone(),
                });
            }
            surface.report(Report::Discovered {
                feature: stored.clone(),
                constant,
            });
            noticed.push(stored);
        }

        debug!(%point, found, subordinates = maps.subordinate_count(), "discoveries propagated");
        Ok(noticed)
    }

    /// Halts the route when something the mover noticed at `point` matches an
    /// enabled stop condition.
    fn check_stop(
        &mut self,
        stops: &mut StopConditionEngine,
        surface: &mut dyn DrivingSurface,
        point: Point,
        noticed: &[TileFeature],
    ) -> Result<(), Abort> {
        if let Some(explanation) = stops.should_stop_among(noticed, &self.mover, surface)? {
            info!(%point, %explanation, "route stopped");
            self.drop_route();
            surface.report(Report::Stopped { explanation });
        } else if self.route.is_empty() {
            self.state = SessionState::AwaitingInput;
            surface.report(Report::RouteComplete { destination: point });
        }
        Ok(())
    }

    fn charge(&mut self, cost: u32) {
        self.points = self.points.saturating_sub(cost);
    }

    fn drop_route(&mut self) {
        self.route.clear();
        self.state = SessionState::AwaitingInput;
    }

    fn abort(&mut self, surface: &mut dyn DrivingSurface) {
        info!(mover = %self.mover.name, steps = self.steps, "exploration aborted");
        self.points = 0;
        self.drop_route();
        surface.report(Report::Aborted);
    }
}

fn replace_in(discovery: &mut Discovery, feature: &TileFeature) {
    for found in discovery.iter_mut().filter(|found| found.id == feature.id) {
        *found = feature.clone();
    }
}

/// Moves unexposed ground into the discovered constants, returning how many
/// were found.
fn reveal_ground(partition: &mut Partition, discovery: &mut Discovery) -> usize {
    let (ground, hidden): (Vec<_>, Vec<_>) = std::mem::take(&mut partition.hidden)
        .into_iter()
        .partition(|feature| feature.terrain_feature() == Some(TerrainFeature::Ground));
    partition.hidden = hidden;

    let found = ground.len();
    for feature in ground {
        discovery.constants.push(feature.clone());
        partition.constants.push(feature);
    }
    found
}
