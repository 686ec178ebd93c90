//! Contract between the exploration core and whatever drives it.
//!
//! A driving surface supplies answers (movement points, direction codes,
//! destinations, yes/no) and receives [`Report`]s. Any prompt may fail with
//! [`Abort`] when the user quits or input ends.
mod report;
mod scripted;

pub use report::Report;
pub use scripted::{Answer, ScriptedSurface};

use crate::state::{Direction, Point, Speed};

/// The user quit, cancelled, or input ran out at a prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("exploration aborted at a prompt")]
pub struct Abort;

/// What the user asked for at the direction prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionInput {
    Move(Direction),
    ChangeSpeed,
    /// Plan a route to a destination read next.
    RouteTo,
}

/// Actions offered when the mover acts in place.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
pub enum PlaceAction {
    #[strum(serialize = "claim independent settlements here")]
    ClaimSettlements,
    #[strum(serialize = "search the ground")]
    RevealGround,
    #[strum(serialize = "look around again")]
    Rediscover,
}

impl PlaceAction {
    pub const ALL: [PlaceAction; 3] = [
        PlaceAction::ClaimSettlements,
        PlaceAction::RevealGround,
        PlaceAction::Rediscover,
    ];
}

pub trait DrivingSurface {
    fn read_movement_points(&mut self) -> Result<u32, Abort>;

    fn read_direction(&mut self, at: Point, speed: Speed) -> Result<DirectionInput, Abort>;

    fn read_destination(&mut self, at: Point) -> Result<Point, Abort>;

    fn choose_speed(&mut self, current: Speed) -> Result<Speed, Abort>;

    /// Yes/no question; cancel is an `Abort`.
    fn confirm(&mut self, question: &str) -> Result<bool, Abort>;

    /// `Ok(None)` declines the menu.
    fn choose_place_action(
        &mut self,
        options: &[PlaceAction],
    ) -> Result<Option<PlaceAction>, Abort>;

    fn report(&mut self, report: Report);
}
