//! The per-step exploration state machine.
//!
//! An [`ExplorationSession`] moves one mover across the master map one driven
//! step at a time: it picks a direction (from a queued route or from the
//! driving surface), attempts the move, decides what was discovered and
//! copies the discoveries into every subordinate map before consulting the
//! stop conditions.
mod error;
mod maps;
mod propagate;
mod session;

pub use error::{ExploreError, StepPhase};
pub use maps::WorldMaps;
pub use propagate::copy_mode;
pub use session::{ExplorationSession, SessionState, StepOutcome};
