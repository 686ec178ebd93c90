//! Data-driven content for exploration drivers.
//!
//! This crate houses static content and loaders for RON/TOML data files:
//! - Exploration rules configuration (TOML or RON)
//! - Stop-condition prompt/explanation overrides (RON)
//! - A small demo world with a straight-line route planner
//! - Hunting and fishing tables implementing the wildlife oracle
//!
//! Content is consumed through the collaborator traits of `explore-core` and
//! never owns session state.

pub mod demo;
pub mod wildlife;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use demo::{DemoWorld, LinePlanner};
pub use wildlife::WildlifeTables;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, StopTemplateLoader};
