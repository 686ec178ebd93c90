//! Terminal driver for the exploration core.
//!
//! Reads answers line by line from stdin, prints reports to stdout and logs
//! to a file so the two never interleave.

mod config;
pub mod input;
pub mod logging;

pub use config::CliConfig;
pub use input::{LineSurface, ParseError};
