//! # Core types for simulated sequencing experiments.
//!
//! This crate holds the sampling configuration parser and the sample model
//! it feeds: which reference sequences go into which sample, at what
//! relative abundance, and how many reads each one gets. It also owns the
//! error type shared by the rest of the workspace.
//!
pub mod config;
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

// re-exports
pub use config::*;
pub use errors::*;
pub use models::*;
pub use utils::*;
