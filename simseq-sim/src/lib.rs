pub mod aggregate;
pub mod consts;
pub mod orchestrate;
pub mod params;
pub mod pipeline;
pub mod scratch;
pub mod simulator;

// Re-exports
pub use aggregate::*;
pub use orchestrate::*;
pub use params::*;
pub use pipeline::*;
pub use scratch::*;
pub use simulator::*;
