pub mod consts;
pub mod lenpick;
pub mod tally;

// re-exports
pub use lenpick::*;
pub use tally::*;
