//! # Input/Output utilities for reference pools.
//!
//! Reads FASTA formatted reference pools and splits them into one file per
//! sequence, which is the layout the read simulator expects.
//!
pub mod consts;
pub mod fasta;
pub mod split;

// re-expose core functions
pub use consts::*;
pub use fasta::*;
pub use split::*;
