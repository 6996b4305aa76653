pub mod molecule;
pub mod sample;
pub mod sample_set;

// re-export for cleaner imports
pub use self::molecule::Molecule;
pub use self::sample::Sample;
pub use self::sample_set::SampleSet;
