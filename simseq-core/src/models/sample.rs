use std::fmt::{self, Display};

use super::molecule::Molecule;
use crate::consts::DEFAULT_BASELINE;

///
/// A simulated RNA sample: a baseline abundance and the molecules it
/// contains, in the order they were registered.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Sample {
    sample_id: String,
    baseline_abundance: u64,
    molecules: Vec<Molecule>,
}

impl Sample {
    ///
    /// Create an empty sample. A missing override resolves to the default
    /// baseline of 100.
    ///
    pub fn new(sample_id: impl Into<String>, baseline_override: Option<u64>) -> Self {
        Sample {
            sample_id: sample_id.into(),
            baseline_abundance: baseline_override.unwrap_or(DEFAULT_BASELINE),
            molecules: Vec::new(),
        }
    }

    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    pub fn baseline_abundance(&self) -> u64 {
        self.baseline_abundance
    }

    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    pub(crate) fn push_molecule(&mut self, molecule: Molecule) {
        self.molecules.push(molecule);
    }

    ///
    /// Number of reads to simulate for a molecule of this sample:
    /// `baseline × relative abundance`.
    ///
    /// Products are checked for overflow when the sample set is built, so
    /// this never overflows for a molecule owned by a built sample.
    ///
    pub fn absolute_count(&self, molecule: &Molecule) -> u64 {
        self.baseline_abundance * molecule.relative_abundance()
    }

    pub(crate) fn checked_count(&self, molecule: &Molecule) -> Option<u64> {
        self.baseline_abundance
            .checked_mul(molecule.relative_abundance())
    }

    /// Total reads requested across all molecules in the sample.
    pub fn total_reads(&self) -> u64 {
        self.molecules
            .iter()
            .fold(0u64, |total, m| total.saturating_add(self.absolute_count(m)))
    }
}

impl Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{} {}]",
            self.sample_id,
            self.baseline_abundance,
            self.molecules.len()
        )
    }
}
