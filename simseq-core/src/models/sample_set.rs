use std::collections::{HashMap, HashSet};

use super::molecule::Molecule;
use super::sample::Sample;
use crate::config::SamplingConfig;
use crate::errors::{Result, SimSeqError};
use crate::utils::{molecule_file_stem, validate_identifier};

///
/// All samples of a run, keyed by sample id. Iteration follows the order in
/// which each sample was first referenced by a sampling tuple.
///
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    order: Vec<String>,
    samples: HashMap<String, Sample>,
}

impl SampleSet {
    ///
    /// Build the sample model from a parsed sampling configuration.
    ///
    /// Every identifier is validated before it is used. A sample is created
    /// the first time a tuple names it, with its baseline resolved from the
    /// overrides (or the default); every tuple then appends one molecule.
    ///
    /// Two different (sample, sequence) pairs may not share intermediate file
    /// names, e.g. `a.b,c` and `a,b.c` both map to `a.b.c.*`.
    ///
    pub fn from_config(config: &SamplingConfig) -> Result<Self> {
        if config.tuples().is_empty() {
            return Err(SimSeqError::config(
                "sampling configuration",
                "no sampling tuples were provided",
            ));
        }

        for sample_id in config.baselines().keys() {
            validate_identifier(sample_id)?;
        }

        let mut set = SampleSet::default();
        let mut stems: HashMap<String, (&str, &str)> = HashMap::new();

        for tuple in config.tuples() {
            validate_identifier(&tuple.sample_id)?;
            validate_identifier(&tuple.sequence_id)?;

            let pair = (tuple.sample_id.as_str(), tuple.sequence_id.as_str());
            let stem = molecule_file_stem(pair.0, pair.1);
            match stems.get(&stem) {
                Some(&(sample_id, sequence_id)) if (sample_id, sequence_id) != pair => {
                    return Err(SimSeqError::config(
                        "sampling configuration",
                        format!(
                            "sample {} with sequence {} and sample {} with sequence {} would share the intermediate files {}.*",
                            sample_id, sequence_id, pair.0, pair.1, stem
                        ),
                    ));
                }
                Some(_) => log::warn!(
                    "sequence {} is listed more than once for sample {}; only the last entry will be simulated",
                    tuple.sequence_id,
                    tuple.sample_id
                ),
                None => {
                    stems.insert(stem, pair);
                }
            }

            let sample = set.get_or_insert(&tuple.sample_id, || {
                Sample::new(
                    tuple.sample_id.clone(),
                    config.baseline_for(&tuple.sample_id),
                )
            });

            let molecule = Molecule::new(tuple.sequence_id.clone(), tuple.relative_abundance);
            if sample.checked_count(&molecule).is_none() {
                return Err(SimSeqError::config(
                    "sampling configuration",
                    format!(
                        "read count for sample {} and sequence {} overflows ({} x {})",
                        tuple.sample_id,
                        tuple.sequence_id,
                        sample.baseline_abundance(),
                        tuple.relative_abundance
                    ),
                ));
            }
            sample.push_molecule(molecule);
        }

        for sample_id in config.baselines().keys() {
            if !set.samples.contains_key(sample_id) {
                log::warn!(
                    "baseline given for sample {} but no sequences were assigned to it",
                    sample_id
                );
            }
        }

        Ok(set)
    }

    fn get_or_insert<F>(&mut self, sample_id: &str, create: F) -> &mut Sample
    where
        F: FnOnce() -> Sample,
    {
        if !self.samples.contains_key(sample_id) {
            self.order.push(sample_id.to_string());
        }
        self.samples
            .entry(sample_id.to_string())
            .or_insert_with(create)
    }

    pub fn get(&self, sample_id: &str) -> Option<&Sample> {
        self.samples.get(sample_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.order.iter().filter_map(|id| self.samples.get(id))
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.order
    }

    ///
    /// Distinct sequence ids referenced by any sample; these are the records
    /// that must be extracted from the reference pool.
    ///
    pub fn sequence_ids(&self) -> HashSet<String> {
        self.iter()
            .flat_map(|s| s.molecules().iter().map(|m| m.sequence_id().to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
