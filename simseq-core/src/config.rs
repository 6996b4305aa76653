use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::consts::*;
use crate::errors::{FsContext, Result, SimSeqError};
use crate::utils::get_dynamic_reader;

///
/// One `sample,sequence,abundance` entry of the sampling configuration.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingTuple {
    pub sample_id: String,
    pub sequence_id: String,
    pub relative_abundance: u64,
}

///
/// A single raw configuration item, in the order it was given on the
/// command line.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `sample,baseline` override
    Baseline(String),
    /// `sample,sequence,abundance` tuple
    Sampling(String),
    /// a config file mixing `--baseline=` lines and sampling tuples
    ConfigFile(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SamplingConfig {
    baselines: HashMap<String, u64>,
    tuples: Vec<SamplingTuple>,
}

///
/// Parse a `sample,baseline` override. Only the surrounding whitespace of
/// the whole entry is ignored; fields are taken verbatim.
///
pub fn parse_baseline(raw: &str, origin: &str) -> Result<(String, u64)> {
    let fields: Vec<&str> = raw.trim().split(FIELD_DELIMITER).collect();
    let [sample_id, baseline] = fields.as_slice() else {
        return Err(SimSeqError::config(
            origin,
            format!(
                "expected a baseline formatted like 'sample,baseline', found {:?}",
                raw
            ),
        ));
    };

    let baseline: u64 = baseline.parse().map_err(|_| {
        SimSeqError::config(
            origin,
            format!("baseline {:?} is not a non-negative integer", baseline),
        )
    })?;

    if baseline == 0 {
        return Err(SimSeqError::config(
            origin,
            format!("baseline for sample {:?} must be greater than 0", sample_id),
        ));
    }

    Ok((sample_id.to_string(), baseline))
}

pub fn parse_sampling_tuple(raw: &str, origin: &str) -> Result<SamplingTuple> {
    let fields: Vec<&str> = raw.trim().split(FIELD_DELIMITER).collect();
    let [sample_id, sequence_id, abundance] = fields.as_slice() else {
        return Err(SimSeqError::config(
            origin,
            format!(
                "expected a sampling tuple formatted like 'sample,sequence,abundance', found {:?}",
                raw
            ),
        ));
    };

    let relative_abundance: u64 = abundance.parse().map_err(|_| {
        SimSeqError::config(
            origin,
            format!(
                "relative abundance {:?} is not a non-negative integer",
                abundance
            ),
        )
    })?;

    Ok(SamplingTuple {
        sample_id: sample_id.to_string(),
        sequence_id: sequence_id.to_string(),
        relative_abundance,
    })
}

impl SamplingConfig {
    ///
    /// Fold configuration sources into a sampling configuration.
    ///
    /// Sources are consumed in order. A baseline override for a sample that
    /// already has one replaces it, whether it came from a `--baseline` flag
    /// or a config file, so the last override in the combined order wins.
    ///
    pub fn from_sources<I>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = ConfigSource>,
    {
        let mut config = SamplingConfig::default();
        for source in sources {
            match source {
                ConfigSource::Baseline(raw) => {
                    let (sample_id, baseline) = parse_baseline(&raw, BASELINE_ARG_ORIGIN)?;
                    config.set_baseline(sample_id, baseline);
                }
                ConfigSource::Sampling(raw) => {
                    let tuple = parse_sampling_tuple(&raw, SAMPLING_ARG_ORIGIN)?;
                    config.tuples.push(tuple);
                }
                ConfigSource::ConfigFile(path) => {
                    config.read_config_file(&path)?;
                }
            }
        }

        Ok(config)
    }

    pub fn read_config_file(&mut self, path: &Path) -> Result<()> {
        let reader = get_dynamic_reader(path)?;
        let origin = path.display().to_string();
        self.read_config(reader, &origin)
    }

    ///
    /// Read config lines from any reader. `origin` names the source in error
    /// messages, and is suffixed with the line number.
    ///
    pub fn read_config<R: BufRead>(&mut self, reader: R, origin: &str) -> Result<()> {
        for (index, line) in reader.lines().enumerate() {
            let line = line.fs_context(|| format!("failed to read line {} of {}", index + 1, origin))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let line_origin = format!("{}:{}", origin, index + 1);
            if let Some(raw) = line.strip_prefix(BASELINE_LINE_PREFIX) {
                let (sample_id, baseline) = parse_baseline(raw, &line_origin)?;
                self.set_baseline(sample_id, baseline);
            } else {
                self.tuples.push(parse_sampling_tuple(line, &line_origin)?);
            }
        }

        Ok(())
    }

    pub fn set_baseline(&mut self, sample_id: String, baseline: u64) {
        if let Some(previous) = self.baselines.insert(sample_id.clone(), baseline) {
            log::debug!(
                "baseline for sample {} overridden: {} -> {}",
                sample_id,
                previous,
                baseline
            );
        }
    }

    pub fn push_tuple(&mut self, tuple: SamplingTuple) {
        self.tuples.push(tuple);
    }

    pub fn baseline_for(&self, sample_id: &str) -> Option<u64> {
        self.baselines.get(sample_id).copied()
    }

    pub fn baselines(&self) -> &HashMap<String, u64> {
        &self.baselines
    }

    pub fn tuples(&self) -> &[SamplingTuple] {
        &self.tuples
    }
}
