use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use fxhash::FxHashMap;
use seq_io::fastq::{Reader, Record};

use simseq_core::utils::get_dynamic_reader;

///
/// Read length distribution of a FASTQ file.
///
#[derive(Debug, Default, Clone)]
pub struct LengthDistribution {
    counts: FxHashMap<usize, u64>,
}

impl LengthDistribution {
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(path)?;
        LengthDistribution::from_reader(reader)
            .with_context(|| format!("Failed to read length distribution of {:?}", path))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut fastq_reader = Reader::new(reader);
        let mut counts: FxHashMap<usize, u64> = FxHashMap::default();
        let mut index = 0;

        while let Some(record) = fastq_reader.next() {
            index += 1;
            let record = record.with_context(|| format!("Invalid FASTQ record #{}", index))?;
            *counts.entry(record.seq().len()).or_insert(0) += 1;
        }

        Ok(LengthDistribution { counts })
    }

    pub fn count(&self, length: usize) -> u64 {
        self.counts.get(&length).copied().unwrap_or(0)
    }

    pub fn reads(&self) -> u64 {
        self.counts.values().sum()
    }

    ///
    /// Most frequent read length. Ties go to the shortest length; `None` if
    /// there are no reads.
    ///
    pub fn peak(&self) -> Option<usize> {
        self.counts
            .iter()
            .max_by(|(len_a, count_a), (len_b, count_b)| {
                count_a.cmp(count_b).then_with(|| len_b.cmp(len_a))
            })
            .map(|(length, _)| *length)
    }
}

///
/// Find the peak read length of every file and return the smallest one.
/// This is the length reads can be trimmed to so every read set ends up
/// with reads of exactly the same length.
///
pub fn min_peak_length(files: &[PathBuf]) -> Result<usize> {
    let mut peaks: Vec<usize> = Vec::with_capacity(files.len());

    for file in files {
        let start = Instant::now();
        let distribution = LengthDistribution::from_file(file)?;
        let peak = distribution
            .peak()
            .with_context(|| format!("No reads found in {:?}", file))?;

        log::info!(
            "Peak length for '{}': {} ({:.1} seconds)",
            file.display(),
            peak,
            start.elapsed().as_secs_f64()
        );
        peaks.push(peak);
    }

    peaks
        .into_iter()
        .min()
        .context("At least one FASTQ file is required")
}
