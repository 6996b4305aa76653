use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fxhash::FxHashMap;
use noodles::sam;

use simseq_core::utils::get_dynamic_reader;

use crate::consts::*;

///
/// Number of mapped reads per molecule (reference sequence) in one SAM file.
///
#[derive(Debug, Default, Clone)]
pub struct ReadTally {
    counts: FxHashMap<String, u64>,
}

impl ReadTally {
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(path)?;
        ReadTally::from_reader(reader)
            .with_context(|| format!("Failed to tally mapped reads in {:?}", path))
    }

    ///
    /// Count mapped records per reference sequence name. Records flagged as
    /// unmapped, or without a reference sequence, are skipped.
    ///
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut reader = sam::io::Reader::new(reader);
        reader
            .read_header()
            .context("Failed to read SAM header")?;

        let mut counts: FxHashMap<String, u64> = FxHashMap::default();
        for (index, result) in reader.records().enumerate() {
            let record =
                result.with_context(|| format!("Invalid SAM record #{}", index + 1))?;
            let flags = record
                .flags()
                .with_context(|| format!("Invalid FLAG in SAM record #{}", index + 1))?;
            if flags.is_unmapped() {
                continue;
            }

            let Some(reference_name) = record.reference_sequence_name() else {
                continue;
            };
            *counts.entry(reference_name.to_string()).or_insert(0) += 1;
        }

        Ok(ReadTally { counts })
    }

    pub fn get(&self, molecule_id: &str) -> u64 {
        self.counts.get(molecule_id).copied().unwrap_or(0)
    }

    pub fn molecule_ids(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

///
/// One tally per input file; columns keep the order of the inputs.
///
#[derive(Debug, Default, Clone)]
pub struct ReadTallyMatrix {
    tallies: Vec<ReadTally>,
}

impl ReadTallyMatrix {
    pub fn from_files(files: &[PathBuf]) -> Result<Self> {
        let tallies = files
            .iter()
            .map(|file| ReadTally::from_file(file))
            .collect::<Result<Vec<_>>>()?;

        Ok(ReadTallyMatrix { tallies })
    }

    pub fn from_tallies(tallies: Vec<ReadTally>) -> Self {
        ReadTallyMatrix { tallies }
    }

    ///
    /// Write one row per molecule seen in any input: the molecule id followed
    /// by its count in each input, `0` where it is absent. Rows are sorted by
    /// molecule id.
    ///
    pub fn write<W: Write>(&self, writer: &mut W, delimiter: char) -> Result<()> {
        let molecule_ids: BTreeSet<&str> = self
            .tallies
            .iter()
            .flat_map(|tally| tally.molecule_ids())
            .collect();

        for molecule_id in molecule_ids {
            let counts: Vec<String> = self
                .tallies
                .iter()
                .map(|tally| tally.get(molecule_id).to_string())
                .collect();
            writeln!(
                writer,
                "{}{}{}",
                molecule_id,
                delimiter,
                counts.join(&delimiter.to_string())
            )?;
        }

        Ok(())
    }
}

///
/// Interpret a user supplied delimiter: the literal `\t` means a tab, and
/// only the first character of longer strings is used.
///
pub fn parse_delimiter(raw: &str) -> Result<char> {
    if raw == TAB_ESCAPE {
        return Ok('\t');
    }

    let mut chars = raw.chars();
    let Some(delimiter) = chars.next() else {
        anyhow::bail!("The delimiter must not be empty");
    };
    if chars.next().is_some() {
        log::warn!(
            "string '{}' provided for delimiter, using only '{}'",
            raw,
            delimiter
        );
    }

    Ok(delimiter)
}
