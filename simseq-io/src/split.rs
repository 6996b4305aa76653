use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use simseq_core::errors::{FsContext, Result, SimSeqError};

use seq_io::fasta::Reader;

use crate::consts::REFERENCE_EXTENSION;
use crate::fasta::{record_id, write_single_line};

/// Location of the single-record reference file for a sequence id.
pub fn reference_path(dir: &Path, sequence_id: &str) -> PathBuf {
    dir.join(format!("{sequence_id}.{REFERENCE_EXTENSION}"))
}

///
/// Split a reference pool into one FASTA file per sequence.
///
/// Only records whose identifier is in `wanted` are written, to
/// `<dir>/<id>.fa`. The identifiers in `wanted` are expected to have been
/// validated already. Returns the set of identifiers that were written.
///
/// # Arguments:
/// - reader: FASTA formatted reference pool
/// - dir: directory in which to place the per-sequence files
/// - wanted: sequence ids referenced by the sampling configuration
///
pub fn split_sequences<R: Read>(
    reader: R,
    dir: &Path,
    wanted: &HashSet<String>,
) -> Result<HashSet<String>> {
    let mut fasta_reader = Reader::new(reader);
    let mut written: HashSet<String> = HashSet::new();
    let mut index = 0;

    while let Some(record) = fasta_reader.next() {
        index += 1;
        let record = record.map_err(|err| SimSeqError::InvalidFasta {
            record: index,
            message: err.to_string(),
        })?;

        let Some(id) = record_id(&record) else {
            log::debug!("record {} has no usable identifier, skipping", index);
            continue;
        };

        if !wanted.contains(id) {
            log::debug!("sequence {:?} is not sampled, skipping", id);
            continue;
        }

        if !written.insert(id.to_string()) {
            log::warn!(
                "sequence {} appears more than once in the reference pool; keeping the last record",
                id
            );
        }

        let path = reference_path(dir, id);
        let file = File::create(&path)
            .fs_context(|| format!("failed to create reference file {:?}", path))?;
        let mut writer = BufWriter::new(file);
        write_single_line(&record, &mut writer)
            .and_then(|_| writer.flush())
            .fs_context(|| format!("failed to write reference file {:?}", path))?;
    }

    Ok(written)
}

///
/// Make sure every sampled sequence was found in the reference pool. The
/// first missing id (in sorted order) is reported.
///
pub fn ensure_references(wanted: &HashSet<String>, written: &HashSet<String>) -> Result<()> {
    let mut missing: Vec<&String> = wanted.difference(written).collect();
    missing.sort();

    match missing.first() {
        Some(id) => Err(SimSeqError::MissingSequence(id.to_string())),
        None => Ok(()),
    }
}
