use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::{FsContext, Result, SimSeqError};

///
/// Check that an identifier can be safely interpolated into a file name.
///
/// Sample and sequence identifiers both end up in the names of intermediate
/// and output files, so only `[A-Za-z0-9._-]` is allowed. The empty string
/// is rejected.
///
pub fn is_safe_identifier(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

pub fn validate_identifier(id: &str) -> Result<()> {
    if is_safe_identifier(id) {
        Ok(())
    } else {
        Err(SimSeqError::InvalidIdentifier(id.to_string()))
    }
}

///
/// Stem shared by the intermediate files of one (sample, sequence) pair:
/// `<sample>.<sequence>`.
///
pub fn molecule_file_stem(sample_id: &str, sequence_id: &str) -> String {
    format!("{sample_id}.{sequence_id}")
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).fs_context(|| format!("failed to open file {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Get a reader for the given path, or for standard input when no path
/// (or `-`) is given.
///
pub fn get_input_reader(path: Option<&Path>) -> Result<BufReader<Box<dyn Read>>> {
    match path {
        Some(path) if path != Path::new("-") => get_dynamic_reader(path),
        _ => {
            let stdin: Box<dyn Read> = Box::new(io::stdin());
            Ok(BufReader::new(stdin))
        }
    }
}
