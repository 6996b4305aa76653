use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use simseq_stats::{ReadTallyMatrix, parse_delimiter};

pub fn run_tally(matches: &ArgMatches) -> Result<()> {
    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .context("At least one SAM file is required.")?
        .cloned()
        .collect();

    let delimiter = matches
        .get_one::<String>("delimiter")
        .map(|raw| parse_delimiter(raw))
        .transpose()?
        .unwrap_or(simseq_stats::consts::DEFAULT_DELIMITER);

    let matrix = ReadTallyMatrix::from_files(&files)?;

    let writer: Box<dyn Write> = match matches.get_one::<PathBuf>("output") {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Couldn't create file: {:?}", path))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);
    matrix.write(&mut writer, delimiter)?;
    writer.flush()?;

    Ok(())
}
