use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use simseq_stats::min_peak_length;

pub fn run_lenpick(matches: &ArgMatches) -> Result<()> {
    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .context("At least one FASTQ file is required.")?
        .cloned()
        .collect();

    let min_peak = min_peak_length(&files)?;
    println!("{}", min_peak);

    Ok(())
}
