use std::path::PathBuf;

use clap::{Arg, Command, value_parser};

pub use simseq_stats::consts::*;

pub fn create_lenpick_cli() -> Command {
    Command::new(LENPICK_CMD)
        .about("Pick the minimum peak read length from a set of FASTQ files.")
        .long_about(
            "Pick the minimum peak read length from a set of FASTQ files.\n\n\
             Finds the most common read length of each file and reports the smallest of \
             these, which can guide trimming every read set to one uniform read length.",
        )
        .arg(
            Arg::new("files")
                .value_name("FASTQ")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf))
                .help("FASTQ files, optionally gzipped"),
        )
}
