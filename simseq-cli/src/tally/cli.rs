use std::path::PathBuf;

use clap::{Arg, Command, value_parser};

pub use simseq_stats::consts::*;

pub fn create_tally_cli() -> Command {
    Command::new(TALLY_CMD)
        .about("Count the reads mapped to each molecule in one or more SAM files.")
        .long_about(
            "Count the reads mapped to each molecule in one or more SAM files.\n\n\
             The output is a table with one row per molecule and one column per input file, \
             in the order the files were given.",
        )
        .arg(
            Arg::new("files")
                .value_name("SAM")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf))
                .help("SAM files, optionally gzipped"),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .short('d')
                .value_name("CHAR")
                .default_value(",")
                .help("Delimiter for output data; use '\\t' for tab"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("File to which read counts will be written; default is standard output"),
        )
}
