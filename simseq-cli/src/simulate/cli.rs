use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

pub use simseq_sim::consts::*;

pub fn create_simulate_cli() -> Command {
    Command::new(SIMULATE_CMD)
        .about("Simulate a paired-end RNA-seq experiment with wgsim.")
        .long_about(
            "Simulate a paired-end RNA-seq experiment with wgsim.\n\n\
             The sampling configuration is a list of 'sample,sequence,abundance' tuples giving \
             the relative abundance of each reference sequence in each sample. Each sequence \
             is simulated with baseline x abundance reads, and the reads of every sample are \
             merged into <sample>.1.fq and <sample>.2.fq.\n\n\
             Example:\n  simseq simulate samp1,seq1,1 samp1,seq2,4 samp2,seq1,1 < seqs.fa",
        )
        .arg(
            Arg::new("sampling")
                .value_name("SAMPLE,SEQUENCE,ABUNDANCE")
                .num_args(0..)
                .action(ArgAction::Append)
                .help("Sampling tuples"),
        )
        .arg(
            Arg::new("baseline")
                .long("baseline")
                .short('b')
                .value_name("SAMPLE,INT")
                .action(ArgAction::Append)
                .help("Baseline per-molecule abundance for a sample, like 'sample1,10000'; defaults to 100"),
        )
        .arg(
            Arg::new("config-file")
                .long("config-file")
                .short('c')
                .value_name("FILE")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("File of sampling tuples, one per line; '--baseline=SAMPLE,INT' lines set baselines"),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("FASTA file of sequences to sequence in silico; default is standard input"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .short('o')
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_OUTDIR)
                .help("Directory for the per-sample read files"),
        )
        .arg(
            Arg::new("tmpdir")
                .long("tmpdir")
                .short('t')
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory for intermediate files; default is <system temp>/simseq-<pid>"),
        )
        .arg(
            Arg::new("wgsim-opts")
                .long("wgsim-opts")
                .short('w')
                .value_name("STR")
                .allow_hyphen_values(true)
                .default_value(DEFAULT_SIMULATOR_OPTS)
                .help("Options passed to the simulator"),
        )
        .arg(
            Arg::new("simulator")
                .long("simulator")
                .value_name("PROGRAM")
                .default_value(DEFAULT_SIMULATOR)
                .help("Simulator executable"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('p')
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Number of simulator invocations to run at once; default is 1"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Timeout for each simulator invocation, 0 to disable; default is 3600"),
        )
        .arg(
            Arg::new("keep-tmpdir")
                .long("keep-tmpdir")
                .action(ArgAction::SetTrue)
                .help("Keep intermediate files"),
        )
}
