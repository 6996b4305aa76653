use std::time::Duration;

pub const SIMULATE_CMD: &str = "simulate";

pub const DEFAULT_SIMULATOR: &str = "wgsim";
pub const DEFAULT_SIMULATOR_OPTS: &str = "-d 270 -1 100 -2 100";
pub const DEFAULT_OUTDIR: &str = ".";
pub const DEFAULT_THREADS: usize = 1;
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;
pub const TMPDIR_PREFIX: &str = "simseq";

// simulator invocation
pub const READ_COUNT_FLAG: &str = "-N";
pub const FORWARD_READS_SUFFIX: &str = "1.fq";
pub const REVERSE_READS_SUFFIX: &str = "2.fq";
pub const LOG_SUFFIX: &str = "log";
pub const TIMEOUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const LOG_TAIL_LINES: usize = 5;
