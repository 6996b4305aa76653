use std::path::PathBuf;
use std::time::Duration;

use crate::consts::*;

///
/// Process-wide settings for one simulation run. Built once, before any
/// work starts, and only read afterwards.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParams {
    /// FASTA reference pool; `None` reads standard input
    pub input: Option<PathBuf>,
    /// scratch directory for per-sequence references and per-molecule reads
    pub tmpdir: PathBuf,
    /// where `<sample>.1.fq` and `<sample>.2.fq` are written
    pub outdir: PathBuf,
    /// simulator executable, looked up on `PATH` unless it is a path
    pub simulator: String,
    /// whitespace separated options passed to the simulator
    pub simulator_opts: String,
    /// maximum number of concurrent simulator invocations
    pub threads: usize,
    /// per-invocation timeout; `None` waits forever
    pub timeout: Option<Duration>,
    pub keep_tmpdir: bool,
}

/// `<system temp dir>/simseq-<pid>`
pub fn default_tmpdir() -> PathBuf {
    std::env::temp_dir().join(format!("{}-{}", TMPDIR_PREFIX, std::process::id()))
}

impl Default for RunParams {
    fn default() -> Self {
        RunParams {
            input: None,
            tmpdir: default_tmpdir(),
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            simulator: DEFAULT_SIMULATOR.to_string(),
            simulator_opts: DEFAULT_SIMULATOR_OPTS.to_string(),
            threads: DEFAULT_THREADS,
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            keep_tmpdir: false,
        }
    }
}
