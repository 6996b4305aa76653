use std::env;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use simseq_core::errors::{FsContext, Result, SimSeqError};
use simseq_core::utils::molecule_file_stem;
use simseq_io::reference_path;

use crate::consts::*;
use crate::params::RunParams;

///
/// One simulator invocation: a read count, the per-sequence reference it
/// samples from, and the files it must produce.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationJob {
    pub sample_id: String,
    pub sequence_id: String,
    pub read_count: u64,
    pub reference: PathBuf,
    pub forward: PathBuf,
    pub reverse: PathBuf,
    pub log: PathBuf,
}

impl SimulationJob {
    ///
    /// Lay out a job inside `dir`:
    /// `<dir>/<sequence>.fa` -> `<dir>/<sample>.<sequence>.{1,2}.fq`
    ///
    pub fn new(dir: &Path, sample_id: &str, sequence_id: &str, read_count: u64) -> Self {
        let stem = molecule_file_stem(sample_id, sequence_id);
        SimulationJob {
            sample_id: sample_id.to_string(),
            sequence_id: sequence_id.to_string(),
            read_count,
            reference: reference_path(dir, sequence_id),
            forward: dir.join(format!("{stem}.{FORWARD_READS_SUFFIX}")),
            reverse: dir.join(format!("{stem}.{REVERSE_READS_SUFFIX}")),
            log: dir.join(format!("{stem}.{LOG_SUFFIX}")),
        }
    }

    fn failure(&self, reason: impl Into<String>) -> SimSeqError {
        SimSeqError::SimulationTool {
            sample_id: self.sample_id.clone(),
            sequence_id: self.sequence_id.clone(),
            reason: reason.into(),
        }
    }
}

///
/// Something that can turn a [`SimulationJob`] into a pair of read files.
/// Implementations must be safe to call from several threads at once; jobs
/// never share output files.
///
pub trait ReadSimulator: Sync {
    fn simulate(&self, job: &SimulationJob) -> Result<()>;
}

///
/// Find an executable the way a shell would: names containing a path
/// separator are used as-is, bare names are searched for on `PATH`. Files
/// without an execute bit are skipped.
///
pub fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

///
/// External `wgsim`-compatible simulator, invoked as
/// `<program> <options...> -N <count> <reference> <forward> <reverse>`.
///
/// The command is spawned from an argument vector, never through a shell.
/// Standard output is discarded and standard error is captured in the
/// job's log file.
///
#[derive(Debug, Clone)]
pub struct Wgsim {
    program: PathBuf,
    options: Vec<String>,
    timeout: Option<Duration>,
}

impl Wgsim {
    pub fn new(program: &str, options: &str, timeout: Option<Duration>) -> Result<Self> {
        let program =
            find_program(program).ok_or_else(|| SimSeqError::ToolNotFound(program.to_string()))?;

        Ok(Wgsim {
            program,
            options: options.split_whitespace().map(String::from).collect(),
            timeout,
        })
    }

    pub fn from_params(params: &RunParams) -> Result<Self> {
        Wgsim::new(&params.simulator, &params.simulator_opts, params.timeout)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self, job: &SimulationJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.options.iter().map(OsString::from).collect();
        args.push(READ_COUNT_FLAG.into());
        args.push(job.read_count.to_string().into());
        args.push(job.reference.clone().into_os_string());
        args.push(job.forward.clone().into_os_string());
        args.push(job.reverse.clone().into_os_string());
        args
    }
}

impl ReadSimulator for Wgsim {
    fn simulate(&self, job: &SimulationJob) -> Result<()> {
        let log = File::create(&job.log)
            .fs_context(|| format!("failed to create simulator log {:?}", job.log))?;

        let mut child = Command::new(&self.program)
            .args(self.args(job))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(log))
            .spawn()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => SimSeqError::ToolNotFound(self.program.display().to_string()),
                _ => job.failure(format!("failed to start {:?}: {}", self.program, err)),
            })?;

        let status = wait_with_timeout(&mut child, self.timeout)
            .map_err(|err| job.failure(format!("failed waiting for {:?}: {}", self.program, err)))?;

        match status {
            Some(status) if status.success() => Ok(()),
            Some(status) => Err(job.failure(format!(
                "{} finished with {} ({})",
                self.program.display(),
                status,
                log_tail(&job.log)
            ))),
            None => Err(job.failure(format!(
                "{} timed out after {:?}",
                self.program.display(),
                self.timeout.unwrap_or_default()
            ))),
        }
    }
}

///
/// Wait for the child, killing it once the timeout elapses. Returns `None`
/// when the child had to be killed.
///
fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }

        if start.elapsed() >= timeout {
            // the child may exit between try_wait and kill
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }

        thread::sleep(TIMEOUT_POLL_INTERVAL);
    }
}

fn log_tail(path: &Path) -> String {
    let contents = fs::read_to_string(path).unwrap_or_default();
    let lines: Vec<&str> = contents.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return "no output on stderr".to_string();
    }

    let start = lines.len().saturating_sub(LOG_TAIL_LINES);
    lines[start..].join("; ")
}
