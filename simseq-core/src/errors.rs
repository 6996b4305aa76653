use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimSeqError {
    #[error("configuration error ({origin}): {message}")]
    ConfigFormat { origin: String, message: String },

    #[error(
        "identifier validation failed: {0:?} must be non-empty and contain only characters from [A-Za-z0-9._-]"
    )]
    InvalidIdentifier(String),

    #[error("simulation tool not found on PATH: {0}")]
    ToolNotFound(String),

    #[error("simulation failed for sample {sample_id}, sequence {sequence_id}: {reason}")]
    SimulationTool {
        sample_id: String,
        sequence_id: String,
        reason: String,
    },

    #[error("reference sequence {0:?} is referenced by the sampling configuration but missing from the input")]
    MissingSequence(String),

    #[error("reference pool is not valid FASTA (record {record}): {message}")]
    InvalidFasta { record: usize, message: String },

    #[error("filesystem error: {context}: {source}")]
    Filesystem {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("could not start simulation workers: {0}")]
    WorkerPool(String),
}

impl SimSeqError {
    pub fn config(origin: impl Into<String>, message: impl Into<String>) -> Self {
        SimSeqError::ConfigFormat {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Prefix the context of a filesystem error with the stage it happened in.
    pub fn in_stage(self, stage: &str) -> Self {
        match self {
            SimSeqError::Filesystem { context, source } => SimSeqError::Filesystem {
                context: format!("{stage}: {context}"),
                source,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimSeqError>;

///
/// Attach a human readable description to filesystem errors, the same way
/// `anyhow::Context` does for the command line tools.
///
pub trait FsContext<T> {
    fn fs_context<F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> FsContext<T> for io::Result<T> {
    fn fs_context<F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| SimSeqError::Filesystem {
            context: context(),
            source,
        })
    }
}
