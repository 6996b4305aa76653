use std::fs;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use simseq_core::errors::{FsContext, Result, SimSeqError};

///
/// Scratch directory holding intermediate files for one run. It is removed
/// when dropped, on success and on error alike, unless it was asked to be
/// kept. Removal failures are logged and otherwise ignored.
///
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    keep: bool,
}

impl ScratchDir {
    ///
    /// Create the scratch directory. An existing directory is only accepted
    /// if it is empty, since the whole directory is deleted afterwards.
    ///
    pub fn create(path: &Path, keep: bool) -> Result<Self> {
        if path.exists() {
            let mut entries = fs::read_dir(path)
                .fs_context(|| format!("failed to read temporary directory {:?}", path))?;
            if entries.next().is_some() {
                return Err(SimSeqError::Filesystem {
                    context: format!("refusing to use temporary directory {:?}", path),
                    source: Error::new(ErrorKind::AlreadyExists, "directory is not empty"),
                });
            }
        }

        fs::create_dir_all(path)
            .fs_context(|| format!("failed to create temporary directory {:?}", path))?;
        log::debug!("using temporary directory {:?}", path);

        Ok(ScratchDir {
            path: path.to_path_buf(),
            keep,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.keep {
            log::info!("keeping temporary directory {:?}", self.path);
            return;
        }

        if let Err(err) = fs::remove_dir_all(&self.path) {
            log::warn!(
                "failed to remove temporary directory {:?}: {}",
                self.path,
                err
            );
        }
    }
}
