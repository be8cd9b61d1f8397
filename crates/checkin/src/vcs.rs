use crate::error::VcsError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub type VcsResult<T> = std::result::Result<T, VcsError>;

/// A version-control working directory the pipeline publishes through.
///
/// Each call blocks until the operation finishes; there is no timeout.
pub trait Vcs {
    /// Bring the working directory up to date with its remote.
    fn pull(&mut self) -> VcsResult<()>;

    /// Stage `paths`, relative to the working directory root. `.` stages
    /// everything.
    fn add(&mut self, paths: &[&Path]) -> VcsResult<()>;

    /// Commit the index with `message` verbatim.
    ///
    /// Fails with [`VcsError::NothingToCommit`] when the index matches `HEAD`.
    fn commit(&mut self, message: &str) -> VcsResult<()>;

    /// Publish local commits to the remote.
    fn push(&mut self) -> VcsResult<()>;
}

/// Which paths are staged before committing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Staging {
    /// Every change in the working directory.
    #[default]
    All,
    /// Only the content file.
    Content,
}

impl Staging {
    pub fn paths(self, content_file: &Path) -> Vec<PathBuf> {
        match self {
            Staging::All => vec![PathBuf::from(".")],
            Staging::Content => vec![content_file.to_path_buf()],
        }
    }
}
