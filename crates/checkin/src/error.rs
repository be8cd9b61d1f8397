use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A step of the run that talks to the working tree or the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Pull,
    WriteContent,
    Stage,
    Commit,
    Push,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Pull => "pull",
            Step::WriteContent => "write content",
            Step::Stage => "stage",
            Step::Commit => "commit",
            Step::Push => "push",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid phrase catalog: {0}")]
    InvalidCatalog(String),

    #[error("Every phrase in the catalog has already been used")]
    ExhaustedCatalog,

    #[error("{step} failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: VcsError,
    },
}

impl Error {
    /// The pipeline step that failed, if the error came from one.
    pub fn step(&self) -> Option<Step> {
        match self {
            Error::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Failures reported by a [`Vcs`](crate::Vcs) implementation.
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("nothing to commit")]
    NothingToCommit,

    #[error("remote sync failed during {op}: {detail}")]
    RemoteSync { op: &'static str, detail: String },

    #[error("{detail}")]
    Command { detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
