#![doc = include_str!("../README.md")]

use checkin::{Vcs, VcsError, VcsResult};
use git2::{Commit, ErrorCode, IndexAddOption, Repository};
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, instrument};

// ============================================================================
// Public types
// ============================================================================

/// A git working directory.
///
/// Index and commit operations run in-process through `git2`. `pull` and
/// `push` run the `git` executable so the user's credential helpers, SSH agent,
/// and upstream configuration apply.
///
/// The repository may be opened from a subdirectory of its work tree. Paths
/// given to [`Vcs::add`] are then relative to that subdirectory, and `.` means
/// the subdirectory rather than the whole tree.
pub struct GitRepo {
    repo: Repository,
    workdir: PathBuf,
    /// Opened directory relative to `workdir`; empty at the root.
    prefix: PathBuf,
    git_bin: PathBuf,
}

impl GitRepo {
    /// Open the repository containing `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> VcsResult<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(git_err)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| VcsError::Command {
                detail: format!("{} is a bare repository", path.display()),
            })?
            .canonicalize()?;
        let opened = path.canonicalize()?;
        let prefix = opened
            .strip_prefix(&workdir)
            .map_err(|_| VcsError::Command {
                detail: format!(
                    "{} is outside the work tree {}",
                    opened.display(),
                    workdir.display()
                ),
            })?
            .to_path_buf();
        debug!(workdir = %workdir.display(), prefix = %prefix.display(), "opened repository");
        Ok(Self {
            repo,
            workdir,
            prefix,
            git_bin: PathBuf::from("git"),
        })
    }

    /// Use a specific `git` executable for network operations.
    pub fn with_git_bin<P: Into<PathBuf>>(mut self, git_bin: P) -> Self {
        self.git_bin = git_bin.into();
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// The opened directory relative to the work tree root.
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Turn a path relative to the opened directory into a libgit2 pathspec
    /// relative to the work tree root.
    fn pathspec(&self, path: &Path) -> String {
        let full = if path == Path::new(".") {
            self.prefix.join("*")
        } else {
            self.prefix.join(path)
        };
        let mut parts: Vec<String> = Vec::new();
        for component in full.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                Component::ParentDir => {
                    parts.pop();
                }
                _ => {}
            }
        }
        parts.join("/")
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// True when the index differs from the `HEAD` tree.
    pub fn has_staged_changes(&self) -> VcsResult<bool> {
        let mut index = self.repo.index().map_err(git_err)?;
        let index_tree = index.write_tree().map_err(git_err)?;
        match self.head_commit()? {
            Some(head) => Ok(head.tree_id() != index_tree),
            // Unborn HEAD: anything in the index is new.
            None => Ok(!index.is_empty()),
        }
    }

    fn head_commit(&self) -> VcsResult<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => head.peel_to_commit().map(Some).map_err(git_err),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(git_err(e)),
        }
    }

    fn run_remote(&self, op: &'static str) -> VcsResult<()> {
        let output = self.run(&[op]).map_err(|e| VcsError::RemoteSync {
            op,
            detail: e.to_string(),
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VcsError::RemoteSync {
                op,
                detail: stderr.trim().to_string(),
            });
        }
        Ok(())
    }

    fn run(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new(&self.git_bin)
            .args(args)
            .current_dir(&self.workdir)
            .output()
    }
}

impl Vcs for GitRepo {
    #[instrument(skip_all)]
    fn pull(&mut self) -> VcsResult<()> {
        debug!(workdir = %self.workdir.display(), "git pull");
        self.run_remote("pull")
    }

    #[instrument(skip_all)]
    fn add(&mut self, paths: &[&Path]) -> VcsResult<()> {
        let specs: Vec<String> = paths.iter().map(|p| self.pathspec(p)).collect();
        debug!(?specs, "staging");
        let mut index = self.repo.index().map_err(git_err)?;
        index
            .add_all(specs.iter().map(String::as_str), IndexAddOption::DEFAULT, None)
            .map_err(git_err)?;
        // Picks up deletions, which add_all skips.
        index
            .update_all(specs.iter().map(String::as_str), None)
            .map_err(git_err)?;
        index.write().map_err(git_err)?;
        Ok(())
    }

    #[instrument(skip_all)]
    fn commit(&mut self, message: &str) -> VcsResult<()> {
        if !self.has_staged_changes()? {
            debug!("index matches HEAD");
            return Err(VcsError::NothingToCommit);
        }
        let mut index = self.repo.index().map_err(git_err)?;
        let tree_id = index.write_tree().map_err(git_err)?;
        let tree = self.repo.find_tree(tree_id).map_err(git_err)?;
        let sig = self.repo.signature().map_err(git_err)?;

        let parent = self.head_commit()?;
        let parents: Vec<&Commit> = parent.iter().collect();
        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .map_err(git_err)?;
        debug!(%oid, "committed");
        Ok(())
    }

    #[instrument(skip_all)]
    fn push(&mut self) -> VcsResult<()> {
        debug!(workdir = %self.workdir.display(), "git push");
        self.run_remote("push")
    }
}

fn git_err(e: git2::Error) -> VcsError {
    VcsError::Command {
        detail: format!("git: {}", e.message()),
    }
}
