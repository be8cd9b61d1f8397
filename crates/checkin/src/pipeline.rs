use crate::catalog::PhraseCatalog;
use crate::error::{Error, Result, Step, VcsError};
use crate::guard::{format_date, should_run};
use crate::render::{RenderMode, progress_bar, render};
use crate::select::{eligible, select};
use crate::state::StateStore;
use crate::vcs::{Staging, Vcs};
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// Configuration
// ============================================================================

/// Where a run reads and writes, and how it renders and stages.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the repository working directory.
    pub repo_dir: PathBuf,
    /// Tracked content file, relative to `repo_dir`.
    pub content_file: PathBuf,
    /// State file, relative to `repo_dir`.
    pub state_file: PathBuf,
    pub mode: RenderMode,
    pub staging: Staging,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Config {
    pub fn new<P: Into<PathBuf>>(repo_dir: P) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            content_file: PathBuf::from("README.md"),
            state_file: PathBuf::from("log.json"),
            mode: RenderMode::default(),
            staging: Staging::default(),
        }
    }

    pub fn with_content_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.content_file = path.into();
        self
    }

    pub fn with_state_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.state_file = path.into();
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_staging(mut self, staging: Staging) -> Self {
        self.staging = staging;
        self
    }

    pub fn content_path(&self) -> PathBuf {
        self.repo_dir.join(&self.content_file)
    }

    pub fn state_path(&self) -> PathBuf {
        self.repo_dir.join(&self.state_file)
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// A check-in that reached the remote and was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checkin {
    pub date: String,
    pub phrase: String,
    pub commit_count: u64,
}

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Committed(Checkin),
    /// `date` is already in the state log; nothing was touched.
    AlreadyRanToday { date: String },
    /// Every catalog phrase has been used; nothing was touched.
    CatalogExhausted { catalog_size: usize },
}

/// Read-only summary of the state log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub commits: usize,
    pub last_commit: Option<String>,
    pub ran_today: bool,
    pub phrases_total: usize,
    pub phrases_remaining: usize,
    pub mode: RenderMode,
    pub progress: String,
}

// ============================================================================
// Pipeline
// ============================================================================

/// The once-per-day check-in procedure.
///
/// Guard, select, pull, render, write, stage, commit, push, then record. Any
/// failure stops the run; the state log is only written after a successful push.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    catalog: PhraseCatalog,
}

impl Pipeline {
    pub fn new(config: Config, catalog: PhraseCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &PhraseCatalog {
        &self.catalog
    }

    pub fn store(&self) -> StateStore {
        StateStore::new(self.config.state_path())
    }

    /// Execute one run for `today`.
    pub fn run<V: Vcs, R: Rng>(
        &self,
        vcs: &mut V,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<RunOutcome> {
        let store = self.store();
        let mut record = store.load()?;
        let date = format_date(today);

        if !should_run(&record, today) {
            info!(%date, "already committed today");
            return Ok(RunOutcome::AlreadyRanToday { date });
        }

        let phrase = match select(&self.catalog, &record.already_added, rng) {
            Ok(phrase) => phrase.to_string(),
            Err(Error::ExhaustedCatalog) => {
                warn!(
                    catalog_size = self.catalog.len(),
                    "no unused phrases left, add more phrases to the catalog"
                );
                return Ok(RunOutcome::CatalogExhausted {
                    catalog_size: self.catalog.len(),
                });
            }
            Err(e) => return Err(e),
        };
        let commit_count = record.next_commit_count();

        info!("pulling remote changes");
        vcs.pull().map_err(at(Step::Pull))?;

        let content_path = self.config.content_path();
        self.write_content(&content_path, &phrase, commit_count)
            .map_err(|e| at(Step::WriteContent)(e.into()))?;
        info!(path = %content_path.display(), %phrase, commit_count, "content updated");

        let paths = self.config.staging.paths(&self.config.content_file);
        let paths: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
        vcs.add(&paths).map_err(at(Step::Stage))?;
        vcs.commit(&phrase).map_err(at(Step::Commit))?;

        info!("pushing");
        vcs.push().map_err(at(Step::Push))?;

        record.record(date.clone(), phrase.clone());
        store.save(&record)?;
        info!(%date, commit_count, "check-in recorded");

        Ok(RunOutcome::Committed(Checkin {
            date,
            phrase,
            commit_count,
        }))
    }

    /// Summarize the state log without creating or repairing it.
    pub fn status(&self, today: NaiveDate) -> Result<Status> {
        let record = self.store().peek()?;
        let remaining = eligible(&self.catalog, &record.already_added).len();
        Ok(Status {
            commits: record.commits.len(),
            last_commit: record.last_commit().map(str::to_string),
            ran_today: !should_run(&record, today),
            phrases_total: self.catalog.len(),
            phrases_remaining: remaining,
            mode: self.config.mode,
            progress: progress_bar(record.commits.len() as u64),
        })
    }

    fn write_content(
        &self,
        path: &Path,
        phrase: &str,
        commit_count: u64,
    ) -> std::io::Result<()> {
        let previous = match self.config.mode {
            RenderMode::Append => read_if_exists(path)?,
            RenderMode::Replace => None,
        };
        let content = render(self.config.mode, previous.as_deref(), phrase, commit_count);
        std::fs::write(path, content)
    }
}

fn read_if_exists(path: &Path) -> std::io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn at(step: Step) -> impl FnOnce(VcsError) -> Error {
    move |source| Error::Step { step, source }
}
