#![doc = include_str!("../README.md")]

mod catalog;
mod error;
mod guard;
mod pipeline;
mod render;
mod select;
mod state;
mod vcs;

pub use catalog::PhraseCatalog;
pub use error::{Error, Result, Step, VcsError};
pub use guard::{DATE_FORMAT, format_date, should_run, today};
pub use pipeline::{Checkin, Config, Pipeline, RunOutcome, Status};
pub use render::{BAR_WIDTH, RenderMode, TOTAL_COMMITS, progress_bar, render};
pub use select::{eligible, select};
pub use state::{LoadStatus, StateRecord, StateStore};
pub use vcs::{Staging, Vcs, VcsResult};
