mod cmd_run;
mod cmd_status;
mod logging;

use anyhow::{Context, Result};
use checkin::{Config, PhraseCatalog, Pipeline, RenderMode, Staging};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "checkin")]
#[command(about = "Commit one README check-in per day with a fresh phrase")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Repository working directory
    #[arg(long, global = true, default_value = ".")]
    repo: PathBuf,

    /// Content file to rewrite, relative to the repository
    #[arg(long, global = true, default_value = "README.md")]
    content: PathBuf,

    /// State log, relative to the repository
    #[arg(long, global = true, default_value = "log.json")]
    state: PathBuf,

    /// Phrase catalog file, one phrase per line (default: built-in phrases).
    /// Unlike --content and --state, relative to the current directory, not --repo
    #[arg(long, global = true)]
    phrases: Option<PathBuf>,

    /// How the content file is rewritten
    #[arg(long, global = true, value_enum, default_value_t = ModeArg::Replace)]
    mode: ModeArg,

    /// What to stage before committing
    #[arg(long, global = true, value_enum, default_value_t = StageArg::All)]
    stage: StageArg,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run today's check-in (the default)
    Run,
    /// Show progress and remaining phrases without changing anything
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    /// Header, commit number, progress bar, and the quoted phrase
    Replace,
    /// Append the phrase to the existing content
    Append,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Replace => RenderMode::Replace,
            ModeArg::Append => RenderMode::Append,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StageArg {
    /// Every change in the working directory
    All,
    /// Only the content file
    Content,
}

impl From<StageArg> for Staging {
    fn from(stage: StageArg) -> Self {
        match stage {
            StageArg::All => Staging::All,
            StageArg::Content => Staging::Content,
        }
    }
}

impl Cli {
    fn pipeline(&self) -> Result<Pipeline> {
        let config = Config::new(&self.repo)
            .with_content_file(&self.content)
            .with_state_file(&self.state)
            .with_mode(self.mode.into())
            .with_staging(self.stage.into());
        let catalog = match &self.phrases {
            Some(path) => PhraseCatalog::from_file(path)
                .with_context(|| format!("failed to load phrases from {}", path.display()))?,
            None => PhraseCatalog::default(),
        };
        Ok(Pipeline::new(config, catalog))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    let pipeline = cli.pipeline()?;
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run::run(&pipeline),
        Commands::Status { json } => cmd_status::run(&pipeline, json),
    }
}
