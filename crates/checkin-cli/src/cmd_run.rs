use anyhow::{Context, Result};
use checkin::{Pipeline, RunOutcome};
use checkin_git::GitRepo;
use tracing::error;

pub fn run(pipeline: &Pipeline) -> Result<()> {
    let repo_dir = &pipeline.config().repo_dir;
    let mut repo = GitRepo::open(repo_dir)
        .with_context(|| format!("failed to open git repository at {}", repo_dir.display()))?;

    let outcome = match pipeline.run(&mut repo, checkin::today(), &mut rand::rng()) {
        Ok(outcome) => outcome,
        Err(e) => {
            match e.step() {
                Some(step) => error!(%step, "check-in aborted"),
                None => error!("check-in aborted"),
            }
            return Err(e).context("check-in failed");
        }
    };

    match outcome {
        RunOutcome::Committed(c) => {
            println!("Check-in #{} committed and pushed: \"{}\"", c.commit_count, c.phrase);
        }
        RunOutcome::AlreadyRanToday { date } => {
            println!("Already checked in today ({date}), nothing to do");
        }
        RunOutcome::CatalogExhausted { catalog_size } => {
            println!(
                "All {catalog_size} phrases have been used, add more phrases to the catalog"
            );
        }
    }
    Ok(())
}
