use anyhow::{Context, Result};
use checkin::Pipeline;

pub fn run(pipeline: &Pipeline, json: bool) -> Result<()> {
    let status = pipeline
        .status(checkin::today())
        .context("failed to read state log")?;

    if json {
        let out = serde_json::to_string_pretty(&status).context("failed to serialize status")?;
        println!("{out}");
        return Ok(());
    }

    println!("{}", status.progress);
    match &status.last_commit {
        Some(date) => println!("Last check-in: {date}"),
        None => println!("Last check-in: never"),
    }
    println!(
        "Checked in today: {}",
        if status.ran_today { "yes" } else { "no" }
    );
    println!(
        "Phrases remaining: {}/{}",
        status.phrases_remaining, status.phrases_total
    );
    Ok(())
}
