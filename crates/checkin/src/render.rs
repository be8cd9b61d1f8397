use serde::{Deserialize, Serialize};

/// Commits needed to reach 100%.
pub const TOTAL_COMMITS: u64 = 365;
/// Width of the progress bar in characters, excluding brackets.
pub const BAR_WIDTH: usize = 30;

const HEADER: &str = "# Daily Development Check-ins";
const FILLED: char = '=';
const EMPTY: char = '-';

/// How the content file is rewritten on each run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Replace the file with a header, the commit ordinal, a progress bar, and
    /// the quoted phrase.
    #[default]
    Replace,
    /// Append the phrase to whatever the file already holds.
    Append,
}

/// Produce the new content file text.
///
/// `commit_count` is the 1-based ordinal of the run being recorded.
pub fn render(mode: RenderMode, previous: Option<&str>, phrase: &str, commit_count: u64) -> String {
    match mode {
        RenderMode::Replace => format!(
            "{HEADER}\n\nCommit #{commit_count}\n{}\n\n> \"{phrase}\"",
            progress_bar(commit_count)
        ),
        RenderMode::Append => format!("{}\n\n{phrase}", previous.unwrap_or_default()),
    }
}

/// `[=====-----...] P% (N/365 commits)`, saturating at 100%.
pub fn progress_bar(commit_count: u64) -> String {
    let ratio = (commit_count as f64 / TOTAL_COMMITS as f64).min(1.0);
    let filled = (BAR_WIDTH as f64 * ratio).round() as usize;
    let percentage = (ratio * 100.0).round() as u64;

    let mut bar = String::with_capacity(BAR_WIDTH + 2);
    bar.push('[');
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, BAR_WIDTH - filled));
    bar.push(']');

    format!("{bar} {percentage}% ({commit_count}/{TOTAL_COMMITS} commits)")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_count(bar: &str) -> usize {
        bar.chars().filter(|c| *c == FILLED).count()
    }

    #[test]
    fn test_progress_bar_first_commit() {
        let bar = progress_bar(1);
        assert_eq!(
            bar,
            "[------------------------------] 0% (1/365 commits)"
        );
    }

    #[test]
    fn test_progress_bar_rounds_fill() {
        // 30 * 7/365 = 0.575 -> 1
        assert_eq!(filled_count(&progress_bar(7)), 1);
        // 30 * 6/365 = 0.49 -> 0
        assert_eq!(filled_count(&progress_bar(6)), 0);
        // 100 * 183/365 = 50.1 -> 50
        assert!(progress_bar(183).contains(" 50% "));
    }

    #[test]
    fn test_progress_bar_full_at_365() {
        let bar = progress_bar(365);
        assert!(bar.starts_with(&format!("[{}]", "=".repeat(BAR_WIDTH))));
        assert!(bar.ends_with("100% (365/365 commits)"));
    }

    #[test]
    fn test_progress_bar_saturates_past_365() {
        let bar = progress_bar(366);
        assert_eq!(filled_count(&bar), BAR_WIDTH);
        assert!(bar.contains("100%"));
        assert!(bar.contains("366/365"));
    }

    #[test]
    fn test_render_replace() {
        let out = render(RenderMode::Replace, Some("old stuff"), "Keep going", 3);
        assert_eq!(
            out,
            "# Daily Development Check-ins\n\n\
             Commit #3\n\
             [------------------------------] 1% (3/365 commits)\n\n\
             > \"Keep going\""
        );
        assert!(!out.contains("old stuff"));
    }

    #[test]
    fn test_render_append() {
        let out = render(RenderMode::Append, Some("# Log"), "Keep going", 3);
        assert_eq!(out, "# Log\n\nKeep going");
    }

    #[test]
    fn test_render_append_to_missing_file() {
        assert_eq!(render(RenderMode::Append, None, "First", 1), "\n\nFirst");
    }
}
