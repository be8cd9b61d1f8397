use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

const DEFAULT_PHRASES: [&str; 40] = [
    "Small steps every day add up to big changes",
    "Consistency beats intensity",
    "Code a little, learn a lot",
    "Today's bug is tomorrow's lesson",
    "Make it work, make it right, make it fast",
    "Progress, not perfection",
    "Every expert was once a beginner",
    "Read the error message twice",
    "Simple is better than clever",
    "Leave the code better than you found it",
    "Ship it, then improve it",
    "One commit closer to the goal",
    "Write the test you wish you had yesterday",
    "Naming things is half the battle",
    "Delete code with confidence",
    "Refactor when it hurts, not before",
    "The best code is the code you don't write",
    "Keep the build green",
    "Curiosity is the best debugger",
    "Done is better than perfect",
    "Document the why, not the what",
    "Learn one new thing today",
    "Measure before you optimize",
    "Small pull requests, happy reviewers",
    "Rest is part of the process",
    "Debugging is detective work",
    "Automate the boring parts",
    "Start where you are, use what you have",
    "Great software is built one line at a time",
    "Failing tests are free advice",
    "Stay humble, keep learning",
    "Readability counts",
    "A good commit tells a story",
    "Break big problems into small ones",
    "Celebrate the small wins",
    "Clarity over cleverness",
    "Build things you would want to use",
    "Focus on one thing at a time",
    "Show up, even on slow days",
    "Tomorrow's code starts with today's habit",
];

/// The fixed, ordered list of phrases a run may pick from.
///
/// Phrases are distinct and the catalog is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCatalog {
    phrases: Vec<String>,
}

impl Default for PhraseCatalog {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl PhraseCatalog {
    pub fn new<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(Error::InvalidCatalog("catalog has no phrases".to_string()));
        }
        let mut seen = HashSet::new();
        for phrase in &phrases {
            if phrase.trim().is_empty() {
                return Err(Error::InvalidCatalog("blank phrase".to_string()));
            }
            if !seen.insert(phrase.as_str()) {
                return Err(Error::InvalidCatalog(format!("duplicate phrase: {phrase:?}")));
            }
        }
        Ok(Self { phrases })
    }

    /// Parse a catalog with one phrase per line. Blank lines and lines starting
    /// with `#` are skipped; surrounding whitespace is trimmed.
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
