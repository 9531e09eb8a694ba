//! Score extraction.
//!
//! - `overall_score` falls back to a neutral 5; the radar chart plots it at
//!   the midpoint.
//! - `fit_score` has no default. `None` renders as "no data" on the gauge,
//!   never as a recorded score.

use crate::evaluation::grammar::{LABELLED_SCORE, SCORE_FRACTION};

/// A score from 0 to 10.
pub type Score = u8;

pub const MAX_SCORE: Score = 10;
pub const NEUTRAL_SCORE: Score = 5;

/// Reads the first line mentioning "overall" and returns its `N/10`
/// numerator, or `NEUTRAL_SCORE` when there is none.
pub fn overall_score(text: Option<&str>) -> Score {
    let Some(text) = text else {
        return NEUTRAL_SCORE;
    };

    text.lines()
        .filter(|line| !line.trim().is_empty())
        .find(|line| line.to_lowercase().contains("overall"))
        .and_then(|line| SCORE_FRACTION.captures(line))
        .and_then(|caps| numerator(caps.name("score")?.as_str()))
        .unwrap_or(NEUTRAL_SCORE)
}

/// Finds a "Fit Score" / "Technical Skill Score" label anywhere in the text
/// and returns its `N/10` numerator.
pub fn fit_score(text: Option<&str>) -> Option<Score> {
    let caps = LABELLED_SCORE.captures(text?)?;
    numerator(caps.name("score")?.as_str())
}

/// Parses a numerator, clamping anything above ten.
fn numerator(digits: &str) -> Option<Score> {
    let value: u64 = digits.parse().ok()?;
    Some(value.min(MAX_SCORE as u64) as Score)
}
