//! Shared extraction grammar for agent evaluation text.
//!
//! Every role is parsed with the same patterns. Role-specific behaviour
//! (score heading synonyms, hidden section titles) is data in `profile.rs`,
//! never a separate pattern set.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::evaluation::profile::SCORE_HEADINGS;

/// A numbered, emphasis-wrapped heading: `1. **Title**:` at the start of a
/// line or after whitespace. The `title` group is the emphasis text.
pub static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^\s*|\s+)\d+\.\s*\*\*(?P<title>.+?)\*\*\s*:*")
        .expect("heading pattern must compile")
});

/// `<digits>/10`, tolerating spaces around the slash. `8/100` is not a match.
pub static SCORE_FRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<score>\d+)\s*/\s*10\b").expect("score fraction pattern must compile")
});

/// A labelled fit score anywhere in the text, e.g. `3. **Fit Score**: 8/10`
/// or `**Technical Skill Score** (depth and coverage): 7 / 10`.
pub static LABELLED_SCORE: Lazy<Regex> = Lazy::new(|| {
    let labels = SCORE_HEADINGS
        .iter()
        .map(|label| regex::escape(label))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)(?:\d+\.\s*)?\**(?:{labels})\**[^:]*:[\s*_]*(?P<score>\d+)\s*/\s*10\b"
    ))
    .expect("labelled score pattern must compile")
});

/// The recommendation phrase in lower-cased text, with optional `*`/`_`
/// emphasis before the verdict. Only the verdict's leading letters are
/// checked, so `no.`, `__no__` and `not recommended` all read as "no".
pub static RECOMMENDATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"final recommendation:\s*(?:\*{1,2}|_{1,2})?(?P<verdict>yes|no)")
        .expect("recommendation pattern must compile")
});

/// The trailing recommendation clause removed from the last parsed section.
pub static RECOMMENDATION_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)final recommendation:.*").expect("recommendation clause pattern must compile")
});
