//! Decision extraction: the agent's explicit yes/no recommendation.

use serde::{Deserialize, Serialize};

use crate::evaluation::grammar::RECOMMENDATION;

/// An agent's final recommendation. Anything not stated in the expected
/// phrasing is `Unknown`; it is never guessed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Yes => "Yes",
            Decision::No => "No",
            Decision::Unknown => "Unknown",
        }
    }
}

/// Derives the recommendation from raw evaluation text.
///
/// Looks for the phrase `final recommendation: yes` / `no`, optionally with
/// emphasis before the verdict. A "yes" anywhere wins over a "no".
pub fn decide(text: Option<&str>) -> Decision {
    let Some(text) = text else {
        return Decision::Unknown;
    };
    let lowered = text.to_lowercase();

    let mut saw_no = false;
    for caps in RECOMMENDATION.captures_iter(&lowered) {
        match caps.name("verdict").map(|v| v.as_str()) {
            Some("yes") => return Decision::Yes,
            Some("no") => saw_no = true,
            _ => {}
        }
    }

    if saw_no {
        Decision::No
    } else {
        Decision::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_bold_verdicts() {
        assert_eq!(decide(Some("Final recommendation: Yes")), Decision::Yes);
        assert_eq!(decide(Some("Final recommendation: **Yes**")), Decision::Yes);
        assert_eq!(decide(Some("... final recommendation: no ...")), Decision::No);
        assert_eq!(decide(Some("Final Recommendation: **NO**")), Decision::No);
    }

    #[test]
    fn test_other_emphasis_conventions() {
        assert_eq!(decide(Some("Final recommendation: *Yes*")), Decision::Yes);
        assert_eq!(decide(Some("Final recommendation: __No__")), Decision::No);
        assert_eq!(decide(Some("Final recommendation: __Yes__")), Decision::Yes);
        assert_eq!(decide(Some("Final recommendation: _yes_")), Decision::Yes);
    }

    #[test]
    fn test_verdict_is_matched_by_phrase_prefix() {
        assert_eq!(
            decide(Some("Final recommendation: Not recommended at this time.")),
            Decision::No
        );
        assert_eq!(decide(Some("Final recommendation: No.")), Decision::No);
    }

    #[test]
    fn test_absent_input_is_unknown() {
        assert_eq!(decide(None), Decision::Unknown);
        assert_eq!(decide(Some("")), Decision::Unknown);
    }

    #[test]
    fn test_other_phrasings_are_not_guessed() {
        assert_eq!(decide(Some("I recommend hiring: yes")), Decision::Unknown);
        assert_eq!(decide(Some("Recommendation: Yes")), Decision::Unknown);
        assert_eq!(decide(Some("Final recommendation: maybe")), Decision::Unknown);
        assert_eq!(decide(Some("Final recommendation: pending")), Decision::Unknown);
    }

    #[test]
    fn test_yes_wins_when_both_present() {
        let text = "Final recommendation: No\n...revised...\nFinal recommendation: Yes";
        assert_eq!(decide(Some(text)), Decision::Yes);
    }

    #[test]
    fn test_decision_survives_section_stripping() {
        let raw = "1. **Fit Score**: 7/10\nFinal recommendation: Yes";
        let sections = crate::evaluation::parser::parse(Some(raw));
        assert!(!sections[0].content.to_lowercase().contains("final recommendation"));
        assert_eq!(decide(Some(raw)), Decision::Yes);
    }
}
