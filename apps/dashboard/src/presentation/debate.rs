//! Debate modal: transcript bubbles and the declared winner.

use serde::Serialize;

use crate::evaluation::record::{AgentRole, DebateEntry, MatchEvaluation};

/// The first entries are each side's opening evaluation, already shown in
/// the agent tabs.
const OPENING_ENTRIES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BubbleSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebateBubble {
    pub speaker: String,
    pub text: String,
    pub side: BubbleSide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebateView {
    pub winner: Option<&'static str>,
    pub bubbles: Vec<DebateBubble>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebateButton {
    pub enabled: bool,
    pub label: &'static str,
}

pub fn debate_button(evaluation: &MatchEvaluation) -> DebateButton {
    if evaluation.has_debate() {
        DebateButton {
            enabled: true,
            label: "View Debate",
        }
    } else {
        DebateButton {
            enabled: false,
            label: "No Debate: Agents Agreed",
        }
    }
}

pub fn debate_view(evaluation: &MatchEvaluation) -> DebateView {
    DebateView {
        winner: evaluation.debate_winner.as_deref().map(winner_label),
        bubbles: evaluation
            .debate_transcript
            .iter()
            .skip(OPENING_ENTRIES)
            .map(bubble)
            .collect(),
    }
}

/// The backend names winners loosely ("recruiteragent", "RecruiterAgent").
fn winner_label(winner: &str) -> &'static str {
    if winner.to_lowercase().contains("recruiter") {
        AgentRole::Recruiter.label()
    } else {
        AgentRole::HiringManager.label()
    }
}

fn bubble(entry: &DebateEntry) -> DebateBubble {
    let side = if entry.source.to_lowercase().contains("recruiter") {
        BubbleSide::Left
    } else {
        BubbleSide::Right
    };
    DebateBubble {
        speaker: entry.source.replacen("Agent", "", 1).trim().to_string(),
        text: entry.text.replace('"', ""),
        side,
    }
}
