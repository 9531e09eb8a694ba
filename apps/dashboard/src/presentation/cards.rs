//! Agent panels: decision banner, section cards and fit gauge for one role.

use serde::Serialize;

use crate::evaluation::decision::Decision;
use crate::evaluation::profile::RoleProfile;
use crate::evaluation::record::{AgentRecord, AgentRole, Section};
use crate::evaluation::score::{Score, MAX_SCORE};

pub const NOTHING_TO_SEE: &str = "Nothing to see here :(";
pub const NO_USABLE_GITHUB: &str = "No usable GitHub link provided :(";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerTone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionBanner {
    pub decision: Decision,
    pub tone: BannerTone,
    pub text: String,
}

impl DecisionBanner {
    pub fn new(decision: Decision) -> Self {
        let tone = match decision {
            Decision::Yes => BannerTone::Positive,
            Decision::No => BannerTone::Negative,
            Decision::Unknown => BannerTone::Neutral,
        };
        Self {
            decision,
            tone,
            text: format!("Final Recommendation: {}", decision.as_str()),
        }
    }
}

/// Fill level of the fit-score gauge. `value: None` means the agent recorded
/// no fit score, which renders empty and grey rather than as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitGauge {
    pub value: Option<Score>,
    pub fill_ratio: f32,
    pub color: String,
    pub label: String,
}

const GAUGE_RED: [u8; 3] = [231, 76, 60];
const GAUGE_YELLOW: [u8; 3] = [241, 196, 15];
const GAUGE_GREEN: [u8; 3] = [46, 204, 113];
const GAUGE_EMPTY: &str = "rgb(189, 189, 189)";

impl FitGauge {
    pub fn new(value: Option<Score>) -> Self {
        match value {
            Some(score) => {
                let score = score.min(MAX_SCORE);
                Self {
                    value: Some(score),
                    fill_ratio: f32::from(score) / f32::from(MAX_SCORE),
                    color: gauge_color(score),
                    label: format!("{score}/{MAX_SCORE}"),
                }
            }
            None => Self {
                value: None,
                fill_ratio: 0.0,
                color: GAUGE_EMPTY.to_string(),
                label: "No data".to_string(),
            },
        }
    }
}

/// Red at 0, yellow at 5, green at 10, linear in between.
fn gauge_color(score: Score) -> String {
    let v = f32::from(score.min(MAX_SCORE));
    let (from, to, t) = if v <= 5.0 {
        (GAUGE_RED, GAUGE_YELLOW, v / 5.0)
    } else {
        (GAUGE_YELLOW, GAUGE_GREEN, (v - 5.0) / 5.0)
    };
    let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
    format!(
        "rgb({}, {}, {})",
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2])
    )
}

/// What one agent tab shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentPanel {
    Placeholder {
        message: &'static str,
    },
    Evaluated {
        banner: DecisionBanner,
        cards: Vec<Section>,
        gauge: FitGauge,
    },
}

pub fn agent_panel(role: AgentRole, record: Option<&AgentRecord>) -> AgentPanel {
    let profile = RoleProfile::of(role);

    let Some(record) = record else {
        return AgentPanel::Placeholder {
            message: NOTHING_TO_SEE,
        };
    };

    if profile.is_unavailable(&record.raw_text) {
        return AgentPanel::Placeholder {
            message: NO_USABLE_GITHUB,
        };
    }

    let cards = record
        .sections
        .iter()
        .filter(|section| !profile.hides_section(&section.title))
        .cloned()
        .collect();

    AgentPanel::Evaluated {
        banner: DecisionBanner::new(record.decision),
        cards,
        gauge: FitGauge::new(record.fit_score),
    }
}
