//! Per-role and per-view configuration for the shared extraction grammar.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::evaluation::record::AgentRole;

/// Labels that introduce a role's own fit score. Recruiter, hiring manager
/// and technical lead write "Fit Score"; the portfolio agent writes
/// "Technical Skill Score".
pub const SCORE_HEADINGS: &[&str] = &["fit score", "technical skill score"];

/// Static description of how one role's evaluation is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleProfile {
    pub role: AgentRole,
    /// Lower-cased fragment; sections whose title contains it are shown as
    /// the gauge instead of a card.
    pub score_section: &'static str,
    /// Lower-cased fragments marking text the agent produced without usable
    /// input. Such evaluations render as a placeholder.
    pub unavailable_markers: &'static [&'static str],
}

static ROLE_PROFILES: [RoleProfile; 4] = [
    RoleProfile {
        role: AgentRole::Recruiter,
        score_section: "fit score",
        unavailable_markers: &[],
    },
    RoleProfile {
        role: AgentRole::HiringManager,
        score_section: "fit score",
        unavailable_markers: &[],
    },
    RoleProfile {
        role: AgentRole::Portfolio,
        score_section: "technical skill score",
        unavailable_markers: &["github fetch error", "no usable github"],
    },
    RoleProfile {
        role: AgentRole::TechnicalLead,
        score_section: "fit score",
        unavailable_markers: &[],
    },
];

impl RoleProfile {
    pub fn of(role: AgentRole) -> &'static RoleProfile {
        match role {
            AgentRole::Recruiter => &ROLE_PROFILES[0],
            AgentRole::HiringManager => &ROLE_PROFILES[1],
            AgentRole::Portfolio => &ROLE_PROFILES[2],
            AgentRole::TechnicalLead => &ROLE_PROFILES[3],
        }
    }

    pub fn hides_section(&self, title: &str) -> bool {
        title.to_lowercase().contains(self.score_section)
    }

    pub fn is_unavailable(&self, raw_text: &str) -> bool {
        let lowered = raw_text.to_lowercase();
        self.unavailable_markers
            .iter()
            .any(|marker| lowered.contains(marker))
    }
}

const COMPACT_ROLES: &[AgentRole] = &[AgentRole::Recruiter, AgentRole::HiringManager];

/// Which set of roles a dashboard view shows. Both views share one grammar;
/// they differ only in the roles they surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewProfile {
    /// Recruiter and hiring manager only.
    Compact,
    #[default]
    Full,
}

impl ViewProfile {
    pub fn roles(&self) -> &'static [AgentRole] {
        match self {
            ViewProfile::Compact => COMPACT_ROLES,
            ViewProfile::Full => &AgentRole::CANONICAL,
        }
    }

    pub fn includes(&self, role: AgentRole) -> bool {
        self.roles().contains(&role)
    }
}

impl FromStr for ViewProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(ViewProfile::Compact),
            "full" => Ok(ViewProfile::Full),
            other => Err(format!("unknown view profile '{other}' (expected 'compact' or 'full')")),
        }
    }
}
