//! Structured records derived from one match's raw agent evaluations.
//!
//! Records are rebuilt wholesale from every fetch response and never patched
//! in place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::backend_client::models::MatchDetail;
use crate::evaluation::decision::{decide, Decision};
use crate::evaluation::parser::parse;
use crate::evaluation::score::{fit_score, overall_score, Score};

/// An evaluator role. Declaration order is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Recruiter,
    HiringManager,
    Portfolio,
    TechnicalLead,
}

impl AgentRole {
    pub const CANONICAL: [AgentRole; 4] = [
        AgentRole::Recruiter,
        AgentRole::HiringManager,
        AgentRole::Portfolio,
        AgentRole::TechnicalLead,
    ];

    /// Human-facing label, also used as the radar axis name.
    pub fn label(&self) -> &'static str {
        match self {
            AgentRole::Recruiter => "Recruiter Agent",
            AgentRole::HiringManager => "Hiring Manager Agent",
            AgentRole::Portfolio => "Portfolio Agent",
            AgentRole::TechnicalLead => "Technical Lead Agent",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A parsed `(title, content)` unit of one evaluation. Both fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

/// Everything derived from one agent's raw text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRecord {
    pub role: AgentRole,
    pub raw_text: String,
    pub sections: Vec<Section>,
    pub decision: Decision,
    pub overall_score: Score,
    pub fit_score: Option<Score>,
}

impl AgentRecord {
    pub fn from_text(role: AgentRole, raw_text: &str) -> Self {
        Self {
            role,
            raw_text: raw_text.to_string(),
            sections: parse(Some(raw_text)),
            decision: decide(Some(raw_text)),
            overall_score: overall_score(Some(raw_text)),
            fit_score: fit_score(Some(raw_text)),
        }
    }
}

/// One turn of the recruiter / hiring manager debate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateEntry {
    pub source: String,
    pub text: String,
}

/// All agent records for one (applicant, job) match plus the optional debate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchEvaluation {
    pub recruiter: Option<AgentRecord>,
    pub hiring_manager: Option<AgentRecord>,
    pub portfolio: Option<AgentRecord>,
    pub technical_lead: Option<AgentRecord>,
    pub debate_transcript: Vec<DebateEntry>,
    pub debate_winner: Option<String>,
}

impl MatchEvaluation {
    /// Builds the structured evaluation from a match-detail response.
    /// Missing or empty agent texts leave that role absent.
    pub fn from_detail(detail: MatchDetail) -> Self {
        let record = |role: AgentRole, text: Option<String>| {
            text.filter(|t| !t.is_empty())
                .map(|t| AgentRecord::from_text(role, &t))
        };

        Self {
            recruiter: record(AgentRole::Recruiter, detail.recruiter_agent),
            hiring_manager: record(AgentRole::HiringManager, detail.hiring_manager_agent),
            portfolio: record(AgentRole::Portfolio, detail.portfolio_agent),
            technical_lead: record(AgentRole::TechnicalLead, detail.technical_lead_agent),
            debate_transcript: detail.debate_transcript,
            debate_winner: detail.debate_winner.filter(|w| !w.trim().is_empty()),
        }
    }

    pub fn agent(&self, role: AgentRole) -> Option<&AgentRecord> {
        match role {
            AgentRole::Recruiter => self.recruiter.as_ref(),
            AgentRole::HiringManager => self.hiring_manager.as_ref(),
            AgentRole::Portfolio => self.portfolio.as_ref(),
            AgentRole::TechnicalLead => self.technical_lead.as_ref(),
        }
    }

    /// Present agent records in canonical role order.
    pub fn agents(&self) -> impl Iterator<Item = &AgentRecord> {
        AgentRole::CANONICAL
            .into_iter()
            .filter_map(move |role| self.agent(role))
    }

    pub fn has_debate(&self) -> bool {
        !self.debate_transcript.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECRUITER_TEXT: &str = "1. **Experience Match**: Five years of Rust.\n\
        2. **Overall Assessment**: Strong candidate, 8/10 overall.\n\
        5. **Fit Score**: 8/10\n\
        Final recommendation: **Yes**";

    fn detail(recruiter: Option<&str>, manager: Option<&str>) -> MatchDetail {
        MatchDetail {
            recruiter_agent: recruiter.map(str::to_string),
            hiring_manager_agent: manager.map(str::to_string),
            portfolio_agent: None,
            technical_lead_agent: None,
            debate_transcript: vec![],
            debate_winner: None,
        }
    }

    #[test]
    fn test_record_from_text_derives_every_field() {
        let record = AgentRecord::from_text(AgentRole::Recruiter, RECRUITER_TEXT);
        assert_eq!(record.sections.len(), 3);
        assert_eq!(record.sections[2].title, "Fit Score");
        assert_eq!(record.sections[2].content, "8/10");
        assert_eq!(record.decision, Decision::Yes);
        assert_eq!(record.overall_score, 8);
        assert_eq!(record.fit_score, Some(8));
        assert_eq!(record.raw_text, RECRUITER_TEXT);
    }

    #[test]
    fn test_empty_agent_text_is_treated_as_absent() {
        let evaluation = MatchEvaluation::from_detail(detail(Some(""), Some(RECRUITER_TEXT)));
        assert!(evaluation.recruiter.is_none());
        assert!(evaluation.hiring_manager.is_some());
    }

    #[test]
    fn test_agents_iterate_in_canonical_order() {
        let mut d = detail(Some(RECRUITER_TEXT), Some(RECRUITER_TEXT));
        d.technical_lead_agent = Some("Overall 6/10".to_string());
        let evaluation = MatchEvaluation::from_detail(d);
        let roles: Vec<AgentRole> = evaluation.agents().map(|a| a.role).collect();
        assert_eq!(
            roles,
            vec![
                AgentRole::Recruiter,
                AgentRole::HiringManager,
                AgentRole::TechnicalLead
            ]
        );
    }

    #[test]
    fn test_blank_winner_is_dropped() {
        let mut d = detail(None, None);
        d.debate_winner = Some("  ".to_string());
        assert!(MatchEvaluation::from_detail(d).debate_winner.is_none());
    }

    #[test]
    fn test_role_serde_is_snake_case() {
        let json = serde_json::to_string(&AgentRole::HiringManager).unwrap();
        assert_eq!(json, r#""hiring_manager""#);
        let role: AgentRole = serde_json::from_str(r#""technical_lead""#).unwrap();
        assert_eq!(role, AgentRole::TechnicalLead);
    }
}
