//! Selection state machine: the dashboard cursor as one explicit value.
//!
//! Transitions are synchronous methods. Anything that needs a fetch returns a
//! ticket tagged with the scope it was issued for; the fetch result is handed
//! back together with that ticket and applied only if the scope is still
//! current. A later selection bumps the generation, so results for an
//! abandoned scope are discarded on arrival.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::evaluation::profile::ViewProfile;
use crate::evaluation::record::{AgentRole, MatchEvaluation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    JobSelected,
    ApplicantSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Summary,
    Recruiter,
    HiringManager,
    Portfolio,
    TechnicalLead,
}

impl Tab {
    pub fn role(&self) -> Option<AgentRole> {
        match self {
            Tab::Summary => None,
            Tab::Recruiter => Some(AgentRole::Recruiter),
            Tab::HiringManager => Some(AgentRole::HiringManager),
            Tab::Portfolio => Some(AgentRole::Portfolio),
            Tab::TechnicalLead => Some(AgentRole::TechnicalLead),
        }
    }

    pub fn label(&self) -> &'static str {
        match self.role() {
            Some(role) => role.label(),
            None => "Summary",
        }
    }

    /// Summary first, then one tab per role of the view.
    pub fn for_view(view: ViewProfile) -> Vec<Tab> {
        std::iter::once(Tab::Summary)
            .chain(view.roles().iter().map(|&role| Tab::from(role)))
            .collect()
    }
}

impl From<AgentRole> for Tab {
    fn from(role: AgentRole) -> Self {
        match role {
            AgentRole::Recruiter => Tab::Recruiter,
            AgentRole::HiringManager => Tab::HiringManager,
            AgentRole::Portfolio => Tab::Portfolio,
            AgentRole::TechnicalLead => Tab::TechnicalLead,
        }
    }
}

/// Progress of a fetched value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Loadable<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// The fetch failed or the backend had nothing; shown as a placeholder.
    Unavailable,
}

impl<T> Loadable<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedApplicant {
    pub id: String,
    pub display_name: String,
}

/// Issued by `select_job`; redeemed by `apply_applicants`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTicket {
    pub job_id: String,
    generation: u64,
}

/// Issued by `select_applicant`; redeemed by `apply_evaluation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTicket {
    pub job_id: String,
    pub applicant_id: String,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobTransition {
    /// The expanded job was selected again and everything was cleared.
    Collapsed,
    /// A new job scope is active; its applicants must be fetched.
    Fetch(JobTicket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The ticket's scope was abandoned; nothing changed.
    Stale,
}

/// The dashboard cursor.
///
/// Invariant: `evaluation` always belongs to the current
/// `(job_id, applicant_id)` pair, or is not `Ready`.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    view: ViewProfile,
    job_id: Option<String>,
    applicants: Loadable<Vec<MatchedApplicant>>,
    applicant_id: Option<String>,
    evaluation: Loadable<Arc<MatchEvaluation>>,
    active_tab: Option<Tab>,
    debate_open: bool,
    job_generation: u64,
    match_generation: u64,
}

impl Selection {
    pub fn new(view: ViewProfile) -> Self {
        Self {
            view,
            job_id: None,
            applicants: Loadable::Idle,
            applicant_id: None,
            evaluation: Loadable::Idle,
            active_tab: None,
            debate_open: false,
            job_generation: 0,
            match_generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.job_id, &self.applicant_id) {
            (None, _) => Phase::Idle,
            (Some(_), None) => Phase::JobSelected,
            (Some(_), Some(_)) => Phase::ApplicantSelected,
        }
    }

    pub fn view(&self) -> ViewProfile {
        self.view
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn applicants(&self) -> &Loadable<Vec<MatchedApplicant>> {
        &self.applicants
    }

    pub fn applicant_id(&self) -> Option<&str> {
        self.applicant_id.as_deref()
    }

    pub fn evaluation(&self) -> &Loadable<Arc<MatchEvaluation>> {
        &self.evaluation
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.active_tab
    }

    pub fn debate_open(&self) -> bool {
        self.debate_open
    }

    /// Expands `job_id`, or collapses it if it is already expanded.
    pub fn select_job(&mut self, job_id: &str) -> JobTransition {
        self.clear_applicant_scope();
        self.applicants = Loadable::Idle;
        self.job_generation += 1;

        if self.job_id.as_deref() == Some(job_id) {
            self.job_id = None;
            return JobTransition::Collapsed;
        }

        self.job_id = Some(job_id.to_string());
        self.applicants = Loadable::Loading;
        JobTransition::Fetch(JobTicket {
            job_id: job_id.to_string(),
            generation: self.job_generation,
        })
    }

    /// Applies a matched-applicant fetch. `None` means the fetch failed.
    pub fn apply_applicants(
        &mut self,
        ticket: &JobTicket,
        outcome: Option<Vec<MatchedApplicant>>,
    ) -> Applied {
        if ticket.generation != self.job_generation
            || self.job_id.as_deref() != Some(ticket.job_id.as_str())
        {
            return Applied::Stale;
        }

        self.applicants = match outcome {
            Some(applicants) => Loadable::Ready(applicants),
            None => Loadable::Unavailable,
        };
        Applied::Applied
    }

    /// Selects an applicant under the active job. Returns `None` when no job
    /// is selected.
    pub fn select_applicant(&mut self, applicant_id: &str) -> Option<MatchTicket> {
        let job_id = self.job_id.clone()?;

        self.clear_applicant_scope();
        self.applicant_id = Some(applicant_id.to_string());
        self.evaluation = Loadable::Loading;

        Some(MatchTicket {
            job_id,
            applicant_id: applicant_id.to_string(),
            generation: self.match_generation,
        })
    }

    /// Applies a match-detail fetch. `None` covers both failure and an
    /// explicit "not found"; the applicant stays selected either way.
    pub fn apply_evaluation(
        &mut self,
        ticket: &MatchTicket,
        outcome: Option<MatchEvaluation>,
    ) -> Applied {
        if ticket.generation != self.match_generation
            || self.job_id.as_deref() != Some(ticket.job_id.as_str())
            || self.applicant_id.as_deref() != Some(ticket.applicant_id.as_str())
        {
            return Applied::Stale;
        }

        match outcome {
            Some(evaluation) => {
                self.evaluation = Loadable::Ready(Arc::new(evaluation));
                self.active_tab = Some(Tab::Summary);
            }
            None => {
                self.evaluation = Loadable::Unavailable;
                self.active_tab = None;
            }
        }
        self.debate_open = false;
        Applied::Applied
    }

    /// Switches tabs. Rejected outside `ApplicantSelected` and for tabs the
    /// view does not show.
    pub fn set_active_tab(&mut self, tab: Tab) -> bool {
        if self.phase() != Phase::ApplicantSelected {
            return false;
        }
        if let Some(role) = tab.role() {
            if !self.view.includes(role) {
                return false;
            }
        }
        self.active_tab = Some(tab);
        true
    }

    /// Opens the debate modal. A no-op unless the loaded evaluation has a
    /// non-empty transcript.
    pub fn open_debate(&mut self) -> bool {
        let has_debate = self
            .evaluation
            .ready()
            .map(|evaluation| evaluation.has_debate())
            .unwrap_or(false);
        if has_debate {
            self.debate_open = true;
        }
        has_debate
    }

    pub fn close_debate(&mut self) -> bool {
        std::mem::replace(&mut self.debate_open, false)
    }

    /// Drops applicant, evaluation, tab and debate state and invalidates any
    /// in-flight match fetch.
    fn clear_applicant_scope(&mut self) {
        self.applicant_id = None;
        self.evaluation = Loadable::Idle;
        self.active_tab = None;
        self.debate_open = false;
        self.match_generation += 1;
    }
}
