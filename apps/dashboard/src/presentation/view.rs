//! Rendered dashboard views.
//!
//! `render_selection` turns the current `Selection` snapshot into what the
//! dashboard shows; `render_evaluation` renders one match with no selection
//! attached.

use serde::Serialize;

use crate::evaluation::profile::ViewProfile;
use crate::evaluation::radar::{build_vector, RadarPoint};
use crate::evaluation::record::{AgentRole, MatchEvaluation};
use crate::presentation::cards::{agent_panel, AgentPanel};
use crate::presentation::debate::{debate_button, debate_view, DebateButton, DebateView};
use crate::selection::machine::{Loadable, MatchedApplicant, Phase, Selection, Tab};

pub const SELECT_APPLICANT: &str = "Select an applicant to view evaluation.";
pub const LOADING_EVALUATION: &str = "Loading evaluation...";
pub const EVALUATION_UNAVAILABLE: &str = "No evaluation available for this match.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub tab: Tab,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TabContent {
    Summary { radar: Vec<RadarPoint> },
    Agent { role: AgentRole, panel: AgentPanel },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub phase: Phase,
    pub view: ViewProfile,
    pub job_id: Option<String>,
    pub applicants: Loadable<Vec<MatchedApplicant>>,
    pub applicant_id: Option<String>,
    pub tabs: Vec<TabView>,
    pub content: Option<TabContent>,
    pub placeholder: Option<&'static str>,
    pub debate_button: Option<DebateButton>,
    /// Present only while the debate modal is open.
    pub debate: Option<DebateView>,
}

pub fn render_selection(selection: &Selection) -> DashboardView {
    let view = selection.view();
    let mut rendered = DashboardView {
        phase: selection.phase(),
        view,
        job_id: selection.job_id().map(str::to_string),
        applicants: selection.applicants().clone(),
        applicant_id: selection.applicant_id().map(str::to_string),
        tabs: Vec::new(),
        content: None,
        placeholder: None,
        debate_button: None,
        debate: None,
    };

    if rendered.phase != Phase::ApplicantSelected {
        rendered.placeholder = Some(SELECT_APPLICANT);
        return rendered;
    }

    let evaluation = match selection.evaluation() {
        Loadable::Ready(evaluation) => evaluation,
        Loadable::Loading => {
            rendered.placeholder = Some(LOADING_EVALUATION);
            return rendered;
        }
        Loadable::Idle | Loadable::Unavailable => {
            rendered.placeholder = Some(EVALUATION_UNAVAILABLE);
            return rendered;
        }
    };

    let active = selection.active_tab().unwrap_or(Tab::Summary);
    rendered.tabs = Tab::for_view(view)
        .into_iter()
        .map(|tab| TabView {
            tab,
            label: tab.label(),
            active: tab == active,
        })
        .collect();
    rendered.content = Some(tab_content(evaluation, view, active));
    rendered.debate_button = Some(debate_button(evaluation));
    if selection.debate_open() {
        rendered.debate = Some(debate_view(evaluation));
    }
    rendered
}

fn tab_content(evaluation: &MatchEvaluation, view: ViewProfile, tab: Tab) -> TabContent {
    match tab.role() {
        Some(role) => TabContent::Agent {
            role,
            panel: agent_panel(role, evaluation.agent(role)),
        },
        None => TabContent::Summary {
            radar: build_vector(evaluation, view),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentReport {
    pub role: AgentRole,
    pub label: &'static str,
    pub panel: AgentPanel,
}

/// Every tab of one match rendered at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub view: ViewProfile,
    pub radar: Vec<RadarPoint>,
    pub agents: Vec<AgentReport>,
    pub debate_button: DebateButton,
    pub debate: Option<DebateView>,
}

pub fn render_evaluation(evaluation: &MatchEvaluation, view: ViewProfile) -> EvaluationReport {
    EvaluationReport {
        view,
        radar: build_vector(evaluation, view),
        agents: view
            .roles()
            .iter()
            .map(|&role| AgentReport {
                role,
                label: role.label(),
                panel: agent_panel(role, evaluation.agent(role)),
            })
            .collect(),
        debate_button: debate_button(evaluation),
        debate: evaluation.has_debate().then(|| debate_view(evaluation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend_client::models::MatchDetail;
    use crate::evaluation::record::DebateEntry;
    use crate::presentation::cards::NOTHING_TO_SEE;
    use crate::selection::machine::JobTransition;

    fn sample_evaluation() -> MatchEvaluation {
        MatchEvaluation::from_detail(MatchDetail {
            recruiter_agent: Some(
                "1. **Overall**: 8/10\n2. **Fit Score**: 8/10\nFinal recommendation: Yes".into(),
            ),
            hiring_manager_agent: Some("1. **Overall**: 4/10\nFinal recommendation: No".into()),
            debate_transcript: vec![
                DebateEntry {
                    source: "RecruiterAgent".into(),
                    text: "opening".into(),
                },
                DebateEntry {
                    source: "HiringManagerAgent".into(),
                    text: "opening".into(),
                },
                DebateEntry {
                    source: "RecruiterAgent".into(),
                    text: "Rebuttal".into(),
                },
            ],
            debate_winner: Some("RecruiterAgent".into()),
            ..Default::default()
        })
    }

    fn selected(view: ViewProfile, evaluation: Option<MatchEvaluation>) -> Selection {
        let mut s = Selection::new(view);
        let JobTransition::Fetch(job) = s.select_job("j_1") else {
            panic!("expected fetch");
        };
        s.apply_applicants(&job, Some(vec![]));
        let ticket = s.select_applicant("a_1").unwrap();
        s.apply_evaluation(&ticket, evaluation);
        s
    }

    #[test]
    fn test_idle_selection_shows_prompt() {
        let rendered = render_selection(&Selection::new(ViewProfile::Full));
        assert_eq!(rendered.phase, Phase::Idle);
        assert_eq!(rendered.placeholder, Some(SELECT_APPLICANT));
        assert!(rendered.tabs.is_empty());
    }

    #[test]
    fn test_unavailable_evaluation_keeps_applicant() {
        let rendered = render_selection(&selected(ViewProfile::Full, None));
        assert_eq!(rendered.applicant_id.as_deref(), Some("a_1"));
        assert_eq!(rendered.placeholder, Some(EVALUATION_UNAVAILABLE));
        assert!(rendered.content.is_none());
    }

    #[test]
    fn test_ready_evaluation_defaults_to_summary_radar() {
        let rendered = render_selection(&selected(ViewProfile::Full, Some(sample_evaluation())));
        assert_eq!(rendered.tabs.len(), 5);
        assert!(rendered.tabs[0].active);
        match rendered.content {
            Some(TabContent::Summary { radar }) => {
                let scores: Vec<u8> = radar.iter().map(|p| p.score).collect();
                assert_eq!(scores, vec![8, 4]);
            }
            other => panic!("expected summary, got {other:?}"),
        }
        assert!(rendered.debate_button.unwrap().enabled);
        assert!(rendered.debate.is_none());
    }

    #[test]
    fn test_agent_tab_and_open_debate() {
        let mut s = selected(ViewProfile::Full, Some(sample_evaluation()));
        assert!(s.set_active_tab(Tab::Portfolio));
        assert!(s.open_debate());

        let rendered = render_selection(&s);
        assert_eq!(
            rendered.content,
            Some(TabContent::Agent {
                role: AgentRole::Portfolio,
                panel: AgentPanel::Placeholder {
                    message: NOTHING_TO_SEE
                },
            })
        );
        let debate = rendered.debate.unwrap();
        assert_eq!(debate.bubbles.len(), 1);
        assert_eq!(debate.winner, Some("Recruiter Agent"));
    }

    #[test]
    fn test_compact_report_has_two_agents() {
        let report = render_evaluation(&sample_evaluation(), ViewProfile::Compact);
        let roles: Vec<AgentRole> = report.agents.iter().map(|a| a.role).collect();
        assert_eq!(roles, vec![AgentRole::Recruiter, AgentRole::HiringManager]);
        assert_eq!(report.radar.len(), 2);
        assert!(report.debate.is_some());
    }

    #[test]
    fn test_report_without_debate() {
        let report = render_evaluation(&MatchEvaluation::default(), ViewProfile::Full);
        assert!(report.radar.is_empty());
        assert!(!report.debate_button.enabled);
        assert!(report.debate.is_none());
        assert_eq!(report.agents.len(), 4);
    }
}
