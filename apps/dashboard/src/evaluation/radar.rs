//! Radar chart data: one overall score per agent role with a record.

use serde::Serialize;

use crate::evaluation::profile::ViewProfile;
use crate::evaluation::record::MatchEvaluation;
use crate::evaluation::score::Score;

/// One polar axis of the summary radar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarPoint {
    pub agent: &'static str,
    pub score: Score,
}

/// Builds the per-agent overall-score vector for the summary chart.
///
/// Only roles in `view` whose text is present get an axis, in canonical
/// role order. Absent roles are omitted, never zero-filled.
pub fn build_vector(evaluation: &MatchEvaluation, view: ViewProfile) -> Vec<RadarPoint> {
    view.roles()
        .iter()
        .filter_map(|&role| evaluation.agent(role))
        .map(|record| RadarPoint {
            agent: record.role.label(),
            score: record.overall_score,
        })
        .collect()
}
