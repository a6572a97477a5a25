use serde::Serialize;

use crate::models::{AssessmentData, EngagementLevel, Grade, GradeBand};

/// Colour band for a 0–100 score in the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => ScoreBand::Strong,
            s if s >= 60 => ScoreBand::Fair,
            _ => ScoreBand::Weak,
        }
    }
}

/// Headline figures shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub overall_grade: Grade,
    pub grade_band: GradeBand,
    pub comprehension_band: ScoreBand,
    pub accuracy_band: ScoreBand,
    pub engagement_level: EngagementLevel,
    pub session_duration: u32,
}

impl ReportSummary {
    pub fn from_assessment(a: &AssessmentData) -> Self {
        Self {
            overall_grade: a.overall_grade(),
            grade_band: a.overall_grade().band(),
            comprehension_band: ScoreBand::from_score(a.comprehension_score()),
            accuracy_band: ScoreBand::from_score(a.accuracy_rate()),
            engagement_level: a.engagement_level(),
            session_duration: a.session_duration,
        }
    }
}
