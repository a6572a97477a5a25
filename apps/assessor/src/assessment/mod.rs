//! Assessment extraction: structured tutor report first, conversation heuristics
//! as the fallback. Both paths converge on `build_assessment`, which owns the
//! duration, subject and grade math.

pub mod conversation;
pub mod feedback;
pub mod report_parser;
pub mod scoring;
pub mod session;
pub mod topics;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::models::assessment::{
    MAX_IMPROVEMENTS, MAX_RECOMMENDATIONS, MAX_STRENGTHS, MAX_TOPICS, STUDENT_PLACEHOLDER,
};
use crate::models::AssessmentData;

pub use conversation::{ConversationSignals, HeuristicAssessment};
pub use report_parser::{ReportError, StructuredReport};
pub use session::SessionContext;

/// Where an assessment's scores came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportSource {
    Structured(StructuredReport),
    Heuristic(HeuristicAssessment),
}

impl ReportSource {
    /// Uses the tutor's structured block when it is present and not degenerate.
    pub fn select(transcript: &str) -> Self {
        match report_parser::parse_structured_report(transcript) {
            Ok(report) => {
                debug!(
                    topics = report.topics_covered.len(),
                    asked = report.quiz_questions_asked,
                    correct = report.correct_responses,
                    "using structured assessment report"
                );
                ReportSource::Structured(report)
            }
            Err(reason) => {
                debug!(%reason, "falling back to conversation analysis");
                ReportSource::Heuristic(HeuristicAssessment::from_transcript(transcript))
            }
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ReportSource::Structured(_))
    }
}

/// Builds an assessment from a session transcript, dated today. Never fails.
pub fn parse_assessment_report(transcript: &str) -> AssessmentData {
    parse_assessment_report_on(transcript, today())
}

pub fn parse_assessment_report_on(transcript: &str, session_date: NaiveDate) -> AssessmentData {
    build_assessment(ReportSource::select(transcript), transcript, session_date)
}

/// Heuristic-only assessment, ignoring any structured block.
pub fn analyze_conversation(transcript: &str) -> AssessmentData {
    analyze_conversation_on(transcript, today())
}

pub fn analyze_conversation_on(transcript: &str, session_date: NaiveDate) -> AssessmentData {
    let source = ReportSource::Heuristic(HeuristicAssessment::from_transcript(transcript));
    build_assessment(source, transcript, session_date)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The single constructor for `AssessmentData`.
pub fn build_assessment(
    source: ReportSource,
    transcript: &str,
    session_date: NaiveDate,
) -> AssessmentData {
    let (
        topics,
        comprehension_score,
        accuracy_rate,
        engagement_level,
        engagement_score,
        mut strengths,
        mut improvements_needed,
        mut recommendations,
    ) = match source {
        ReportSource::Structured(report) => (
            report.topics_covered,
            report.comprehension_score,
            scoring::accuracy_rate(report.correct_responses, report.quiz_questions_asked),
            report.engagement_level,
            report.engagement_level.reported_score(),
            report.strengths,
            report.improvements_needed,
            report.recommendations,
        ),
        ReportSource::Heuristic(h) => (
            h.topics_covered,
            h.comprehension_score,
            h.accuracy_rate,
            h.engagement_level,
            h.engagement_score,
            h.strengths,
            h.improvements_needed,
            h.recommendations,
        ),
    };

    strengths.truncate(MAX_STRENGTHS);
    improvements_needed.truncate(MAX_IMPROVEMENTS);
    recommendations.truncate(MAX_RECOMMENDATIONS);

    AssessmentData {
        student_name: STUDENT_PLACEHOLDER.to_string(),
        subject: scoring::subject_from_transcript(transcript),
        session_date,
        session_duration: scoring::session_duration(transcript),
        topics_covered: dedup_topics(topics),
        quiz_questions: Vec::new(),
        comprehension_score,
        accuracy_rate,
        engagement_level,
        engagement_score,
        strengths,
        improvements_needed,
        recommendations,
        overall_grade: scoring::overall_grade(comprehension_score, accuracy_rate, engagement_score),
    }
}

/// Case-insensitive de-duplication keeping the first spelling, capped.
pub(crate) fn dedup_topics(topics: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(MAX_TOPICS);
    for topic in topics {
        if out.len() == MAX_TOPICS {
            break;
        }
        if !out.iter().any(|t| t.eq_ignore_ascii_case(&topic)) {
            out.push(topic);
        }
    }
    out
}
