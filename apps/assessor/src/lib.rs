//! Learning assessment extraction for tutoring-session transcripts.
//!
//! `parse_assessment_report` turns a `role: content` transcript into an
//! [`AssessmentData`], preferring the structured block the tutor model writes at
//! the end of a session and falling back to conversation heuristics.
//! `generate_chart_data` shapes the result for the report renderer.

pub mod assessment;
pub mod charts;
pub mod models;

pub use assessment::{
    analyze_conversation, parse_assessment_report, parse_assessment_report_on, ReportSource,
    SessionContext,
};
pub use charts::{generate_chart_data, ChartData, ReportSummary};
pub use models::{format_transcript, AssessmentData, EngagementLevel, Grade};
