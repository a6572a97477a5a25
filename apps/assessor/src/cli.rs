use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use assessor::{
    generate_chart_data, parse_assessment_report, AssessmentData, ChartData, ReportSummary,
};

use crate::config::Config;
use crate::errors::AppError;

/// JSON document printed by the binary.
#[derive(Debug, Serialize)]
pub struct AssessmentOutput {
    pub assessment: AssessmentData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<ChartData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ReportSummary>,
}

/// Reads the transcript from `path`, or stdin when no path is given.
pub fn read_transcript(path: Option<&Path>) -> Result<String, AppError> {
    let transcript = match path {
        Some(path) => {
            debug!("Reading transcript from {}", path.display());
            std::fs::read_to_string(path)?
        }
        None => {
            debug!("Reading transcript from stdin");
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if transcript.trim().is_empty() {
        return Err(AppError::EmptyTranscript);
    }
    Ok(transcript)
}

pub fn assess(transcript: &str, config: &Config) -> AssessmentOutput {
    let assessment = config.session.apply(parse_assessment_report(transcript));
    info!(
        grade = %assessment.overall_grade(),
        engagement = %assessment.engagement_level(),
        topics = assessment.topics_covered.len(),
        "Assessment generated"
    );

    let (charts, summary) = if config.include_charts {
        (
            Some(generate_chart_data(&assessment)),
            Some(ReportSummary::from_assessment(&assessment)),
        )
    } else {
        (None, None)
    };

    AssessmentOutput {
        assessment,
        charts,
        summary,
    }
}

pub fn render(output: &AssessmentOutput, pretty: bool) -> Result<String, AppError> {
    let json = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    Ok(json)
}
