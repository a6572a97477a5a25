//! Structured report parser: reads the labeled block the tutor model is asked to
//! emit at the end of a session.
//!
//! The block is untrusted model output. Fields are tokenized line by line against
//! the `ReportField` table; anything missing or malformed degrades to empty/zero,
//! and an all-zero report is rejected so the caller can fall back to heuristics.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::models::EngagementLevel;

pub const REPORT_START_MARKER: &str = "=== LEARNING ASSESSMENT REPORT ===";
pub const REPORT_END_MARKER: &str = "=== END ASSESSMENT ===";

/// Why the structured path was not used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("no structured assessment block in transcript")]
    MissingBlock,

    #[error("structured assessment block has no quiz or comprehension data")]
    Degenerate,
}

/// Labeled fields recognised inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportField {
    TopicsCovered,
    QuizQuestionsAsked,
    CorrectResponses,
    ComprehensionScore,
    EngagementLevel,
    Strengths,
    ImprovementsNeeded,
    Recommendations,
}

impl ReportField {
    pub const ALL: [ReportField; 8] = [
        ReportField::TopicsCovered,
        ReportField::QuizQuestionsAsked,
        ReportField::CorrectResponses,
        ReportField::ComprehensionScore,
        ReportField::EngagementLevel,
        ReportField::Strengths,
        ReportField::ImprovementsNeeded,
        ReportField::Recommendations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReportField::TopicsCovered => "TOPICS_COVERED",
            ReportField::QuizQuestionsAsked => "QUIZ_QUESTIONS_ASKED",
            ReportField::CorrectResponses => "CORRECT_RESPONSES",
            ReportField::ComprehensionScore => "COMPREHENSION_SCORE",
            ReportField::EngagementLevel => "ENGAGEMENT_LEVEL",
            ReportField::Strengths => "STRENGTHS",
            ReportField::ImprovementsNeeded => "IMPROVEMENTS_NEEDED",
            ReportField::Recommendations => "RECOMMENDATIONS",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.label().eq_ignore_ascii_case(label))
    }
}

/// Field values read from a structured block, before scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredReport {
    pub topics_covered: Vec<String>,
    pub quiz_questions_asked: u32,
    pub correct_responses: u32,
    pub comprehension_score: u32,
    pub engagement_level: EngagementLevel,
    pub strengths: Vec<String>,
    pub improvements_needed: Vec<String>,
    pub recommendations: Vec<String>,
}

impl StructuredReport {
    /// All three numeric signals are zero: the model filled in the template
    /// without measuring anything.
    pub fn is_degenerate(&self) -> bool {
        self.quiz_questions_asked == 0
            && self.correct_responses == 0
            && self.comprehension_score == 0
    }
}

static LABEL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn label_pattern() -> &'static Regex {
    LABEL_PATTERN.get_or_init(|| {
        let labels: Vec<&str> = ReportField::ALL.iter().map(|f| f.label()).collect();
        Regex::new(&format!(r"(?i)\b({})\s*:", labels.join("|"))).expect("label pattern is valid")
    })
}

/// Returns the text between the first start marker and the next end marker.
pub fn extract_report_block(transcript: &str) -> Option<&str> {
    let start = transcript.find(REPORT_START_MARKER)? + REPORT_START_MARKER.len();
    let rest = &transcript[start..];
    let end = rest.find(REPORT_END_MARKER)?;
    Some(&rest[..end])
}

/// Parses the structured block out of a transcript.
pub fn parse_structured_report(transcript: &str) -> Result<StructuredReport, ReportError> {
    let block = extract_report_block(transcript).ok_or(ReportError::MissingBlock)?;
    let report = parse_block(block);

    if report.is_degenerate() {
        return Err(ReportError::Degenerate);
    }
    Ok(report)
}

/// Reads every known field from the block body. Never fails.
pub fn parse_block(block: &str) -> StructuredReport {
    let fields = tokenize_fields(block);
    let text = |field: ReportField| fields.get(&field).copied().unwrap_or("");

    StructuredReport {
        topics_covered: split_list(text(ReportField::TopicsCovered)),
        quiz_questions_asked: parse_count(text(ReportField::QuizQuestionsAsked)),
        correct_responses: parse_count(text(ReportField::CorrectResponses)),
        comprehension_score: parse_count(text(ReportField::ComprehensionScore)).min(100),
        engagement_level: EngagementLevel::parse_lenient(text(ReportField::EngagementLevel)),
        strengths: split_list(text(ReportField::Strengths)),
        improvements_needed: split_list(text(ReportField::ImprovementsNeeded)),
        recommendations: split_list(text(ReportField::Recommendations)),
    }
}

struct LabelMatch {
    field: ReportField,
    start: usize,
    end: usize,
    line_leading: bool,
}

fn label_matches(line: &str) -> Vec<LabelMatch> {
    label_pattern()
        .captures_iter(line)
        .filter_map(|caps| {
            let (whole, label) = (caps.get(0)?, caps.get(1)?);
            Some(LabelMatch {
                field: ReportField::from_label(label.as_str())?,
                start: whole.start(),
                end: whole.end(),
                line_leading: !line[..whole.start()].chars().any(char::is_alphanumeric),
            })
        })
        .collect()
}

/// Splits each line at recognised labels. A mid-line label only starts a new
/// field when that field never opens a line of its own; otherwise it is part of
/// the surrounding value. The first occurrence of a field wins.
fn tokenize_fields(block: &str) -> HashMap<ReportField, &str> {
    let lines: Vec<(&str, Vec<LabelMatch>)> =
        block.lines().map(|line| (line, label_matches(line))).collect();

    let anchored: HashSet<ReportField> = lines
        .iter()
        .flat_map(|(_, matches)| matches.iter())
        .filter(|m| m.line_leading)
        .map(|m| m.field)
        .collect();

    let mut fields = HashMap::new();
    for (line, matches) in &lines {
        let line = *line;
        let boundaries: Vec<&LabelMatch> = matches
            .iter()
            .filter(|m| m.line_leading || !anchored.contains(&m.field))
            .collect();

        for (i, label) in boundaries.iter().enumerate() {
            let value_end = boundaries.get(i + 1).map_or(line.len(), |next| next.start);
            fields
                .entry(label.field)
                .or_insert_with(|| clean_value(&line[label.end..value_end]));
        }
    }
    fields
}

/// Trims and drops one optional pair of surrounding brackets.
fn clean_value(raw: &str) -> &str {
    let value = raw.trim();
    let value = value.strip_prefix('[').unwrap_or(value);
    let value = value.strip_suffix(']').unwrap_or(value);
    value.trim()
}

/// Leading-integer parse ("4", "82%", "3 out of 4"); anything else is 0.
fn parse_count(value: &str) -> u32 {
    let digits: String = value
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
