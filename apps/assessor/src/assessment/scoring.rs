//! Scoring helpers shared by the structured and heuristic paths.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Grade;

/// Average speaking rate used to turn transcript length into minutes.
pub const WORDS_PER_MINUTE: f64 = 150.0;

pub const DEFAULT_SUBJECT: &str = "General Learning";

static SUBJECT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn subject_pattern() -> &'static Regex {
    SUBJECT_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)teaching.*about\s+(.+?)(?:\.|,|\n)").expect("subject pattern is valid")
    })
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated session length in whole minutes.
pub fn session_duration(transcript: &str) -> u32 {
    (word_count(transcript) as f64 / WORDS_PER_MINUTE).round() as u32
}

/// `round(100 * correct / asked)`, 0 when nothing was asked, never above 100.
pub fn accuracy_rate(correct: u32, asked: u32) -> u32 {
    if asked == 0 {
        return 0;
    }
    let rate = (correct as f64 / asked as f64 * 100.0).round();
    rate.min(100.0) as u32
}

/// Weighted blend in tenths of a point: 0.4c + 0.4a + 0.2e, scaled by 10.
/// Integer arithmetic keeps threshold comparisons exact.
fn weighted_tenths(comprehension: u32, accuracy: u32, engagement: u32) -> u64 {
    4 * comprehension as u64 + 4 * accuracy as u64 + 2 * engagement as u64
}

pub fn weighted_score(comprehension: u32, accuracy: u32, engagement: u32) -> f64 {
    weighted_tenths(comprehension, accuracy, engagement) as f64 / 10.0
}

pub fn overall_grade(comprehension: u32, accuracy: u32, engagement: u32) -> Grade {
    Grade::from_weighted(weighted_score(comprehension, accuracy, engagement))
}

/// Best-effort subject from a "teaching ... about X." phrase.
pub fn subject_from_transcript(transcript: &str) -> String {
    subject_pattern()
        .captures(transcript)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string())
}
