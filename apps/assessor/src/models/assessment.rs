use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Name emitted until the caller applies its own session context.
pub const STUDENT_PLACEHOLDER: &str = "Student";

pub const MAX_TOPICS: usize = 4;
pub const MAX_STRENGTHS: usize = 3;
pub const MAX_IMPROVEMENTS: usize = 3;
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Coarse classification of how actively the student took part in the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementLevel {
    High,
    Medium,
    #[default]
    Low,
}

impl EngagementLevel {
    /// Numeric proxy used when the level comes from the tutor's structured report.
    pub fn reported_score(self) -> u32 {
        match self {
            EngagementLevel::High => 90,
            EngagementLevel::Medium => 70,
            EngagementLevel::Low => 50,
        }
    }

    /// Reads the first word of a free-text value ("High", "medium - asked a lot").
    /// Anything unrecognised is `Low`.
    pub fn parse_lenient(value: &str) -> Self {
        let first_word = value
            .split(|c: char| !c.is_alphabetic())
            .find(|w| !w.is_empty())
            .unwrap_or("");

        match first_word.to_ascii_lowercase().as_str() {
            "high" => EngagementLevel::High,
            "medium" => EngagementLevel::Medium,
            _ => EngagementLevel::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngagementLevel::High => "High",
            EngagementLevel::Medium => "Medium",
            EngagementLevel::Low => "Low",
        }
    }
}

impl fmt::Display for EngagementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter grade, ordered from worst (`D`) to best (`A+`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

/// Inclusive lower bounds on the weighted score, checked highest first.
const GRADE_THRESHOLDS: &[(f64, Grade)] = &[
    (90.0, Grade::APlus),
    (85.0, Grade::A),
    (80.0, Grade::AMinus),
    (75.0, Grade::BPlus),
    (70.0, Grade::B),
    (65.0, Grade::BMinus),
    (60.0, Grade::CPlus),
    (55.0, Grade::C),
    (50.0, Grade::CMinus),
];

/// Colour family a grade is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeBand {
    Excellent,
    Good,
    Passing,
    Failing,
}

impl Grade {
    pub fn from_weighted(score: f64) -> Self {
        GRADE_THRESHOLDS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::D)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
        }
    }

    pub fn band(self) -> GradeBand {
        match self {
            Grade::APlus | Grade::A | Grade::AMinus => GradeBand::Excellent,
            Grade::BPlus | Grade::B | Grade::BMinus => GradeBand::Good,
            Grade::CPlus | Grade::C | Grade::CMinus => GradeBand::Passing,
            Grade::D => GradeBand::Failing,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A single quiz exchange. Not extracted yet; kept so the wire shape matches
/// what the report renderer expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub topic: String,
    pub difficulty: Difficulty,
    pub timestamp: DateTime<Utc>,
}

/// The assessment handed to the report renderer.
///
/// Scores and grade are only writable inside the crate: the grade is derived
/// from the three scores when the value is built and must not drift from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentData {
    pub student_name: String,
    pub subject: String,
    pub session_date: NaiveDate,
    /// Estimated minutes.
    pub session_duration: u32,
    pub topics_covered: Vec<String>,
    pub quiz_questions: Vec<QuizQuestion>,
    pub(crate) comprehension_score: u32,
    pub(crate) accuracy_rate: u32,
    pub(crate) engagement_level: EngagementLevel,
    pub(crate) engagement_score: u32,
    pub strengths: Vec<String>,
    pub improvements_needed: Vec<String>,
    pub recommendations: Vec<String>,
    pub(crate) overall_grade: Grade,
}

impl AssessmentData {
    pub fn comprehension_score(&self) -> u32 {
        self.comprehension_score
    }

    pub fn accuracy_rate(&self) -> u32 {
        self.accuracy_rate
    }

    pub fn engagement_level(&self) -> EngagementLevel {
        self.engagement_level
    }

    pub fn engagement_score(&self) -> u32 {
        self.engagement_score
    }

    pub fn overall_grade(&self) -> Grade {
        self.overall_grade
    }
}
