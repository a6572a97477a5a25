//! Chart shaping: projects an assessment onto the three chart configs the
//! report renderer draws. Pure: no parsing, no randomness.

pub mod summary;

use serde::Serialize;

use crate::models::AssessmentData;

pub use summary::{ReportSummary, ScoreBand};

const AXIS_MAX: u32 = 100;
const AXIS_STEP: u32 = 20;

const BLUE: &str = "rgba(59, 130, 246, 1)";
const BLUE_FILL: &str = "rgba(59, 130, 246, 0.2)";
const BLUE_BAR: &str = "rgba(59, 130, 246, 0.8)";
const GREEN: &str = "rgba(34, 197, 94, 0.8)";
const RED: &str = "rgba(239, 68, 68, 0.8)";
const PURPLE: &str = "rgba(168, 85, 247, 0.8)";
const WHITE: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Radar,
    Doughnut,
    Bar,
}

/// One colour for the whole dataset, or one per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Color {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u32>,
    pub background_color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_skipped: Option<bool>,
}

impl Dataset {
    fn new(data: Vec<u32>, background_color: Color) -> Self {
        Self {
            label: None,
            data,
            background_color,
            border_color: None,
            border_width: None,
            point_background_color: None,
            border_radius: None,
            border_skipped: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBody {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub step_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    pub max: u32,
    pub ticks: Ticks,
}

impl Axis {
    fn percent() -> Self {
        Self {
            begin_at_zero: true,
            max: AXIS_MAX,
            ticks: Ticks {
                step_size: AXIS_STEP,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scales {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Axis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            scales: None,
            plugins: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartBody,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub performance_chart: ChartConfig,
    pub score_breakdown: ChartConfig,
    pub learning_progress: ChartConfig,
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn generate_chart_data(assessment: &AssessmentData) -> ChartData {
    ChartData {
        performance_chart: performance_chart(assessment),
        score_breakdown: score_breakdown(assessment),
        learning_progress: learning_progress(assessment),
    }
}

/// Five-axis radar. Participation reuses engagement; critical thinking is
/// comprehension minus 10, floored at 0.
fn performance_chart(a: &AssessmentData) -> ChartConfig {
    let comprehension = a.comprehension_score();
    let engagement = a.engagement_score();

    let mut dataset = Dataset::new(
        vec![
            comprehension,
            a.accuracy_rate(),
            engagement,
            engagement,
            comprehension.saturating_sub(10),
        ],
        Color::Single(BLUE_FILL.to_string()),
    );
    dataset.label = Some("Performance Metrics".to_string());
    dataset.border_color = Some(BLUE.to_string());
    dataset.border_width = Some(2);
    dataset.point_background_color = Some(BLUE.to_string());

    ChartConfig {
        chart_type: ChartType::Radar,
        data: ChartBody {
            labels: labels(&[
                "Comprehension",
                "Accuracy",
                "Engagement",
                "Participation",
                "Critical Thinking",
            ]),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            scales: Some(Scales {
                r: Some(Axis::percent()),
                y: None,
            }),
            ..Default::default()
        },
    }
}

/// Correct vs incorrect share; the two slices always sum to 100.
fn score_breakdown(a: &AssessmentData) -> ChartConfig {
    let correct = a.accuracy_rate().min(100);

    let mut dataset = Dataset::new(
        vec![correct, 100 - correct],
        Color::PerPoint(labels(&[GREEN, RED])),
    );
    dataset.border_width = Some(2);
    dataset.border_color = Some(WHITE.to_string());

    ChartConfig {
        chart_type: ChartType::Doughnut,
        data: ChartBody {
            labels: labels(&["Correct Answers", "Incorrect Answers"]),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            plugins: Some(Plugins {
                legend: Legend {
                    position: Some("bottom".to_string()),
                    display: None,
                },
            }),
            ..Default::default()
        },
    }
}

fn learning_progress(a: &AssessmentData) -> ChartConfig {
    let mut dataset = Dataset::new(
        vec![a.comprehension_score(), a.accuracy_rate(), a.engagement_score()],
        Color::PerPoint(labels(&[PURPLE, BLUE_BAR, GREEN])),
    );
    dataset.label = Some("Scores".to_string());
    dataset.border_radius = Some(8);
    dataset.border_skipped = Some(false);

    ChartConfig {
        chart_type: ChartType::Bar,
        data: ChartBody {
            labels: labels(&["Comprehension", "Quiz Performance", "Engagement"]),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            scales: Some(Scales {
                r: None,
                y: Some(Axis::percent()),
            }),
            plugins: Some(Plugins {
                legend: Legend {
                    position: None,
                    display: Some(false),
                },
            }),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::parse_assessment_report_on;
    use chrono::NaiveDate;

    fn assessment(transcript: &str) -> AssessmentData {
        parse_assessment_report_on(transcript, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
    }

    const REPORT: &str = "=== LEARNING ASSESSMENT REPORT ===
QUIZ_QUESTIONS_ASKED: 4
CORRECT_RESPONSES: 3
COMPREHENSION_SCORE: 82
ENGAGEMENT_LEVEL: High
=== END ASSESSMENT ===";

    #[test]
    fn test_performance_chart_axes() {
        let charts = generate_chart_data(&assessment(REPORT));
        let p = &charts.performance_chart;
        assert_eq!(p.chart_type, ChartType::Radar);
        assert_eq!(p.data.labels.len(), 5);
        assert_eq!(p.data.datasets[0].data, vec![82, 75, 90, 90, 72]);
    }

    #[test]
    fn test_critical_thinking_floors_at_zero() {
        let t = "=== LEARNING ASSESSMENT REPORT ===\nQUIZ_QUESTIONS_ASKED: 2\nCORRECT_RESPONSES: 1\nCOMPREHENSION_SCORE: 4\n=== END ASSESSMENT ===";
        let charts = generate_chart_data(&assessment(t));
        assert_eq!(charts.performance_chart.data.datasets[0].data[4], 0);
    }

    #[test]
    fn test_score_breakdown_sums_to_100() {
        for t in [REPORT, "", "user: hello\nassistant: hi"] {
            let charts = generate_chart_data(&assessment(t));
            let slices = &charts.score_breakdown.data.datasets[0].data;
            assert_eq!(slices.len(), 2);
            assert_eq!(slices.iter().sum::<u32>(), 100);
        }
    }

    #[test]
    fn test_learning_progress_bars() {
        let charts = generate_chart_data(&assessment(REPORT));
        assert_eq!(charts.learning_progress.chart_type, ChartType::Bar);
        assert_eq!(
            charts.learning_progress.data.datasets[0].data,
            vec![82, 75, 90]
        );
        assert_eq!(
            charts.learning_progress.data.labels,
            vec!["Comprehension", "Quiz Performance", "Engagement"]
        );
    }

    #[test]
    fn test_chart_generation_is_pure() {
        let a = assessment(REPORT);
        assert_eq!(generate_chart_data(&a), generate_chart_data(&a));
        assert_eq!(
            serde_json::to_value(generate_chart_data(&a)).unwrap(),
            serde_json::to_value(generate_chart_data(&a)).unwrap()
        );
    }

    #[test]
    fn test_chart_json_shape() {
        let v = serde_json::to_value(generate_chart_data(&assessment(REPORT))).unwrap();
        assert_eq!(v["performanceChart"]["type"], "radar");
        assert_eq!(v["performanceChart"]["options"]["scales"]["r"]["max"], 100);
        assert_eq!(
            v["performanceChart"]["options"]["scales"]["r"]["ticks"]["stepSize"],
            20
        );
        assert_eq!(v["scoreBreakdown"]["type"], "doughnut");
        assert_eq!(
            v["scoreBreakdown"]["options"]["plugins"]["legend"]["position"],
            "bottom"
        );
        assert!(v["scoreBreakdown"]["data"]["datasets"][0]["backgroundColor"].is_array());
        assert!(v["performanceChart"]["data"]["datasets"][0]["backgroundColor"].is_string());
        assert_eq!(v["learningProgress"]["data"]["datasets"][0]["borderSkipped"], false);
        assert!(v["learningProgress"]["data"]["datasets"][0].get("pointBackgroundColor").is_none());
        assert_eq!(v["learningProgress"]["options"]["maintainAspectRatio"], false);
    }
}
