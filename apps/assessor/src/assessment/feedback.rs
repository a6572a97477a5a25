//! Rule tables for strengths, improvements and recommendations when the tutor
//! did not write them itself.

use crate::models::assessment::{MAX_IMPROVEMENTS, MAX_RECOMMENDATIONS, MAX_STRENGTHS};
use crate::models::EngagementLevel;

fn owned<'a>(items: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
    items.iter().map(|s| s.to_string())
}

pub fn strengths(engagement: EngagementLevel, comprehension: u32) -> Vec<String> {
    let mut out: Vec<String> = match engagement {
        EngagementLevel::High => owned(&[
            "Excellent active participation",
            "Strong engagement with material",
        ])
        .collect(),
        EngagementLevel::Medium => {
            owned(&["Good participation", "Shows interest in learning"]).collect()
        }
        EngagementLevel::Low => {
            owned(&["Attentive listening", "Follows instructions well"]).collect()
        }
    };

    if comprehension >= 80 {
        out.extend(owned(&["Quick grasp of concepts", "Strong analytical thinking"]));
    } else if comprehension >= 60 {
        out.extend(owned(&["Solid understanding of basics", "Good effort in learning"]));
    } else {
        out.extend(owned(&["Willing to learn", "Shows curiosity"]));
    }

    out.truncate(MAX_STRENGTHS);
    out
}

pub fn improvements(comprehension: u32, accuracy: u32) -> Vec<String> {
    let mut out = Vec::new();

    if comprehension < 70 {
        out.extend(owned(&[
            "Needs more practice with core concepts",
            "Could benefit from additional examples",
        ]));
    }
    if accuracy < 60 {
        out.extend(owned(&[
            "Work on accuracy in problem solving",
            "Practice more application questions",
        ]));
    }
    if comprehension < 80 && accuracy < 80 {
        out.extend(owned(&[
            "Strengthen foundation knowledge",
            "More time needed for concept mastery",
        ]));
    }
    if out.is_empty() {
        out.extend(owned(&[
            "Continue practicing regularly",
            "Challenge yourself with harder problems",
        ]));
    }

    out.truncate(MAX_IMPROVEMENTS);
    out
}

pub fn recommendations(comprehension: u32, engagement: EngagementLevel) -> Vec<String> {
    let mut out: Vec<String> = if comprehension >= 80 {
        owned(&["Try more advanced topics", "Explore real-world applications"]).collect()
    } else if comprehension >= 60 {
        owned(&["Review today's concepts", "Practice similar problems"]).collect()
    } else {
        owned(&["Review fundamentals", "Schedule additional practice sessions"]).collect()
    };

    match engagement {
        EngagementLevel::Low => out.extend(owned(&[
            "Try interactive learning methods",
            "Ask more questions during sessions",
        ])),
        EngagementLevel::High => out.extend(owned(&[
            "Maintain this enthusiasm",
            "Share knowledge with peers",
        ])),
        EngagementLevel::Medium => {}
    }

    out.extend(owned(&["Set specific learning goals", "Track progress regularly"]));

    out.truncate(MAX_RECOMMENDATIONS);
    out
}
