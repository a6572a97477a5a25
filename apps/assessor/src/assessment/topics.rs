//! Topic spotting for transcripts without a structured report.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::assessment::MAX_TOPICS;

/// Subject-area vocabulary recognised in free conversation.
pub const SUBJECT_KEYWORDS: &[&str] = &[
    "calculus",
    "algebra",
    "geometry",
    "physics",
    "chemistry",
    "biology",
    "history",
    "literature",
    "economics",
    "programming",
    "mathematics",
    "science",
    "english",
    "grammar",
    "writing",
    "reading",
];

const PSEUDO_TOPIC_SENTENCES: usize = 5;
const MAX_PSEUDO_TOPICS: usize = 3;
const MIN_PSEUDO_TOPIC_WORD_LEN: usize = 5;

static KEYWORD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn keyword_pattern() -> &'static Regex {
    KEYWORD_PATTERN.get_or_init(|| {
        Regex::new(&format!(r"\b({})\b", SUBJECT_KEYWORDS.join("|")))
            .expect("keyword pattern is valid")
    })
}

/// Distinct vocabulary hits in first-seen order (max 4), or pseudo-topics
/// pulled from the opening sentences when nothing in the vocabulary matches.
pub fn extract_topics(transcript: &str) -> Vec<String> {
    let lowered = transcript.to_lowercase();
    let mut topics: Vec<String> = Vec::new();

    for m in keyword_pattern().find_iter(&lowered) {
        if topics.len() == MAX_TOPICS {
            break;
        }
        if !topics.iter().any(|t| t == m.as_str()) {
            topics.push(m.as_str().to_string());
        }
    }

    if topics.is_empty() {
        return pseudo_topics(transcript);
    }
    topics
}

/// First two long alphabetic words of each opening sentence.
fn pseudo_topics(transcript: &str) -> Vec<String> {
    transcript
        .split(['.', '!', '?'])
        .take(PSEUDO_TOPIC_SENTENCES)
        .map(|sentence| {
            sentence
                .split_whitespace()
                .filter(|w| {
                    w.len() >= MIN_PSEUDO_TOPIC_WORD_LEN
                        && w.chars().all(|c| c.is_ascii_alphabetic())
                })
                .take(2)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|t| !t.is_empty())
        .take(MAX_PSEUDO_TOPICS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_in_first_seen_order() {
        let t = "assistant: Physics builds on algebra.\nuser: I like physics more than History.";
        assert_eq!(extract_topics(t), vec!["physics", "algebra", "history"]);
    }

    #[test]
    fn test_keywords_capped_at_four() {
        let t = "calculus algebra geometry physics chemistry biology";
        assert_eq!(
            extract_topics(t),
            vec!["calculus", "algebra", "geometry", "physics"]
        );
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        // "sciences" and "prehistory" are not vocabulary words.
        let t = "user: sciences and prehistory are fun. Today matters.";
        assert!(!extract_topics(t).iter().any(|w| w == "science" || w == "history"));
    }

    #[test]
    fn test_pseudo_topics_when_no_keyword() {
        let t = "assistant: Welcome, today covers photosynthesis basics. user: Plants convert sunlight quickly! assistant: Exactly right";
        assert_eq!(
            extract_topics(t),
            vec!["today covers", "Plants convert", "Exactly right"]
        );
    }

    #[test]
    fn test_pseudo_topics_skip_short_and_punctuated_words() {
        // "Welcome," carries a comma and "user:" a colon; neither is purely alphabetic.
        let t = "user: Welcome, hi you. ok. assistant: fine";
        assert!(extract_topics(t).is_empty());
    }

    #[test]
    fn test_pseudo_topics_capped_at_three() {
        let t = "Alpha bravo charlie. Delta echoes. Foxtrot golfer. Hotel indigo. Juliet kilos.";
        let topics = extract_topics(t);
        assert_eq!(topics, vec!["Alpha bravo", "Delta echoes", "Foxtrot golfer"]);
    }

    #[test]
    fn test_empty_transcript_has_no_topics() {
        assert!(extract_topics("").is_empty());
    }
}
