//! Conversational analyzer: estimates an assessment from raw turn-taking
//! signals when the tutor left no usable structured report.

use crate::assessment::feedback;
use crate::assessment::scoring::{accuracy_rate, word_count};
use crate::assessment::topics::extract_topics;
use crate::models::EngagementLevel;

const STUDENT_MARKERS: &[&str] = &["user:", "student:"];
const TUTOR_MARKERS: &[&str] = &["assistant:", "tutor:"];

/// Turn and word counts per speaker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversationSignals {
    pub student_lines: usize,
    pub tutor_lines: usize,
    pub student_word_count: usize,
    pub tutor_word_count: usize,
}

impl ConversationSignals {
    pub fn from_transcript(transcript: &str) -> Self {
        let mut signals = Self::default();

        for line in transcript.lines().filter(|l| !l.trim().is_empty()) {
            let lowered = line.to_lowercase();
            if STUDENT_MARKERS.iter().any(|m| lowered.contains(m)) {
                signals.student_lines += 1;
                signals.student_word_count += word_count(line);
            }
            if TUTOR_MARKERS.iter().any(|m| lowered.contains(m)) {
                signals.tutor_lines += 1;
                signals.tutor_word_count += word_count(line);
            }
        }
        signals
    }

    /// Tiered by student participation; first matching tier wins.
    pub fn engagement(&self) -> (EngagementLevel, u32) {
        if self.student_lines >= 5 && self.student_word_count > 50 {
            (EngagementLevel::High, 85)
        } else if self.student_lines >= 3 && self.student_word_count > 25 {
            (EngagementLevel::Medium, 70)
        } else {
            (EngagementLevel::Low, 50)
        }
    }

    /// `min(90, 60 + 5*lines + min(20, words/5))`, floored.
    pub fn comprehension_score(&self) -> u32 {
        let word_bonus = (self.student_word_count as f64 / 5.0).min(20.0);
        let raw = 60.0 + self.student_lines as f64 * 5.0 + word_bonus;
        raw.min(90.0).floor() as u32
    }

    /// One quiz question assumed per three tutor turns, at least one.
    pub fn estimated_questions(&self) -> u32 {
        u32::try_from((self.tutor_lines / 3).max(1)).unwrap_or(u32::MAX)
    }

    /// Correct answers implied by the comprehension score, rounded down.
    pub fn estimated_correct(&self) -> u32 {
        let questions = u64::from(self.estimated_questions());
        let correct = questions * u64::from(self.comprehension_score()) / 100;
        u32::try_from(correct).unwrap_or(u32::MAX)
    }
}

/// Everything the heuristic path contributes to an assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicAssessment {
    pub signals: ConversationSignals,
    pub topics_covered: Vec<String>,
    pub comprehension_score: u32,
    pub accuracy_rate: u32,
    pub engagement_level: EngagementLevel,
    pub engagement_score: u32,
    pub strengths: Vec<String>,
    pub improvements_needed: Vec<String>,
    pub recommendations: Vec<String>,
}

impl HeuristicAssessment {
    pub fn from_transcript(transcript: &str) -> Self {
        let signals = ConversationSignals::from_transcript(transcript);
        let (engagement_level, engagement_score) = signals.engagement();
        let comprehension_score = signals.comprehension_score();

        let accuracy_rate =
            accuracy_rate(signals.estimated_correct(), signals.estimated_questions());

        tracing::debug!(
            student_lines = signals.student_lines,
            tutor_lines = signals.tutor_lines,
            student_words = signals.student_word_count,
            tutor_words = signals.tutor_word_count,
            %engagement_level,
            comprehension_score,
            accuracy_rate,
            "estimated assessment from conversation signals"
        );

        Self {
            signals,
            topics_covered: extract_topics(transcript),
            comprehension_score,
            accuracy_rate,
            engagement_level,
            engagement_score,
            strengths: feedback::strengths(engagement_level, comprehension_score),
            improvements_needed: feedback::improvements(comprehension_score, accuracy_rate),
            recommendations: feedback::recommendations(comprehension_score, engagement_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_lines(count: usize, words_per_line: usize) -> String {
        (0..count)
            .map(|_| format!("user: {}", vec!["word"; words_per_line - 1].join(" ")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_signals_classify_speakers_case_insensitively() {
        let t = "User: one two\nASSISTANT: three four five\nsystem: call started\n\nStudent: six\nTutor: seven";
        let s = ConversationSignals::from_transcript(t);
        assert_eq!(s.student_lines, 2);
        assert_eq!(s.tutor_lines, 2);
        assert_eq!(s.student_word_count, 5);
        assert_eq!(s.tutor_word_count, 6);
    }

    #[test]
    fn test_high_engagement() {
        // 5 lines x 11 words = 55 words
        let s = ConversationSignals::from_transcript(&student_lines(5, 11));
        assert_eq!(s.engagement(), (EngagementLevel::High, 85));
    }

    #[test]
    fn test_high_needs_more_than_fifty_words() {
        // 5 lines x 10 words = 50 words: not High, still Medium
        let s = ConversationSignals::from_transcript(&student_lines(5, 10));
        assert_eq!(s.student_word_count, 50);
        assert_eq!(s.engagement(), (EngagementLevel::Medium, 70));
    }

    #[test]
    fn test_medium_engagement() {
        let s = ConversationSignals::from_transcript(&student_lines(3, 9));
        assert_eq!(s.student_word_count, 27);
        assert_eq!(s.engagement(), (EngagementLevel::Medium, 70));
    }

    #[test]
    fn test_low_engagement_two_lines_ten_words() {
        let s = ConversationSignals::from_transcript(&student_lines(2, 5));
        assert_eq!(s.student_word_count, 10);
        assert_eq!(s.engagement(), (EngagementLevel::Low, 50));
    }

    #[test]
    fn test_comprehension_floors_fractional_bonus() {
        // 60 + 2*5 + 12/5 = 72.4
        let s = ConversationSignals {
            student_lines: 2,
            student_word_count: 12,
            ..Default::default()
        };
        assert_eq!(s.comprehension_score(), 72);
    }

    #[test]
    fn test_comprehension_capped_at_ninety() {
        let s = ConversationSignals {
            student_lines: 40,
            student_word_count: 4000,
            ..Default::default()
        };
        assert_eq!(s.comprehension_score(), 90);
    }

    #[test]
    fn test_comprehension_of_silent_student() {
        assert_eq!(ConversationSignals::default().comprehension_score(), 60);
    }

    #[test]
    fn test_estimated_questions_at_least_one() {
        let s = ConversationSignals {
            tutor_lines: 2,
            ..Default::default()
        };
        assert_eq!(s.estimated_questions(), 1);
        let s = ConversationSignals {
            tutor_lines: 10,
            ..Default::default()
        };
        assert_eq!(s.estimated_questions(), 3);
    }

    #[test]
    fn test_estimates_hold_for_huge_tutor_counts() {
        let s = ConversationSignals {
            tutor_lines: usize::MAX,
            student_lines: 40,
            student_word_count: 4000,
            ..Default::default()
        };
        let questions = s.estimated_questions();
        let correct = s.estimated_correct();
        assert!(questions > 1);
        assert!(correct < questions);
        assert_eq!(u64::from(correct), u64::from(questions) * 90 / 100);
        assert_eq!(accuracy_rate(correct, questions), 90);
    }

    #[test]
    fn test_single_question_accuracy_is_zero_below_full_comprehension() {
        // one estimated question, floor(1 * 0.6) = 0 correct
        let h = HeuristicAssessment::from_transcript("user: hi\nassistant: hello");
        assert_eq!(h.accuracy_rate, 0);
    }

    #[test]
    fn test_accuracy_from_estimated_questions() {
        let mut t = String::new();
        for _ in 0..9 {
            t.push_str("assistant: what is the derivative of x squared\n");
        }
        t.push_str(&student_lines(5, 12));
        let h = HeuristicAssessment::from_transcript(&t);
        // comprehension: 60 + 25 + min(20, 60/5) = 97 -> 90
        assert_eq!(h.comprehension_score, 90);
        // 3 questions, floor(3 * 0.9) = 2 correct, round(66.67) = 67
        assert_eq!(h.accuracy_rate, 67);
        assert_eq!(h.engagement_level, EngagementLevel::High);
    }

    #[test]
    fn test_heuristic_is_deterministic() {
        let t = "assistant: Today we study algebra.\nuser: I think x is five because two plus three.";
        assert_eq!(
            HeuristicAssessment::from_transcript(t),
            HeuristicAssessment::from_transcript(t)
        );
    }
}
