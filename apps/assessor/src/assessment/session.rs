use serde::{Deserialize, Serialize};

use crate::models::assessment::MAX_TOPICS;
use crate::models::AssessmentData;

/// What the calling application knows about the session independently of the
/// transcript. Applied after extraction; scores and grade are never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub student_name: Option<String>,
    pub subject: Option<String>,
    pub topic: Option<String>,
}

impl SessionContext {
    pub fn is_empty(&self) -> bool {
        [&self.student_name, &self.subject, &self.topic]
            .iter()
            .all(|v| non_blank(v).is_none())
    }

    pub fn apply(&self, mut assessment: AssessmentData) -> AssessmentData {
        if let Some(name) = non_blank(&self.student_name) {
            assessment.student_name = name.to_string();
        }
        if let Some(subject) = non_blank(&self.subject) {
            assessment.subject = subject.to_string();
        }
        if let Some(topic) = non_blank(&self.topic) {
            if !assessment.topics_covered.iter().any(|t| t == topic) {
                assessment.topics_covered.insert(0, topic.to_string());
                assessment.topics_covered.truncate(MAX_TOPICS);
            }
        }
        assessment
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
