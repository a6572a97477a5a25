pub mod assessment;
pub mod transcript;

pub use assessment::{AssessmentData, EngagementLevel, Grade, GradeBand};
pub use transcript::{format_transcript, Role, SavedMessage};
