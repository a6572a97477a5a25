use thiserror::Error;

/// Failures at the command-line boundary. The extraction library itself never
/// fails; these cover reading input and writing output.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transcript is empty")]
    EmptyTranscript,
}
