use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use assessor::SessionContext;

/// Runtime configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Transcript file; stdin when unset or `-`.
    pub transcript_path: Option<PathBuf>,
    pub session: SessionContext,
    pub pretty_output: bool,
    pub include_charts: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            transcript_path: optional("TRANSCRIPT_PATH")
                .filter(|p| p.trim() != "-")
                .map(PathBuf::from),
            session: SessionContext {
                student_name: optional("STUDENT_NAME"),
                subject: optional("SESSION_SUBJECT"),
                topic: optional("SESSION_TOPIC"),
            },
            pretty_output: parse_flag("PRETTY_OUTPUT", optional("PRETTY_OUTPUT"), true)?,
            include_charts: parse_flag("INCLUDE_CHARTS", optional("INCLUDE_CHARTS"), true)?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_flag(key: &str, value: Option<String>, default: bool) -> Result<bool> {
    let Some(value) = value else {
        return Ok(default);
    };
    let parsed = match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("unrecognised boolean '{other}'")),
    };
    parsed.with_context(|| format!("{key} must be a boolean (true/false)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.transcript_path.is_none());
        assert!(config.session.is_empty());
        assert!(config.pretty_output);
        assert!(config.include_charts);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_session_context_from_env() {
        let config = config_from(&[
            ("STUDENT_NAME", "Ada"),
            ("SESSION_SUBJECT", "maths"),
            ("SESSION_TOPIC", "Fractions"),
        ])
        .unwrap();
        assert_eq!(config.session.student_name.as_deref(), Some("Ada"));
        assert_eq!(config.session.subject.as_deref(), Some("maths"));
        assert_eq!(config.session.topic.as_deref(), Some("Fractions"));
    }

    #[test]
    fn test_dash_means_stdin() {
        let config = config_from(&[("TRANSCRIPT_PATH", "-")]).unwrap();
        assert!(config.transcript_path.is_none());
        let config = config_from(&[("TRANSCRIPT_PATH", "session.txt")]).unwrap();
        assert_eq!(config.transcript_path, Some(PathBuf::from("session.txt")));
    }

    #[test]
    fn test_flags() {
        let config =
            config_from(&[("PRETTY_OUTPUT", "false"), ("INCLUDE_CHARTS", "0")]).unwrap();
        assert!(!config.pretty_output);
        assert!(!config.include_charts);
    }

    #[test]
    fn test_invalid_flag_names_the_variable() {
        let err = config_from(&[("INCLUDE_CHARTS", "maybe")]).unwrap_err();
        assert!(format!("{err:#}").contains("INCLUDE_CHARTS"));
    }
}
