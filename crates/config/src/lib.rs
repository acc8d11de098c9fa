//! Process-wide configuration, read once from the environment at startup.
//!
//! The required variables carry no defaults: a missing one is a configuration
//! error naming the variable. Everything else falls back to stock values.

pub mod redact;

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use shotwire_core::{Region, ShotError};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_SCREENSHOT_DIR: &str = "screenshots";
pub const DEFAULT_REGION: &str = "0,100,1920,880";

const DEFAULT_MAX_ANSWER_TOKENS: u32 = 1500;
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// SMTP session settings.
#[derive(Debug, Clone, Serialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Shotwire runtime configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub openai_api_key: String,
    /// Chat model identifier.
    pub model: String,
    pub max_answer_tokens: u32,
    pub temperature: f32,
    /// Google Vision API key for the no-text branch.
    pub vision_api_key: String,
    pub smtp: SmtpConfig,
    pub from_email: String,
    pub to_email: String,
    /// Where screenshots accumulate; created on demand, never pruned.
    pub screenshot_dir: PathBuf,
    /// `None` captures the full primary display.
    pub capture_region: Option<Region>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ShotError> {
        Self::from_map(&std::env::vars().collect())
    }

    /// Load configuration from an explicit variable map (used by tests).
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ShotError> {
        let capture_region = match vars.get("SHOTWIRE_REGION").map(String::as_str) {
            Some("full") => None,
            Some(raw) => Some(
                raw.parse::<Region>()
                    .map_err(|e| ShotError::Config(format!("invalid SHOTWIRE_REGION: {e}")))?,
            ),
            None => Some(
                DEFAULT_REGION
                    .parse::<Region>()
                    .map_err(ShotError::Config)?,
            ),
        };

        let port = match vars.get("SHOTWIRE_SMTP_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ShotError::Config(format!("invalid SHOTWIRE_SMTP_PORT \"{raw}\"")))?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            openai_api_key: required(vars, "OPENAI_API_KEY")?,
            model: optional(vars, "SHOTWIRE_MODEL", DEFAULT_MODEL),
            max_answer_tokens: DEFAULT_MAX_ANSWER_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            vision_api_key: required(vars, "GOOGLE_VISION_API_KEY")?,
            smtp: SmtpConfig {
                host: optional(vars, "SHOTWIRE_SMTP_HOST", DEFAULT_SMTP_HOST),
                port,
                username: required(vars, "SMTP_USERNAME")?,
                password: required(vars, "SMTP_PASSWORD")?,
            },
            from_email: required(vars, "FROM_EMAIL")?,
            to_email: required(vars, "TO_EMAIL")?,
            screenshot_dir: PathBuf::from(optional(
                vars,
                "SHOTWIRE_SCREENSHOT_DIR",
                DEFAULT_SCREENSHOT_DIR,
            )),
            capture_region,
            log_level: optional(vars, "RUST_LOG", "info"),
        })
    }
}

fn required(vars: &HashMap<String, String>, name: &str) -> Result<String, ShotError> {
    match vars.get(name) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(ShotError::Config(format!(
            "missing required environment variable {name}"
        ))),
    }
}

fn optional(vars: &HashMap<String, String>, name: &str, default: &str) -> String {
    vars.get(name)
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_env() -> HashMap<String, String> {
        [
            ("OPENAI_API_KEY", "sk-test-0123456789"),
            ("GOOGLE_VISION_API_KEY", "AIzaTestVisionKey0001"),
            ("SMTP_USERNAME", "bot@example.com"),
            ("SMTP_PASSWORD", "hunter2hunter2"),
            ("FROM_EMAIL", "bot@example.com"),
            ("TO_EMAIL", "owner@example.com"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn loads_with_defaults() {
        let config = Config::from_map(&full_env()).unwrap();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.smtp.host, "smtp.gmail.com");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.max_answer_tokens, 1500);
        assert_eq!(config.screenshot_dir, PathBuf::from("screenshots"));
        let region = config.capture_region.unwrap();
        assert_eq!((region.left, region.top), (0, 100));
        assert_eq!((region.width, region.height), (1920, 880));
    }

    #[test]
    fn missing_required_var_names_it() {
        let mut env = full_env();
        env.remove("OPENAI_API_KEY");
        let err = Config::from_map(&env).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn empty_required_var_is_missing() {
        let mut env = full_env();
        env.insert("SMTP_PASSWORD".to_string(), String::new());
        let err = Config::from_map(&env).unwrap_err();
        assert!(err.to_string().contains("SMTP_PASSWORD"));
    }

    #[test]
    fn region_full_means_whole_screen() {
        let mut env = full_env();
        env.insert("SHOTWIRE_REGION".to_string(), "full".to_string());
        let config = Config::from_map(&env).unwrap();
        assert!(config.capture_region.is_none());
    }

    #[test]
    fn bad_region_is_config_error() {
        let mut env = full_env();
        env.insert("SHOTWIRE_REGION".to_string(), "1,2,3".to_string());
        assert!(Config::from_map(&env).is_err());
    }
}
