use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::session::SessionConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub interview: InterviewSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterviewSettings {
    /// How many questions of the bank an interview uses
    pub question_limit: usize,
    /// How many of those are answered in writing
    pub text_questions: usize,
    /// Seconds allowed per video question
    pub countdown_secs: u32,
    pub reveal_cadence_ms: u64,
    pub reveal_delay_ms: u64,
}

impl InterviewSettings {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            countdown_ceiling_secs: self.countdown_secs,
            reveal_cadence: Duration::from_millis(self.reveal_cadence_ms),
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            ..SessionConfig::default()
        }
    }
}

impl Config {
    /// Load settings from `path` (any extension the `config` crate knows)
    /// over built-in defaults. A missing file is fine.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "ai-interview")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 3030)?
            .set_default("interview.question_limit", 5)?
            .set_default("interview.text_questions", 2)?
            .set_default("interview.countdown_secs", 120)?
            .set_default("interview.reveal_cadence_ms", 30)?
            .set_default("interview.reveal_delay_ms", 500)?
            .add_source(config::File::with_name(path).required(false))
            .build()
            .with_context(|| format!("Failed to read config {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}
