use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an interview session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Per-question answer time during the video phase, in seconds
    /// Default: 120 seconds
    pub countdown_ceiling_secs: u32,

    /// Delay between revealed characters of a question
    /// Default: 30ms
    pub reveal_cadence: Duration,

    /// Pause before revealing a follow-up question
    /// Default: 500ms
    pub reveal_delay: Duration,

    /// Countdown tick period (one second outside of tests)
    pub tick_period: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_ceiling_secs: 120,
            reveal_cadence: Duration::from_millis(30),
            reveal_delay: Duration::from_millis(500),
            tick_period: Duration::from_secs(1),
        }
    }
}
