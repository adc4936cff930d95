use crate::conversation::DEFAULT_PREVIEW_CHARS;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/ask";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Front-end configuration.
///
/// Loaded from `config.toml`; every field has a default so a partial or
/// missing file is valid.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Full URL of the `/ask` endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Prompts offered on the empty conversation view.
    #[serde(default = "default_example_prompts")]
    pub example_prompts: Vec<String>,
    /// History previews are cut after this many characters.
    #[serde(default = "default_preview_chars")]
    pub history_preview_chars: usize,
    /// chrono format string for exchange timestamps.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            example_prompts: default_example_prompts(),
            history_preview_chars: default_preview_chars(),
            time_format: default_time_format(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_example_prompts() -> Vec<String> {
    vec![
        "When is an employer vicariously liable for an employee's wrongful acts?".to_string(),
        "What is the test for an unfair dismissal in South African labour law?".to_string(),
        "How do courts approach the review of CCMA arbitration awards?".to_string(),
    ]
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}
