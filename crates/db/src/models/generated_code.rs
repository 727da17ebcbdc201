use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Bookkeeping attached to each generated website
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub sections: Vec<String>,
    /// Wall-clock time of the generation call in milliseconds
    #[serde(default)]
    pub generation_time: u64,
    #[serde(default)]
    pub tokens_used: u32,
}

impl Default for GenerationMetadata {
    fn default() -> Self {
        Self {
            generated_at: Utc::now(),
            category: String::new(),
            image_urls: Vec::new(),
            sections: Vec::new(),
            generation_time: 0,
            tokens_used: 0,
        }
    }
}

/// One generated website. A regeneration produces a new value; nothing is
/// merged into an existing one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
pub struct GeneratedCode {
    pub html: String,
    pub css: String,
    pub javascript: String,
    pub metadata: GenerationMetadata,
}
