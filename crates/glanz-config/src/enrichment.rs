use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_extraction_temperature() -> f32 {
    0.1
}

fn default_enrichment_temperature() -> f32 {
    0.3
}

fn default_batch_size() -> usize {
    3
}

fn default_meaning_language() -> String {
    "Chinese".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Gemini API key; empty means imports are refused
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_extraction_temperature")]
    pub extraction_temperature: f32,
    #[serde(default = "default_enrichment_temperature")]
    pub enrichment_temperature: f32,
    /// Concurrent enrichment calls per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Language the meanings and example translations are written in
    #[serde(default = "default_meaning_language")]
    pub meaning_language: String,
}

impl EnrichmentConfig {
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            extraction_temperature: default_extraction_temperature(),
            enrichment_temperature: default_enrichment_temperature(),
            batch_size: default_batch_size(),
            meaning_language: default_meaning_language(),
        }
    }
}
