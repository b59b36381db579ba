use std::env;

use serde::{Deserialize, Serialize};

use self::enrichment::EnrichmentConfig;
use self::session::SessionConfig;
use self::speech::SpeechConfig;
use self::storage::StorageConfig;
use self::ui::UiConfig;

pub mod enrichment;
pub mod session;
pub mod speech;
pub mod storage;
pub mod ui;

pub use speech::VoicePreference;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub enrichment: EnrichmentConfig,
    pub storage: StorageConfig,
    pub speech: SpeechConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from any key lookup; blank values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("GEMINI_API_KEY").or_else(|| get("API_KEY")) {
            self.enrichment.api_key = key;
        }
        if let Some(url) = get("GLANZ_API_URL") {
            self.enrichment.api_url = url;
        }
        if let Some(model) = get("GLANZ_MODEL") {
            self.enrichment.model = model;
        }
        if let Some(size) = get("GLANZ_BATCH_SIZE").and_then(|v| v.parse().ok()) {
            self.enrichment.batch_size = size;
        }
        if let Some(dir) = get("GLANZ_DATA_DIR") {
            self.storage.data_dir = Some(dir);
        }
        if let Some(program) = get("GLANZ_SPEECH_PROGRAM") {
            self.speech.program = program;
        }
        if let Some(ms) = get("GLANZ_SPEECH_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.session.speech_delay_ms = ms;
        }
        if let Some(ms) = get("GLANZ_CELEBRATION_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.session.celebration_delay_ms = ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn partial_profile_fills_in_defaults() {
        let json = r#"{ "enrichment": { "model": "gemini-2.0-flash" }, "speech": { "enabled": false } }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.enrichment.model, "gemini-2.0-flash");
        assert_eq!(config.enrichment.batch_size, 3);
        assert!(!config.speech.enabled);
        assert_eq!(config.speech.language, "de-DE");
        assert_eq!(config.speech.voice_preferences.len(), 12);
        assert_eq!(config.storage.store_key, "deutsch-glanz-words");
    }

    #[test]
    fn overrides_prefer_gemini_key_and_skip_blank_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("GEMINI_API_KEY", "  "),
            ("API_KEY", "secret"),
            ("GLANZ_BATCH_SIZE", "5"),
            ("GLANZ_CELEBRATION_DELAY_MS", "not a number"),
        ]);

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.enrichment.api_key, "secret");
        assert!(config.enrichment.has_credentials());
        assert_eq!(config.enrichment.batch_size, 5);
        assert_eq!(config.session.celebration_delay_ms, 1500);
    }

    #[test]
    fn new_matches_defaults_apart_from_environment() {
        let config = Config::new();
        let defaults = Config::default();

        assert_eq!(config.storage.store_key, defaults.storage.store_key);
        assert_eq!(config.speech.voice_preferences, defaults.speech.voice_preferences);
        assert_eq!(config.ui.image_url("x"), defaults.ui.image_url("x"));
    }

    #[test]
    fn voice_preferences_round_trip_as_tagged_entries() {
        let json = r#"[{ "match": "name_contains", "value": "Anna" }, { "match": "lang_prefix", "value": "de" }]"#;
        let prefs: Vec<VoicePreference> = serde_json::from_str(json).unwrap();

        assert_eq!(
            prefs,
            vec![
                VoicePreference::NameContains("Anna".into()),
                VoicePreference::LangPrefix("de".into()),
            ]
        );
    }

    #[test]
    fn image_url_replaces_keyword_and_spaces() {
        let ui = UiConfig::default();
        assert_eq!(
            ui.image_url("red house"),
            "https://picsum.photos/seed/red-house/400/300"
        );
    }
}
