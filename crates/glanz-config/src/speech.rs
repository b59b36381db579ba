use serde::{Deserialize, Serialize};

/// One rung of the voice ranking; earlier entries win
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "match", content = "value", rename_all = "snake_case")]
pub enum VoicePreference {
    NameExact(String),
    NameContains(String),
    LangExact(String),
    LangPrefix(String),
}

fn default_enabled() -> bool {
    true
}

fn default_language() -> String {
    "de-DE".to_string()
}

fn default_rate() -> f32 {
    0.9
}

fn default_program() -> String {
    "espeak-ng".to_string()
}

pub fn default_voice_preferences() -> Vec<VoicePreference> {
    use VoicePreference::*;

    vec![
        NameExact("Anna".into()),
        NameContains("Anna".into()),
        NameExact("Petra".into()),
        NameContains("Petra".into()),
        NameContains("Markus".into()),
        NameContains("Yannick".into()),
        NameContains("Helena".into()),
        NameContains("Martin".into()),
        NameContains("Google Deutsch".into()),
        LangExact("de-DE".into()),
        LangExact("de_DE".into()),
        LangPrefix("de".into()),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// BCP 47 tag handed to the speech engine
    #[serde(default = "default_language")]
    pub language: String,
    /// 1.0 is the engine's normal speed
    #[serde(default = "default_rate")]
    pub rate: f32,
    /// External TTS program
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_voice_preferences")]
    pub voice_preferences: Vec<VoicePreference>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            language: default_language(),
            rate: default_rate(),
            program: default_program(),
            voice_preferences: default_voice_preferences(),
        }
    }
}
