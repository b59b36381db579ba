use glanz_config::VoicePreference;
use glanz_config::speech::SpeechConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Engine-specific identifier passed back when speaking
    pub id: String,
    pub name: String,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub voice: Option<Voice>,
}

/// Text-to-speech output
#[async_trait::async_trait]
pub trait Speaker: Send + Sync {
    /// Voices the engine can use
    async fn voices(&self) -> Result<Vec<Voice>, SpeechError>;

    /// Speak, interrupting whatever was playing
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;

    fn name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech engine unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Speech failed: {0}")]
    Failed(String),
}

fn matches(preference: &VoicePreference, voice: &Voice) -> bool {
    match preference {
        VoicePreference::NameExact(name) => voice.name == *name,
        VoicePreference::NameContains(part) => voice.name.contains(part.as_str()),
        VoicePreference::LangExact(lang) => voice.lang == *lang,
        VoicePreference::LangPrefix(prefix) => voice.lang.starts_with(prefix.as_str()),
    }
}

/// First voice satisfying the highest-ranked preference that anything satisfies
pub fn select_voice<'a>(voices: &'a [Voice], preferences: &[VoicePreference]) -> Option<&'a Voice> {
    preferences
        .iter()
        .find_map(|pref| voices.iter().find(|voice| matches(pref, voice)))
}

/// Language, rate and chosen voice, resolved once per session
#[derive(Debug, Clone)]
pub struct SpeechProfile {
    pub lang: String,
    pub rate: f32,
    pub voice: Option<Voice>,
}

impl SpeechProfile {
    pub fn resolve(config: &SpeechConfig, voices: &[Voice]) -> Self {
        let voice = select_voice(voices, &config.voice_preferences).cloned();
        match &voice {
            Some(v) => tracing::info!("Selected voice: {} ({})", v.name, v.lang),
            None => tracing::warn!(
                "No voice matched the preferences, falling back to {}",
                config.language
            ),
        }

        Self {
            lang: config.language.clone(),
            rate: config.rate,
            voice,
        }
    }

    pub fn utterance(&self, text: &str) -> Utterance {
        Utterance {
            text: text.to_string(),
            lang: self.lang.clone(),
            rate: self.rate,
            voice: self.voice.clone(),
        }
    }
}
