use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_speech_delay_ms() -> u64 {
    300
}

fn default_celebration_delay_ms() -> u64 {
    1500
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SessionConfig {
    /// Pause before the first word of a quiz is spoken
    #[serde(default = "default_speech_delay_ms")]
    pub speech_delay_ms: u64,
    /// Pause after a correct dictation before moving on
    #[serde(default = "default_celebration_delay_ms")]
    pub celebration_delay_ms: u64,
}

impl SessionConfig {
    pub fn speech_delay(&self) -> Duration {
        Duration::from_millis(self.speech_delay_ms)
    }

    pub fn celebration_delay(&self) -> Duration {
        Duration::from_millis(self.celebration_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            speech_delay_ms: default_speech_delay_ms(),
            celebration_delay_ms: default_celebration_delay_ms(),
        }
    }
}
