use std::process::Stdio;

use glanz_core::speech::{Speaker, SpeechError, Utterance, Voice};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

/// espeak-ng's default speed in words per minute
const BASE_WPM: f32 = 175.0;

/// Speaks through an `espeak-ng` compatible subprocess
pub struct EspeakSpeaker {
    program: String,
    current: Mutex<Option<Child>>,
}

impl EspeakSpeaker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            current: Mutex::new(None),
        }
    }

    fn words_per_minute(rate: f32) -> u32 {
        (BASE_WPM * rate.clamp(0.3, 3.0)).round() as u32
    }
}

/// Parse the table printed by `espeak-ng --voices`
pub fn parse_voice_table(table: &str) -> Vec<Voice> {
    table
        .lines()
        .filter(|line| !line.trim_start().starts_with("Pty"))
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 5 {
                return None;
            }
            Some(Voice {
                id: fields[4].to_string(),
                name: fields[3].replace('_', " "),
                lang: fields[1].to_string(),
            })
        })
        .collect()
}

#[async_trait::async_trait]
impl Speaker for EspeakSpeaker {
    async fn voices(&self) -> Result<Vec<Voice>, SpeechError> {
        let output = Command::new(&self.program)
            .arg("--voices")
            .output()
            .await
            .map_err(|e| SpeechError::Unavailable(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(SpeechError::Failed(format!(
                "{} --voices exited with {}",
                self.program, output.status
            )));
        }

        Ok(parse_voice_table(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        let mut current = self.current.lock().await;
        if let Some(mut previous) = current.take() {
            // Already finished is fine
            let _ = previous.start_kill();
        }

        let voice = utterance
            .voice
            .as_ref()
            .map(|v| v.id.clone())
            .unwrap_or_else(|| utterance.lang.clone());

        let child = Command::new(&self.program)
            .arg("-v")
            .arg(&voice)
            .arg("-s")
            .arg(Self::words_per_minute(utterance.rate).to_string())
            .arg(&utterance.text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Unavailable(format!("{}: {}", self.program, e)))?;

        tracing::debug!("Speaking '{}' with voice {}", utterance.text, voice);
        *current = Some(child);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Logs instead of speaking; used when speech is disabled or unavailable
#[derive(Default)]
pub struct SilentSpeaker;

#[async_trait::async_trait]
impl Speaker for SilentSpeaker {
    async fn voices(&self) -> Result<Vec<Voice>, SpeechError> {
        Ok(Vec::new())
    }

    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        tracing::info!("(silent) {} [{}]", utterance.text, utterance.lang);
        Ok(())
    }

    fn name(&self) -> &str {
        "silent"
    }
}
