use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use glanz_config::Config;
use glanz_core::speech::{Speaker, SpeechError, SpeechProfile};
use glanz_core::store::WordStore;
use glanz_enricher::Enricher;
use glanz_io::{EspeakSpeaker, FileSlot, SilentSpeaker};
use glanz_lang_german::GeminiEnricher;
use tokio::signal;

pub mod context;
pub mod controller;
pub mod events;
pub mod logging;
pub mod profile;
pub mod scheduler;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::context::Services;
use self::controller::AppController;
use self::state::AppState;

/// Learn German vocabulary from photos, documents and word lists
#[derive(Parser, Debug)]
#[command(name = "deutsch-glanz", version, about)]
struct Args {
    /// Profile to load from the user config folder
    #[arg(long, default_value = "main")]
    profile: String,

    /// Directory holding the word library
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Do not speak words aloud
    #[arg(long)]
    no_speech: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_config(args: &Args) -> Config {
    if let Err(e) = profile::init_user_config() {
        tracing::warn!("Could not prepare the profiles folder: {}", e);
    }

    let mut config = match profile::load_user_profile(&args.profile) {
        Ok(mut config) => {
            config.apply_env();
            config
        }
        Err(e) => {
            tracing::warn!("Failed to load profile {}: {}, using defaults", args.profile, e);
            Config::new()
        }
    };

    if args.no_speech {
        config.speech.enabled = false;
    }
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = Some(dir.display().to_string());
    }

    config
}

/// The configured speech program, or a silent stand-in when it is disabled or missing
async fn init_speech(config: &Config) -> (Arc<dyn Speaker>, SpeechProfile) {
    if !config.speech.enabled {
        tracing::info!("Speech disabled");
        return (Arc::new(SilentSpeaker), SpeechProfile::resolve(&config.speech, &[]));
    }

    let speaker = EspeakSpeaker::new(config.speech.program.clone());
    match speaker.voices().await {
        Ok(voices) => {
            tracing::info!("{} offers {} voices", speaker.name(), voices.len());
            let profile = SpeechProfile::resolve(&config.speech, &voices);
            (Arc::new(speaker), profile)
        }
        Err(SpeechError::Unavailable(reason)) => {
            tracing::warn!("Speech unavailable ({}), continuing silently", reason);
            (Arc::new(SilentSpeaker), SpeechProfile::resolve(&config.speech, &[]))
        }
        Err(e) => {
            tracing::warn!("Could not list voices: {}", e);
            (Arc::new(speaker), SpeechProfile::resolve(&config.speech, &[]))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    logging::init_tracing(&args.log_level, args.log_json);

    let config = load_config(&args);

    let data_dir = match &config.storage.data_dir {
        Some(dir) => PathBuf::from(dir),
        None => profile::default_data_dir()?,
    };
    let slot = FileSlot::new(&data_dir)?;
    tracing::info!("Word library in {}", slot.dir().display());
    let store = WordStore::open(Arc::new(slot), config.storage.store_key.clone());

    let enricher: Arc<dyn Enricher> = Arc::new(GeminiEnricher::new(&config.enrichment));
    let metadata = enricher.metadata();
    if !metadata.requires_api_key || enricher.is_configured() {
        tracing::info!("Enrichment via {} ({})", metadata.name, metadata.model);
    } else {
        tracing::warn!("No API key configured; importing words is disabled");
    }

    let (speaker, speech) = init_speech(&config).await;
    let services = Services::new(enricher, config.enrichment.batch_size, speaker, speech);

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(services, store);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Session ended"),
                Ok(Err(e)) => tracing::error!("Task failed: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    // A pending stdin read would otherwise hold the runtime open
    std::process::exit(0)
}
