use std::sync::Arc;

use glanz_core::queue::EnrichmentQueue;
use glanz_core::speech::{Speaker, SpeechProfile};
use glanz_enricher::Enricher;
use glanz_types::{AppEvent, Notice, View};
use kanal::AsyncSender;

use crate::state::AppState;

/// Long-lived collaborators built once at startup
pub struct Services {
    pub enricher: Arc<dyn Enricher>,
    pub queue: EnrichmentQueue,
    pub speaker: Arc<dyn Speaker>,
    pub speech: SpeechProfile,
}

impl Services {
    pub fn new(
        enricher: Arc<dyn Enricher>,
        batch_size: usize,
        speaker: Arc<dyn Speaker>,
        speech: SpeechProfile,
    ) -> Self {
        Self {
            queue: EnrichmentQueue::new(enricher.clone(), batch_size),
            enricher,
            speaker,
            speech,
        }
    }
}

/// Bundles the shared handles every event handler needs
#[derive(Clone)]
pub struct AppContext {
    pub state: Arc<AppState>,
    /// Events for the UI
    pub event_tx: AsyncSender<AppEvent>,
    /// Events back into our own loop, used by background tasks
    pub loopback_tx: AsyncSender<AppEvent>,
    pub services: Arc<Services>,
}

impl AppContext {
    pub fn new(
        state: Arc<AppState>,
        event_tx: AsyncSender<AppEvent>,
        loopback_tx: AsyncSender<AppEvent>,
        services: Services,
    ) -> Self {
        Self {
            state,
            event_tx,
            loopback_tx,
            services: Arc::new(services),
        }
    }

    async fn to_ui(&self, event: AppEvent) {
        if let Err(e) = self.event_tx.send(event).await {
            tracing::error!("Failed to send event to UI: {}", e);
        }
    }

    pub async fn render(&self, view: View) {
        self.to_ui(AppEvent::Render(view)).await;
    }

    pub async fn notify(&self, notice: Notice) {
        self.to_ui(AppEvent::Notice(notice)).await;
    }

    pub async fn loading(&self, status: impl Into<String>, busy: bool) {
        self.to_ui(AppEvent::Loading {
            status: status.into(),
            busy,
        })
        .await;
    }

    pub async fn shutdown_ui(&self) {
        self.to_ui(AppEvent::Shutdown).await;
    }

    /// Hand a background result back to the event loop
    pub async fn loopback(&self, event: AppEvent) {
        if let Err(e) = self.loopback_tx.send(event).await {
            tracing::error!("Failed to send event to app: {}", e);
        }
    }

    /// Speak a word; speech problems never interrupt the session
    pub async fn speak(&self, text: &str) {
        let utterance = self.services.speech.utterance(text);
        if let Err(e) = self.services.speaker.speak(&utterance).await {
            tracing::warn!("Speech failed for '{}': {}", text, e);
        }
    }
}
