use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use glanz_config::Config;
use glanz_core::speech::{Speaker, SpeechError, SpeechProfile, Utterance, Voice};
use glanz_core::store::{MemorySlot, WordStore};
use glanz_enricher::{EnrichError, Enricher, ProviderMetadata, SourceDocument};
use glanz_types::{AppEvent, Distractor, Notice, UiCommand, View, WordRecord};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::context::{AppContext, Services};
use crate::events::event_loop;
use crate::scheduler::FollowUpScheduler;
use crate::state::AppState;

mod scheduler_tests;

pub const STORE_KEY: &str = "words";

pub fn record(id: &str, lemma: &str) -> WordRecord {
    WordRecord {
        id: id.to_string(),
        lemma: lemma.to_string(),
        meaning: format!("meaning of {lemma}"),
        part_of_speech: "Noun".to_string(),
        gender: None,
        plural_form: None,
        examples: vec![],
        forms: vec![],
        phrases: vec![],
        usage_notes: None,
        distractors: ["a", "b", "c"]
            .iter()
            .map(|s| Distractor {
                wrong_meaning: format!("wrong {s}"),
                image_keyword: s.to_string(),
            })
            .collect(),
        correct_image_keyword: lemma.to_lowercase(),
        user_notes: None,
    }
}

/// Scripted enricher: fails for `failing` lemmas, reads `handwriting` from any image
#[derive(Default)]
pub struct MockEnricher {
    pub configured: bool,
    pub failing: Vec<String>,
    pub extracted: Vec<String>,
    pub handwriting: String,
    pub calls: AtomicUsize,
}

impl MockEnricher {
    pub fn configured() -> Self {
        Self {
            configured: true,
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl Enricher for MockEnricher {
    async fn extract_from_image(&self, _: &SourceDocument) -> Result<Vec<String>, EnrichError> {
        Ok(self.extracted.clone())
    }

    async fn extract_from_document(&self, _: &SourceDocument) -> Result<Vec<String>, EnrichError> {
        Ok(self.extracted.clone())
    }

    async fn enrich(&self, lemma: &str) -> Result<WordRecord, EnrichError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|f| f == lemma) {
            return Err(EnrichError::ApiError(format!("no card for {lemma}")));
        }
        Ok(record(&format!("mock-{call}"), lemma))
    }

    async fn recognize_handwriting(&self, _: &SourceDocument) -> Result<String, EnrichError> {
        Ok(self.handwriting.clone())
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "mock".into(),
            model: "mock".into(),
            requires_api_key: false,
        }
    }
}

/// Remembers everything it was asked to say
#[derive(Default)]
pub struct RecordingSpeaker {
    pub spoken: Mutex<Vec<String>>,
}

impl RecordingSpeaker {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Speaker for RecordingSpeaker {
    async fn voices(&self) -> Result<Vec<Voice>, SpeechError> {
        Ok(vec![])
    }

    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        self.spoken.lock().unwrap().push(utterance.text.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// A running event loop wired to in-memory collaborators
pub struct Harness {
    pub to_app: AsyncSender<AppEvent>,
    pub from_app: AsyncReceiver<AppEvent>,
    pub slot: Arc<MemorySlot>,
    pub speaker: Arc<RecordingSpeaker>,
    pub handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    pub fn start(enricher: MockEnricher, library: Vec<WordRecord>) -> Self {
        let mut config = Config::default();
        config.session.speech_delay_ms = 30;
        config.session.celebration_delay_ms = 60;

        let slot = Arc::new(MemorySlot::new());
        let mut store = WordStore::open(slot.clone(), STORE_KEY);
        store.append_batch(library);

        let speaker = Arc::new(RecordingSpeaker::default());
        let speech = SpeechProfile::resolve(&config.speech, &[]);
        let services = Services::new(Arc::new(enricher), 3, speaker.clone(), speech);

        let (to_ui_tx, to_ui_rx) = kanal::bounded_async(64);
        let (to_app_tx, to_app_rx) = kanal::bounded_async(64);

        let ctx = AppContext::new(
            Arc::new(AppState::new(config)),
            to_ui_tx,
            to_app_tx.clone(),
            services,
        );
        let scheduler = FollowUpScheduler::new(to_app_tx.clone(), CancellationToken::new());
        let handle = tokio::spawn(event_loop(ctx, store, scheduler, to_app_rx));

        Self {
            to_app: to_app_tx,
            from_app: to_ui_rx,
            slot,
            speaker,
            handle,
        }
    }

    pub async fn send(&self, command: UiCommand) {
        self.to_app
            .send(AppEvent::Command(command))
            .await
            .expect("event loop gone");
    }

    pub async fn next_event(&self) -> AppEvent {
        match timeout(Duration::from_secs(2), self.from_app.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout waiting for app event"),
        }
    }

    /// Next redraw, skipping notices and loading updates
    pub async fn next_view(&self) -> View {
        loop {
            if let AppEvent::Render(view) = self.next_event().await {
                return view;
            }
        }
    }

    /// Next notice, skipping redraws and loading updates
    pub async fn next_notice(&self) -> Notice {
        loop {
            if let AppEvent::Notice(notice) = self.next_event().await {
                return notice;
            }
        }
    }

    /// True when nothing arrives within `wait`
    pub async fn stays_quiet(&self, wait: Duration) -> bool {
        timeout(wait, self.from_app.recv()).await.is_err()
    }

    pub fn persisted(&self) -> Vec<WordRecord> {
        let raw = glanz_core::store::KeyValueSlot::read(self.slot.as_ref(), STORE_KEY)
            .unwrap()
            .unwrap_or_else(|| "[]".to_string());
        serde_json::from_str(&raw).unwrap()
    }
}
