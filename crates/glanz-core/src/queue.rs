use std::sync::Arc;

use futures_util::future::join_all;
use glanz_enricher::Enricher;
use glanz_types::WordRecord;

pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Enriches candidate lemmas a few at a time
#[derive(Clone)]
pub struct EnrichmentQueue {
    enricher: Arc<dyn Enricher>,
    batch_size: usize,
}

impl EnrichmentQueue {
    pub fn new(enricher: Arc<dyn Enricher>, batch_size: usize) -> Self {
        Self {
            enricher,
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Successful records in input order. Failed lemmas are logged and dropped;
    /// duplicates are enriched separately.
    pub async fn process(&self, lemmas: &[String]) -> Vec<WordRecord> {
        if lemmas.is_empty() {
            return Vec::new();
        }

        tracing::info!(
            "Enriching {} lemmas in batches of {}",
            lemmas.len(),
            self.batch_size
        );

        let mut enriched = Vec::with_capacity(lemmas.len());
        for batch in lemmas.chunks(self.batch_size) {
            let results = join_all(batch.iter().map(|lemma| self.enricher.enrich(lemma))).await;

            for (lemma, result) in batch.iter().zip(results) {
                match result {
                    Ok(record) => {
                        tracing::debug!("Enriched '{}' as '{}'", lemma, record.lemma);
                        enriched.push(record);
                    }
                    Err(e) => {
                        tracing::warn!("Dropping '{}': {}", lemma, e);
                    }
                }
            }
        }

        tracing::info!("Enriched {}/{} lemmas", enriched.len(), lemmas.len());
        enriched
    }
}
