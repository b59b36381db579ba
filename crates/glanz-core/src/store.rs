use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use glanz_types::WordRecord;

/// A persistent key-value slot holding whole serialized values
pub trait KeyValueSlot: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Slot poisoned")]
    Poisoned,
}

/// In-process slot; nothing survives the process
#[derive(Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let slot = Self::new();
        if let Ok(mut values) = slot.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        slot
    }
}

impl KeyValueSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Ordered word library, rewritten in full on every mutation
pub struct WordStore {
    slot: Arc<dyn KeyValueSlot>,
    key: String,
    words: Vec<WordRecord>,
}

impl WordStore {
    /// Open the store and load whatever the slot holds
    pub fn open(slot: Arc<dyn KeyValueSlot>, key: impl Into<String>) -> Self {
        let mut store = Self {
            slot,
            key: key.into(),
            words: Vec::new(),
        };
        store.words = store.load();
        tracing::info!("Loaded {} words from '{}'", store.words.len(), store.key);
        store
    }

    /// Read the persisted library; absent or malformed data is an empty library
    pub fn load(&self) -> Vec<WordRecord> {
        let raw = match self.slot.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read word store: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(words) => words,
            Err(e) => {
                tracing::warn!("Discarding malformed word store: {}", e);
                Vec::new()
            }
        }
    }

    /// Overwrite the persisted library with the in-memory one
    pub fn save(&self) {
        let result = serde_json::to_string(&self.words)
            .map_err(StoreError::from)
            .and_then(|json| self.slot.write(&self.key, &json));

        if let Err(e) = result {
            tracing::warn!("Failed to save word store: {}", e);
        }
    }

    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    pub fn get(&self, index: usize) -> Option<&WordRecord> {
        self.words.get(index)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn append(&mut self, record: WordRecord) {
        self.append_batch(vec![record]);
    }

    /// Returns how many records were added
    pub fn append_batch(&mut self, records: Vec<WordRecord>) -> usize {
        if records.is_empty() {
            return 0;
        }

        let mut added = 0;
        for record in records {
            if self.words.iter().any(|w| w.id == record.id) {
                tracing::warn!("Skipping record with duplicate id {}", record.id);
                continue;
            }
            self.words.push(record);
            added += 1;
        }

        self.save();
        added
    }

    /// Blank text clears the note. Returns false for an unknown id.
    pub fn update_notes(&mut self, id: &str, text: &str) -> bool {
        let Some(word) = self.words.iter_mut().find(|w| w.id == id) else {
            tracing::warn!("No word with id {} to annotate", id);
            return false;
        };

        let text = text.trim();
        word.user_notes = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };

        self.save();
        true
    }
}
