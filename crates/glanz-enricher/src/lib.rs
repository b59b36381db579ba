use glanz_types::WordRecord;

/// Number of wrong options every quiz-ready record carries
pub const DISTRACTOR_COUNT: usize = 3;

/// Word enrichment provider interface
#[async_trait::async_trait]
pub trait Enricher: Send + Sync {
    /// Candidate lemmas visible in a photo
    async fn extract_from_image(&self, image: &SourceDocument) -> Result<Vec<String>, EnrichError>;

    /// Candidate lemmas found in an arbitrary document
    async fn extract_from_document(
        &self,
        document: &SourceDocument,
    ) -> Result<Vec<String>, EnrichError>;

    /// Expand one lemma into a full study record with a fresh id
    async fn enrich(&self, lemma: &str) -> Result<WordRecord, EnrichError>;

    /// Read handwritten text from an image
    async fn recognize_handwriting(&self, image: &SourceDocument) -> Result<String, EnrichError>;

    /// False when required credentials are missing
    fn is_configured(&self) -> bool;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// Raw bytes of an uploaded image or document
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("API key missing: set GEMINI_API_KEY or enrichment.api_key in the profile")]
    MissingCredentials,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Authentication rejected by provider")]
    AuthenticationError,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Rejected record for '{lemma}': {reason}")]
    InvalidRecord { lemma: String, reason: String },
}

/// Checks the shape a quiz needs before a record may enter the store
pub fn validate_record(record: &WordRecord) -> Result<(), EnrichError> {
    let reject = |reason: String| EnrichError::InvalidRecord {
        lemma: record.lemma.clone(),
        reason,
    };

    if record.lemma.trim().is_empty() {
        return Err(reject("empty lemma".to_string()));
    }
    if record.meaning.trim().is_empty() {
        return Err(reject("empty meaning".to_string()));
    }
    if record.distractors.len() != DISTRACTOR_COUNT {
        return Err(reject(format!(
            "expected {DISTRACTOR_COUNT} distractors, got {}",
            record.distractors.len()
        )));
    }

    Ok(())
}
