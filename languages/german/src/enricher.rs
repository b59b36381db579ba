use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use glanz_config::enrichment::EnrichmentConfig;
use glanz_enricher::{EnrichError, Enricher, ProviderMetadata, SourceDocument, validate_record};
use glanz_types::{Distractor, Example, WordForm, WordRecord};
use serde::{Deserialize, Serialize};

use crate::preprocess::{CandidatePreprocessor, Preprocessor, clean_candidates};
use crate::{prompts, schema};

/// Gemini `generateContent` backed enricher
#[derive(Clone)]
pub struct GeminiEnricher {
    client: reqwest::Client,
    api_key: String,
    has_credentials: bool,
    api_url: String,
    model: String,
    extraction_temperature: f32,
    enrichment_temperature: f32,
    meaning_language: String,
}

impl GeminiEnricher {
    pub fn new(config: &EnrichmentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.trim().to_string(),
            has_credentials: config.has_credentials(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            extraction_temperature: config.extraction_temperature,
            enrichment_temperature: config.enrichment_temperature,
            meaning_language: config.meaning_language.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    /// Send one request and return the concatenated text of the first candidate
    async fn generate(&self, request: &GenerateRequest) -> Result<String, EnrichError> {
        if !self.has_credentials {
            return Err(EnrichError::MissingCredentials);
        }

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(EnrichError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(EnrichError::AuthenticationError);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichError::ApiError(format!("HTTP {}: {}", status, body.trim())));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            EnrichError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        response_text(body)
    }

    async fn extract(&self, document: &SourceDocument, prompt: &str) -> Result<Vec<String>, EnrichError> {
        let request = GenerateRequest::new(
            vec![Part::inline(document), Part::text(prompt)],
            GenerationConfig::json(schema::candidates(), self.extraction_temperature),
        );

        let text = self.generate(&request).await?;
        let candidates = clean_candidates(parse_candidates(&text));
        tracing::info!("Extracted {} candidates from '{}'", candidates.len(), document.name);
        Ok(candidates)
    }
}

#[async_trait]
impl Enricher for GeminiEnricher {
    async fn extract_from_image(&self, image: &SourceDocument) -> Result<Vec<String>, EnrichError> {
        self.extract(image, prompts::IMAGE_EXTRACTION).await
    }

    async fn extract_from_document(
        &self,
        document: &SourceDocument,
    ) -> Result<Vec<String>, EnrichError> {
        self.extract(document, prompts::DOCUMENT_EXTRACTION).await
    }

    async fn enrich(&self, lemma: &str) -> Result<WordRecord, EnrichError> {
        let lemma = CandidatePreprocessor.process(lemma);
        let request = GenerateRequest::new(
            vec![Part::text(&prompts::enrichment(&lemma, &self.meaning_language))],
            GenerationConfig::json(schema::word_record(), self.enrichment_temperature),
        );

        let text = self.generate(&request).await?;
        parse_record(&text, &lemma)
    }

    async fn recognize_handwriting(&self, image: &SourceDocument) -> Result<String, EnrichError> {
        let request = GenerateRequest::new(
            vec![Part::inline(image), Part::text(prompts::HANDWRITING)],
            GenerationConfig::json(schema::handwriting(), self.extraction_temperature),
        );

        let text = self.generate(&request).await?;
        parse_handwriting(&text)
    }

    fn is_configured(&self) -> bool {
        self.has_credentials
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "gemini".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn new(parts: Vec<Part>, generation_config: GenerationConfig) -> Self {
        Self {
            contents: vec![Content { parts }],
            generation_config,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    fn text(text: &str) -> Self {
        Part::Text {
            text: text.to_string(),
        }
    }

    fn inline(document: &SourceDocument) -> Self {
        Part::Inline {
            inline_data: InlineData {
                mime_type: document.mime_type.clone(),
                data: STANDARD.encode(&document.data),
            },
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
    temperature: f32,
}

impl GenerationConfig {
    fn json(response_schema: serde_json::Value, temperature: f32) -> Self {
        Self {
            response_mime_type: "application/json",
            response_schema,
            temperature,
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn response_text(response: GenerateResponse) -> Result<String, EnrichError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| match part {
                    Part::Text { text } => Some(text),
                    Part::Inline { .. } => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(EnrichError::EmptyResponse);
    }
    Ok(text)
}

/// Malformed extraction output is treated as "nothing found"
pub fn parse_candidates(text: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(text) {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!("Ignoring malformed candidate list: {}", e);
            Vec::new()
        }
    }
}

#[derive(Deserialize)]
struct Handwriting {
    #[serde(default)]
    text: String,
}

pub fn parse_handwriting(text: &str) -> Result<String, EnrichError> {
    let parsed: Handwriting = serde_json::from_str(text)
        .map_err(|e| EnrichError::MalformedResponse(format!("handwriting: {}", e)))?;
    Ok(parsed.text.trim().to_string())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrichedWord {
    #[serde(default)]
    lemma: String,
    #[serde(default)]
    meaning: String,
    #[serde(default)]
    part_of_speech: String,
    gender: Option<String>,
    plural_form: Option<String>,
    #[serde(default)]
    examples: Vec<EnrichedExample>,
    #[serde(default)]
    forms: Vec<EnrichedForm>,
    #[serde(default)]
    phrases: Vec<String>,
    usage_notes: Option<String>,
    #[serde(default)]
    distractors: Vec<EnrichedDistractor>,
    #[serde(default)]
    correct_image_keyword: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrichedExample {
    #[serde(default)]
    source_sentence: String,
    #[serde(default)]
    translated_sentence: String,
    grammar_note: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrichedForm {
    #[serde(default)]
    form: String,
    #[serde(default)]
    context_sentence: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrichedDistractor {
    #[serde(default)]
    wrong_meaning: String,
    #[serde(default)]
    image_keyword: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Build a store-ready record with a fresh id. `requested` stands in for a missing lemma.
pub fn parse_record(text: &str, requested: &str) -> Result<WordRecord, EnrichError> {
    let word: EnrichedWord = serde_json::from_str(text)
        .map_err(|e| EnrichError::MalformedResponse(format!("'{}': {}", requested, e)))?;

    let lemma = match word.lemma.trim() {
        "" => requested.trim().to_string(),
        lemma => lemma.to_string(),
    };

    let record = WordRecord {
        id: uuid::Uuid::new_v4().to_string(),
        lemma,
        meaning: word.meaning.trim().to_string(),
        part_of_speech: word.part_of_speech.trim().to_string(),
        gender: non_blank(word.gender),
        plural_form: non_blank(word.plural_form),
        examples: word
            .examples
            .into_iter()
            .filter(|e| !e.source_sentence.trim().is_empty())
            .map(|e| Example {
                source_sentence: e.source_sentence,
                translated_sentence: e.translated_sentence,
                grammar_note: non_blank(e.grammar_note),
            })
            .collect(),
        forms: word
            .forms
            .into_iter()
            .filter(|f| !f.form.trim().is_empty())
            .map(|f| WordForm {
                form: f.form,
                context_sentence: f.context_sentence,
            })
            .collect(),
        phrases: word
            .phrases
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect(),
        usage_notes: non_blank(word.usage_notes),
        distractors: word
            .distractors
            .into_iter()
            .map(|d| Distractor {
                wrong_meaning: d.wrong_meaning,
                image_keyword: d.image_keyword,
            })
            .collect(),
        correct_image_keyword: word.correct_image_keyword.trim().to_string(),
        user_notes: None,
    };

    validate_record(&record)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAUS: &str = r#"{
        "lemma": "Haus",
        "meaning": "房子",
        "partOfSpeech": "Noun",
        "gender": "das",
        "pluralForm": "Häuser",
        "examples": [
            { "sourceSentence": "Das Haus ist alt.", "translatedSentence": "房子很旧。" },
            { "sourceSentence": " ", "translatedSentence": "" }
        ],
        "forms": [],
        "phrases": ["nach Hause", ""],
        "usageNotes": "  ",
        "distractors": [
            { "wrongMeaning": "树", "imageKeyword": "tree" },
            { "wrongMeaning": "狗", "imageKeyword": "dog" },
            { "wrongMeaning": "车", "imageKeyword": "car" }
        ],
        "correctImageKeyword": "house"
    }"#;

    #[test]
    fn parses_a_full_record() {
        let record = parse_record(HAUS, "Haus").unwrap();

        assert_eq!(record.lemma, "Haus");
        assert_eq!(record.gender.as_deref(), Some("das"));
        assert_eq!(record.examples.len(), 1);
        assert_eq!(record.phrases, ["nach Hause"]);
        assert_eq!(record.usage_notes, None);
        assert_eq!(record.distractors.len(), 3);
        assert!(record.user_notes.is_none());
        assert!(uuid::Uuid::parse_str(&record.id).is_ok());
    }

    #[test]
    fn each_parse_gets_a_fresh_id() {
        let a = parse_record(HAUS, "Haus").unwrap();
        let b = parse_record(HAUS, "Haus").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn wrong_distractor_count_is_rejected() {
        let text = r#"{
            "lemma": "Baum", "meaning": "树", "partOfSpeech": "Noun",
            "distractors": [{ "wrongMeaning": "房子", "imageKeyword": "house" }],
            "correctImageKeyword": "tree"
        }"#;

        assert!(matches!(
            parse_record(text, "Baum"),
            Err(EnrichError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn not_json_is_malformed() {
        assert!(matches!(
            parse_record("Sorry, I can't help", "Baum"),
            Err(EnrichError::MalformedResponse(_))
        ));
    }

    #[test]
    fn candidates_tolerate_garbage() {
        assert_eq!(parse_candidates(r#"["Haus", "Baum"]"#), ["Haus", "Baum"]);
        assert!(parse_candidates("no words here").is_empty());
        assert!(parse_candidates(r#"{"words": []}"#).is_empty());
    }

    #[test]
    fn handwriting_is_trimmed() {
        assert_eq!(parse_handwriting(r#"{"text": " Straße\n"}"#).unwrap(), "Straße");
        assert_eq!(parse_handwriting(r#"{}"#).unwrap(), "");
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "[\"Ha"}, {"text": "us\"]"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response_text(body).unwrap(), r#"["Haus"]"#);

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(response_text(empty), Err(EnrichError::EmptyResponse)));
    }

    #[test]
    fn request_serializes_in_wire_shape() {
        let document = SourceDocument::new("page.png", "image/png", vec![1, 2, 3]);
        let request = GenerateRequest::new(
            vec![Part::inline(&document), Part::text("go")],
            GenerationConfig::json(schema::candidates(), 0.1),
        );

        let value = serde_json::to_value(&request).unwrap();
        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "AQID");
        assert_eq!(parts[1]["text"], "go");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[tokio::test]
    async fn missing_key_is_refused_before_any_request() {
        let enricher = GeminiEnricher::new(&EnrichmentConfig::default());

        assert!(!enricher.is_configured());
        assert!(matches!(
            enricher.enrich("Haus").await,
            Err(EnrichError::MissingCredentials)
        ));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let blank = EnrichmentConfig {
            api_key: "   ".into(),
            ..EnrichmentConfig::default()
        };
        let set = EnrichmentConfig {
            api_key: "secret".into(),
            ..EnrichmentConfig::default()
        };

        assert!(!GeminiEnricher::new(&blank).is_configured());
        assert!(GeminiEnricher::new(&set).is_configured());
        assert!(GeminiEnricher::new(&set).metadata().requires_api_key);
    }

    #[test]
    fn endpoint_uses_model_path() {
        let config = EnrichmentConfig {
            api_url: "http://localhost:9000/v1beta/".into(),
            ..Default::default()
        };
        let enricher = GeminiEnricher::new(&config);
        assert_eq!(
            enricher.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
