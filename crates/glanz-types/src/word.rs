use serde::{Deserialize, Serialize};

/// One studied vocabulary entry, as persisted in the library blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub id: String,
    pub lemma: String,
    pub meaning: String,
    pub part_of_speech: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural_form: Option<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
    /// Verbs: present, past, perfect, subjunctive II. Others: declension forms.
    #[serde(default)]
    pub forms: Vec<WordForm>,
    #[serde(default)]
    pub phrases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_notes: Option<String>,
    #[serde(default)]
    pub distractors: Vec<Distractor>,
    pub correct_image_keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
}

impl WordRecord {
    pub fn kind(&self) -> PartOfSpeech {
        PartOfSpeech::classify(&self.part_of_speech)
    }

    pub fn is_verb(&self) -> bool {
        self.kind() == PartOfSpeech::Verb
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub source_sentence: String,
    pub translated_sentence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordForm {
    pub form: String,
    pub context_sentence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distractor {
    pub wrong_meaning: String,
    pub image_keyword: String,
}

/// Coarse display classification of the free-text part of speech
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

impl PartOfSpeech {
    pub fn classify(text: &str) -> Self {
        let text = text.trim().to_lowercase();

        if text.contains("adverb") {
            PartOfSpeech::Adverb
        } else if text.contains("verb") {
            PartOfSpeech::Verb
        } else if text.contains("noun") || text.contains("nomen") || text.contains("substantiv") {
            PartOfSpeech::Noun
        } else if text.starts_with("adj") {
            PartOfSpeech::Adjective
        } else {
            PartOfSpeech::Other
        }
    }
}
