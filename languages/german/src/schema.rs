use serde_json::{Value, json};

/// A flat list of candidate lemmas
pub fn candidates() -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": "Distinct German vocabulary words in dictionary form"
    })
}

/// Recognized handwriting
pub fn handwriting() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "text": { "type": "STRING" }
        },
        "required": ["text"]
    })
}

/// One study card
pub fn word_record() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "lemma": { "type": "STRING" },
            "meaning": { "type": "STRING" },
            "partOfSpeech": { "type": "STRING" },
            "gender": { "type": "STRING" },
            "pluralForm": { "type": "STRING" },
            "examples": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "sourceSentence": { "type": "STRING" },
                        "translatedSentence": { "type": "STRING" },
                        "grammarNote": { "type": "STRING" }
                    },
                    "required": ["sourceSentence", "translatedSentence"]
                }
            },
            "forms": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "form": { "type": "STRING" },
                        "contextSentence": { "type": "STRING" }
                    },
                    "required": ["form", "contextSentence"]
                }
            },
            "phrases": { "type": "ARRAY", "items": { "type": "STRING" } },
            "usageNotes": { "type": "STRING" },
            "distractors": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "wrongMeaning": { "type": "STRING" },
                        "imageKeyword": { "type": "STRING" }
                    },
                    "required": ["wrongMeaning", "imageKeyword"]
                }
            },
            "correctImageKeyword": { "type": "STRING" }
        },
        "required": [
            "lemma",
            "meaning",
            "partOfSpeech",
            "examples",
            "distractors",
            "correctImageKeyword"
        ]
    })
}
