use glanz_types::{Distractor, Example, WordForm, WordRecord};

pub fn word(id: &str, lemma: &str) -> WordRecord {
    WordRecord {
        id: id.to_string(),
        lemma: lemma.to_string(),
        meaning: format!("meaning of {lemma}"),
        part_of_speech: "Noun".to_string(),
        gender: Some("das".to_string()),
        plural_form: None,
        examples: vec![Example {
            source_sentence: format!("Das ist {lemma}."),
            translated_sentence: format!("This is {lemma}."),
            grammar_note: None,
        }],
        forms: vec![WordForm {
            form: lemma.to_string(),
            context_sentence: format!("Ein {lemma}."),
        }],
        phrases: vec![],
        usage_notes: None,
        distractors: ["wrong a", "wrong b", "wrong c"]
            .iter()
            .map(|m| Distractor {
                wrong_meaning: m.to_string(),
                image_keyword: m.replace(' ', "-"),
            })
            .collect(),
        correct_image_keyword: lemma.to_lowercase(),
        user_notes: None,
    }
}

pub fn words(lemmas: &[&str]) -> Vec<WordRecord> {
    lemmas
        .iter()
        .enumerate()
        .map(|(i, lemma)| word(&format!("w{i}"), lemma))
        .collect()
}
