use glanz_types::{PartOfSpeech, WordRecord};

/// Fixed order of the four verb forms on a study card
pub const VERB_FORM_LABELS: [&str; 4] = [
    "Präsens (3. Sg.)",
    "Präteritum (3. Sg.)",
    "Perfekt",
    "Konjunktiv II",
];

/// Label for the n-th form of a word; non-verbs have free declension forms
pub fn form_label(kind: PartOfSpeech, index: usize) -> Option<&'static str> {
    match kind {
        PartOfSpeech::Verb => VERB_FORM_LABELS.get(index).copied(),
        _ => None,
    }
}

/// "das Haus (pl. Häuser)" for nouns, the bare lemma otherwise
pub fn headword(record: &WordRecord) -> String {
    let mut line = match record.gender.as_deref().map(str::trim) {
        Some(article) if !article.is_empty() => format!("{} {}", article, record.lemma),
        _ => record.lemma.clone(),
    };

    if let Some(plural) = record.plural_form.as_deref().map(str::trim)
        && !plural.is_empty()
    {
        line.push_str(&format!(" (pl. {plural})"));
    }

    line
}
