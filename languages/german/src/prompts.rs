use crate::grammar::VERB_FORM_LABELS;

pub const IMAGE_EXTRACTION: &str = "Analyze this image and extract the German vocabulary \
words it shows. Give each word in its dictionary form (infinitive for verbs, nominative \
singular for nouns, without article). Return ONLY a JSON array of strings.";

pub const DOCUMENT_EXTRACTION: &str = "Extract the German vocabulary words worth studying \
from this document. Give each word in its dictionary form, without article. Return ONLY a \
JSON array of strings.";

pub const HANDWRITING: &str = "Read the handwritten German text in this image. Return the \
text exactly as written, without correcting spelling, as {\"text\": \"...\"}. Return an \
empty string if nothing legible is written.";

/// Study card request for one lemma
pub fn enrichment(lemma: &str, meaning_language: &str) -> String {
    format!(
        "Generate a study card for the German word \"{lemma}\".\n\
         - lemma: the dictionary form.\n\
         - meaning: a short {meaning_language} translation.\n\
         - partOfSpeech: Noun, Verb, Adjective, Adverb or another English term.\n\
         - For nouns give gender as the article (der, die or das) and pluralForm.\n\
         - examples: two or three German sentences with {meaning_language} translations \
           and an optional grammarNote.\n\
         - forms: if the word is a verb, exactly 4 forms in this order: {forms}, each with \
           a German context sentence. Otherwise the most useful declension forms.\n\
         - phrases: common collocations.\n\
         - usageNotes: a short grammar tip.\n\
         - distractors: exactly 3 plausible but wrong {meaning_language} meanings, each \
           with an English imageKeyword.\n\
         - correctImageKeyword: an English keyword for an illustration of the word.",
        forms = VERB_FORM_LABELS.join(", "),
    )
}
