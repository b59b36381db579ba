use unicode_normalization::UnicodeNormalization;

const EDGE_PUNCTUATION: &[char] = &[
    ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']', '„', '“', '”', '«', '»', '•',
];

pub trait Preprocessor {
    /// Default candidate cleanup: NFC, trimmed, edge punctuation removed,
    /// inner whitespace collapsed.
    ///
    /// Hyphens are kept so affixes like "-chen" survive. A trailing period is
    /// dropped only from tokens without another period, so "z.B." stays intact
    /// while "Haus." becomes "Haus" (and "usw." becomes "usw").
    fn process(&self, text: &str) -> String {
        let text: String = text.nfc().collect();
        let text = text.trim().trim_matches(EDGE_PUNCTUATION).trim();
        let text = match text.strip_suffix('.') {
            Some(rest) if !rest.contains('.') => rest.trim_end_matches(EDGE_PUNCTUATION),
            _ => text,
        };

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct CandidatePreprocessor;
impl Preprocessor for CandidatePreprocessor {}

/// Clean model-extracted candidates, dropping blanks but keeping duplicates
pub fn clean_candidates(raw: Vec<String>) -> Vec<String> {
    raw.iter()
        .map(|c| CandidatePreprocessor.process(c))
        .filter(|c| !c.is_empty())
        .collect()
}

/// Words typed into the manual-add field, separated by commas, semicolons or newlines
pub fn split_manual_input(text: &str) -> Vec<String> {
    clean_candidates(
        text.split([',', ';', '\n'])
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_decomposed_umlauts() {
        let decomposed = "Ba\u{0308}ume";
        assert_eq!(CandidatePreprocessor.process(decomposed), "Bäume");
    }

    #[test]
    fn strips_edge_punctuation_and_blanks() {
        let raw = vec![
            " „Haus“, ".to_string(),
            "  ".to_string(),
            "Guten   Tag!".to_string(),
            "Haus".to_string(),
        ];
        assert_eq!(clean_candidates(raw), ["Haus", "Guten Tag", "Haus"]);
    }

    #[test]
    fn keeps_abbreviations_and_affixes() {
        assert_eq!(CandidatePreprocessor.process("z.B."), "z.B.");
        assert_eq!(CandidatePreprocessor.process("„d.h.“"), "d.h.");
        assert_eq!(CandidatePreprocessor.process("-chen"), "-chen");
        assert_eq!(CandidatePreprocessor.process("Kinder-"), "Kinder-");
        assert_eq!(CandidatePreprocessor.process("Haus."), "Haus");
        assert_eq!(CandidatePreprocessor.process("\"Baum.\""), "Baum");
    }

    #[test]
    fn manual_input_splits_on_separators() {
        assert_eq!(split_manual_input("Haus, Baum;\nHund"), ["Haus", "Baum", "Hund"]);
        assert!(split_manual_input("   ").is_empty());
        assert!(split_manual_input(" , ;").is_empty());
    }
}
