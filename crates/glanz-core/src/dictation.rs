use glanz_types::Feedback;

const MASK: char = '_';

/// Case- and surrounding-whitespace-insensitive spelling check
pub fn is_match(target: &str, input: &str) -> bool {
    normalize(target) == normalize(input)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// First character shown, every other non-space character masked
pub fn mask_hint(lemma: &str) -> String {
    lemma
        .trim()
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i == 0 || c.is_whitespace() {
                c
            } else {
                MASK
            }
        })
        .collect()
}

/// Transient input state of the spelling screen
#[derive(Debug, Clone, Default)]
pub struct DictationSession {
    input: String,
    feedback: Option<Feedback>,
    hint_visible: bool,
}

impl DictationSession {
    pub fn submit(&mut self, target: &str, input: &str) -> Feedback {
        self.input = input.to_string();
        let feedback = if is_match(target, input) {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        };
        self.feedback = Some(feedback);
        feedback
    }

    pub fn toggle_hint(&mut self) {
        self.hint_visible = !self.hint_visible;
    }

    pub fn hint(&self, lemma: &str) -> Option<String> {
        self.hint_visible.then(|| mask_hint(lemma))
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn is_solved(&self) -> bool {
        self.feedback == Some(Feedback::Correct)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_ignores_case_and_surrounding_space() {
        assert!(is_match("Haus", "  Haus "));
        assert!(is_match("Haus", "haus"));
        assert!(is_match("Straße", "STRAßE"));
        assert!(!is_match("Haus", "Hauss"));
        assert!(!is_match("Haus", "Ha us"));
    }

    #[test]
    fn no_diacritic_folding() {
        assert!(!is_match("Bäume", "Baume"));
        assert!(!is_match("Straße", "Strasse"));
    }

    #[test]
    fn hint_masks_letters_and_keeps_spaces() {
        assert_eq!(mask_hint("Haus"), "H___");
        assert_eq!(mask_hint("Guten Tag"), "G____ ___");
        assert_eq!(mask_hint(" Öl "), "Ö_");
        assert_eq!(mask_hint(""), "");
    }

    #[test]
    fn session_tracks_feedback_and_hint() {
        let mut session = DictationSession::default();
        assert_eq!(session.hint("Baum"), None);

        assert_eq!(session.submit("Baum", "Baun"), Feedback::Incorrect);
        assert!(!session.is_solved());
        assert_eq!(session.input(), "Baun");

        session.toggle_hint();
        assert_eq!(session.hint("Baum").as_deref(), Some("B___"));

        assert_eq!(session.submit("Baum", "baum"), Feedback::Correct);
        assert!(session.is_solved());

        session.reset();
        assert_eq!(session.feedback(), None);
        assert_eq!(session.input(), "");
        assert_eq!(session.hint("Baum"), None);
    }
}
