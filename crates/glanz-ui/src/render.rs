use std::fmt::Write;

use glanz_config::ui::UiConfig;
use glanz_lang_german::{form_label, headword};
use glanz_types::{Feedback, Notice, QuizOption, View, WordRecord};

/// Draw one screen as plain text
pub fn render(view: &View, config: &UiConfig) -> String {
    let mut out = String::new();

    match view {
        View::Home { word_count } => {
            let _ = writeln!(out, "=== DeutschGlanz ===");
            if *word_count == 0 {
                let _ = writeln!(out, "Your library is empty.");
                let _ = writeln!(out, "Add words with 'add', 'scan <image>' or 'upload <file>'.");
            } else {
                let _ = writeln!(out, "{} words in your library.", word_count);
                let _ = writeln!(out, "'quiz' to learn, 'dictation' to practise spelling, 'review' to browse.");
            }
        }
        View::Question {
            position,
            total,
            lemma,
            options,
        } => {
            let _ = writeln!(out, "[{}/{}] {}", position, total, lemma);
            let _ = writeln!(out, "What does it mean?");
            for (i, option) in options.iter().enumerate() {
                let _ = writeln!(out, "  {}) {}", i + 1, option_line(option, config));
            }
        }
        View::Result {
            position,
            total,
            word,
            answered_correctly,
            has_next,
        } => {
            match answered_correctly {
                Some(true) => {
                    let _ = writeln!(out, "Richtig!");
                }
                Some(false) => {
                    let _ = writeln!(out, "Leider falsch.");
                }
                None => {}
            }
            let _ = writeln!(out, "[{}/{}]", position, total);
            card(&mut out, word, config);
            let next = if *has_next { "'next' for the next word" } else { "'next' to finish" };
            let _ = writeln!(out, "{}, 'spell' to practise spelling.", next);
        }
        View::Dictation {
            position,
            total,
            input,
            feedback,
            hint,
        } => {
            let _ = writeln!(out, "[{}/{}] Dictation: listen and type the word.", position, total);
            if let Some(hint) = hint {
                let _ = writeln!(out, "Hint: {}", hint);
            }
            if !input.is_empty() {
                let _ = writeln!(out, "You typed: {}", input);
            }
            match feedback {
                Some(Feedback::Correct) => {
                    let _ = writeln!(out, "Correct! Moving on...");
                }
                Some(Feedback::Incorrect) => {
                    let _ = writeln!(out, "Not quite, try again ('hint', 'replay').");
                }
                None => {}
            }
        }
        View::Review { words } => {
            if words.is_empty() {
                let _ = writeln!(out, "Nothing to review yet.");
            } else {
                let _ = writeln!(out, "=== Library ({} words) ===", words.len());
                for (i, word) in words.iter().enumerate() {
                    let _ = writeln!(out, "{:>3}. {}: {}", i + 1, headword(word), word.meaning);
                    if let Some(notes) = &word.user_notes {
                        let _ = writeln!(out, "     note: {}", notes);
                    }
                }
                let _ = writeln!(out, "'quiz' to start, 'note <n> <text>' to annotate.");
            }
        }
    }

    out
}

fn option_line(option: &QuizOption, config: &UiConfig) -> String {
    if config.show_images && !option.image_keyword.trim().is_empty() {
        format!("{}  <{}>", option.meaning, config.image_url(&option.image_keyword))
    } else {
        option.meaning.clone()
    }
}

fn card(out: &mut String, word: &WordRecord, config: &UiConfig) {
    let _ = writeln!(out, "{}  ({})", headword(word), word.part_of_speech);
    let _ = writeln!(out, "  {}", word.meaning);
    if config.show_images && !word.correct_image_keyword.trim().is_empty() {
        let _ = writeln!(out, "  <{}>", config.image_url(&word.correct_image_keyword));
    }

    if !word.examples.is_empty() {
        let _ = writeln!(out, "Examples:");
        for example in &word.examples {
            let _ = writeln!(out, "  - {}", example.source_sentence);
            let _ = writeln!(out, "    {}", example.translated_sentence);
            if let Some(note) = &example.grammar_note {
                let _ = writeln!(out, "    ({})", note);
            }
        }
    }

    if !word.forms.is_empty() {
        let _ = writeln!(out, "Forms:");
        let kind = word.kind();
        for (i, form) in word.forms.iter().enumerate() {
            match form_label(kind, i) {
                Some(label) => {
                    let _ = writeln!(out, "  {}: {}", label, form.form);
                }
                None => {
                    let _ = writeln!(out, "  {}", form.form);
                }
            }
            if !form.context_sentence.trim().is_empty() {
                let _ = writeln!(out, "    {}", form.context_sentence);
            }
        }
    }

    if !word.phrases.is_empty() {
        let _ = writeln!(out, "Phrases: {}", word.phrases.join(" · "));
    }
    if let Some(notes) = &word.usage_notes {
        let _ = writeln!(out, "Tip: {}", notes);
    }
    if let Some(notes) = &word.user_notes {
        let _ = writeln!(out, "My notes: {}", notes);
    }
}

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Info(text) => text.clone(),
        Notice::Warning(text) => format!("Warning: {}", text),
        Notice::Error(text) => format!("Error: {}", text),
    }
}
