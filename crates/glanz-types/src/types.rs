use std::path::PathBuf;

use crate::word::WordRecord;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// User intent coming from the UI
    Command(UiCommand),
    /// A delayed action whose time has come; stale generations are dropped
    FollowUp {
        follow_up: FollowUp,
        generation: u64,
    },
    ImportFinished {
        records: Vec<WordRecord>,
    },
    ImportAborted {
        message: String,
    },
    HandwritingRecognized {
        text: String,
    },
    Render(View),
    Notice(Notice),
    Loading {
        status: String,
        busy: bool,
    },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    StartQuiz,
    SelectOption(usize),
    NextWord,
    EnterDictation,
    BackToCard,
    SubmitSpelling(String),
    SubmitHandwriting(PathBuf),
    ToggleHint,
    Replay,
    OpenDictation,
    OpenReview,
    GoHome,
    Import(ImportSource),
    UpdateNotes { position: usize, text: String },
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    Manual(String),
    Photo(PathBuf),
    Document(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    Speak(String),
    AdvanceAfterDictation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Question,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Learning(QuizPhase),
    Dictation,
    Review,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub meaning: String,
    pub image_keyword: String,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

/// Snapshot of one screen, ready to be drawn
#[derive(Debug, Clone)]
pub enum View {
    Home {
        word_count: usize,
    },
    Question {
        position: usize,
        total: usize,
        lemma: String,
        options: Vec<QuizOption>,
    },
    Result {
        position: usize,
        total: usize,
        word: WordRecord,
        answered_correctly: Option<bool>,
        has_next: bool,
    },
    Dictation {
        position: usize,
        total: usize,
        input: String,
        feedback: Option<Feedback>,
        hint: Option<String>,
    },
    Review {
        words: Vec<WordRecord>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}
