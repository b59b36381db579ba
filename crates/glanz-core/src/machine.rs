//! Screen-level state machine of a study session.
//!
//! The machine is pure: it takes the current word list with every action and
//! returns side effects (speech, delayed follow-ups) as data. The caller owns
//! timers and cancels pending follow-ups whenever [`StateMachine::lifetime`]
//! changes.

use std::time::Duration;

use glanz_config::session::SessionConfig;
use glanz_types::{Feedback, FollowUp, QuizPhase, Screen, View, WordRecord};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::dictation::DictationSession;
use crate::quiz::QuizSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    StartQuiz,
    SelectOption(usize),
    NextWord,
    EnterDictation,
    BackToCard,
    SubmitSpelling(String),
    ToggleHint,
    Replay,
    AdvanceAfterDictation,
    OpenDictation,
    OpenReview,
    ImportCompleted,
    GoHome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Speak right away
    Speak(String),
    /// Deliver a follow-up after a delay unless the lifetime changes first
    Schedule { follow_up: FollowUp, delay: Duration },
}

#[derive(Debug, Clone, Copy)]
pub struct Timing {
    pub speech_delay: Duration,
    pub celebration_delay: Duration,
}

impl From<&SessionConfig> for Timing {
    fn from(config: &SessionConfig) -> Self {
        Self {
            speech_delay: config.speech_delay(),
            celebration_delay: config.celebration_delay(),
        }
    }
}

/// Identity of what is on screen; pending follow-ups die with it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetime {
    pub screen: Screen,
    pub index: usize,
}

pub struct StateMachine {
    screen: Screen,
    index: usize,
    quiz: Option<QuizSession>,
    answer: Option<bool>,
    dictation: DictationSession,
    timing: Timing,
    rng: Box<dyn RngCore + Send + Sync>,
}

impl StateMachine {
    pub fn new(timing: Timing) -> Self {
        Self::with_rng(timing, Box::new(StdRng::from_entropy()))
    }

    pub fn with_rng(timing: Timing, rng: Box<dyn RngCore + Send + Sync>) -> Self {
        Self {
            screen: Screen::Home,
            index: 0,
            quiz: None,
            answer: None,
            dictation: DictationSession::default(),
            timing,
            rng,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    pub fn dictation(&self) -> &DictationSession {
        &self.dictation
    }

    pub fn lifetime(&self) -> Lifetime {
        Lifetime {
            screen: self.screen,
            index: self.index,
        }
    }

    pub fn current_word<'a>(&self, words: &'a [WordRecord]) -> Option<&'a WordRecord> {
        words.get(self.index)
    }

    pub fn apply(&mut self, action: Action, words: &[WordRecord]) -> Vec<Effect> {
        tracing::debug!("{:?} on {:?} (index {})", action, self.screen, self.index);

        match (action, self.screen) {
            (Action::GoHome, _) => {
                self.go_home();
                vec![]
            }
            (Action::OpenReview | Action::ImportCompleted, _) => {
                self.reset_session();
                self.screen = Screen::Review;
                vec![]
            }
            (Action::StartQuiz, Screen::Home | Screen::Review) => {
                if words.is_empty() {
                    tracing::debug!("Start ignored: library is empty");
                    return vec![];
                }
                self.enter_question(0, words)
            }
            (Action::OpenDictation, Screen::Home | Screen::Review) => {
                if words.is_empty() {
                    return vec![];
                }
                if self.index >= words.len() {
                    self.index = 0;
                }
                self.quiz = None;
                self.answer = None;
                self.dictation.reset();
                self.screen = Screen::Dictation;
                self.speak_current(words)
            }
            (Action::SelectOption(choice), Screen::Learning(QuizPhase::Question)) => {
                let Some(correct) = self.quiz.as_ref().and_then(|q| q.select(choice)) else {
                    return vec![];
                };
                self.answer = Some(correct);
                self.screen = Screen::Learning(QuizPhase::Result);
                vec![]
            }
            (Action::NextWord, Screen::Learning(QuizPhase::Result)) => self.advance(words),
            (Action::EnterDictation, Screen::Learning(QuizPhase::Result)) => {
                self.screen = Screen::Dictation;
                let mut effects = self.speak_current(words);
                // Leaving the screen cancelled the pending advance of a solved word
                if self.dictation.is_solved() {
                    effects.push(Effect::Schedule {
                        follow_up: FollowUp::AdvanceAfterDictation,
                        delay: self.timing.celebration_delay,
                    });
                }
                effects
            }
            (Action::BackToCard, Screen::Dictation) => {
                self.screen = Screen::Learning(QuizPhase::Result);
                vec![]
            }
            (Action::SubmitSpelling(input), Screen::Dictation) => {
                if self.dictation.is_solved() {
                    return vec![];
                }
                let Some(word) = self.current_word(words) else {
                    return vec![];
                };
                match self.dictation.submit(&word.lemma, &input) {
                    Feedback::Correct => vec![Effect::Schedule {
                        follow_up: FollowUp::AdvanceAfterDictation,
                        delay: self.timing.celebration_delay,
                    }],
                    Feedback::Incorrect => vec![],
                }
            }
            (Action::ToggleHint, Screen::Dictation) => {
                self.dictation.toggle_hint();
                vec![]
            }
            (Action::AdvanceAfterDictation, Screen::Dictation) if self.dictation.is_solved() => {
                self.advance(words)
            }
            (Action::Replay, Screen::Learning(_) | Screen::Dictation) => self.speak_current(words),
            (action, screen) => {
                tracing::debug!("Ignoring {:?} on {:?}", action, screen);
                vec![]
            }
        }
    }

    /// Next question, or home after the last word
    fn advance(&mut self, words: &[WordRecord]) -> Vec<Effect> {
        let next = self.index + 1;
        if next < words.len() {
            self.enter_question(next, words)
        } else {
            tracing::info!("Finished all {} words", words.len());
            self.go_home();
            vec![]
        }
    }

    fn enter_question(&mut self, index: usize, words: &[WordRecord]) -> Vec<Effect> {
        let Some(word) = words.get(index) else {
            return vec![];
        };

        self.index = index;
        self.quiz = Some(QuizSession::new(word, &mut *self.rng));
        self.answer = None;
        self.dictation.reset();
        self.screen = Screen::Learning(QuizPhase::Question);

        vec![Effect::Schedule {
            follow_up: FollowUp::Speak(word.lemma.clone()),
            delay: self.timing.speech_delay,
        }]
    }

    fn speak_current(&self, words: &[WordRecord]) -> Vec<Effect> {
        self.current_word(words)
            .map(|w| vec![Effect::Speak(w.lemma.clone())])
            .unwrap_or_default()
    }

    fn go_home(&mut self) {
        self.reset_session();
        self.screen = Screen::Home;
    }

    fn reset_session(&mut self) {
        self.index = 0;
        self.quiz = None;
        self.answer = None;
        self.dictation.reset();
    }

    /// Snapshot of the current screen
    pub fn view(&self, words: &[WordRecord]) -> View {
        let total = words.len();
        let position = self.index + 1;
        let word = self.current_word(words);

        match (self.screen, word) {
            (Screen::Learning(QuizPhase::Question), Some(word)) => View::Question {
                position,
                total,
                lemma: word.lemma.clone(),
                options: self
                    .quiz
                    .as_ref()
                    .map(|q| q.options().to_vec())
                    .unwrap_or_default(),
            },
            (Screen::Learning(QuizPhase::Result), Some(word)) => View::Result {
                position,
                total,
                word: word.clone(),
                answered_correctly: self.answer,
                has_next: position < total,
            },
            (Screen::Dictation, Some(word)) => View::Dictation {
                position,
                total,
                input: self.dictation.input().to_string(),
                feedback: self.dictation.feedback(),
                hint: self.dictation.hint(&word.lemma),
            },
            (Screen::Review, _) => View::Review {
                words: words.to_vec(),
            },
            _ => View::Home { word_count: total },
        }
    }
}
