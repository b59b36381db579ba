use std::path::PathBuf;

use glanz_types::{ImportSource, UiCommand};

pub const HELP: &str = "\
Commands:
  quiz                 start the quiz from the first word
  pick <n>             choose answer n
  next                 next word
  spell                dictation for the current word
  type <text>          submit a spelling
  write <image>        submit a photo of handwriting
  hint                 show or hide the hint
  replay               say the word again
  back                 back to the word card
  dictation            dictation drill from the first word
  review               list the library
  home                 home screen
  add <w1, w2, ...>    add words by hand
  scan <image>         extract words from a photo
  upload <file>        extract words from a document
  note <n> <text>      set the note of word n (empty text clears it)
  help                 this list
  quit                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(UiCommand),
    Help,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    Usage(&'static str),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Unknown(word) => write!(f, "Unknown command '{}', try 'help'", word),
            CommandError::Usage(usage) => write!(f, "Usage: {}", usage),
        }
    }
}

fn number(arg: &str, usage: &'static str) -> Result<usize, CommandError> {
    arg.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or(CommandError::Usage(usage))
}

fn path(arg: &str, usage: &'static str) -> Result<PathBuf, CommandError> {
    let arg = arg.trim().trim_matches('"');
    if arg.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok(PathBuf::from(arg))
}

/// Parse one line of terminal input
pub fn parse_command(line: &str) -> Result<Input, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Blank);
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_lowercase().as_str() {
        "help" | "?" => return Ok(Input::Help),
        "quiz" | "start" => UiCommand::StartQuiz,
        "pick" => UiCommand::SelectOption(number(rest, "pick <n>")? - 1),
        "next" => UiCommand::NextWord,
        "spell" => UiCommand::EnterDictation,
        // An empty submission is still a wrong answer
        "type" => UiCommand::SubmitSpelling(rest.to_string()),
        "write" => UiCommand::SubmitHandwriting(path(rest, "write <image>")?),
        "hint" => UiCommand::ToggleHint,
        "replay" | "say" => UiCommand::Replay,
        "back" => UiCommand::BackToCard,
        "dictation" => UiCommand::OpenDictation,
        "review" | "list" => UiCommand::OpenReview,
        "home" => UiCommand::GoHome,
        "add" => UiCommand::Import(ImportSource::Manual(rest.to_string())),
        "scan" => UiCommand::Import(ImportSource::Photo(path(rest, "scan <image>")?)),
        "upload" => UiCommand::Import(ImportSource::Document(path(rest, "upload <file>")?)),
        "note" => {
            let (n, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            UiCommand::UpdateNotes {
                position: number(n, "note <n> <text>")?,
                text: text.trim().to_string(),
            }
        }
        "quit" | "exit" | "q" => UiCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Input::Command(command))
}
