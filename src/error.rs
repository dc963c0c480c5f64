use std::error::Error;
use std::fmt;

/// Everything that can go wrong while playing a round.
///
/// Only `NetworkFailure` and `MalformedWord` ever reach the operator log;
/// `WordNotFound` becomes a notice for the player and `InvalidInput` is
/// absorbed by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A word fetch or validation request could not complete.
    NetworkFailure(String),
    /// The dictionary has no entry for the guessed word.
    WordNotFound(String),
    /// The action is not allowed in the current state.
    InvalidInput(&'static str),
    /// The word source returned something that cannot be a target word.
    MalformedWord(String),
    /// A localization key is missing from the embedded tables.
    MissingTranslation { language: String, key: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkFailure(reason) => write!(f, "network failure: {reason}"),
            Self::WordNotFound(word) => write!(f, "word does not exist: {word}"),
            Self::InvalidInput(reason) => write!(f, "invalid input: {reason}"),
            Self::MalformedWord(word) => write!(f, "word source returned an unusable word: {word:?}"),
            Self::MissingTranslation { language, key } => {
                write!(f, "no translation for '{key}' in locale '{language}'")
            }
        }
    }
}

impl Error for GameError {}

impl From<ureq::Error> for GameError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => {
                Self::NetworkFailure(format!("HTTP {code} from {}", response.get_url()))
            }
            ureq::Error::Transport(transport) => Self::NetworkFailure(transport.to_string()),
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::NetworkFailure(err.to_string())
    }
}
