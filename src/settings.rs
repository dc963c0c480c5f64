use crate::error::GameError;
use clap::ValueEnum;
use std::fmt;

/// Languages the word source and the dictionary both understand.
pub const SUPPORTED_LANGUAGES: [&str; 7] = ["en", "es", "fr", "de", "it", "zh", "pt-br"];

pub const MIN_WORD_LENGTH: usize = 3;
pub const MAX_WORD_LENGTH: usize = 8;

/// Difficulty tier; only decides how many rows a round gets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn max_tries(self) -> usize {
        match self {
            Self::Easy => 8,
            Self::Medium => 5,
            Self::Hard => 3,
        }
    }

    /// Name used in the `difficulty-levels.*` translation keys.
    pub fn key(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub fn is_supported_language(language: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language)
}

pub fn is_valid_word_length(length: usize) -> bool {
    (MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&length)
}

/// Player-selectable options that shape the next round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub language: String,
    pub word_length: usize,
    pub difficulty: Difficulty,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            word_length: MIN_WORD_LENGTH,
            difficulty: Difficulty::Easy,
        }
    }
}

impl GameSettings {
    /// Builds settings, rejecting languages and lengths the game cannot serve.
    pub fn new(language: &str, word_length: usize, difficulty: Difficulty) -> Result<Self, GameError> {
        let language = language.trim().to_lowercase();
        if !is_supported_language(&language) {
            return Err(GameError::InvalidInput("unsupported language"));
        }
        if !is_valid_word_length(word_length) {
            return Err(GameError::InvalidInput("word length must be between 3 and 8"));
        }
        Ok(Self {
            language,
            word_length,
            difficulty,
        })
    }

    pub fn max_tries(&self) -> usize {
        self.difficulty.max_tries()
    }

    /// Language after `self.language` in [`SUPPORTED_LANGUAGES`], wrapping.
    pub fn next_language(&self) -> &'static str {
        let idx = SUPPORTED_LANGUAGES
            .iter()
            .position(|&l| l == self.language)
            .map_or(0, |i| (i + 1) % SUPPORTED_LANGUAGES.len());
        SUPPORTED_LANGUAGES[idx]
    }

    pub fn next_word_length(&self) -> usize {
        if self.word_length >= MAX_WORD_LENGTH {
            MIN_WORD_LENGTH
        } else {
            self.word_length + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_difficulty_tries() {
        assert_eq!(Difficulty::Easy.max_tries(), 8);
        assert_eq!(Difficulty::Medium.max_tries(), 5);
        assert_eq!(Difficulty::Hard.max_tries(), 3);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn test_defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.language, "en");
        assert_eq!(settings.word_length, 3);
        assert_eq!(settings.max_tries(), 8);
    }

    #[test]
    fn test_new_normalizes_language() {
        let settings = GameSettings::new(" PT-BR ", 5, Difficulty::Hard).unwrap();
        assert_eq!(settings.language, "pt-br");
        assert_eq!(settings.max_tries(), 3);
    }

    #[test]
    fn test_new_rejects_bad_values() {
        assert_matches!(
            GameSettings::new("xx", 5, Difficulty::Easy),
            Err(GameError::InvalidInput(_))
        );
        assert_matches!(
            GameSettings::new("en", 2, Difficulty::Easy),
            Err(GameError::InvalidInput(_))
        );
        assert_matches!(
            GameSettings::new("en", 9, Difficulty::Easy),
            Err(GameError::InvalidInput(_))
        );
    }

    #[test]
    fn test_cycling() {
        let mut settings = GameSettings::default();
        assert_eq!(settings.next_language(), "es");
        settings.language = "pt-br".to_string();
        assert_eq!(settings.next_language(), "en");
        settings.word_length = 8;
        assert_eq!(settings.next_word_length(), 3);
        settings.word_length = 4;
        assert_eq!(settings.next_word_length(), 5);
    }
}
