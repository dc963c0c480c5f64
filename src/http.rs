//! HTTP clients for the public random-word and dictionary APIs.

use crate::error::GameError;
use crate::info_log;
use crate::services::{WordSource, WordValidator};
use serde::Deserialize;

pub const DEFAULT_WORD_API: &str = "https://random-word-api.herokuapp.com/word";
pub const DEFAULT_DICTIONARY_API: &str = "https://api.dictionaryapi.dev/api/v2/entries";

const HTTP_NOT_FOUND: u16 = 404;

/// `GET {base}?length=N[&lang=xx]`, answering with `["word"]`.
#[derive(Clone)]
pub struct RandomWordApi {
    agent: ureq::Agent,
    base_url: String,
}

impl RandomWordApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// English is the API's default language and is requested without `lang`.
    pub fn url_for(&self, language: &str, length: usize) -> String {
        if language == "en" {
            format!("{}?length={length}", self.base_url)
        } else {
            format!("{}?length={length}&lang={language}", self.base_url)
        }
    }
}

impl WordSource for RandomWordApi {
    fn fetch_word(&self, language: &str, length: usize) -> Result<String, GameError> {
        let url = self.url_for(language, length);
        info_log!("RandomWordApi::fetch_word() - GET {url}");
        let words: Vec<String> = self.agent.get(&url).call()?.into_json()?;
        first_word(words)
    }
}

fn first_word(words: Vec<String>) -> Result<String, GameError> {
    words
        .into_iter()
        .next()
        .ok_or_else(|| GameError::NetworkFailure("word API returned an empty list".to_string()))
}

#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    word: Option<String>,
}

/// `GET {base}/{lang}/{word}`; 404 means the word does not exist.
#[derive(Clone)]
pub struct DictionaryApi {
    agent: ureq::Agent,
    base_url: String,
}

impl DictionaryApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, word: &str, language: &str) -> String {
        format!("{}/{language}/{}", self.base_url, word.to_lowercase())
    }
}

impl WordValidator for DictionaryApi {
    fn is_real_word(&self, word: &str, language: &str) -> Result<bool, GameError> {
        let url = self.url_for(word, language);
        info_log!("DictionaryApi::is_real_word() - GET {url}");
        match self.agent.get(&url).call() {
            Ok(response) => {
                let entries: Vec<DictionaryEntry> = response.into_json()?;
                Ok(entries_confirm(&entries, word))
            }
            Err(ureq::Error::Status(HTTP_NOT_FOUND, _)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// Several entries always count; a single one must spell the guess exactly.
fn entries_confirm(entries: &[DictionaryEntry], word: &str) -> bool {
    let lowered = word.to_lowercase();
    entries.len() > 1
        || entries
            .first()
            .and_then(|entry| entry.word.as_deref())
            .is_some_and(|w| w == lowered)
}
