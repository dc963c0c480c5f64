//! Remote collaborators and the worker that calls them off the UI loop.

use crate::error::GameError;
use crate::session::GameEvent;
use crate::{debug_log, info_log};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

/// Supplies random target words.
pub trait WordSource: Send + Sync {
    fn fetch_word(&self, language: &str, length: usize) -> Result<String, GameError>;
}

/// Decides whether a guess is a real word.
///
/// `Ok(false)` means the dictionary has no entry; `Err` means the question
/// could not be answered at all.
pub trait WordValidator: Send + Sync {
    fn is_real_word(&self, word: &str, language: &str) -> Result<bool, GameError>;
}

/// Runs service calls on short-lived threads and posts each result back as a
/// single [`GameEvent`] on the session's channel.
#[derive(Clone)]
pub struct ServiceWorker {
    source: Arc<dyn WordSource>,
    validator: Arc<dyn WordValidator>,
    events: Sender<GameEvent>,
}

impl ServiceWorker {
    /// Creates a worker and the receiving end the front end drains.
    pub fn new(
        source: Arc<dyn WordSource>,
        validator: Arc<dyn WordValidator>,
    ) -> (Self, Receiver<GameEvent>) {
        let (events, rx) = mpsc::channel();
        (
            Self {
                source,
                validator,
                events,
            },
            rx,
        )
    }

    pub fn fetch_word(&self, generation: u64, language: &str, length: usize) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let language = language.to_string();
        info_log!("fetch_word() - generation {generation}, {language}/{length}");
        thread::spawn(move || {
            let result = source.fetch_word(&language, length);
            if events.send(GameEvent::WordFetched { generation, result }).is_err() {
                debug_log!("fetch_word() - session gone, dropping reply");
            }
        });
    }

    pub fn check_word(&self, generation: u64, guess: &str, language: &str) {
        let validator = Arc::clone(&self.validator);
        let events = self.events.clone();
        let guess = guess.to_string();
        let language = language.to_string();
        info_log!("check_word() - generation {generation}, '{guess}' in {language}");
        thread::spawn(move || {
            let result = validator.is_real_word(&guess, &language);
            let reply = GameEvent::WordChecked {
                generation,
                guess,
                result,
            };
            if events.send(reply).is_err() {
                debug_log!("check_word() - session gone, dropping reply");
            }
        });
    }
}
