//! One game session: settings, the current round, and the keyboard colours.
//!
//! Front ends translate keystrokes into [`Input`] and feed them, together
//! with the replies the [`ServiceWorker`] posts, through [`Session::handle`].
//! Everything happens on the caller's thread; the only waiting is for the
//! word fetch and the word check, whose results arrive as events.

use crate::error::GameError;
use crate::evaluator::Evaluation;
use crate::game_state::{CursorMove, GameRound, Phase};
use crate::i18n::Catalog;
use crate::keyboard::KeyboardState;
use crate::services::ServiceWorker;
use crate::settings::{Difficulty, GameSettings, is_supported_language, is_valid_word_length};
use crate::{debug_log, info_log};
use std::io;
use std::sync::mpsc::Receiver;

/// A single user action, already decoded from whatever device produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Letter(char),
    Backspace,
    Delete,
    Move(CursorMove),
    Submit,
    Paste(String),
    NewWord,
    SetLanguage(String),
    SetWordLength(usize),
    SetDifficulty(Difficulty),
    Dismiss,
}

/// Everything the session reacts to.
#[derive(Debug)]
pub enum GameEvent {
    Input(Input),
    WordFetched {
        generation: u64,
        result: Result<String, GameError>,
    },
    WordChecked {
        generation: u64,
        guess: String,
        result: Result<bool, GameError>,
    },
}

/// A front end that drives a session until the player quits.
pub trait GameInterface {
    fn run(
        &mut self,
        session: &mut Session,
        events: &Receiver<GameEvent>,
        catalog: &Catalog,
    ) -> io::Result<()>;
}

/// Session-level view of where the game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingWord,
    Collecting,
    Validating,
    Won,
    Lost,
}

impl From<Phase> for GamePhase {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Collecting => Self::Collecting,
            Phase::Validating => Self::Validating,
            Phase::Won => Self::Won,
            Phase::Lost => Self::Lost,
        }
    }
}

/// A message that blocks play until the player dismisses it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    WordNotFound(String),
}

pub struct Session {
    settings: GameSettings,
    round: Option<GameRound>,
    keyboard: KeyboardState,
    worker: ServiceWorker,
    generation: u64,
    loading: bool,
    notice: Option<Notice>,
    last_error: Option<GameError>,
    last_evaluation: Option<Evaluation>,
}

impl Session {
    pub fn new(settings: GameSettings, worker: ServiceWorker) -> Self {
        Self {
            settings,
            round: None,
            keyboard: KeyboardState::new(),
            worker,
            generation: 0,
            loading: false,
            notice: None,
            last_error: None,
            last_evaluation: None,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn round(&self) -> Option<&GameRound> {
        self.round.as_ref()
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn phase(&self) -> GamePhase {
        self.round
            .as_ref()
            .map_or(GamePhase::AwaitingWord, |round| round.phase().into())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while a service reply is outstanding.
    pub fn is_busy(&self) -> bool {
        self.loading || self.phase() == GamePhase::Validating
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Most recent fetch failure, kept for the status line until the next fetch.
    pub fn last_error(&self) -> Option<&GameError> {
        self.last_error.as_ref()
    }

    pub fn last_evaluation(&self) -> Option<&Evaluation> {
        self.last_evaluation.as_ref()
    }

    /// Processes one event. Invalid input is absorbed here and never
    /// reaches the player.
    pub fn handle(&mut self, event: GameEvent) {
        let outcome = match event {
            GameEvent::Input(input) => self.apply_input(input),
            GameEvent::WordFetched { generation, result } => {
                self.on_word_fetched(generation, result);
                Ok(())
            }
            GameEvent::WordChecked {
                generation,
                guess,
                result,
            } => {
                self.on_word_checked(generation, &guess, result);
                Ok(())
            }
        };
        if let Err(err) = outcome {
            debug_log!("handle() - ignored: {err}");
        }
    }

    fn apply_input(&mut self, input: Input) -> Result<(), GameError> {
        // Starting over or changing settings closes the notice along with the round.
        let starts_over = matches!(
            input,
            Input::NewWord
                | Input::SetLanguage(_)
                | Input::SetWordLength(_)
                | Input::SetDifficulty(_)
        );
        if self.notice.is_some() && !starts_over {
            if input == Input::Dismiss {
                self.notice = None;
                return Ok(());
            }
            return Err(GameError::InvalidInput("a notice must be dismissed first"));
        }
        match input {
            Input::Letter(c) => self.round_mut()?.type_letter(c),
            Input::Backspace => self.round_mut()?.erase(),
            Input::Delete => self.round_mut()?.erase_forward(),
            Input::Move(direction) => self.round_mut()?.move_cursor(direction),
            Input::Submit => self.submit_guess(),
            Input::Paste(_) => Err(GameError::InvalidInput("pasting is not allowed")),
            Input::NewWord => {
                self.request_new_word();
                Ok(())
            }
            Input::SetLanguage(language) => self.set_language(&language),
            Input::SetWordLength(length) => self.set_word_length(length),
            Input::SetDifficulty(difficulty) => {
                self.set_difficulty(difficulty);
                Ok(())
            }
            Input::Dismiss => Err(GameError::InvalidInput("no notice to dismiss")),
        }
    }

    fn round_mut(&mut self) -> Result<&mut GameRound, GameError> {
        self.round
            .as_mut()
            .ok_or(GameError::InvalidInput("no word has been generated yet"))
    }

    /// Throws the current round away and asks for a fresh word.
    pub fn request_new_word(&mut self) {
        self.discard_round();
        self.loading = true;
        self.last_error = None;
        self.worker.fetch_word(
            self.generation,
            &self.settings.language,
            self.settings.word_length,
        );
    }

    pub fn set_language(&mut self, language: &str) -> Result<(), GameError> {
        let language = language.trim().to_lowercase();
        if !is_supported_language(&language) {
            return Err(GameError::InvalidInput("unsupported language"));
        }
        self.settings.language = language;
        self.discard_round();
        Ok(())
    }

    pub fn set_word_length(&mut self, length: usize) -> Result<(), GameError> {
        if !is_valid_word_length(length) {
            return Err(GameError::InvalidInput("word length must be between 3 and 8"));
        }
        self.settings.word_length = length;
        self.discard_round();
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        self.discard_round();
    }

    fn discard_round(&mut self) {
        // Replies still in flight belong to the old generation and are dropped.
        self.generation += 1;
        self.round = None;
        self.loading = false;
        self.notice = None;
        self.last_evaluation = None;
        self.keyboard.reset();
        info_log!("discard_round() - now at generation {}", self.generation);
    }

    fn submit_guess(&mut self) -> Result<(), GameError> {
        let generation = self.generation;
        let language = self.settings.language.clone();
        let guess = self.round_mut()?.submit()?;
        info_log!("submit_guess() - validating '{guess}'");
        self.worker.check_word(generation, &guess, &language);
        Ok(())
    }

    fn on_word_fetched(&mut self, generation: u64, result: Result<String, GameError>) {
        if generation != self.generation || !self.loading {
            debug_log!("on_word_fetched() - stale reply for generation {generation}");
            return;
        }
        self.loading = false;
        let round = result.and_then(|word| {
            let round = GameRound::new(&word, self.settings.max_tries())?;
            if round.word_length() == self.settings.word_length {
                Ok(round)
            } else {
                Err(GameError::MalformedWord(word))
            }
        });
        match round {
            Ok(round) => {
                info_log!("on_word_fetched() - new round with {} rows", round.max_tries());
                self.round = Some(round);
            }
            Err(err) => {
                log::error!("could not start a round: {err}");
                self.last_error = Some(err);
            }
        }
    }

    fn on_word_checked(&mut self, generation: u64, guess: &str, result: Result<bool, GameError>) {
        if generation != self.generation {
            debug_log!("on_word_checked() - stale reply for '{guess}'");
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };
        let exists = match result {
            Ok(exists) => exists,
            Err(err) => {
                // Fails closed: the player only sees the generic notice.
                log::error!("validating '{guess}' failed: {err}");
                false
            }
        };
        if !exists {
            if round.reject_guess().is_ok() {
                info_log!("on_word_checked() - {}", GameError::WordNotFound(guess.to_string()));
                self.notice = Some(Notice::WordNotFound(guess.to_string()));
            }
            return;
        }
        match round.accept_guess() {
            Ok(evaluation) => {
                self.keyboard.record(&evaluation);
                info_log!(
                    "on_word_checked() - '{guess}' scored {}, phase {:?}",
                    evaluation.pattern(),
                    round.phase()
                );
                self.last_evaluation = Some(evaluation);
            }
            Err(err) => debug_log!("on_word_checked() - {err}"),
        }
    }
}
