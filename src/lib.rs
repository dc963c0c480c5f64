// Library interface for polyglot-wordle
// The binary and the integration tests both build on these modules.

pub mod cli;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod game_state;
pub mod http;
pub mod i18n;
pub mod keyboard;
pub mod logging;
pub mod services;
pub mod session;
pub mod settings;
pub mod tui;

// Re-export commonly used items for easier testing
pub use error::GameError;
pub use evaluator::{Classification, Evaluation, evaluate, evaluate_str};
pub use game_state::{GameRound, GuessRow, Phase};
pub use keyboard::KeyboardState;
pub use services::{ServiceWorker, WordSource, WordValidator};
pub use session::{GameEvent, GameInterface, GamePhase, Input, Notice, Session};
pub use settings::{Difficulty, GameSettings};
