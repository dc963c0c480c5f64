use crate::cli::Cli;
use crate::error::GameError;
use crate::http::{DEFAULT_DICTIONARY_API, DEFAULT_WORD_API};
use crate::logging::default_log_path;
use crate::settings::GameSettings;
use std::path::PathBuf;

/// Validated start-up configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub settings: GameSettings,
    pub word_api: String,
    pub dictionary_api: String,
    pub log_file: PathBuf,
    pub plain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: GameSettings::default(),
            word_api: DEFAULT_WORD_API.to_string(),
            dictionary_api: DEFAULT_DICTIONARY_API.to_string(),
            log_file: default_log_path(),
            plain: false,
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, GameError> {
        let settings = GameSettings::new(&cli.language, cli.length, cli.difficulty)?;
        Ok(Self {
            settings,
            word_api: cli.word_api.clone(),
            dictionary_api: cli.dictionary_api.clone(),
            log_file: cli.log_file.clone().unwrap_or_else(default_log_path),
            plain: cli.plain,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use assert_matches::assert_matches;
    use clap::Parser;

    #[test]
    fn test_defaults_from_empty_command_line() {
        let cli = Cli::try_parse_from(["polyglot-wordle"]).unwrap();
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.settings, GameSettings::default());
        assert_eq!(config.word_api, DEFAULT_WORD_API);
        assert_eq!(config.dictionary_api, DEFAULT_DICTIONARY_API);
        assert!(!config.plain);
        assert_eq!(config.log_file, default_log_path());
    }

    #[test]
    fn test_flags_are_applied() {
        let cli = Cli::try_parse_from([
            "polyglot-wordle",
            "--language",
            "es",
            "--length",
            "6",
            "--difficulty",
            "hard",
            "--plain",
            "--log-file",
            "/tmp/w.log",
        ])
        .unwrap();
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.settings.language, "es");
        assert_eq!(config.settings.word_length, 6);
        assert_eq!(config.settings.difficulty, Difficulty::Hard);
        assert!(config.plain);
        assert_eq!(config.log_file, PathBuf::from("/tmp/w.log"));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let cli = Cli::try_parse_from(["polyglot-wordle", "--length", "12"]).unwrap();
        assert_matches!(Config::from_cli(&cli), Err(GameError::InvalidInput(_)));

        let cli = Cli::try_parse_from(["polyglot-wordle", "--language", "klingon"]).unwrap();
        assert_matches!(Config::from_cli(&cli), Err(GameError::InvalidInput(_)));
    }

    #[test]
    fn test_unknown_difficulty_fails_to_parse() {
        assert!(Cli::try_parse_from(["polyglot-wordle", "--difficulty", "nightmare"]).is_err());
    }
}
