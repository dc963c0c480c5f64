use crate::evaluator::Classification;
use crate::http::{DEFAULT_DICTIONARY_API, DEFAULT_WORD_API};
use crate::i18n::Catalog;
use crate::info_log;
use crate::session::{GameEvent, GameInterface, GamePhase, Input, Notice, Session};
use crate::settings::Difficulty;
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

/// Multi-language Wordle in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Language of the hidden word (en, es, fr, de, it, zh, pt-br)
    #[arg(short, long, default_value = "en")]
    pub language: String,

    /// Number of letters in the hidden word (3-8)
    #[arg(short = 'n', long, default_value_t = 3)]
    pub length: usize,

    /// easy = 8 tries, medium = 5, hard = 3
    #[arg(short, long, value_enum, default_value_t = Difficulty::Easy)]
    pub difficulty: Difficulty,

    /// Line-oriented mode instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Random word API endpoint
    #[arg(long, env = "WORDLE_WORD_API", default_value = DEFAULT_WORD_API)]
    pub word_api: String,

    /// Dictionary API endpoint
    #[arg(long, env = "WORDLE_DICTIONARY_API", default_value = DEFAULT_DICTIONARY_API)]
    pub dictionary_api: String,

    /// Where to write the log (defaults to the user cache directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// A line typed at the plain prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Exit,
    NewWord,
    Language(String),
    Length(usize),
    Difficulty(Difficulty),
    Guess(String),
    Empty,
    Invalid(&'static str),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or("").to_lowercase();
    let arg = parts.next();
    match (head.as_str(), arg) {
        ("", _) => Command::Empty,
        ("exit", None) => Command::Exit,
        ("next", None) => Command::NewWord,
        ("lang", Some(code)) => Command::Language(code.to_string()),
        ("length", Some(n)) => n
            .parse()
            .map_or(Command::Invalid("length must be a number"), Command::Length),
        ("difficulty", Some(tier)) => Difficulty::from_str(tier, true)
            .map_or(Command::Invalid("difficulty is easy, medium or hard"), Command::Difficulty),
        (_, None) => Command::Guess(line.to_string()),
        _ => Command::Invalid("unknown command"),
    }
}

/// Plain-text front end reading one command or guess per line.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn read_command(&mut self) -> io::Result<Option<Command>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(parse_command(&line)))
    }

    fn display_welcome(&mut self, session: &Session, catalog: &Catalog) -> io::Result<()> {
        let language = &session.settings().language;
        writeln!(self.writer, "{}", catalog.text(language, "title"))?;
        writeln!(self.writer, "{}", catalog.text(language, "instructions"))?;
        writeln!(
            self.writer,
            "Commands: next | lang <code> | length <3-8> | difficulty <easy|medium|hard> | exit"
        )
    }

    fn display_settings(&mut self, session: &Session, catalog: &Catalog) -> io::Result<()> {
        let settings = session.settings();
        let language = &settings.language;
        let tier = format!("difficulty-levels.{}", settings.difficulty.key());
        writeln!(
            self.writer,
            "{}: {} | {}: {} | {}: {}",
            catalog.text(language, "language"),
            language,
            catalog.text(language, "wordLength"),
            settings.word_length,
            catalog.text(language, "difficulty"),
            catalog.text(language, &tier),
        )
    }

    fn display_board(&mut self, session: &Session) -> io::Result<()> {
        let Some(round) = session.round() else {
            return Ok(());
        };
        for row in round.rows() {
            let letters: Vec<String> = row
                .cells()
                .iter()
                .map(|cell| cell.letter.unwrap_or('_').to_string())
                .collect();
            let pattern: String = row
                .cells()
                .iter()
                .map(|cell| cell.classification.map_or('?', Classification::to_char))
                .collect();
            writeln!(self.writer, "{}   {}", letters.join(" "), pattern)?;
        }
        let keys: Vec<String> = session
            .keyboard()
            .iter()
            .map(|(letter, state)| format!("{letter}:{}", state.to_char()))
            .collect();
        if !keys.is_empty() {
            writeln!(self.writer, "Keyboard: {}", keys.join(" "))?;
        }
        Ok(())
    }

    fn display_outcome(&mut self, session: &mut Session, catalog: &Catalog) -> io::Result<()> {
        let language = session.settings().language.clone();
        if let Some(Notice::WordNotFound(word)) = session.notice().cloned() {
            writeln!(self.writer, "{}: {word}", catalog.text(&language, "wordNotFound"))?;
            session.handle(GameEvent::Input(Input::Dismiss));
        }
        if let Some(err) = session.last_error() {
            writeln!(self.writer, "Could not get a word ({err}). Type 'next' to retry.")?;
        }
        match session.phase() {
            GamePhase::Won => writeln!(self.writer, "{}", catalog.text(&language, "win"))?,
            GamePhase::Lost => {
                let target = session.round().map(|r| r.target()).unwrap_or_default();
                writeln!(self.writer, "{} {target}", catalog.text(&language, "lose"))?;
            }
            GamePhase::Collecting => {
                if let Some(round) = session.round() {
                    writeln!(
                        self.writer,
                        "Guess {} of {} ({} letters):",
                        round.active_index() + 1,
                        round.max_tries(),
                        round.word_length()
                    )?;
                }
            }
            GamePhase::AwaitingWord | GamePhase::Validating => {}
        }
        Ok(())
    }

    fn enter_guess(&mut self, session: &mut Session, guess: &str) -> io::Result<()> {
        let Some(length) = session
            .round()
            .filter(|_| session.phase() == GamePhase::Collecting)
            .map(|r| r.word_length())
        else {
            return writeln!(self.writer, "No round in progress. Type 'next' for a new word.");
        };
        if guess.chars().count() != length {
            return writeln!(self.writer, "Invalid guess. Please enter {length} letters.");
        }
        for c in guess.chars() {
            session.handle(GameEvent::Input(Input::Letter(c)));
        }
        session.handle(GameEvent::Input(Input::Submit));
        if session.phase() == GamePhase::Collecting {
            // Not submitted: something in the line was not a letter. Start the row over.
            for _ in 0..length {
                session.handle(GameEvent::Input(Input::Backspace));
            }
            writeln!(self.writer, "Invalid guess. Please enter {length} letters.")?;
        }
        Ok(())
    }
}

/// Blocks until every outstanding service reply has been handled.
pub fn drain_replies(session: &mut Session, events: &Receiver<GameEvent>) {
    while session.is_busy() {
        match events.recv() {
            Ok(event) => session.handle(event),
            Err(_) => break,
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn run(
        &mut self,
        session: &mut Session,
        events: &Receiver<GameEvent>,
        catalog: &Catalog,
    ) -> io::Result<()> {
        self.display_welcome(session, catalog)?;
        self.display_settings(session, catalog)?;
        writeln!(self.writer, "Type 'next' to get a word.")?;
        while let Some(command) = self.read_command()? {
            info_log!("CliInterface::run() - command {:?}", command);
            match command {
                Command::Exit => {
                    writeln!(self.writer, "Exiting.")?;
                    break;
                }
                Command::Empty => continue,
                Command::Invalid(reason) => {
                    writeln!(self.writer, "Invalid command: {reason}.")?;
                    continue;
                }
                Command::NewWord => {
                    session.handle(GameEvent::Input(Input::NewWord));
                    writeln!(
                        self.writer,
                        "{}",
                        catalog.text(&session.settings().language, "loading")
                    )?;
                }
                Command::Language(code) => {
                    session.handle(GameEvent::Input(Input::SetLanguage(code)));
                    self.display_settings(session, catalog)?;
                }
                Command::Length(length) => {
                    session.handle(GameEvent::Input(Input::SetWordLength(length)));
                    self.display_settings(session, catalog)?;
                }
                Command::Difficulty(difficulty) => {
                    session.handle(GameEvent::Input(Input::SetDifficulty(difficulty)));
                    self.display_settings(session, catalog)?;
                }
                Command::Guess(guess) => self.enter_guess(session, &guess)?,
            }
            drain_replies(session, events);
            self.display_board(session)?;
            self.display_outcome(session, catalog)?;
        }
        self.writer.flush()
    }
}
