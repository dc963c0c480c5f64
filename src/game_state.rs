//! Turn state machine for a single round.
//!
//! A round starts once a target word is known. From there it moves
//! `Collecting` → `Validating` → `Collecting` (guess rejected, row cleared)
//! or, once the guess is accepted and scored, on to the next row, `Won`, or
//! `Lost`. The two terminal phases accept no further input; the owner
//! replaces the round to play again.

use crate::error::GameError;
use crate::evaluator::{Classification, Evaluation, evaluate};

/// Uppercases `c` if it is a letter with a single-character uppercase form.
pub fn normalize_letter(c: char) -> Option<char> {
    if !c.is_alphabetic() {
        return None;
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

/// Uppercases a whole word, failing on anything that is not a letter.
pub fn normalize_word(word: &str) -> Option<Vec<char>> {
    word.trim().chars().map(normalize_letter).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Collecting,
    Validating,
    Won,
    Lost,
}

impl Phase {
    pub fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub letter: Option<char>,
    pub classification: Option<Classification>,
}

/// One row of the board: `L` cells, classified once the guess is accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessRow {
    cells: Vec<Cell>,
}

impl GuessRow {
    pub fn new(length: usize) -> Self {
        Self {
            cells: vec![Cell::default(); length],
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.letter.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.letter.is_none())
    }

    pub fn letters(&self) -> Vec<char> {
        self.cells.iter().filter_map(|cell| cell.letter).collect()
    }

    pub fn word(&self) -> String {
        self.letters().into_iter().collect()
    }

    fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }

    fn apply(&mut self, evaluation: &Evaluation) {
        for (cell, &classification) in self.cells.iter_mut().zip(&evaluation.classifications) {
            cell.classification = Some(classification);
        }
    }
}

/// State of one round: target word, finished rows, and the row being typed.
#[derive(Clone, Debug)]
pub struct GameRound {
    target: Vec<char>,
    max_tries: usize,
    rows: Vec<GuessRow>,
    active: GuessRow,
    cursor: usize,
    phase: Phase,
}

impl GameRound {
    /// Starts a round for `target`, uppercasing it.
    ///
    /// Fails with `MalformedWord` when the word contains anything but
    /// letters or is empty.
    pub fn new(target: &str, max_tries: usize) -> Result<Self, GameError> {
        let letters = normalize_word(target)
            .filter(|letters| !letters.is_empty())
            .ok_or_else(|| GameError::MalformedWord(target.to_string()))?;
        Ok(Self {
            active: GuessRow::new(letters.len()),
            target: letters,
            max_tries,
            rows: Vec::new(),
            cursor: 0,
            phase: Phase::Collecting,
        })
    }

    pub fn word_length(&self) -> usize {
        self.target.len()
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn max_tries(&self) -> usize {
        self.max_tries
    }

    /// Index of the row currently accepting letters; equals the number of
    /// accepted guesses.
    pub fn active_index(&self) -> usize {
        self.rows.len()
    }

    pub fn tries_remaining(&self) -> usize {
        self.max_tries.saturating_sub(self.rows.len())
    }

    pub fn rows(&self) -> &[GuessRow] {
        &self.rows
    }

    pub fn active_row(&self) -> &GuessRow {
        &self.active
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn ensure_collecting(&self) -> Result<(), GameError> {
        if self.phase == Phase::Collecting {
            Ok(())
        } else {
            Err(GameError::InvalidInput("round is not accepting letters"))
        }
    }

    /// Writes `c` into the cursor cell. Occupied cells are never overwritten.
    pub fn type_letter(&mut self, c: char) -> Result<(), GameError> {
        self.ensure_collecting()?;
        let letter = normalize_letter(c).ok_or(GameError::InvalidInput("not a letter"))?;
        let cell = &mut self.active.cells[self.cursor];
        if cell.letter.is_some() {
            return Err(GameError::InvalidInput("cell already holds a letter"));
        }
        cell.letter = Some(letter);
        if self.cursor + 1 < self.active.cells.len() {
            self.cursor += 1;
        }
        Ok(())
    }

    /// Backspace: clears the cursor cell, or the one before it if empty.
    pub fn erase(&mut self) -> Result<(), GameError> {
        self.ensure_collecting()?;
        if self.active.cells[self.cursor].letter.is_none() && self.cursor > 0 {
            self.cursor -= 1;
        }
        let cell = &mut self.active.cells[self.cursor];
        if cell.letter.take().is_none() {
            return Err(GameError::InvalidInput("nothing to erase"));
        }
        Ok(())
    }

    /// Delete: clears the cursor cell without moving.
    pub fn erase_forward(&mut self) -> Result<(), GameError> {
        self.ensure_collecting()?;
        if self.active.cells[self.cursor].letter.take().is_none() {
            return Err(GameError::InvalidInput("nothing to erase"));
        }
        Ok(())
    }

    pub fn move_cursor(&mut self, direction: CursorMove) -> Result<(), GameError> {
        self.ensure_collecting()?;
        let last = self.active.cells.len() - 1;
        self.cursor = match direction {
            CursorMove::Left => self.cursor.saturating_sub(1),
            CursorMove::Right => (self.cursor + 1).min(last),
        };
        Ok(())
    }

    /// Commits the full active row for validation and returns the guess.
    pub fn submit(&mut self) -> Result<String, GameError> {
        self.ensure_collecting()?;
        if !self.active.is_full() {
            return Err(GameError::InvalidInput("row is not full"));
        }
        self.phase = Phase::Validating;
        Ok(self.active.word())
    }

    /// The dictionary rejected the guess: wipe the row, keep the row index.
    pub fn reject_guess(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Validating {
            return Err(GameError::InvalidInput("no guess awaiting validation"));
        }
        self.active.clear();
        self.cursor = 0;
        self.phase = Phase::Collecting;
        Ok(())
    }

    /// The dictionary accepted the guess: score it and advance the round.
    pub fn accept_guess(&mut self) -> Result<Evaluation, GameError> {
        if self.phase != Phase::Validating {
            return Err(GameError::InvalidInput("no guess awaiting validation"));
        }
        let evaluation = evaluate(&self.active.letters(), &self.target);
        let mut finished = std::mem::replace(&mut self.active, GuessRow::new(self.target.len()));
        finished.apply(&evaluation);
        self.rows.push(finished);
        self.cursor = 0;
        self.phase = if evaluation.solved {
            Phase::Won
        } else if self.rows.len() >= self.max_tries {
            Phase::Lost
        } else {
            Phase::Collecting
        };
        Ok(evaluation)
    }
}
