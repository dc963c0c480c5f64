use crate::evaluator::{Classification, Evaluation};
use std::collections::BTreeMap;

/// On-screen keyboard rows.
pub const QWERTY_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Best classification seen for each letter during the current round.
///
/// Letters never looked at are simply absent from the map (the "unseen"
/// state). Entries only ever move up: Absent, WrongPosition, Correct.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyboardState {
    letters: BTreeMap<char, Classification>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` means the letter has not been part of an accepted guess yet.
    pub fn get(&self, letter: char) -> Option<Classification> {
        self.letters.get(&letter).copied()
    }

    /// Upgrades `letter` to `classification` if that is an improvement.
    /// Returns whether the stored state changed.
    pub fn upgrade(&mut self, letter: char, classification: Classification) -> bool {
        match self.letters.get_mut(&letter) {
            Some(current) if *current >= classification => false,
            Some(current) => {
                *current = classification;
                true
            }
            None => {
                self.letters.insert(letter, classification);
                true
            }
        }
    }

    pub fn record(&mut self, evaluation: &Evaluation) {
        for (&letter, &classification) in evaluation
            .letters
            .iter()
            .zip(&evaluation.classifications)
        {
            self.upgrade(letter, classification);
        }
    }

    pub fn reset(&mut self) {
        self.letters.clear();
    }

    /// Seen letters that have no key on the QWERTY rows (e.g. `Ñ`, `É`).
    pub fn extra_letters(&self) -> Vec<char> {
        self.letters
            .keys()
            .copied()
            .filter(|c| !QWERTY_ROWS.iter().any(|row| row.contains(*c)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Classification)> + '_ {
        self.letters.iter().map(|(&c, &s)| (c, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate_str;
    use Classification::{Absent, Correct, WrongPosition};

    #[test]
    fn test_unseen_letters() {
        let keyboard = KeyboardState::new();
        assert_eq!(keyboard.get('A'), None);
        assert!(keyboard.extra_letters().is_empty());
    }

    #[test]
    fn test_upgrade_never_downgrades() {
        let mut keyboard = KeyboardState::new();
        assert!(keyboard.upgrade('E', Absent));
        assert!(keyboard.upgrade('E', WrongPosition));
        assert!(!keyboard.upgrade('E', Absent));
        assert!(keyboard.upgrade('E', Correct));
        assert!(!keyboard.upgrade('E', WrongPosition));
        assert_eq!(keyboard.get('E'), Some(Correct));
    }

    #[test]
    fn test_record_evaluations_is_monotonic() {
        let mut keyboard = KeyboardState::new();
        keyboard.record(&evaluate_str("CRANE", "CRANE"));
        let snapshot = keyboard.clone();

        // Mostly misplaced letters here; nothing may regress.
        keyboard.record(&evaluate_str("NACRE", "CRANE"));
        for (letter, state) in snapshot.iter() {
            assert!(keyboard.get(letter) >= Some(state));
        }
        assert_eq!(keyboard.get('C'), Some(Correct));
    }

    #[test]
    fn test_record_collects_best_state() {
        let mut keyboard = KeyboardState::new();
        keyboard.record(&evaluate_str("CRAZY", "CRANE"));
        assert_eq!(keyboard.get('C'), Some(Correct));
        assert_eq!(keyboard.get('Z'), Some(Absent));
        assert_eq!(keyboard.get('Y'), Some(Absent));
        assert_eq!(keyboard.get('E'), None);

        keyboard.reset();
        assert_eq!(keyboard.get('C'), None);
    }

    #[test]
    fn test_extra_letters() {
        let mut keyboard = KeyboardState::new();
        keyboard.record(&evaluate_str("AÑOS", "AÑIL"));
        assert_eq!(keyboard.extra_letters(), vec!['Ñ']);
    }
}
