/// Verdict for a single letter of a guess.
///
/// Variants are ordered by strength so that `max` picks the better
/// observation when the keyboard state is upgraded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
    Absent,
    WrongPosition,
    Correct,
}

impl Classification {
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::WrongPosition => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Result of scoring one guess against the target word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub letters: Vec<char>,
    pub classifications: Vec<Classification>,
    pub solved: bool,
}

impl Evaluation {
    /// Feedback string in `G`/`Y`/`X` notation, e.g. `GGGXX`.
    pub fn pattern(&self) -> String {
        self.classifications.iter().map(|c| c.to_char()).collect()
    }
}

/// Scores `guess` against `target`, one position at a time.
///
/// Each position is judged on its own: a letter that occurs anywhere in the
/// target is never `Absent`, even if the target holds fewer copies of it
/// than the guess does. Both words must have the same number of letters.
#[must_use]
pub fn evaluate(guess: &[char], target: &[char]) -> Evaluation {
    debug_assert_eq!(guess.len(), target.len());
    let classifications: Vec<Classification> = guess
        .iter()
        .zip(target)
        .map(|(g, t)| {
            if !target.contains(g) {
                Classification::Absent
            } else if g != t {
                Classification::WrongPosition
            } else {
                Classification::Correct
            }
        })
        .collect();
    let solved = classifications.iter().all(|&c| c == Classification::Correct);
    Evaluation {
        letters: guess.to_vec(),
        classifications,
        solved,
    }
}

/// Convenience wrapper over [`evaluate`] for string input.
#[must_use]
pub fn evaluate_str(guess: &str, target: &str) -> Evaluation {
    let guess: Vec<char> = guess.chars().collect();
    let target: Vec<char> = target.chars().collect();
    evaluate(&guess, &target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Classification::{Absent, Correct, WrongPosition};

    #[test]
    fn test_crane_crazy() {
        let result = evaluate_str("CRAZY", "CRANE");
        assert_eq!(
            result.classifications,
            vec![Correct, Correct, Correct, Absent, Absent]
        );
        assert!(!result.solved);
        assert_eq!(result.pattern(), "GGGXX");
    }

    #[test]
    fn test_apple_elaps() {
        let result = evaluate_str("ELAPS", "APPLE");
        assert_eq!(
            result.classifications,
            vec![
                WrongPosition,
                WrongPosition,
                WrongPosition,
                WrongPosition,
                Absent
            ]
        );
        assert!(!result.solved);
    }

    #[test]
    fn test_exact_match_is_solved() {
        let result = evaluate_str("CRANE", "CRANE");
        assert!(result.classifications.iter().all(|&c| c == Correct));
        assert!(result.solved);
    }

    #[test]
    fn test_repeated_letters_are_not_counted() {
        // CAPES holds a single P, already matched in place; the first P
        // still reads as misplaced.
        let result = evaluate_str("PAPER", "CAPES");
        assert_eq!(result.pattern(), "YGGGX");
    }

    #[test]
    fn test_accented_letters() {
        let result = evaluate_str("AÑOS", "AÑIL");
        assert_eq!(result.classifications, vec![Correct, Correct, Absent, Absent]);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let first = evaluate_str("STEEL", "LEAST");
        let second = evaluate_str("STEEL", "LEAST");
        assert_eq!(first, second);
    }

    #[test]
    fn test_solved_iff_all_correct() {
        let words = ["CRANE", "SLATE", "TRACE", "APPLE", "EERIE", "LEVEL"];
        for guess in words {
            for target in words {
                let result = evaluate_str(guess, target);
                assert_eq!(result.classifications.len(), 5);
                assert_eq!(
                    result.solved,
                    result.classifications.iter().all(|&c| c == Correct)
                );
                assert_eq!(result.solved, guess == target);
            }
        }
    }

    #[test]
    fn test_classification_char_codes() {
        assert_eq!(Correct.to_char(), 'G');
        assert_eq!(WrongPosition.to_char(), 'Y');
        assert_eq!(Absent.to_char(), 'X');
        assert!(Correct > WrongPosition && WrongPosition > Absent);
    }
}
