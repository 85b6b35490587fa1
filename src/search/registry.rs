//! Letter registry: the digit slots the search engine mutates

use crate::puzzle::{PuzzleError, Word};
use anyhow::Context;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Maps each distinct letter of a puzzle to a mutable digit slot.
///
/// Slots are addressable by letter or by a stable positional index; the
/// storage never reorders or reallocates after construction, so slot
/// indices stay valid for the lifetime of the search.
#[derive(Debug, Clone)]
pub struct LetterRegistry {
    letters: Vec<char>,
    slots: Vec<u8>,
    index: HashMap<char, usize>,
    occurrences: usize,
}

impl LetterRegistry {
    /// Scan the given words and build one zero-initialized digit slot per
    /// distinct letter, in first-seen order.
    pub fn build(words: &[Word]) -> Self {
        let occurrences = words.iter().map(Word::letter_count).sum();
        let letters: Vec<char> = words
            .iter()
            .flat_map(|word| word.letters().iter().copied())
            .unique()
            .collect();
        let index = letters
            .iter()
            .enumerate()
            .map(|(position, &letter)| (letter, position))
            .collect();
        let slots = vec![0; letters.len()];

        Self {
            letters,
            slots,
            index,
            occurrences,
        }
    }

    /// Number of digit slots, i.e. distinct letters.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The registered letters in slot order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// The current slot values in slot order.
    pub fn digits(&self) -> &[u8] {
        &self.slots
    }

    /// Current digit in the slot at `index`. Index must be within bounds.
    pub fn digit_at(&self, index: usize) -> u8 {
        self.slots[index]
    }

    /// Current digit assigned to `letter`, if it is registered.
    pub fn digit(&self, letter: char) -> Option<u8> {
        self.index.get(&letter).map(|&position| self.slots[position])
    }

    /// Stable slot index of `letter`, if it is registered.
    pub fn index_of(&self, letter: char) -> Option<usize> {
        self.index.get(&letter).copied()
    }

    /// Overwrite the slot at `index`. Search-engine use only.
    pub(crate) fn set_slot(&mut self, index: usize, digit: u8) {
        self.slots[index] = digit;
    }

    /// Exchange the contents of two slots. Search-engine use only.
    pub(crate) fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Materialize the current slot values as an assignment.
    pub fn snapshot(&self) -> Assignment {
        let pairs = self
            .letters
            .iter()
            .zip(self.slots.iter())
            .map(|(&letter, &digit)| (letter, digit))
            .collect();
        Assignment::new(pairs)
    }

    /// Write an assignment's digits back into the slots. Fails if the
    /// assignment misses a registered letter or carries a digit outside
    /// 0-9; the slots are untouched on failure.
    pub fn restore(&mut self, assignment: &Assignment) -> Result<(), PuzzleError> {
        let mut digits = Vec::with_capacity(self.letters.len());
        for &letter in &self.letters {
            match assignment.digit(letter) {
                None => return Err(PuzzleError::UnknownLetter { letter }),
                Some(digit) if digit > 9 => {
                    return Err(PuzzleError::InvalidDigit { letter, digit })
                }
                Some(digit) => digits.push(digit),
            }
        }

        self.slots = digits;
        Ok(())
    }

    /// Get statistics about the registered letters.
    pub fn statistics(&self) -> RegistryStatistics {
        RegistryStatistics {
            distinct_letters: self.letters.len(),
            letter_occurrences: self.occurrences,
        }
    }
}

/// Statistics about a letter registry.
#[derive(Debug, Clone)]
pub struct RegistryStatistics {
    pub distinct_letters: usize,
    pub letter_occurrences: usize,
}

impl fmt::Display for RegistryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registry Statistics:")?;
        writeln!(f, "  Distinct letters: {}", self.distinct_letters)?;
        writeln!(f, "  Letter occurrences: {}", self.letter_occurrences)?;
        Ok(())
    }
}

/// A complete letter-to-digit mapping, captured from the registry at the
/// moment a satisfying assignment is found, or supplied externally for
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pairs: Vec<(char, u8)>,
}

impl Assignment {
    /// Create an assignment from letter/digit pairs. The pairs are taken
    /// as given; validation happens where the assignment is used.
    pub fn new(pairs: Vec<(char, u8)>) -> Self {
        Self { pairs }
    }

    /// The digit assigned to `letter`, if present.
    pub fn digit(&self, letter: char) -> Option<u8> {
        self.pairs
            .iter()
            .find(|&&(candidate, _)| candidate == letter)
            .map(|&(_, digit)| digit)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over the letter/digit pairs in registry slot order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u8)> + '_ {
        self.pairs.iter().copied()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.pairs
                .iter()
                .map(|(letter, digit)| format!("{}={}", letter, digit))
                .join(", ")
        )
    }
}

impl FromStr for Assignment {
    type Err = anyhow::Error;

    /// Parse "S=9, E=5, ..." into an assignment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pairs: Vec<(char, u8)> = Vec::new();

        for entry in s.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (letter_part, digit_part) = entry
                .split_once('=')
                .with_context(|| format!("Expected LETTER=DIGIT, got '{}'", entry))?;

            let letter_part = letter_part.trim();
            let mut letter_chars = letter_part.chars();
            let letter = match (letter_chars.next(), letter_chars.next()) {
                (Some(letter), None) if letter.is_alphabetic() => letter,
                _ => anyhow::bail!("'{}' is not a single letter", letter_part),
            };

            let digit: u8 = digit_part
                .trim()
                .parse()
                .with_context(|| format!("'{}' is not a digit", digit_part.trim()))?;
            if digit > 9 {
                anyhow::bail!("Digit {} for letter '{}' is outside 0-9", digit, letter);
            }

            if pairs.iter().any(|&(existing, _)| existing == letter) {
                anyhow::bail!("Letter '{}' appears more than once", letter);
            }

            pairs.push((letter, digit));
        }

        if pairs.is_empty() {
            anyhow::bail!("Assignment is empty");
        }

        Ok(Self::new(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::parse_puzzle_from_string;

    fn registry_for(content: &str) -> LetterRegistry {
        let puzzle = parse_puzzle_from_string(content).unwrap();
        LetterRegistry::build(puzzle.words())
    }

    #[test]
    fn test_build_collects_letters_in_first_seen_order() {
        let registry = registry_for("SEND\nMORE\nMONEY");

        assert_eq!(registry.len(), 8);
        assert_eq!(registry.letters(), &['S', 'E', 'N', 'D', 'M', 'O', 'R', 'Y']);
        assert!(registry.digits().iter().all(|&digit| digit == 0));
    }

    #[test]
    fn test_empty_word_set_yields_empty_registry() {
        let registry = LetterRegistry::build(&[]);
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_lookup_by_letter_and_index() {
        let mut registry = registry_for("AB\nC");

        assert_eq!(registry.index_of('A'), Some(0));
        assert_eq!(registry.index_of('C'), Some(2));
        assert_eq!(registry.index_of('Z'), None);

        registry.set_slot(1, 7);
        assert_eq!(registry.digit('B'), Some(7));
        assert_eq!(registry.digit_at(1), 7);
        assert_eq!(registry.digit('Z'), None);
    }

    #[test]
    fn test_swap_slots() {
        let mut registry = registry_for("AB\nC");
        registry.set_slot(0, 3);
        registry.set_slot(2, 9);

        registry.swap_slots(0, 2);
        assert_eq!(registry.digit('A'), Some(9));
        assert_eq!(registry.digit('C'), Some(3));
    }

    #[test]
    fn test_snapshot_and_restore_round_trip() {
        let mut registry = registry_for("AB\nC");
        registry.set_slot(0, 1);
        registry.set_slot(1, 2);
        registry.set_slot(2, 3);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.digit('B'), Some(2));

        registry.set_slot(0, 9);
        registry.restore(&snapshot).unwrap();
        assert_eq!(registry.digit('A'), Some(1));
        assert_eq!(registry.digits(), &[1, 2, 3]);
    }

    #[test]
    fn test_restore_rejects_missing_letter() {
        let mut registry = registry_for("AB\nC");
        let partial = Assignment::new(vec![('A', 1), ('B', 2)]);

        assert_eq!(
            registry.restore(&partial),
            Err(PuzzleError::UnknownLetter { letter: 'C' })
        );
        // Slots are untouched on failure.
        assert_eq!(registry.digits(), &[0, 0, 0]);
    }

    #[test]
    fn test_restore_rejects_out_of_range_digit() {
        let mut registry = registry_for("A\nB\nC");
        let bad = Assignment::new(vec![('A', 1), ('B', 12), ('C', 3)]);

        assert_eq!(
            registry.restore(&bad),
            Err(PuzzleError::InvalidDigit { letter: 'B', digit: 12 })
        );
    }

    #[test]
    fn test_statistics() {
        let registry = registry_for("SEND\nMORE\nMONEY");
        let stats = registry.statistics();

        assert_eq!(stats.distinct_letters, 8);
        assert_eq!(stats.letter_occurrences, 13);
    }

    #[test]
    fn test_assignment_display() {
        let assignment = Assignment::new(vec![('A', 1), ('B', 2)]);
        assert_eq!(assignment.to_string(), "A=1, B=2");
    }

    #[test]
    fn test_assignment_parse() {
        let assignment: Assignment = "S=9, E=5,N=6".parse().unwrap();
        assert_eq!(assignment.len(), 3);
        assert_eq!(assignment.digit('E'), Some(5));
        assert_eq!(assignment.digit('N'), Some(6));
    }

    #[test]
    fn test_assignment_parse_rejects_malformed_input() {
        assert!("".parse::<Assignment>().is_err());
        assert!("S9".parse::<Assignment>().is_err());
        assert!("SE=9".parse::<Assignment>().is_err());
        assert!("S=x".parse::<Assignment>().is_err());
        assert!("S=10".parse::<Assignment>().is_err());
        assert!("S=9, S=8".parse::<Assignment>().is_err());
    }

    #[test]
    fn test_assignment_serde_round_trip() {
        let assignment = Assignment::new(vec![('A', 1), ('B', 2)]);
        let json = serde_json::to_string(&assignment).unwrap();
        let parsed: Assignment = serde_json::from_str(&json).unwrap();
        assert_eq!(assignment, parsed);
    }
}
