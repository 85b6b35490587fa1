//! Puzzle representation and the domain error taxonomy

use super::Word;
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// Errors in the alphametic domain itself, as opposed to I/O or
/// configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The input produced no words at all; there is nothing to solve.
    #[error("input produced no words; every line is empty or non-alphabetic")]
    NoWords,

    /// More distinct letters than there are digits to assign.
    #[error("puzzle has {count} distinct letters; at most 10 can map to distinct digits")]
    TooManyLetters { count: usize },

    /// A letter was referenced that the puzzle never mentions.
    #[error("letter '{letter}' is not part of the puzzle")]
    UnknownLetter { letter: char },

    /// An assignment carried a value outside the decimal digit range.
    #[error("digit {digit} assigned to letter '{letter}' is outside 0-9")]
    InvalidDigit { letter: char, digit: u8 },

    /// A word's numeric value does not fit in the evaluation width.
    #[error("word '{word}' is too long to evaluate as a 64-bit number")]
    ValueOverflow { word: String },
}

/// An alphametic puzzle: the original input lines plus the ordered word
/// list. The last word is the result of the addition; all preceding words
/// are addends. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    lines: Vec<String>,
    words: Vec<Word>,
}

impl Puzzle {
    /// Create a puzzle from the original input lines and the words
    /// extracted from them. Fails if no words were extracted.
    pub fn new(lines: Vec<String>, words: Vec<Word>) -> Result<Self, PuzzleError> {
        if words.is_empty() {
            return Err(PuzzleError::NoWords);
        }

        Ok(Self { lines, words })
    }

    /// Create a puzzle directly from words, deriving one line per word.
    /// Useful for tests and programmatic construction.
    pub fn from_words(words: Vec<Word>) -> Result<Self, PuzzleError> {
        let lines = words.iter().map(|word| word.to_string()).collect();
        Self::new(lines, words)
    }

    /// The original input lines, verbatim, including lines that
    /// contributed no word.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All words in input order; the last one is the result.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// The words on the left-hand side of the addition.
    pub fn addends(&self) -> &[Word] {
        &self.words[..self.words.len() - 1]
    }

    /// The word the addends must sum to. Non-empty by construction.
    pub fn result_word(&self) -> &Word {
        &self.words[self.words.len() - 1]
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Distinct letters across all words, in first-seen order.
    pub fn distinct_letters(&self) -> Vec<char> {
        self.words
            .iter()
            .flat_map(|word| word.letters().iter().copied())
            .unique()
            .collect()
    }

    pub fn distinct_letter_count(&self) -> usize {
        self.distinct_letters().len()
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}",
            self.addends().iter().join(" + "),
            self.result_word()
        )
    }
}
