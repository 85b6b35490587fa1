//! Word representation and base-10 valuation

use std::fmt;

/// One operand (or the result) of the puzzle's addition: the letters-only
/// view of a single input line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    letters: Vec<char>,
}

impl Word {
    /// Extract a word from a raw input line by keeping only its alphabetic
    /// characters (case-preserving). Returns `None` if nothing remains.
    pub fn from_line(line: &str) -> Option<Self> {
        let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();

        if letters.is_empty() {
            None
        } else {
            Some(Self { letters })
        }
    }

    /// The letters of the word, most significant first.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// The leading letter. Words are non-empty by construction.
    pub fn first_letter(&self) -> char {
        self.letters[0]
    }

    /// Number of letters, i.e. the number of digits in the word's value.
    pub fn letter_count(&self) -> usize {
        self.letters.len()
    }

    /// Read the word as a base-10 number under the given letter-to-digit
    /// mapping. Returns `None` if any letter is unmapped or the value
    /// overflows `u64`.
    pub fn value_with<F>(&self, digit_of: F) -> Option<u64>
    where
        F: Fn(char) -> Option<u8>,
    {
        self.letters.iter().try_fold(0u64, |acc, &letter| {
            let digit = digit_of(letter)?;
            acc.checked_mul(10)?.checked_add(u64::from(digit))
        })
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &letter in &self.letters {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}
