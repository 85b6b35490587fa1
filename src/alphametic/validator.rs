//! Independent validation of letter-to-digit assignments
//!
//! The validator re-derives everything from the puzzle and the assignment
//! alone, so it can double-check assignments produced by the search engine
//! and judge assignments supplied by hand. Unlike the search, which gets
//! digit uniqueness for free from its enumeration order, the validator
//! checks every rule explicitly.

use std::fmt;

use itertools::Itertools;

use crate::puzzle::Puzzle;
use crate::search::Assignment;

/// Validates assignments against the alphametic rules.
pub struct SolutionValidator;

/// One broken rule, with enough detail to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// A puzzle letter has no digit in the assignment.
    UnassignedLetter { letter: char },
    /// A letter's digit is outside the decimal range.
    DigitOutOfRange { letter: char, digit: u8 },
    /// Two or more letters share one digit.
    DuplicateDigit { digit: u8, letters: Vec<char> },
    /// A word starts with a letter assigned digit 0.
    LeadingZero { word: String, letter: char },
    /// A word is too long for its value to fit in a `u64`.
    ValueOverflow { word: String },
    /// The addends do not sum to the result word.
    ArithmeticMismatch { addend_sum: u128, result_value: u64 },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnassignedLetter { letter } => {
                write!(f, "letter '{}' has no digit assigned", letter)
            }
            Self::DigitOutOfRange { letter, digit } => {
                write!(f, "letter '{}' is assigned {}, outside 0-9", letter, digit)
            }
            Self::DuplicateDigit { digit, letters } => {
                write!(
                    f,
                    "digit {} is shared by letters {}",
                    digit,
                    letters.iter().join(", ")
                )
            }
            Self::LeadingZero { word, letter } => {
                write!(
                    f,
                    "word '{}' starts with letter '{}', which is assigned 0",
                    word, letter
                )
            }
            Self::ValueOverflow { word } => {
                write!(f, "word '{}' is too long to evaluate as a 64-bit number", word)
            }
            Self::ArithmeticMismatch {
                addend_sum,
                result_value,
            } => {
                write!(
                    f,
                    "addends sum to {} but the result word reads {}",
                    addend_sum, result_value
                )
            }
        }
    }
}

/// Result of validating one assignment against one puzzle.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<RuleViolation>,
    /// Every word with its computed value, in puzzle order; the last
    /// entry is the result word. `None` when the word could not be
    /// evaluated under this assignment.
    pub word_values: Vec<(String, Option<u64>)>,
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Validation Result: {}",
            if self.is_valid { "VALID" } else { "INVALID" }
        )?;

        for (word, value) in &self.word_values {
            match value {
                Some(value) => writeln!(f, "  {} = {}", word, value)?,
                None => writeln!(f, "  {} = ?", word)?,
            }
        }

        if !self.violations.is_empty() {
            writeln!(f, "Violations:")?;
            for violation in &self.violations {
                writeln!(f, "  - {}", violation)?;
            }
        }

        Ok(())
    }
}

impl SolutionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check an assignment against every alphametic rule: completeness,
    /// digit range, digit uniqueness, leading zeros, and the addition
    /// itself.
    pub fn validate(&self, puzzle: &Puzzle, assignment: &Assignment) -> ValidationResult {
        let mut violations = Vec::new();

        let letters = puzzle.distinct_letters();
        for &letter in &letters {
            match assignment.digit(letter) {
                None => violations.push(RuleViolation::UnassignedLetter { letter }),
                Some(digit) if digit > 9 => {
                    violations.push(RuleViolation::DigitOutOfRange { letter, digit })
                }
                Some(_) => {}
            }
        }

        // Only letters with in-range digits participate in the uniqueness
        // and arithmetic checks.
        let digit_of = |letter: char| assignment.digit(letter).filter(|&digit| digit <= 9);

        for digit in 0u8..=9 {
            let sharers: Vec<char> = letters
                .iter()
                .copied()
                .filter(|&letter| digit_of(letter) == Some(digit))
                .collect();
            if sharers.len() > 1 {
                violations.push(RuleViolation::DuplicateDigit {
                    digit,
                    letters: sharers,
                });
            }
        }

        for word in puzzle.words() {
            let letter = word.first_letter();
            if digit_of(letter) == Some(0) {
                violations.push(RuleViolation::LeadingZero {
                    word: word.to_string(),
                    letter,
                });
            }
        }

        let mut word_values = Vec::with_capacity(puzzle.word_count());
        for word in puzzle.words() {
            let value = word.value_with(digit_of);
            let resolvable = word
                .letters()
                .iter()
                .all(|&letter| digit_of(letter).is_some());
            // A resolvable word with no value overflowed the evaluation
            // width; an unresolvable one was already reported above.
            if resolvable && value.is_none() {
                violations.push(RuleViolation::ValueOverflow {
                    word: word.to_string(),
                });
            }
            word_values.push((word.to_string(), value));
        }

        if word_values.iter().all(|(_, value)| value.is_some()) {
            let addend_sum: u128 = word_values[..word_values.len() - 1]
                .iter()
                .filter_map(|(_, value)| value.map(u128::from))
                .sum();
            let result_value = word_values[word_values.len() - 1].1.unwrap_or(0);

            if addend_sum != u128::from(result_value) {
                violations.push(RuleViolation::ArithmeticMismatch {
                    addend_sum,
                    result_value,
                });
            }
        }

        ValidationResult {
            is_valid: violations.is_empty(),
            violations,
            word_values,
        }
    }

    /// Validation reduced to a single yes/no.
    pub fn quick_validate(&self, puzzle: &Puzzle, assignment: &Assignment) -> bool {
        self.validate(puzzle, assignment).is_valid
    }
}

impl Default for SolutionValidator {
    fn default() -> Self {
        Self::new()
    }
}
