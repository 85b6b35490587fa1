//! Validity predicates evaluated against complete digit assignments

use super::registry::LetterRegistry;
use crate::puzzle::{Puzzle, PuzzleError};

/// Contract between the search engine and the puzzle being solved: a
/// single "is the current assignment acceptable" question, asked once per
/// fully-specified assignment.
///
/// Closures of type `FnMut(&LetterRegistry) -> bool` implement this trait,
/// which keeps test and ad-hoc predicates cheap to write.
pub trait AssignmentPredicate {
    /// Evaluate the registry's current slot values as a candidate
    /// assignment.
    fn is_satisfied(&mut self, registry: &LetterRegistry) -> bool;
}

impl<F> AssignmentPredicate for F
where
    F: FnMut(&LetterRegistry) -> bool,
{
    fn is_satisfied(&mut self, registry: &LetterRegistry) -> bool {
        self(registry)
    }
}

/// The alphametic validity check: every word's leading letter must be
/// nonzero, and the addend words must sum to the result word when read as
/// base-10 numbers.
///
/// Letters are resolved to registry slot indices once at construction, so
/// each evaluation touches only the slot array.
#[derive(Debug, Clone)]
pub struct EquationPredicate {
    addends: Vec<Vec<usize>>,
    result: Vec<usize>,
    leading_slots: Vec<usize>,
}

impl EquationPredicate {
    /// Resolve the puzzle's words against the registry. Fails if a word
    /// mentions a letter the registry does not know.
    pub fn new(puzzle: &Puzzle, registry: &LetterRegistry) -> Result<Self, PuzzleError> {
        let mut indexed: Vec<Vec<usize>> = Vec::with_capacity(puzzle.word_count());
        for word in puzzle.words() {
            let slots = word
                .letters()
                .iter()
                .map(|&letter| {
                    registry
                        .index_of(letter)
                        .ok_or(PuzzleError::UnknownLetter { letter })
                })
                .collect::<Result<Vec<usize>, PuzzleError>>()?;
            indexed.push(slots);
        }

        let leading_slots = indexed.iter().map(|slots| slots[0]).collect();
        let result = indexed.pop().ok_or(PuzzleError::NoWords)?;

        Ok(Self {
            addends: indexed,
            result,
            leading_slots,
        })
    }
}

impl AssignmentPredicate for EquationPredicate {
    fn is_satisfied(&mut self, registry: &LetterRegistry) -> bool {
        // Leading-zero check first; it rejects most assignments without
        // touching the word values.
        if self
            .leading_slots
            .iter()
            .any(|&slot| registry.digit_at(slot) == 0)
        {
            return false;
        }

        let result_value = match word_value(&self.result, registry) {
            Some(value) => value,
            None => return false,
        };

        let mut sum: u64 = 0;
        for addend in &self.addends {
            let value = match word_value(addend, registry) {
                Some(value) => value,
                None => return false,
            };
            sum = match sum.checked_add(value) {
                Some(total) => total,
                None => return false,
            };
        }

        sum == result_value
    }
}

/// Read a word's slots as a base-10 number, most significant slot first.
/// `None` when the value does not fit in a `u64`; such a word can never
/// balance against one that does.
fn word_value(slots: &[usize], registry: &LetterRegistry) -> Option<u64> {
    slots.iter().try_fold(0u64, |acc, &slot| {
        acc.checked_mul(10)?
            .checked_add(u64::from(registry.digit_at(slot)))
    })
}
