//! Solution representation for solved alphametic puzzles

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::puzzle::{Puzzle, PuzzleError, Word};
use crate::search::{search_space_size, Assignment};

/// A satisfying assignment together with the cost of finding it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The equation that was solved, e.g. "SEND + MORE = MONEY".
    pub equation: String,
    /// The satisfying letter-to-digit assignment.
    pub assignment: Assignment,
    /// Predicate evaluations performed up to and including the hit.
    pub attempts: u64,
    /// Time taken to find this solution.
    #[serde(skip)]
    pub solve_time: Duration,
    /// Derived facts about the puzzle and the assignment.
    pub metadata: SolutionMetadata,
}

/// Metadata about a solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Distinct letters in the puzzle.
    pub distinct_letters: usize,
    /// Total words, addends plus result.
    pub word_count: usize,
    /// Size of the assignment space the search drew from.
    pub search_space: u64,
    /// Value of each addend under the assignment, in puzzle order.
    pub addend_values: Vec<u64>,
    /// Value of the result word under the assignment.
    pub result_value: u64,
}

impl Solution {
    /// Package a satisfying assignment. Fails if the assignment does not
    /// cover the puzzle or a word's value cannot be computed.
    pub fn new(
        puzzle: &Puzzle,
        assignment: Assignment,
        attempts: u64,
        solve_time: Duration,
    ) -> Result<Self, PuzzleError> {
        let metadata = SolutionMetadata::analyze(puzzle, &assignment)?;

        Ok(Self {
            equation: puzzle.to_string(),
            assignment,
            attempts,
            solve_time,
            metadata,
        })
    }

    /// Get a summary of the solution.
    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            equation: self.equation.clone(),
            assignment: self.assignment.to_string(),
            distinct_letters: self.metadata.distinct_letters,
            attempts: self.attempts,
            solve_time_ms: self.solve_time.as_millis() as u64,
        }
    }

    /// The solved equation with digits in place of letters, e.g.
    /// "9567 + 1085 = 10652".
    pub fn solved_equation(&self) -> String {
        format!(
            "{} = {}",
            self.metadata.addend_values.iter().join(" + "),
            self.metadata.result_value
        )
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution for {}", self.equation)?;
        writeln!(f, "  Assignment: {}", self.assignment)?;
        writeln!(f, "  {}", self.solved_equation())?;
        writeln!(f, "  Checks performed: {}", self.attempts)?;
        Ok(())
    }
}

impl SolutionMetadata {
    /// Compute the metadata for an assignment. Every puzzle letter must
    /// carry an in-range digit and every word value must fit in a `u64`.
    pub fn analyze(puzzle: &Puzzle, assignment: &Assignment) -> Result<Self, PuzzleError> {
        let addend_values = puzzle
            .addends()
            .iter()
            .map(|word| word_value(word, assignment))
            .collect::<Result<Vec<u64>, PuzzleError>>()?;
        let result_value = word_value(puzzle.result_word(), assignment)?;
        let distinct_letters = puzzle.distinct_letter_count();

        Ok(Self {
            distinct_letters,
            word_count: puzzle.word_count(),
            search_space: search_space_size(distinct_letters),
            addend_values,
            result_value,
        })
    }
}

/// Evaluate one word, turning the opaque `None` of `Word::value_with`
/// into the specific failure.
fn word_value(word: &Word, assignment: &Assignment) -> Result<u64, PuzzleError> {
    for &letter in word.letters() {
        match assignment.digit(letter) {
            None => return Err(PuzzleError::UnknownLetter { letter }),
            Some(digit) if digit > 9 => {
                return Err(PuzzleError::InvalidDigit { letter, digit })
            }
            Some(_) => {}
        }
    }

    word.value_with(|letter| assignment.digit(letter))
        .ok_or_else(|| PuzzleError::ValueOverflow {
            word: word.to_string(),
        })
}

/// Summary of a solution for display purposes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionSummary {
    pub equation: String,
    pub assignment: String,
    pub distinct_letters: usize,
    pub attempts: u64,
    pub solve_time_ms: u64,
}

impl fmt::Display for SolutionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} letters, {} checks, {}ms)",
            self.equation, self.assignment, self.distinct_letters, self.attempts, self.solve_time_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::parse_puzzle_from_string;
    use tempfile::tempdir;

    fn send_more_money_solution() -> Solution {
        let puzzle = parse_puzzle_from_string("SEND\nMORE\nMONEY").unwrap();
        let assignment = Assignment::new(vec![
            ('S', 9),
            ('E', 5),
            ('N', 6),
            ('D', 7),
            ('M', 1),
            ('O', 0),
            ('R', 8),
            ('Y', 2),
        ]);
        Solution::new(&puzzle, assignment, 1_000_000, Duration::from_millis(150)).unwrap()
    }

    #[test]
    fn test_solution_creation() {
        let solution = send_more_money_solution();

        assert_eq!(solution.equation, "SEND + MORE = MONEY");
        assert_eq!(solution.metadata.distinct_letters, 8);
        assert_eq!(solution.metadata.word_count, 3);
        assert_eq!(solution.metadata.search_space, 1_814_400);
        assert_eq!(solution.metadata.addend_values, vec![9567, 1085]);
        assert_eq!(solution.metadata.result_value, 10652);
        assert_eq!(solution.solved_equation(), "9567 + 1085 = 10652");
    }

    #[test]
    fn test_incomplete_assignment_is_rejected() {
        let puzzle = parse_puzzle_from_string("A\nB\nC").unwrap();
        let partial = Assignment::new(vec![('A', 1), ('B', 2)]);

        assert_eq!(
            Solution::new(&puzzle, partial, 1, Duration::ZERO).unwrap_err(),
            PuzzleError::UnknownLetter { letter: 'C' }
        );
    }

    #[test]
    fn test_json_round_trip_skips_solve_time() {
        let solution = send_more_money_solution();

        let json = solution.to_json().unwrap();
        let parsed = Solution::from_json(&json).unwrap();

        assert_eq!(parsed.equation, solution.equation);
        assert_eq!(parsed.assignment, solution.assignment);
        assert_eq!(parsed.attempts, solution.attempts);
        assert_eq!(parsed.metadata.result_value, solution.metadata.result_value);
        assert_eq!(parsed.solve_time, Duration::ZERO);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("solution.json");

        let solution = send_more_money_solution();
        solution.save_to_file(&path).unwrap();
        let loaded = Solution::load_from_file(&path).unwrap();

        assert_eq!(loaded.assignment, solution.assignment);
        assert_eq!(loaded.metadata.addend_values, vec![9567, 1085]);
    }

    #[test]
    fn test_summary_display() {
        let summary = send_more_money_solution().summary();
        let rendered = summary.to_string();

        assert!(rendered.contains("SEND + MORE = MONEY"));
        assert!(rendered.contains("S=9"));
        assert!(rendered.contains("150ms"));
    }
}
