//! Alphametic problem definition and solve orchestration

use anyhow::{bail, Context, Result};
use std::fmt;
use std::time::Duration;

use super::{Solution, SolutionValidator};
use crate::config::Settings;
use crate::puzzle::{load_puzzle_from_file, Puzzle, PuzzleError};
use crate::search::{
    search_space_size, EquationPredicate, LetterRegistry, SearchEngine, SearchOutcome,
    DIGIT_VALUES,
};

/// An alphametic puzzle to be solved under a given configuration.
pub struct AlphameticProblem {
    settings: Settings,
    puzzle: Puzzle,
    validator: SolutionValidator,
}

/// Terminal result of a solve run.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// A satisfying assignment was found and validated.
    Solved(Solution),
    /// The whole assignment space was searched without a hit.
    Exhausted,
    /// The configured timeout expired before the space was exhausted.
    TimedOut,
}

/// What a solve run produced, successful or not, plus its cost.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// The puzzle that was searched.
    pub puzzle: Puzzle,
    pub outcome: SolveOutcome,
    /// Predicate evaluations performed.
    pub attempts: u64,
    /// Wall-clock duration of the search.
    pub elapsed: Duration,
}

impl AlphameticProblem {
    /// Create a new problem from settings, loading the puzzle file.
    pub fn new(settings: Settings) -> Result<Self> {
        let puzzle = load_puzzle_from_file(&settings.input.puzzle_file)
            .context("Failed to load puzzle file")?;

        Ok(Self::with_puzzle(settings, puzzle))
    }

    /// Create a problem with an explicit puzzle (useful for testing).
    pub fn with_puzzle(settings: Settings, puzzle: Puzzle) -> Self {
        Self {
            settings,
            puzzle,
            validator: SolutionValidator::new(),
        }
    }

    /// Run the search and package the outcome. Progress goes to stderr;
    /// the caller owns stdout for the result itself.
    pub fn solve(&self) -> Result<SolveReport> {
        let letter_count = self.puzzle.distinct_letter_count();

        eprintln!("Solving alphametic puzzle...");
        eprintln!("Equation: {}", self.puzzle);
        eprintln!(
            "{} distinct letters, {} assignments to try",
            letter_count,
            search_space_size(letter_count)
        );

        // Refuse impossible inputs before the engine spends any work.
        if letter_count > DIGIT_VALUES {
            return Err(PuzzleError::TooManyLetters {
                count: letter_count,
            })
            .context("Puzzle cannot be solved");
        }

        let mut registry = LetterRegistry::build(self.puzzle.words());
        let mut predicate = EquationPredicate::new(&self.puzzle, &registry)?;

        let mut engine = SearchEngine::new();
        if let Some(seconds) = self.settings.search.timeout_seconds {
            engine.set_timeout(Duration::from_secs(seconds));
        }

        let outcome = engine.search(&mut registry, &mut predicate)?;
        let statistics = engine.statistics();

        let outcome = match outcome {
            SearchOutcome::Found(assignment) => {
                // Double-check through the independent validator before
                // reporting success.
                let validation = self.validator.validate(&self.puzzle, &assignment);
                if !validation.is_valid {
                    bail!(
                        "Search produced an assignment that fails validation:\n{}",
                        validation
                    );
                }

                let solution = Solution::new(
                    &self.puzzle,
                    assignment,
                    statistics.attempts,
                    statistics.elapsed,
                )?;
                SolveOutcome::Solved(solution)
            }
            SearchOutcome::Exhausted => SolveOutcome::Exhausted,
            SearchOutcome::TimedOut => SolveOutcome::TimedOut,
        };

        Ok(SolveReport {
            puzzle: self.puzzle.clone(),
            outcome,
            attempts: statistics.attempts,
            elapsed: statistics.elapsed,
        })
    }

    /// Examine the puzzle's structure without searching.
    pub fn analyze(&self) -> PuzzleAnalysis {
        PuzzleAnalysis::of(&self.puzzle)
    }

    /// Get the puzzle
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Get the problem settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Structural facts about a puzzle, computed without running the search.
#[derive(Debug, Clone)]
pub struct PuzzleAnalysis {
    pub equation: String,
    pub distinct_letters: usize,
    pub word_count: usize,
    pub addend_count: usize,
    /// Complete assignments a search would have to consider at worst.
    pub search_space: u64,
    pub complexity: ComplexityLevel,
    /// False when a structural argument rules out any solution.
    pub feasible: bool,
    /// One entry per structural reason the puzzle cannot be solved.
    pub notes: Vec<String>,
}

/// Complexity bucket based on the size of the assignment space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ComplexityLevel {
    fn from_search_space(search_space: u64) -> Self {
        match search_space {
            0..=999 => Self::Low,
            1_000..=99_999 => Self::Medium,
            100_000..=999_999 => Self::High,
            _ => Self::VeryHigh,
        }
    }
}

impl PuzzleAnalysis {
    /// Analyze a puzzle's structure. The notes collect arguments that
    /// rule out a solution outright; an empty list means the search is
    /// worth running, not that a solution exists.
    pub fn of(puzzle: &Puzzle) -> Self {
        let distinct_letters = puzzle.distinct_letter_count();
        let word_count = puzzle.word_count();
        let addend_count = puzzle.addends().len();
        let search_space = search_space_size(distinct_letters);

        let mut notes = Vec::new();

        if distinct_letters > DIGIT_VALUES {
            notes.push(format!(
                "{} distinct letters cannot map to unique digits",
                distinct_letters
            ));
        }

        if addend_count == 0 {
            notes.push(
                "there are no addends; an empty sum is 0 and a leading digit cannot be 0"
                    .to_string(),
            );
        }

        let result_len = puzzle.result_word().letter_count();
        for addend in puzzle.addends() {
            if addend.letter_count() > result_len {
                notes.push(format!(
                    "addend '{}' is longer than the result word, so its value alone exceeds the result",
                    addend
                ));
            }
        }

        if let Some(longest_addend) = puzzle
            .addends()
            .iter()
            .map(|word| word.letter_count())
            .max()
        {
            // n addends of at most L digits sum to fewer than
            // L + digits(n) digits.
            let count_digits = addend_count.to_string().len();
            if result_len > longest_addend + count_digits {
                notes.push(format!(
                    "the result word has {} letters but {} addends of at most {} letters cannot sum that high",
                    result_len, addend_count, longest_addend
                ));
            }
        }

        Self {
            equation: puzzle.to_string(),
            distinct_letters,
            word_count,
            addend_count,
            search_space,
            complexity: ComplexityLevel::from_search_space(search_space),
            feasible: notes.is_empty(),
            notes,
        }
    }
}

impl fmt::Display for PuzzleAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Puzzle Analysis:")?;
        writeln!(f, "  Equation: {}", self.equation)?;
        writeln!(
            f,
            "  Words: {} ({} addends)",
            self.word_count, self.addend_count
        )?;
        writeln!(f, "  Distinct letters: {}", self.distinct_letters)?;
        writeln!(f, "  Search space: {} assignments", self.search_space)?;
        writeln!(f, "  Complexity: {:?}", self.complexity)?;
        writeln!(
            f,
            "  Feasible: {}",
            if self.feasible { "yes" } else { "no" }
        )?;
        if !self.notes.is_empty() {
            writeln!(f, "  Notes:")?;
            for note in &self.notes {
                writeln!(f, "    - {}", note)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::parse_puzzle_from_string;

    fn problem_for(content: &str) -> AlphameticProblem {
        let puzzle = parse_puzzle_from_string(content).unwrap();
        AlphameticProblem::with_puzzle(Settings::default(), puzzle)
    }

    #[test]
    fn test_solve_send_more_money() {
        let problem = problem_for("SEND\nMORE\nMONEY");
        let report = problem.solve().unwrap();

        let solution = match report.outcome {
            SolveOutcome::Solved(solution) => solution,
            ref other => panic!("expected a solution, got {:?}", other),
        };

        assert_eq!(solution.solved_equation(), "9567 + 1085 = 10652");
        assert_eq!(solution.attempts, report.attempts);
        assert!(report.attempts > 0);
    }

    #[test]
    fn test_solve_reports_exhaustion_as_success() {
        let problem = problem_for("A\nA\nA");
        let report = problem.solve().unwrap();

        assert!(matches!(report.outcome, SolveOutcome::Exhausted));
        assert_eq!(report.attempts, 10);
    }

    #[test]
    fn test_solve_rejects_too_many_letters_before_searching() {
        let problem = problem_for("ABCDEFGHIJK\nL\nL");
        let error = problem.solve().unwrap_err();

        assert_eq!(
            error.downcast_ref::<PuzzleError>(),
            Some(&PuzzleError::TooManyLetters { count: 12 })
        );
    }

    #[test]
    fn test_zero_timeout_times_out() {
        let mut settings = Settings::default();
        settings.search.timeout_seconds = Some(0);
        let puzzle = parse_puzzle_from_string("SEND\nMORE\nMONEY").unwrap();
        let problem = AlphameticProblem::with_puzzle(settings, puzzle);

        let report = problem.solve().unwrap();
        assert!(matches!(report.outcome, SolveOutcome::TimedOut));
        assert_eq!(report.attempts, 0);
    }

    #[test]
    fn test_analysis_of_a_solvable_puzzle() {
        let analysis = problem_for("SEND\nMORE\nMONEY").analyze();

        assert_eq!(analysis.equation, "SEND + MORE = MONEY");
        assert_eq!(analysis.distinct_letters, 8);
        assert_eq!(analysis.addend_count, 2);
        assert_eq!(analysis.search_space, 1_814_400);
        assert_eq!(analysis.complexity, ComplexityLevel::VeryHigh);
        assert!(analysis.feasible);
        assert!(analysis.notes.is_empty());
    }

    #[test]
    fn test_analysis_flags_overlong_addend() {
        let analysis = problem_for("ABCD\nEF\nGH").analyze();

        assert!(!analysis.feasible);
        assert!(analysis.notes.iter().any(|note| note.contains("'ABCD'")));
    }

    #[test]
    fn test_analysis_flags_unreachable_result_length() {
        // Two one-letter addends cannot reach a three-letter sum.
        let analysis = problem_for("A\nB\nCDE").analyze();

        assert!(!analysis.feasible);
        assert!(analysis
            .notes
            .iter()
            .any(|note| note.contains("cannot sum that high")));
    }

    #[test]
    fn test_analysis_flags_missing_addends() {
        let analysis = problem_for("ABC").analyze();

        assert!(!analysis.feasible);
        assert!(analysis.notes.iter().any(|note| note.contains("no addends")));
    }

    #[test]
    fn test_complexity_buckets() {
        assert_eq!(ComplexityLevel::from_search_space(720), ComplexityLevel::Low);
        assert_eq!(
            ComplexityLevel::from_search_space(30_240),
            ComplexityLevel::Medium
        );
        assert_eq!(
            ComplexityLevel::from_search_space(604_800),
            ComplexityLevel::High
        );
        assert_eq!(
            ComplexityLevel::from_search_space(1_814_400),
            ComplexityLevel::VeryHigh
        );
    }
}
