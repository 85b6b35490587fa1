//! Nested backtracking search over letter-to-digit assignments
//!
//! The engine runs two stages. Digit selection picks an ascending set of
//! digits for the registry slots, one set at a time. Digit arrangement
//! then permutes the chosen set in place, handing every arrangement to
//! the predicate. Together the stages enumerate exactly the injective
//! assignments, so the predicate never needs its own uniqueness check.

use std::fmt;
use std::time::{Duration, Instant};

use anyhow::Result;

use super::predicate::AssignmentPredicate;
use super::registry::{Assignment, LetterRegistry};
use crate::puzzle::PuzzleError;

/// Number of distinct digit values available for assignment.
pub const DIGIT_VALUES: usize = 10;

/// Number of complete assignments the engine enumerates for a puzzle
/// with `letter_count` distinct letters: 10 * 9 * ... down to
/// `10 - letter_count + 1`. Zero when the letters outnumber the digits.
pub fn search_space_size(letter_count: usize) -> u64 {
    (0..letter_count).fold(1u64, |acc, used| {
        acc * (DIGIT_VALUES as u64).saturating_sub(used as u64)
    })
}

/// Terminal result of a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The predicate accepted this assignment; the registry still holds
    /// its digits.
    Found(Assignment),
    /// Every assignment was evaluated and none satisfied the predicate.
    Exhausted,
    /// The deadline passed before the search space was exhausted.
    TimedOut,
}

/// Control flow threaded through the recursion. `Continue` keeps
/// enumerating; the other variants unwind every level immediately.
enum Flow {
    Continue,
    Found(Assignment),
    TimedOut,
}

/// The backtracking search engine. Reusable across runs; each call to
/// [`SearchEngine::search`] resets the attempt counter and timer.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    timeout: Option<Duration>,
    attempts: u64,
    elapsed: Duration,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self {
            timeout: None,
            attempts: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Bound the wall-clock time of subsequent searches. The deadline is
    /// checked once per complete assignment, immediately before the
    /// predicate runs.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Enumerate assignments until the predicate accepts one, the space
    /// is exhausted, or the deadline passes.
    ///
    /// On `Found` the registry slots still hold the satisfying digits;
    /// on the other outcomes their contents are unspecified.
    pub fn search<P>(
        &mut self,
        registry: &mut LetterRegistry,
        predicate: &mut P,
    ) -> Result<SearchOutcome>
    where
        P: AssignmentPredicate + ?Sized,
    {
        if registry.len() > DIGIT_VALUES {
            return Err(PuzzleError::TooManyLetters {
                count: registry.len(),
            }
            .into());
        }

        self.attempts = 0;
        self.elapsed = Duration::ZERO;

        let started = Instant::now();
        let deadline = self
            .timeout
            .and_then(|timeout| started.checked_add(timeout));
        let flow = self.select_digits(0, 0, registry, predicate, deadline);
        self.elapsed = started.elapsed();

        Ok(match flow {
            Flow::Continue => SearchOutcome::Exhausted,
            Flow::Found(assignment) => SearchOutcome::Found(assignment),
            Flow::TimedOut => SearchOutcome::TimedOut,
        })
    }

    /// Stage one: fill slots `0..depth` with an ascending run of digits,
    /// then hand the completed set to stage two. `lowest` is the smallest
    /// digit still eligible for the slot at `depth`.
    fn select_digits<P>(
        &mut self,
        lowest: u8,
        depth: usize,
        registry: &mut LetterRegistry,
        predicate: &mut P,
        deadline: Option<Instant>,
    ) -> Flow
    where
        P: AssignmentPredicate + ?Sized,
    {
        let slot_count = registry.len();
        if depth == slot_count {
            return self.assign_digits(0, registry, predicate, deadline);
        }

        // Leave room for the remaining slots: the slot at `depth` can go
        // no higher than 10 minus the number of slots still unfilled.
        let highest = (DIGIT_VALUES - (slot_count - depth)) as u8;
        for digit in lowest..=highest {
            registry.set_slot(depth, digit);
            match self.select_digits(digit + 1, depth + 1, registry, predicate, deadline) {
                Flow::Continue => {}
                flow => return flow,
            }
        }

        Flow::Continue
    }

    /// Stage two: permute the chosen digits across slots `position..` by
    /// swapping each candidate into `position` and recursing. Once only
    /// one slot remains the arrangement is complete and gets evaluated.
    fn assign_digits<P>(
        &mut self,
        position: usize,
        registry: &mut LetterRegistry,
        predicate: &mut P,
        deadline: Option<Instant>,
    ) -> Flow
    where
        P: AssignmentPredicate + ?Sized,
    {
        let slot_count = registry.len();
        if position + 1 >= slot_count {
            return self.evaluate(registry, predicate, deadline);
        }

        for candidate in position..slot_count {
            registry.swap_slots(position, candidate);
            match self.assign_digits(position + 1, registry, predicate, deadline) {
                // Swapping back on the winning branch would destroy the
                // answer the registry is expected to hold.
                Flow::Continue => registry.swap_slots(position, candidate),
                flow => return flow,
            }
        }

        Flow::Continue
    }

    fn evaluate<P>(
        &mut self,
        registry: &mut LetterRegistry,
        predicate: &mut P,
        deadline: Option<Instant>,
    ) -> Flow
    where
        P: AssignmentPredicate + ?Sized,
    {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return Flow::TimedOut;
            }
        }

        self.attempts += 1;
        if predicate.is_satisfied(registry) {
            Flow::Found(registry.snapshot())
        } else {
            Flow::Continue
        }
    }

    /// Get statistics about the most recent search.
    pub fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            attempts: self.attempts,
            elapsed: self.elapsed,
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a completed search run.
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Complete assignments handed to the predicate.
    pub attempts: u64,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Time elapsed: {} ms", self.elapsed.as_millis())?;
        writeln!(f, "  Checks performed: {}", self.attempts)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::parse_puzzle_from_string;
    use crate::search::predicate::EquationPredicate;

    fn setup(content: &str) -> (LetterRegistry, EquationPredicate) {
        let puzzle = parse_puzzle_from_string(content).unwrap();
        let registry = LetterRegistry::build(puzzle.words());
        let predicate = EquationPredicate::new(&puzzle, &registry).unwrap();
        (registry, predicate)
    }

    #[test]
    fn test_send_more_money_is_found() {
        let (mut registry, mut predicate) = setup("SEND\nMORE\nMONEY");
        let mut engine = SearchEngine::new();

        let outcome = engine.search(&mut registry, &mut predicate).unwrap();
        let assignment = match outcome {
            SearchOutcome::Found(assignment) => assignment,
            other => panic!("expected a solution, got {:?}", other),
        };

        assert_eq!(assignment.digit('S'), Some(9));
        assert_eq!(assignment.digit('E'), Some(5));
        assert_eq!(assignment.digit('N'), Some(6));
        assert_eq!(assignment.digit('D'), Some(7));
        assert_eq!(assignment.digit('M'), Some(1));
        assert_eq!(assignment.digit('O'), Some(0));
        assert_eq!(assignment.digit('R'), Some(8));
        assert_eq!(assignment.digit('Y'), Some(2));

        let stats = engine.statistics();
        assert!(stats.attempts > 0);
        assert!(stats.attempts <= search_space_size(8));
    }

    #[test]
    fn test_first_solution_and_attempt_count_are_deterministic() {
        let (mut registry, mut predicate) = setup("A\nB\nC");
        let mut engine = SearchEngine::new();

        let outcome = engine.search(&mut registry, &mut predicate).unwrap();

        // Every digit set containing 0 fails the leading-zero rule, so
        // the first hit is 1 + 2 = 3 after 36 * 6 rejected assignments.
        let expected = Assignment::new(vec![('A', 1), ('B', 2), ('C', 3)]);
        assert_eq!(outcome, SearchOutcome::Found(expected));
        assert_eq!(engine.statistics().attempts, 217);
    }

    #[test]
    fn test_unsolvable_single_letter_puzzle_exhausts() {
        // A + A = A has no solution with A nonzero.
        let (mut registry, mut predicate) = setup("A\nA\nA");
        let mut engine = SearchEngine::new();

        let outcome = engine.search(&mut registry, &mut predicate).unwrap();
        assert_eq!(outcome, SearchOutcome::Exhausted);
        assert_eq!(engine.statistics().attempts, 10);
    }

    #[test]
    fn test_unsolvable_two_letter_puzzle_exhausts() {
        // AB + AB = AB would need AB to be 0, which a leading letter
        // cannot produce.
        let (mut registry, mut predicate) = setup("AB\nAB\nAB");
        let mut engine = SearchEngine::new();

        let outcome = engine.search(&mut registry, &mut predicate).unwrap();
        assert_eq!(outcome, SearchOutcome::Exhausted);
        assert_eq!(engine.statistics().attempts, 90);
    }

    #[test]
    fn test_empty_registry_evaluates_exactly_once() {
        let mut registry = LetterRegistry::build(&[]);
        let mut engine = SearchEngine::new();

        let mut reject = |_: &LetterRegistry| false;
        let outcome = engine.search(&mut registry, &mut reject).unwrap();
        assert_eq!(outcome, SearchOutcome::Exhausted);
        assert_eq!(engine.statistics().attempts, 1);

        let mut accept = |_: &LetterRegistry| true;
        let outcome = engine.search(&mut registry, &mut accept).unwrap();
        match outcome {
            SearchOutcome::Found(assignment) => assert!(assignment.is_empty()),
            other => panic!("expected the empty assignment, got {:?}", other),
        }
        assert_eq!(engine.statistics().attempts, 1);
    }

    #[test]
    fn test_enumeration_order_interleaves_swaps_within_each_set() {
        let puzzle = parse_puzzle_from_string("AB\nAB\nAB").unwrap();
        let mut registry = LetterRegistry::build(puzzle.words());
        let mut engine = SearchEngine::new();

        let mut seen: Vec<Vec<u8>> = Vec::new();
        let mut record = |registry: &LetterRegistry| {
            seen.push(registry.digits().to_vec());
            false
        };

        let outcome = engine.search(&mut registry, &mut record).unwrap();
        assert_eq!(outcome, SearchOutcome::Exhausted);
        assert_eq!(seen.len(), 90);
        assert_eq!(
            &seen[..4],
            &[vec![0, 1], vec![1, 0], vec![0, 2], vec![2, 0]]
        );
    }

    #[test]
    fn test_rejects_more_letters_than_digits() {
        let (mut registry, mut predicate) = setup("ABCDEFGHIJK\nL\nL");
        let mut engine = SearchEngine::new();

        let error = engine.search(&mut registry, &mut predicate).unwrap_err();
        assert_eq!(
            error.downcast_ref::<PuzzleError>(),
            Some(&PuzzleError::TooManyLetters { count: 12 })
        );
        assert_eq!(engine.statistics().attempts, 0);
    }

    #[test]
    fn test_found_leaves_winning_digits_in_registry() {
        let (mut registry, mut predicate) = setup("SEND\nMORE\nMONEY");
        let mut engine = SearchEngine::new();

        let outcome = engine.search(&mut registry, &mut predicate).unwrap();
        match outcome {
            SearchOutcome::Found(assignment) => {
                assert_eq!(registry.snapshot(), assignment);
            }
            other => panic!("expected a solution, got {:?}", other),
        }
    }

    #[test]
    fn test_search_is_deterministic_across_runs() {
        let (mut first_registry, mut first_predicate) = setup("TWO\nTWO\nFOUR");
        let (mut second_registry, mut second_predicate) = setup("TWO\nTWO\nFOUR");
        let mut first_engine = SearchEngine::new();
        let mut second_engine = SearchEngine::new();

        let first = first_engine
            .search(&mut first_registry, &mut first_predicate)
            .unwrap();
        let second = second_engine
            .search(&mut second_registry, &mut second_predicate)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first_engine.statistics().attempts,
            second_engine.statistics().attempts
        );
    }

    #[test]
    fn test_zero_timeout_reports_timed_out() {
        let (mut registry, mut predicate) = setup("A\nB\nC");
        let mut engine = SearchEngine::new();
        engine.set_timeout(Duration::ZERO);

        let outcome = engine.search(&mut registry, &mut predicate).unwrap();
        assert_eq!(outcome, SearchOutcome::TimedOut);
        assert_eq!(engine.statistics().attempts, 0);
    }

    #[test]
    fn test_search_space_size_is_a_falling_factorial() {
        assert_eq!(search_space_size(0), 1);
        assert_eq!(search_space_size(1), 10);
        assert_eq!(search_space_size(2), 90);
        assert_eq!(search_space_size(3), 720);
        assert_eq!(search_space_size(8), 1_814_400);
        assert_eq!(search_space_size(10), 3_628_800);
        assert_eq!(search_space_size(11), 0);
        assert_eq!(search_space_size(15), 0);
    }
}
