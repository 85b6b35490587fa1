//! Search machinery: digit slots, validity predicates, and the
//! backtracking engine that drives them

pub mod engine;
pub mod predicate;
pub mod registry;

pub use engine::{search_space_size, SearchEngine, SearchOutcome, SearchStatistics, DIGIT_VALUES};
pub use predicate::{AssignmentPredicate, EquationPredicate};
pub use registry::{Assignment, LetterRegistry, RegistryStatistics};
