//! Problem orchestration: solving, packaging, and validating solutions

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::{
    AlphameticProblem, ComplexityLevel, PuzzleAnalysis, SolveOutcome, SolveReport,
};
pub use solution::{Solution, SolutionMetadata, SolutionSummary};
pub use validator::{RuleViolation, SolutionValidator, ValidationResult};
