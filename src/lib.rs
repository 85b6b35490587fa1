//! Alphametic (cryptarithmetic) puzzle solver
//!
//! This library assigns a unique digit 0-9 to every distinct letter of a
//! word-addition puzzle so that the words, read as base-10 numbers,
//! satisfy "the sum of all words but the last equals the last".

pub mod alphametic;
pub mod config;
pub mod puzzle;
pub mod search;
pub mod utils;

pub use alphametic::{AlphameticProblem, Solution, SolveOutcome, SolveReport};
pub use config::Settings;

use anyhow::Result;

/// Main entry point for solving alphametic puzzles
pub fn solve_puzzle(settings: Settings) -> Result<SolveReport> {
    let problem = AlphameticProblem::new(settings)?;
    problem.solve()
}
