//! Demonstration of the alphametic solver library
//!
//! This example walks through both layers of the API: the low-level
//! search machinery (registry, predicate, engine) and the high-level
//! problem orchestration with validation.

use alphametic_solver::alphametic::{AlphameticProblem, SolutionValidator, SolveOutcome};
use alphametic_solver::config::Settings;
use alphametic_solver::puzzle::parse_puzzle_from_string;
use alphametic_solver::search::{
    search_space_size, EquationPredicate, LetterRegistry, SearchEngine, SearchOutcome,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Alphametic Solver Demonstration ===\n");

    demo_search_layer()?;
    demo_problem_layer()?;
    demo_unsolvable_puzzle()?;

    println!("✅ All demonstrations completed successfully!");
    Ok(())
}

/// Drive the search machinery directly on the classic SEND + MORE = MONEY.
fn demo_search_layer() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demo 1: Low-level search on SEND + MORE = MONEY");

    let puzzle = parse_puzzle_from_string("SEND\nMORE\nMONEY")?;
    let mut registry = LetterRegistry::build(puzzle.words());

    println!(
        "  {} distinct letters, {} candidate assignments",
        registry.len(),
        search_space_size(registry.len())
    );

    let mut predicate = EquationPredicate::new(&puzzle, &registry)?;
    let mut engine = SearchEngine::new();

    match engine.search(&mut registry, &mut predicate)? {
        SearchOutcome::Found(assignment) => {
            println!("  ✅ Found: {}", assignment);
            // The registry keeps the winning digits after a hit.
            println!(
                "  Registry agrees: S={}, M={}",
                registry.digit('S').ok_or("S missing from registry")?,
                registry.digit('M').ok_or("M missing from registry")?
            );
        }
        SearchOutcome::Exhausted => {
            return Err("Expected a solution but the search space was exhausted".into());
        }
        SearchOutcome::TimedOut => {
            return Err("Search timed out unexpectedly".into());
        }
    }

    println!("{}\n", engine.statistics());
    Ok(())
}

/// Solve the same puzzle through the high-level problem interface and
/// double-check the answer with the validator.
fn demo_problem_layer() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demo 2: High-level solve with validation");

    let puzzle = parse_puzzle_from_string("  SEND\n+ MORE\n------\n MONEY")?;
    let problem = AlphameticProblem::with_puzzle(Settings::default(), puzzle);

    println!("{}", problem.analyze());

    let report = problem.solve()?;
    match report.outcome {
        SolveOutcome::Solved(solution) => {
            println!("  ✅ {}", solution.solved_equation());
            println!("  Assignment: {}", solution.assignment);
            println!(
                "  Found after {} checks in {} ms",
                solution.attempts,
                solution.solve_time.as_millis()
            );

            let validator = SolutionValidator::new();
            let result = validator.validate(problem.puzzle(), &solution.assignment);
            if !result.is_valid {
                return Err(format!("Validator rejected the solution:\n{}", result).into());
            }
            println!("  ✅ Validator confirms the assignment\n");
        }
        SolveOutcome::Exhausted | SolveOutcome::TimedOut => {
            return Err("Expected SEND + MORE = MONEY to be solvable".into());
        }
    }

    Ok(())
}

/// A puzzle with no satisfying assignment: the search proves it by
/// exhausting every candidate.
fn demo_unsolvable_puzzle() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demo 3: Proving a puzzle unsolvable");

    let puzzle = parse_puzzle_from_string("AB\nAB\nAB")?;
    let problem = AlphameticProblem::with_puzzle(Settings::default(), puzzle);

    let report = problem.solve()?;
    match report.outcome {
        SolveOutcome::Exhausted => {
            println!(
                "  ✅ No solution exists; all {} candidates checked\n",
                report.attempts
            );
        }
        SolveOutcome::Solved(solution) => {
            return Err(format!("Unexpected solution: {}", solution.assignment).into());
        }
        SolveOutcome::TimedOut => {
            return Err("Exhaustive search timed out unexpectedly".into());
        }
    }

    Ok(())
}
