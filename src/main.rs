//! Main CLI application for the alphametic puzzle solver

use alphametic_solver::{
    alphametic::{AlphameticProblem, SolutionValidator, SolveOutcome},
    config::{CliOverrides, OutputFormat, Settings},
    puzzle::{create_example_puzzles, load_puzzle_from_file},
    search::{Assignment, LetterRegistry},
    utils::{ColorOutput, ReportFormatter},
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "alphametic_solver")]
#[command(about = "Alphametic (cryptarithmetic) puzzle solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an alphametic puzzle
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Search timeout in seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Output format (overrides config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Directory to save the report in (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a proposed assignment against a puzzle
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Assignment to check, e.g. "S=9,E=5,N=6,D=7,M=1,O=0,R=8,Y=2"
        #[arg(short, long)]
        assignment: String,
    },

    /// Analyze a puzzle's structure without searching
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            timeout,
            format,
            output,
            verbose,
        } => solve_command(config, puzzle, timeout, format, output, verbose),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Check {
            config,
            puzzle,
            assignment,
        } => check_command(config, puzzle, assignment),
        Commands::Analyze { config, puzzle } => analyze_command(config, puzzle),
    }
}

/// Load settings, falling back to defaults when the config file does not
/// exist.
fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    puzzle_file: Option<PathBuf>,
    timeout: Option<u64>,
    format: Option<OutputFormat>,
    output_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    eprintln!("{}", ColorOutput::info("🔢 Starting alphametic solver"));

    let mut settings = load_settings(&config_path)?;

    // Apply CLI overrides
    let cli_overrides = CliOverrides {
        puzzle_file,
        timeout_seconds: timeout,
        format,
        output_directory: output_dir,
    };
    settings.merge_with_cli(&cli_overrides);

    if verbose {
        eprintln!("Configuration:");
        eprintln!("  Puzzle file: {}", settings.input.puzzle_file.display());
        match settings.search.timeout_seconds {
            Some(seconds) => eprintln!("  Timeout: {}s", seconds),
            None => eprintln!("  Timeout: none"),
        }
        eprintln!("  Format: {:?}", settings.output.format);
        eprintln!();
    }

    settings
        .validate()
        .context("Configuration validation failed")?;

    let problem =
        AlphameticProblem::new(settings.clone()).context("Failed to create problem")?;

    if verbose {
        eprintln!("{}", problem.analyze());
    }

    let report = problem.solve().context("Failed to solve puzzle")?;

    // Search cost diagnostics stay on stderr; stdout carries the result.
    eprintln!("Time elapsed: {} ms", report.elapsed.as_millis());
    eprintln!("Checks performed: {}", report.attempts);

    match settings.output.format {
        OutputFormat::Text => print!("{}", ReportFormatter::format_report(&report)),
        OutputFormat::Json => println!("{}", ReportFormatter::json_report(&report)?),
    }

    match report.outcome {
        SolveOutcome::Solved(_) => {
            eprintln!("{}", ColorOutput::success("✅ Solved"));
        }
        SolveOutcome::Exhausted => {
            eprintln!("{}", ColorOutput::warning("❌ No solution exists"));
        }
        SolveOutcome::TimedOut => {
            eprintln!("{}", ColorOutput::warning("⏰ Search timed out"));
        }
    }

    if let Some(ref output_directory) = settings.output.output_directory {
        let path = ReportFormatter::save_report(&report, output_directory, &settings.output.format)
            .context("Failed to save report")?;
        eprintln!(
            "{}",
            ColorOutput::success(&format!("Report saved to {}", path.display()))
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let puzzle_dir = directory.join("puzzles");

    for dir in [&config_dir, &puzzle_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Create example puzzles
    create_example_puzzles(&puzzle_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", puzzle_dir.display());

    // Create example configuration variants
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // A bounded run against a small puzzle
    let mut timed_config = Settings::default();
    timed_config.input.puzzle_file = PathBuf::from("puzzles/two_two_four.txt");
    timed_config.search.timeout_seconds = Some(30);
    timed_config.to_file(&examples_dir.join("timed.yaml"))?;

    // Machine-readable output saved to disk
    let mut json_config = Settings::default();
    json_config.output.format = OutputFormat::Json;
    json_config.output.output_directory = Some(PathBuf::from("output/solutions"));
    json_config.to_file(&examples_dir.join("json_output.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your puzzles to {}", puzzle_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn check_command(
    config_path: PathBuf,
    puzzle_file: Option<PathBuf>,
    assignment: String,
) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Checking assignment..."));

    let settings = load_settings(&config_path)?;
    let puzzle_path = puzzle_file.unwrap_or_else(|| settings.input.puzzle_file.clone());
    let puzzle = load_puzzle_from_file(&puzzle_path)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;

    let assignment: Assignment = assignment
        .parse()
        .context("Failed to parse assignment (expected e.g. \"S=9,E=5\")")?;

    let validator = SolutionValidator::new();
    let result = validator.validate(&puzzle, &assignment);

    println!("{}", result);

    if result.is_valid {
        for line in ReportFormatter::substituted_lines(&puzzle, &assignment) {
            println!("{}", line);
        }
        println!("{}", ColorOutput::success("✅ Assignment is valid!"));
    } else {
        println!("{}", ColorOutput::error("❌ Assignment is invalid"));
    }

    Ok(())
}

fn analyze_command(config_path: PathBuf, puzzle_file: Option<PathBuf>) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing puzzle..."));

    let settings = load_settings(&config_path)?;
    let puzzle_path = puzzle_file.unwrap_or_else(|| settings.input.puzzle_file.clone());
    let puzzle = load_puzzle_from_file(&puzzle_path)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;

    println!("Puzzle:");
    for line in puzzle.lines() {
        println!("  {}", line);
    }
    println!();

    let registry = LetterRegistry::build(puzzle.words());
    let problem = AlphameticProblem::with_puzzle(settings, puzzle);

    println!("{}", problem.analyze());
    println!("{}", registry.statistics());

    Ok(())
}
