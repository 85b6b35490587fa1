//! Display and output formatting utilities

use crate::alphametic::{SolutionMetadata, SolveOutcome, SolveReport};
use crate::config::OutputFormat;
use crate::puzzle::Puzzle;
use crate::search::Assignment;
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Format solve reports for display
pub struct ReportFormatter;

/// Machine-readable rendering of a solve report. The solution fields are
/// present only on the `solved` outcome.
#[derive(Debug, Serialize)]
struct JsonReport {
    equation: String,
    lines: Vec<String>,
    outcome: &'static str,
    attempts: u64,
    elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignment: Option<Assignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    substituted_lines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    solved_equation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<SolutionMetadata>,
}

impl ReportFormatter {
    /// Echo the puzzle's original lines with every alphabetic character
    /// replaced by its assigned digit. Non-alphabetic characters and
    /// unassigned letters pass through unchanged.
    pub fn substituted_lines(puzzle: &Puzzle, assignment: &Assignment) -> Vec<String> {
        puzzle
            .lines()
            .iter()
            .map(|line| {
                line.chars()
                    .map(|c| {
                        if c.is_alphabetic() {
                            assignment
                                .digit(c)
                                .and_then(|digit| char::from_digit(u32::from(digit), 10))
                                .unwrap_or(c)
                        } else {
                            c
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Format a solve report for console output
    pub fn format_report(report: &SolveReport) -> String {
        let mut output = String::new();

        match &report.outcome {
            SolveOutcome::Solved(solution) => {
                for line in Self::substituted_lines(&report.puzzle, &solution.assignment) {
                    output.push_str(&line);
                    output.push('\n');
                }
                output.push('\n');
                output.push_str(&format!("Assignment: {}\n", solution.assignment));
                output.push_str(&format!("{}\n", solution.solved_equation()));
            }
            SolveOutcome::Exhausted => {
                output.push_str(&format!(
                    "No solution exists for {}: all {} assignments were checked.\n",
                    report.puzzle, report.attempts
                ));
            }
            SolveOutcome::TimedOut => {
                output.push_str(&format!(
                    "Search for {} timed out after {} checks; no solution found yet.\n",
                    report.puzzle, report.attempts
                ));
            }
        }

        output
    }

    /// Render a solve report as pretty-printed JSON
    pub fn json_report(report: &SolveReport) -> Result<String> {
        let mut json = JsonReport {
            equation: report.puzzle.to_string(),
            lines: report.puzzle.lines().to_vec(),
            outcome: match report.outcome {
                SolveOutcome::Solved(_) => "solved",
                SolveOutcome::Exhausted => "exhausted",
                SolveOutcome::TimedOut => "timed_out",
            },
            attempts: report.attempts,
            elapsed_ms: report.elapsed.as_millis() as u64,
            assignment: None,
            substituted_lines: None,
            solved_equation: None,
            metadata: None,
        };

        if let SolveOutcome::Solved(ref solution) = report.outcome {
            json.assignment = Some(solution.assignment.clone());
            json.substituted_lines = Some(Self::substituted_lines(
                &report.puzzle,
                &solution.assignment,
            ));
            json.solved_equation = Some(solution.solved_equation());
            json.metadata = Some(solution.metadata.clone());
        }

        Ok(serde_json::to_string_pretty(&json)?)
    }

    /// Save a solve report to a file in the given format, creating the
    /// directory if needed. Returns the path written.
    pub fn save_report<P: AsRef<Path>>(
        report: &SolveReport,
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        match format {
            OutputFormat::Text => {
                let path = output_dir.join("solution.txt");
                std::fs::write(&path, Self::format_report(report))?;
                Ok(path)
            }
            OutputFormat::Json => {
                let path = output_dir.join("solution.json");
                std::fs::write(&path, Self::json_report(report)?)?;
                Ok(path)
            }
        }
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
        }
    }
}
