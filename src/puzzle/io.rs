//! File I/O operations for alphametic puzzles

use super::{Puzzle, Word};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a puzzle from a text file: one word per line, last word is the
/// result of the addition. Non-alphabetic characters are ignored, and
/// lines without letters contribute no word but are kept for output.
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P) -> Result<Puzzle> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    parse_puzzle_from_string(&content)
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.as_ref().display()))
}

/// Parse a puzzle from a string, keeping every original line verbatim.
pub fn parse_puzzle_from_string(content: &str) -> Result<Puzzle> {
    let lines: Vec<String> = content.lines().map(|line| line.to_string()).collect();
    let words: Vec<Word> = lines.iter().filter_map(|line| Word::from_line(line)).collect();

    Ok(Puzzle::new(lines, words)?)
}

/// Save a puzzle back to a text file, one original line per line.
pub fn save_puzzle_to_file<P: AsRef<Path>>(puzzle: &Puzzle, path: P) -> Result<()> {
    let mut content = puzzle.lines().join("\n");
    content.push('\n');

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write puzzle to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example puzzle files for testing and setup.
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // The classic puzzle with a unique solution: 9567 + 1085 = 10652.
    let send_more_money = "  SEND\n+ MORE\n------\n MONEY\n";
    std::fs::write(dir.join("send_more_money.txt"), send_more_money)
        .context("Failed to write send_more_money.txt")?;

    let two_two_four = "  TWO\n+ TWO\n-----\n FOUR\n";
    std::fs::write(dir.join("two_two_four.txt"), two_two_four)
        .context("Failed to write two_two_four.txt")?;

    let odd_odd_even = "  ODD\n+ ODD\n-----\n EVEN\n";
    std::fs::write(dir.join("odd_odd_even.txt"), odd_odd_even)
        .context("Failed to write odd_odd_even.txt")?;

    Ok(())
}
