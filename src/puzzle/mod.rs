//! Puzzle domain: words, the puzzle itself, and file I/O

pub mod io;
pub mod puzzle;
pub mod word;

pub use io::{
    create_example_puzzles, load_puzzle_from_file, parse_puzzle_from_string, save_puzzle_to_file,
};
pub use puzzle::{Puzzle, PuzzleError};
pub use word::Word;
