//! Configuration management for the alphametic puzzle solver

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputFormat, SearchConfig, Settings,
};
