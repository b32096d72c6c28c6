//! Configuration management for the terminal interface.
//!
//! Defaults are overlaid by an optional TOML config file, which is overlaid
//! by command-line arguments, with every key addressable by the same
//! kebab-case name in all three layers.

mod config;

pub use config::*;
