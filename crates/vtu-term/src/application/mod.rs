//! Application layer orchestrating the terminal interface.
//!
//! This module handles command-line parsing and the main UI loop,
//! coordinating between the domain logic and infrastructure components.

pub mod cli;
pub mod ui;
