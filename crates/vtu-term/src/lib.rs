//! Terminal user interface for the VTU Connect client.
//!
//! This crate presents the scripted "terminal operating system" surface over
//! the VTU Connect backend: a transcript of annotated lines, a single input
//! prompt, and a command interpreter that walks the user through multi-step
//! purchase and account flows, each ending in exactly one backend call.

pub mod application;
pub mod configuration;
pub mod domain;
pub mod infrastructure;

pub use application::ui::{destruct_terminal_for_panic, start_loop};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{ApiCall, ApiOutcome, Backend, BackendBox, Event, LineKind, Stage};
pub use domain::services::{AppState, BackendService, Interpreter};
pub use infrastructure::clients::HttpBackend;
