//! Typed HTTP access to the VTU Connect backend.

pub mod client;
pub mod types;
