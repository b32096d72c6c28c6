//! Infrastructure layer providing external integrations.
//!
//! This module contains the concrete backend client implementations the
//! domain layer talks to through the [`crate::domain::models::Backend`] trait.

pub mod clients;
