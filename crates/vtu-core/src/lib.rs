//! Client library for the VTU Connect value-added-services backend.
//!
//! This crate owns everything below the terminal surface: the typed HTTP
//! client for the remote collaborator, the JSON wire types, the static
//! reference catalog of mobile carriers and electricity providers, and the
//! in-process session store. It knows nothing about how results are
//! rendered; callers receive plain data or a [`VtuError`] carrying the
//! backend's own failure message.

pub mod api;
pub mod catalog;
pub mod errors;
pub mod session;

pub use api::client::ApiClient;
pub use api::types::{
    AirtimeRequest, AuthSession, ChangePasswordRequest, DataPlan, DataPurchaseRequest,
    ElectricityRequest, MeterType, Transaction, TransactionStatus, UpdateAccountRequest, User,
};
pub use catalog::{Carrier, Disco};
pub use errors::VtuError;
pub use session::Session;
