use async_trait::async_trait;
use vtu_core::{
    AirtimeRequest, AuthSession, ChangePasswordRequest, DataPlan, DataPurchaseRequest,
    ElectricityRequest, Transaction, UpdateAccountRequest, User, VtuError,
};

/// One outbound request, fully described by the interpreter.
///
/// Every completed flow produces exactly one of these; the backend worker
/// executes it and posts the matching [`ApiOutcome`] back as an event.
#[derive(Debug, Clone)]
pub enum ApiCall {
    Login { email: String, password: String },
    Signup { username: String, email: String, password: String },
    Logout,
    FetchBalance,
    FetchProfile,
    FetchHistory,
    FetchPlans,
    BuyData(DataPurchaseRequest),
    BuyAirtime(AirtimeRequest),
    BuyElectricity(ElectricityRequest),
    UpdateAccount(UpdateAccountRequest),
    ChangePassword(ChangePasswordRequest),
}

/// Result of a backend call, one variant per [`ApiCall`].
#[derive(Debug, Clone)]
pub enum ApiOutcome {
    Login(Result<AuthSession, VtuError>),
    Signup(Result<(), VtuError>),
    Logout,
    Balance(Result<User, VtuError>),
    Profile(Result<User, VtuError>),
    History(Result<Vec<Transaction>, VtuError>),
    Plans(Result<Vec<DataPlan>, VtuError>),
    BuyData(Result<(), VtuError>),
    BuyAirtime(Result<(), VtuError>),
    BuyElectricity(Result<(), VtuError>),
    UpdateAccount(Result<User, VtuError>),
    ChangePassword(Result<(), VtuError>),
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn execute(&self, call: ApiCall) -> ApiOutcome;
}

pub type BackendBox = Box<dyn Backend>;
