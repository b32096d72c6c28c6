use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub wallet_balance: f64,
}

/// Successful login payload: the bearer token plus the profile it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProfileResponse {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataPlan {
    pub id: String,
    pub network: String,
    pub size: String,
    pub amount: f64,
    pub duration: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlansResponse {
    #[serde(default)]
    pub plans: Vec<DataPlan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Success => "SUCCESS",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Pending => "PENDING",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    pub reference: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub status: TransactionStatus,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub balance_before: Option<f64>,
    #[serde(default)]
    pub balance_after: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HistoryResponse {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Wire payload for `POST /data/purchase`. The backend wants the carrier's
/// numeric id serialized as a string here, unlike the airtime endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DataPurchaseRequest {
    pub network_id: String,
    pub mobile_number: String,
    pub plan_id: String,
    #[serde(rename = "Ported_number")]
    pub ported_number: bool,
}

/// Wire payload for `POST /airtime`. The `network_id` field carries the
/// carrier display name (e.g. "MTN"); that is what the backend matches on.
#[derive(Debug, Clone, Serialize)]
pub struct AirtimeRequest {
    pub network_id: String,
    pub phone: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeterType {
    Prepaid,
    Postpaid,
}

impl std::fmt::Display for MeterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeterType::Prepaid => write!(f, "Prepaid"),
            MeterType::Postpaid => write!(f, "Postpaid"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ElectricityRequest {
    pub disco_name: String,
    pub amount: u64,
    pub meter_number: String,
    #[serde(rename = "MeterType")]
    pub meter_type: MeterType,
    pub mobile_number: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
