use std::sync::RwLock;
use std::time::Duration;

use log::debug;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use super::types::{
    AirtimeRequest, AuthSession, ChangePasswordRequest, DataPlan, DataPurchaseRequest,
    ElectricityRequest, ErrorBody, HistoryResponse, LoginRequest, PlansResponse, ProfileResponse,
    SignupRequest, Transaction, UpdateAccountRequest, User,
};
use crate::errors::VtuError;

/// HTTP client for the VTU Connect backend.
///
/// Every operation issues a single JSON request, no retries. The bearer
/// token is stored internally: `login` installs it, `logout` clears it, and
/// every request attaches it when present. Non-2xx responses are mapped to
/// [`VtuError::Api`] carrying the backend's `message` field verbatim.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ApiClient {
        ApiClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    /// Replaces the transport-default timeout. Single attempt semantics are
    /// unchanged; this only bounds how long that attempt may take.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<ApiClient, VtuError> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap() = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, VtuError> {
        let session: AuthSession = self
            .execute(
                self.request(Method::POST, "/auth/login")
                    .json(&LoginRequest { email, password }),
            )
            .await?;
        self.set_token(Some(session.token.clone()));
        Ok(session)
    }

    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), VtuError> {
        self.execute_unit(self.request(Method::POST, "/auth/signup").json(&SignupRequest {
            username,
            email,
            password,
        }))
        .await
    }

    pub fn logout(&self) {
        self.set_token(None);
    }

    pub async fn profile(&self) -> Result<User, VtuError> {
        let res: ProfileResponse = self.execute(self.request(Method::GET, "/auth/profile")).await?;
        Ok(res.user)
    }

    pub async fn update_account(&self, request: &UpdateAccountRequest) -> Result<User, VtuError> {
        let res: ProfileResponse = self
            .execute(self.request(Method::PUT, "/auth/update").json(request))
            .await?;
        Ok(res.user)
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), VtuError> {
        self.execute_unit(
            self.request(Method::POST, "/auth/change-password")
                .json(request),
        )
        .await
    }

    pub async fn data_plans(&self) -> Result<Vec<DataPlan>, VtuError> {
        let res: PlansResponse = self.execute(self.request(Method::GET, "/data/plans")).await?;
        Ok(res.plans)
    }

    pub async fn buy_data(&self, request: &DataPurchaseRequest) -> Result<(), VtuError> {
        self.execute_unit(self.request(Method::POST, "/data/purchase").json(request))
            .await
    }

    pub async fn buy_airtime(&self, request: &AirtimeRequest) -> Result<(), VtuError> {
        self.execute_unit(self.request(Method::POST, "/airtime").json(request))
            .await
    }

    pub async fn buy_electricity(&self, request: &ElectricityRequest) -> Result<(), VtuError> {
        self.execute_unit(self.request(Method::POST, "/electricity/buy").json(request))
            .await
    }

    pub async fn transaction_history(&self) -> Result<Vec<Transaction>, VtuError> {
        let res: HistoryResponse = self
            .execute(self.request(Method::GET, "/transactions/history"))
            .await?;
        Ok(res.transactions)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let mut req = self.client.request(method, url);
        if let Some(token) = self.token.read().unwrap().as_ref() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, VtuError> {
        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let message = res
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message.filter(|message| !message.is_empty()))
                .unwrap_or_else(|| format!("API request failed: {}", status.as_u16()));
            debug!("backend error ({}): {}", status.as_u16(), message);
            return Err(VtuError::Api(message));
        }
        Ok(res.json::<T>().await?)
    }

    async fn execute_unit(&self, req: RequestBuilder) -> Result<(), VtuError> {
        self.execute::<serde_json::Value>(req).await.map(|_| ())
    }
}
