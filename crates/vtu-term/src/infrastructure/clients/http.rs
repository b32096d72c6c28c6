use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use vtu_core::ApiClient;

use crate::configuration::{Config, ConfigKey};
use crate::domain::models::{ApiCall, ApiOutcome, Backend};

/// The real backend: maps each [`ApiCall`] onto the corresponding
/// [`ApiClient`] operation. The client owns the bearer token, so login and
/// logout are complete once the call returns.
pub struct HttpBackend {
    client: ApiClient,
}

impl HttpBackend {
    pub fn new() -> Result<HttpBackend> {
        let url = Config::get(ConfigKey::BackendUrl);
        let timeout = Config::get(ConfigKey::RequestTimeout).parse::<u64>()?;
        let client = ApiClient::new(&url).with_timeout(Duration::from_millis(timeout))?;

        return Ok(HttpBackend { client });
    }

    pub fn with_client(client: ApiClient) -> HttpBackend {
        return HttpBackend { client };
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn execute(&self, call: ApiCall) -> ApiOutcome {
        match call {
            ApiCall::Login { email, password } => {
                let result = self.client.login(&email, &password).await;
                if let Err(err) = &result {
                    tracing::error!(error = %err, "login failed");
                }
                return ApiOutcome::Login(result);
            }
            ApiCall::Signup {
                username,
                email,
                password,
            } => {
                return ApiOutcome::Signup(self.client.signup(&username, &email, &password).await);
            }
            ApiCall::Logout => {
                self.client.logout();
                return ApiOutcome::Logout;
            }
            ApiCall::FetchBalance => {
                return ApiOutcome::Balance(self.client.profile().await);
            }
            ApiCall::FetchProfile => {
                return ApiOutcome::Profile(self.client.profile().await);
            }
            ApiCall::FetchHistory => {
                return ApiOutcome::History(self.client.transaction_history().await);
            }
            ApiCall::FetchPlans => {
                return ApiOutcome::Plans(self.client.data_plans().await);
            }
            ApiCall::BuyData(request) => {
                return ApiOutcome::BuyData(self.client.buy_data(&request).await);
            }
            ApiCall::BuyAirtime(request) => {
                return ApiOutcome::BuyAirtime(self.client.buy_airtime(&request).await);
            }
            ApiCall::BuyElectricity(request) => {
                return ApiOutcome::BuyElectricity(self.client.buy_electricity(&request).await);
            }
            ApiCall::UpdateAccount(request) => {
                return ApiOutcome::UpdateAccount(self.client.update_account(&request).await);
            }
            ApiCall::ChangePassword(request) => {
                return ApiOutcome::ChangePassword(self.client.change_password(&request).await);
            }
        }
    }
}
