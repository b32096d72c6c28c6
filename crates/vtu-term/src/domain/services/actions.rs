use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::ApiCall;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;

pub struct BackendService {}

impl BackendService {
    /// Drains queued calls one at a time and posts each outcome back as an
    /// event. Requests are strictly sequential; the UI's input lock means at
    /// most one call is ever queued anyway.
    pub async fn start(
        backend: BackendBox,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<ApiCall>,
    ) -> Result<()> {
        while let Some(call) = rx.recv().await {
            tracing::debug!(?call, "dispatching backend call");
            let outcome = backend.execute(call).await;
            event_tx.send(Event::BackendResponse(outcome))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ApiOutcome, Backend};
    use async_trait::async_trait;
    use vtu_core::VtuError;

    struct MockBackend {}

    #[async_trait]
    impl Backend for MockBackend {
        async fn execute(&self, call: ApiCall) -> ApiOutcome {
            match call {
                ApiCall::Login { email, .. } => {
                    ApiOutcome::Login(Err(VtuError::Api(format!("NO_ACCOUNT: {email}"))))
                }
                _ => ApiOutcome::Logout,
            }
        }
    }

    #[tokio::test]
    async fn test_outcome_posted_back_as_event() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
        let (call_tx, mut call_rx) = mpsc::unbounded_channel::<ApiCall>();

        tokio::spawn(async move {
            BackendService::start(Box::new(MockBackend {}), event_tx, &mut call_rx)
                .await
                .unwrap();
        });

        call_tx
            .send(ApiCall::Login {
                email: "op@example.com".to_string(),
                password: "secret".to_string(),
            })
            .unwrap();

        match event_rx.recv().await.unwrap() {
            Event::BackendResponse(ApiOutcome::Login(Err(err))) => {
                assert_eq!(err.to_string(), "NO_ACCOUNT: op@example.com");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
