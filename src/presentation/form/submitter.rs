use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::presentation::handlers::registration_handler::{RegisterRequest, RegistrationResponse};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),
}

/// Client side of the registration endpoint
#[async_trait]
pub trait RegistrationSubmitter: Send + Sync {
    async fn submit(&self, request: &RegisterRequest) -> Result<RegistrationResponse, SubmitError>;
}

/// Posts registrations to a running server over HTTP
#[derive(Clone)]
pub struct HttpRegistrationSubmitter {
    client: Client,
    endpoint: String,
}

impl HttpRegistrationSubmitter {
    /// `base_url` is the server origin, e.g. "http://localhost:8080"
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/seminar/register", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RegistrationSubmitter for HttpRegistrationSubmitter {
    async fn submit(&self, request: &RegisterRequest) -> Result<RegistrationResponse, SubmitError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            return Err(SubmitError::UnexpectedStatus(res.status().as_u16()));
        }

        res.json::<RegistrationResponse>()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))
    }
}
