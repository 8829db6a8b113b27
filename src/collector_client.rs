use crate::{configuration::CollectorConfiguration, domain::SignupForwardPayload, error::FormatterExt};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};

/// Client for the external dashboard that is the system of record for signups.
#[derive(Debug, Clone)]
pub struct CollectorClient {
    http_client: Client,
    base_url: String,
    api_key: SecretString,
}

#[derive(thiserror::Error)]
pub enum RelayError {
    #[error("Collector rejected the signup with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("Failed to reach the collector")]
    Transport(#[from] reqwest::Error),
}

impl std::fmt::Debug for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_error_chain(self)
    }
}

impl CollectorClient {
    pub fn new(
        base_url: String,
        api_key: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: Client::builder().timeout(timeout).build()?,
            base_url,
            api_key,
        })
    }

    /// `None` when the relay is disabled by configuration.
    pub fn from_config(config: &CollectorConfiguration) -> Result<Option<Self>, reqwest::Error> {
        if !config.is_enabled() {
            return Ok(None);
        }

        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.timeout(),
        )
        .map(Some)
    }

    pub async fn submit_signup(&self, payload: &SignupForwardPayload<'_>) -> Result<(), RelayError> {
        let url = format!("{}/api/signups", self.base_url);

        let response = self
            .http_client
            .post(url)
            .bearer_auth(self.api_key.expose_secret())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(RelayError::Rejected { status, body });
        }

        Ok(())
    }
}

/// Forwards a signup at most once. Failures are logged and never returned,
/// the caller's acknowledgment must not depend on the collector.
#[tracing::instrument(name = "Relaying signup to the collector", skip_all)]
pub async fn relay_signup(client: Option<&CollectorClient>, payload: &SignupForwardPayload<'_>) {
    let Some(client) = client else {
        tracing::debug!("Collector is not configured, skipping relay");
        return;
    };

    if let Err(e) = client.submit_signup(payload).await {
        tracing::error!(exception.details = ?e, exception.message = %e, "Failed to relay signup");
    }
}
