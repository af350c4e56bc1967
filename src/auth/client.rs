use super::TokenValidator;
use crate::config::AuthConfig;
use crate::error::AuthError;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

/// Validates tokens with one `GET` per call, bearer-authenticated.
///
/// The underlying `reqwest::Client` pools connections and is shared by every
/// request the gateway serves.
pub struct HttpTokenValidator {
    client: reqwest::Client,
    url: String,
}

impl HttpTokenValidator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Client(e.to_string()))?;

        let url = url.into();
        info!("Token validation endpoint: {} (timeout {:?})", url, timeout);

        Ok(Self { client, url })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        Self::new(config.url.clone(), config.timeout())
    }
}

#[async_trait::async_trait]
impl TokenValidator for HttpTokenValidator {
    async fn validate(&self, token: &str) -> Result<(), AuthError> {
        let response = self.client.get(&self.url).bearer_auth(token).send().await?;

        let status = response.status();
        debug!("Token validation responded {}", status);

        if status != StatusCode::OK {
            return Err(AuthError::Unauthorized(status.as_u16()));
        }

        Ok(())
    }
}
