//! Access-token validation against the external token service

mod client;

pub use client::HttpTokenValidator;

use crate::error::AuthError;

/// Decides whether an access token may open a dictation session.
#[async_trait::async_trait]
pub trait TokenValidator: Send + Sync {
    /// Succeeds only if the token service accepted `token`.
    async fn validate(&self, token: &str) -> Result<(), AuthError>;
}
