//! Hostname-encoded tenant routing.
//!
//! Dictation clients address the service as `{token}-{language}.<anything>`,
//! so the credentials for a request are carried entirely in its `Host`.

use crate::error::RoutingError;

/// Access token and language code extracted from a request hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub language: String,
}

/// Parse `{token}-{language}` out of the first label of `host`.
///
/// The label is split at its first `-` only, so language codes such as
/// `en-US` survive intact. Neither part is validated further.
pub fn parse_host(host: &str) -> Result<Credentials, RoutingError> {
    let label = host.split('.').next().unwrap_or_default();

    match label.split_once('-') {
        Some((token, language)) if !token.is_empty() && !language.is_empty() => Ok(Credentials {
            token: token.to_string(),
            language: language.to_string(),
        }),
        _ => Err(RoutingError::InvalidHost(host.to_string())),
    }
}
