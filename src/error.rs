use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("invalid host {0:?}")]
    InvalidHost(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthorized")]
    Unauthorized(u16),

    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("couldn't create auth request: {0}")]
    Client(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to connect to recognition engine: {0}")]
    Connect(String),

    #[error("timed out connecting to recognition engine")]
    Timeout,

    #[error("failed to send to recognition engine: {0}")]
    Send(String),

    #[error("failed to receive from recognition engine: {0}")]
    Receive(String),

    #[error("recognition engine error: {0}")]
    Protocol(String),

    #[error("recognition session closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum SessionSetupError {
    #[error("starting speech recognition failed: {0}")]
    Open(#[source] EngineError),

    #[error("setting up dictation session failed: {0}")]
    Configure(#[source] EngineError),
}

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("failed to read audio part: {0}")]
    Multipart(String),

    #[error("failed to forward audio chunk: {0}")]
    Send(#[source] EngineError),
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("failed to marshal response JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures that occur before the response headers are committed.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("failed to open reader: {0}")]
    Multipart(String),

    #[error(transparent)]
    SessionSetup(#[from] SessionSetupError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Routing(_) | GatewayError::Multipart(_) => StatusCode::BAD_REQUEST,
            GatewayError::Auth(_) => StatusCode::UNAUTHORIZED,
            GatewayError::SessionSetup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        (status, self.to_string()).into_response()
    }
}
