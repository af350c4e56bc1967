use crate::auth::TokenValidator;
use crate::engine::RecognitionEngine;
use std::sync::Arc;

/// Recognition model used when none is configured
pub const DEFAULT_MODEL: &str = "latest_short";

/// Shared application state for HTTP handlers
///
/// Holds the process-wide collaborators. Both are safe to use from any
/// number of concurrent requests; nothing per-request lives here.
#[derive(Clone)]
pub struct AppState {
    /// Token validation service client
    pub validator: Arc<dyn TokenValidator>,

    /// Streaming recognition engine handle
    pub engine: Arc<dyn RecognitionEngine>,

    /// Recognition model requested for every session
    pub model: String,
}

impl AppState {
    pub fn new(validator: Arc<dyn TokenValidator>, engine: Arc<dyn RecognitionEngine>) -> Self {
        Self {
            validator,
            engine,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
