//! Streaming speech recognition engine boundary
//!
//! This module provides:
//! - The fixed dictation recognition configuration and engine event types
//! - `EngineStream`, an ordered full-duplex handle for one session
//! - `RecognitionEngine`, the long-lived, shareable engine handle
//! - `WebSocketEngine`, the production engine client

pub mod messages;
mod stream;
mod websocket;

pub use messages::{
    Alternative, AudioEncoding, RecognitionConfig, RecognitionEvent, RecognitionResult,
    StreamingRecognitionConfig, StreamingRequest, WordInfo,
};
pub use stream::{EngineSide, EngineStream, EventReceiver, RequestSender, STREAM_CAPACITY};
pub use websocket::WebSocketEngine;

use crate::error::EngineError;

/// Long-lived handle to a streaming recognition engine.
///
/// One value is shared by all concurrent requests; each call opens an
/// independent exchange.
#[async_trait::async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Open one full-duplex recognition exchange
    async fn streaming_recognize(&self) -> Result<EngineStream, EngineError>;
}
