use crate::engine::{EngineStream, RecognitionEngine, StreamingRecognitionConfig, StreamingRequest};
use crate::error::SessionSetupError;
use crate::routing::Credentials;
use tracing::info;

/// Open a recognition session and send its configuration.
///
/// The configuration frame is always the first message on the stream.
/// Failures are not retried.
pub async fn open_session(
    engine: &dyn RecognitionEngine,
    credentials: &Credentials,
    model: &str,
) -> Result<EngineStream, SessionSetupError> {
    let stream = engine
        .streaming_recognize()
        .await
        .map_err(SessionSetupError::Open)?;

    let config = StreamingRecognitionConfig::dictation(credentials.language.as_str(), model);
    stream
        .requests
        .send(StreamingRequest::Config(config))
        .await
        .map_err(SessionSetupError::Configure)?;

    info!(
        "Recognition session open (language={}, model={})",
        credentials.language, model
    );

    Ok(stream)
}
