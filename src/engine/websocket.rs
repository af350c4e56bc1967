use super::messages::{RecognitionEvent, RecognitionResult, StreamingRecognitionConfig, StreamingRequest};
use super::stream::{EngineSide, EngineStream, STREAM_CAPACITY};
use super::RecognitionEngine;
use crate::config::EngineConfig;
use crate::error::EngineError;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{header::AUTHORIZATION, HeaderValue};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, WebSocketStream};
use tracing::{debug, info, warn};

/// Recognition engine reached over one WebSocket connection per session.
///
/// Wire format:
/// - first client message: text `{"streaming_config": {...}}`
/// - every later client message: binary audio
/// - server text messages: a [`RecognitionEvent`], or `{"error": {...}}`
/// - server close / EOF: end of results
pub struct WebSocketEngine {
    url: String,
    api_key: Option<String>,
    connect_timeout: Duration,
}

#[derive(Serialize)]
struct ConfigMessage<'a> {
    streaming_config: &'a StreamingRecognitionConfig,
}

#[derive(Debug, Deserialize)]
struct EngineMessage {
    #[serde(default)]
    results: Vec<RecognitionResult>,
    #[serde(default)]
    error: Option<EngineFault>,
}

#[derive(Debug, Deserialize)]
struct EngineFault {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl WebSocketEngine {
    pub fn new(url: impl Into<String>, api_key: Option<String>, connect_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            api_key,
            connect_timeout,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.url.clone(),
            config.api_key.clone(),
            config.connect_timeout(),
        )
    }
}

#[async_trait::async_trait]
impl RecognitionEngine for WebSocketEngine {
    async fn streaming_recognize(&self) -> Result<EngineStream, EngineError> {
        let mut request = self
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| EngineError::Connect(e.to_string()))?;

        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| EngineError::Connect(e.to_string()))?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        let (socket, _) = timeout(self.connect_timeout, connect_async(request))
            .await
            .map_err(|_| EngineError::Timeout)?
            .map_err(|e| EngineError::Connect(e.to_string()))?;

        debug!("Connected to recognition engine at {}", self.url);

        let (stream, side) = EngineStream::channel(STREAM_CAPACITY);
        tokio::spawn(run_connection(socket, side));

        Ok(stream)
    }
}

/// Pump requests out and events in until the engine ends the exchange or
/// the gateway drops its event receiver.
///
/// When the gateway stops sending, the socket is left open and no
/// end-of-audio marker is written; the engine decides when results end.
async fn run_connection<S>(socket: WebSocketStream<S>, side: EngineSide)
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let EngineSide {
        mut requests,
        events,
    } = side;
    let (mut write, mut read) = socket.split();
    let mut sending = true;

    loop {
        tokio::select! {
            request = requests.recv(), if sending => match request {
                Some(request) => {
                    let message = match encode_request(&request) {
                        Ok(message) => message,
                        Err(e) => {
                            warn!("Dropping request that could not be encoded: {}", e);
                            continue;
                        }
                    };
                    if let Err(e) = write.send(message).await {
                        warn!("Failed to write to recognition engine: {}", e);
                        requests.close();
                        sending = false;
                    }
                }
                None => {
                    debug!("Audio input finished, awaiting remaining results");
                    sending = false;
                }
            },
            frame = read.next() => match frame {
                None => break,
                Some(Err(e)) => {
                    let _ = events.send(Err(EngineError::Receive(e.to_string()))).await;
                    break;
                }
                Some(Ok(Message::Text(text))) => {
                    let event = decode_event(&text);
                    let fatal = event.is_err();
                    if events.send(event).await.is_err() || fatal {
                        break;
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    debug!("Recognition engine closed the stream: {:?}", frame);
                    break;
                }
                Some(Ok(_)) => {}
            },
            _ = events.closed() => {
                debug!("Session consumer went away, dropping engine connection");
                break;
            }
        }
    }

    info!("Recognition engine connection finished");
}

fn encode_request(request: &StreamingRequest) -> Result<Message, EngineError> {
    match request {
        StreamingRequest::Config(config) => {
            let payload = serde_json::to_string(&ConfigMessage {
                streaming_config: config,
            })
            .map_err(|e| EngineError::Send(e.to_string()))?;
            Ok(Message::Text(payload))
        }
        StreamingRequest::Audio(bytes) => Ok(Message::Binary(bytes.to_vec())),
    }
}

fn decode_event(text: &str) -> Result<RecognitionEvent, EngineError> {
    let message: EngineMessage = serde_json::from_str(text).map_err(|e| {
        let preview: String = text.chars().take(200).collect();
        EngineError::Protocol(format!("invalid payload: {} (body: {})", e, preview))
    })?;

    if let Some(fault) = message.error {
        return Err(EngineError::Protocol(format!(
            "{}: {}",
            fault.code, fault.message
        )));
    }

    Ok(RecognitionEvent {
        results: message.results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    #[test]
    fn test_encode_config_as_text() {
        let config = StreamingRecognitionConfig::dictation("en-US", "latest_short");
        let message = encode_request(&StreamingRequest::Config(config)).unwrap();

        match message {
            Message::Text(text) => {
                assert!(text.starts_with("{\"streaming_config\":"));
                assert!(text.contains("\"language_code\":\"en-US\""));
            }
            other => panic!("expected text message, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_audio_as_binary() {
        let message =
            encode_request(&StreamingRequest::Audio(Bytes::from_static(&[1, 2, 3]))).unwrap();
        assert_eq!(message, Message::Binary(vec![1, 2, 3]));
    }

    #[test]
    fn test_decode_engine_error() {
        let err = decode_event(r#"{"error": {"code": 3, "message": "bad language"}}"#).unwrap_err();
        assert!(err.to_string().contains("bad language"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_event("not json"),
            Err(EngineError::Protocol(_))
        ));
    }
}
