// Shared fakes for integration tests
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request};
use dictation_bridge::engine::{EngineSide, EngineStream, RecognitionEngine, STREAM_CAPACITY};
use dictation_bridge::{AuthError, EngineError, RecognitionEvent, StreamingRequest, TokenValidator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const REQUEST_BOUNDARY: &str = "test-request-boundary";

/// Accepts exactly one token and records every token it was asked about
pub struct FakeValidator {
    pub valid_token: String,
    pub seen: Mutex<Vec<String>>,
}

impl FakeValidator {
    pub fn accepting(token: &str) -> Arc<Self> {
        Arc::new(Self {
            valid_token: token.to_string(),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl TokenValidator for FakeValidator {
    async fn validate(&self, token: &str) -> Result<(), AuthError> {
        self.seen.lock().unwrap().push(token.to_string());
        if token == self.valid_token {
            Ok(())
        } else {
            Err(AuthError::Unauthorized(401))
        }
    }
}

/// Engine that records requests, waits for a number of audio chunks, then
/// plays back a fixed list of events and ends the stream
pub struct ScriptedEngine {
    pub script: Vec<RecognitionEvent>,
    pub wait_for_audio: usize,
    pub fail_open: bool,
    /// Send a receive error after this many events, then keep playing
    pub error_after: Option<usize>,
    /// Keep the event stream open and drain requests until the gateway
    /// drops its sender
    pub hold_open: bool,
    pub opened: AtomicUsize,
    pub received: Arc<Mutex<Vec<StreamingRequest>>>,
    pub requests_closed: Arc<Notify>,
}

impl ScriptedEngine {
    fn with_script(script: Vec<RecognitionEvent>, wait_for_audio: usize) -> Self {
        Self {
            script,
            wait_for_audio,
            fail_open: false,
            error_after: None,
            hold_open: false,
            opened: AtomicUsize::new(0),
            received: Arc::new(Mutex::new(Vec::new())),
            requests_closed: Arc::new(Notify::new()),
        }
    }

    pub fn new(script: Vec<RecognitionEvent>, wait_for_audio: usize) -> Arc<Self> {
        Arc::new(Self::with_script(script, wait_for_audio))
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            fail_open: true,
            ..Self::with_script(Vec::new(), 0)
        })
    }

    pub fn failing_after(
        script: Vec<RecognitionEvent>,
        events_before_error: usize,
        wait_for_audio: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            error_after: Some(events_before_error),
            ..Self::with_script(script, wait_for_audio)
        })
    }

    pub fn held_open(wait_for_audio: usize) -> Arc<Self> {
        Arc::new(Self {
            hold_open: true,
            ..Self::with_script(Vec::new(), wait_for_audio)
        })
    }

    pub fn sessions_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<StreamingRequest> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RecognitionEngine for ScriptedEngine {
    async fn streaming_recognize(&self) -> Result<EngineStream, EngineError> {
        if self.fail_open {
            return Err(EngineError::Connect("connection refused".to_string()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);

        let (stream, side) = EngineStream::channel(STREAM_CAPACITY);
        let script = self.script.clone();
        let wait_for_audio = self.wait_for_audio;
        let received = Arc::clone(&self.received);
        let error_after = self.error_after;
        let hold_open = self.hold_open;
        let requests_closed = Arc::clone(&self.requests_closed);

        tokio::spawn(async move {
            let EngineSide {
                mut requests,
                events,
            } = side;

            // The config frame is buffered ahead of any audio
            if let Some(config) = requests.recv().await {
                received.lock().unwrap().push(config);
            }

            let mut audio = 0;
            while audio < wait_for_audio {
                match requests.recv().await {
                    Some(request) => {
                        if matches!(request, StreamingRequest::Audio(_)) {
                            audio += 1;
                        }
                        received.lock().unwrap().push(request);
                    }
                    None => break,
                }
            }

            for (sent, event) in script.into_iter().enumerate() {
                if error_after == Some(sent) {
                    let error = EngineError::Receive("connection reset".to_string());
                    if events.send(Err(error)).await.is_err() {
                        return;
                    }
                }
                if events.send(Ok(event)).await.is_err() {
                    return;
                }
            }

            if hold_open {
                while let Some(request) = requests.recv().await {
                    received.lock().unwrap().push(request);
                }
                requests_closed.notify_one();
                drop(events);
            }
        });

        Ok(stream)
    }
}

/// Build a recognition event from `(word, confidence)` groups, one result per group
pub fn event(groups: &[&[(&str, f32)]]) -> RecognitionEvent {
    let results = groups
        .iter()
        .map(|words| {
            let words: Vec<serde_json::Value> = words
                .iter()
                .map(|(w, c)| serde_json::json!({"word": w, "confidence": c}))
                .collect();
            serde_json::json!({"alternatives": [{"transcript": "", "confidence": 0.0, "words": words}]})
        })
        .collect::<Vec<_>>();

    serde_json::from_value(serde_json::json!({ "results": results })).unwrap()
}

/// Encode one form part, without any closing delimiter
pub fn multipart_part(name: &str, data: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n",
        REQUEST_BOUNDARY, name
    )
    .into_bytes();
    part.extend_from_slice(data);
    part.extend_from_slice(b"\r\n");
    part
}

/// Encode `parts` as a multipart/form-data body using [`REQUEST_BOUNDARY`]
pub fn multipart_body(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, data) in parts {
        body.extend_from_slice(&multipart_part(name, data));
    }
    body.extend_from_slice(format!("--{}--\r\n", REQUEST_BOUNDARY).as_bytes());
    body
}

pub fn dictation_request(host: &str, body: Vec<u8>) -> Request<Body> {
    streaming_dictation_request(host, Body::from(body))
}

pub fn streaming_dictation_request(host: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/NmspServlet/")
        .header(header::HOST, host)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", REQUEST_BOUNDARY),
        )
        .body(body)
        .unwrap()
}
