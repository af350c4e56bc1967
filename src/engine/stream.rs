use super::messages::{RecognitionEvent, StreamingRequest};
use crate::error::EngineError;
use tokio::sync::mpsc;

/// Default depth of each direction of an engine stream
pub const STREAM_CAPACITY: usize = 64;

/// Gateway half of one full-duplex recognition exchange.
///
/// Requests are delivered to the engine in the order they were sent and
/// events are yielded in the order the engine produced them.
pub struct EngineStream {
    pub requests: RequestSender,
    pub events: EventReceiver,
}

/// Engine half of a stream built with [`EngineStream::channel`].
pub struct EngineSide {
    pub requests: mpsc::Receiver<StreamingRequest>,
    pub events: mpsc::Sender<Result<RecognitionEvent, EngineError>>,
}

impl EngineStream {
    /// Build a connected pair of stream halves.
    pub fn channel(capacity: usize) -> (EngineStream, EngineSide) {
        let (request_tx, request_rx) = mpsc::channel(capacity);
        let (event_tx, event_rx) = mpsc::channel(capacity);

        (
            EngineStream {
                requests: RequestSender { tx: request_tx },
                events: EventReceiver { rx: event_rx },
            },
            EngineSide {
                requests: request_rx,
                events: event_tx,
            },
        )
    }
}

pub struct RequestSender {
    tx: mpsc::Sender<StreamingRequest>,
}

impl RequestSender {
    pub async fn send(&self, request: StreamingRequest) -> Result<(), EngineError> {
        self.tx.send(request).await.map_err(|_| EngineError::Closed)
    }
}

pub struct EventReceiver {
    rx: mpsc::Receiver<Result<RecognitionEvent, EngineError>>,
}

impl EventReceiver {
    /// Next event, or `None` once the engine has finished producing results.
    pub async fn recv(&mut self) -> Option<Result<RecognitionEvent, EngineError>> {
        self.rx.recv().await
    }
}
