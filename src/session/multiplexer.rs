use super::formatter::ResponseFormatter;
use super::forwarder::ForwarderTask;
use super::frames::{FrameWriter, RESULT_FIELD};
use super::state::SessionState;
use crate::engine::{EventReceiver, RecognitionEvent};
use crate::error::FrameError;
use axum::body::Bytes;
use futures::Stream;
use std::convert::Infallible;
use tracing::{error, info, warn, Instrument, Span};

/// Turns recognition events into response frames, one frame per event,
/// as soon as each event arrives.
///
/// Owns the forwarder task for the same request and joins it before the
/// closing delimiter is produced.
pub struct Multiplexer {
    events: EventReceiver,
    forwarder: Option<ForwarderTask>,
    formatter: ResponseFormatter,
    writer: FrameWriter,
    state: SessionState,
    frames: usize,
    span: Span,
}

impl Multiplexer {
    pub fn new(
        events: EventReceiver,
        forwarder: ForwarderTask,
        writer: FrameWriter,
        mut state: SessionState,
        span: Span,
    ) -> Self {
        state.advance(SessionState::Streaming);

        Self {
            events,
            forwarder: Some(forwarder),
            formatter: ResponseFormatter::new(),
            writer,
            state,
            frames: 0,
            span,
        }
    }

    /// Next piece of the response body, or `None` once the closing
    /// delimiter has been produced.
    pub async fn next_chunk(&mut self) -> Option<Bytes> {
        if self.state.is_terminal() {
            return None;
        }

        loop {
            let received = match self.forwarder.as_mut() {
                Some(forwarder) if forwarder.is_running() => {
                    tokio::select! {
                        _ = forwarder.completion() => {
                            self.state.advance(SessionState::Draining);
                            continue;
                        }
                        event = self.events.recv() => event,
                    }
                }
                _ => self.events.recv().await,
            };

            match received {
                Some(Ok(event)) => match self.frame(&event) {
                    Ok(frame) => {
                        self.frames += 1;
                        return Some(frame);
                    }
                    Err(e) => {
                        error!("Dropping result frame: {}", e);
                        continue;
                    }
                },
                Some(Err(e)) => {
                    warn!("Recognition stream ended with error: {}", e);
                    break;
                }
                None => break,
            }
        }

        Some(self.finish().await)
    }

    fn frame(&mut self, event: &RecognitionEvent) -> Result<Bytes, FrameError> {
        let response = self.formatter.format(event);
        let content = serde_json::to_vec(&response)?;
        Ok(self.writer.field(RESULT_FIELD, &content))
    }

    async fn finish(&mut self) -> Bytes {
        if let Some(forwarder) = self.forwarder.take() {
            forwarder.shutdown().await;
        }
        self.state.advance(SessionState::Closed);

        info!("Dictation response complete ({} frames)", self.frames);
        self.writer.close()
    }

    /// Response body stream for this request.
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
        futures::stream::unfold(self, |mut mux| async move {
            let span = mux.span.clone();
            mux.next_chunk()
                .instrument(span)
                .await
                .map(|chunk| (Ok::<_, Infallible>(chunk), mux))
        })
    }
}
