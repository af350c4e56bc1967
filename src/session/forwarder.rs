use crate::engine::{RequestSender, StreamingRequest};
use crate::error::ForwardError;
use axum::extract::Multipart;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn, Instrument, Span};

/// Multipart field carrying audio from the dictation client
pub const AUDIO_FIELD: &str = "ConcludingAudioParameter";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardSummary {
    pub chunks: usize,
    pub bytes: usize,
}

/// How the forwarder task ended
#[derive(Debug)]
pub enum ForwarderExit {
    /// Inbound body fully consumed
    Finished(ForwardSummary),
    /// Unreadable part or the session stopped accepting audio
    Failed(ForwardError),
    /// Stopped by the gateway
    Cancelled,
    Panicked,
}

impl ForwarderExit {
    fn log(&self) {
        match self {
            ForwarderExit::Finished(summary) => info!(
                "Audio forwarder finished ({} chunks, {} bytes)",
                summary.chunks, summary.bytes
            ),
            ForwarderExit::Failed(e) => warn!("Audio forwarder stopped: {}", e),
            ForwarderExit::Cancelled => debug!("Audio forwarder cancelled"),
            ForwarderExit::Panicked => error!("Audio forwarder panicked"),
        }
    }
}

/// Read every audio part from `parts`, in order, and forward each as one
/// chunk.
///
/// Parts with any other field name are skipped. Each audio part is buffered
/// whole before it is sent.
pub async fn forward_audio(
    mut parts: Multipart,
    requests: RequestSender,
) -> Result<ForwardSummary, ForwardError> {
    let mut summary = ForwardSummary::default();

    while let Some(field) = parts
        .next_field()
        .await
        .map_err(|e| ForwardError::Multipart(e.body_text()))?
    {
        if field.name() != Some(AUDIO_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let chunk = field
            .bytes()
            .await
            .map_err(|e| ForwardError::Multipart(e.body_text()))?;

        debug!("Forwarding audio chunk {} ({} bytes)", summary.chunks, chunk.len());
        summary.bytes += chunk.len();

        requests
            .send(StreamingRequest::Audio(chunk))
            .await
            .map_err(ForwardError::Send)?;

        summary.chunks += 1;
    }

    Ok(summary)
}

/// Handle to a running [`forward_audio`] task.
///
/// The task is aborted when the handle is dropped, so it never outlives the
/// response that owns it.
pub struct ForwarderTask {
    handle: Option<JoinHandle<Result<ForwardSummary, ForwardError>>>,
}

impl ForwarderTask {
    pub fn spawn(parts: Multipart, requests: RequestSender, span: Span) -> Self {
        let handle = tokio::spawn(forward_audio(parts, requests).instrument(span));
        Self {
            handle: Some(handle),
        }
    }

    /// Whether the task has not yet been observed to exit.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Wait for the task to exit on its own.
    ///
    /// Cancel-safe. Never resolves once the exit has already been observed.
    pub async fn completion(&mut self) -> ForwarderExit {
        let Some(handle) = self.handle.as_mut() else {
            return std::future::pending().await;
        };

        let result = handle.await;
        self.handle = None;

        let exit = exit_from(result);
        exit.log();
        exit
    }

    /// Stop the task if it is still running and wait for it to exit.
    ///
    /// Returns `None` if its exit was already observed.
    pub async fn shutdown(mut self) -> Option<ForwarderExit> {
        let handle = self.handle.take()?;
        handle.abort();

        let exit = exit_from(handle.await);
        exit.log();
        Some(exit)
    }
}

impl Drop for ForwarderTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

fn exit_from(
    result: Result<Result<ForwardSummary, ForwardError>, tokio::task::JoinError>,
) -> ForwarderExit {
    match result {
        Ok(Ok(summary)) => ForwarderExit::Finished(summary),
        Ok(Err(e)) => ForwarderExit::Failed(e),
        Err(e) if e.is_cancelled() => ForwarderExit::Cancelled,
        Err(_) => ForwarderExit::Panicked,
    }
}
