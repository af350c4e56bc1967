//! Per-request dictation session
//!
//! This module provides the pieces that bridge one inbound request to one
//! recognition exchange:
//! - Session setup with the fixed dictation configuration
//! - The audio forwarder, draining multipart audio parts into the engine
//! - The result multiplexer, streaming one response frame per engine event
//! - Response formatting and multipart frame encoding
//! - The per-request lifecycle state

mod formatter;
mod forwarder;
mod frames;
mod initiator;
mod multiplexer;
mod state;

pub use formatter::{
    ResponseFormatter, TranscriptionResponse, TranscriptionWord, NO_SPACE_BEFORE_MARKER,
};
pub use forwarder::{forward_audio, ForwardSummary, ForwarderExit, ForwarderTask, AUDIO_FIELD};
pub use frames::{FrameWriter, RESPONSE_BOUNDARY, RESULT_FIELD};
pub use initiator::open_session;
pub use multiplexer::Multiplexer;
pub use state::SessionState;
