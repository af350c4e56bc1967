//! HTTP front end for dictation clients
//!
//! - POST /NmspServlet/ - Stream audio in, stream transcription frames out
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::{create_router, DICTATION_PATH};
pub use state::{AppState, DEFAULT_MODEL};
