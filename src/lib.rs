pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod routing;
pub mod session;

pub use auth::{HttpTokenValidator, TokenValidator};
pub use config::Config;
pub use engine::{
    EngineStream, RecognitionEngine, RecognitionEvent, StreamingRecognitionConfig,
    StreamingRequest, WebSocketEngine,
};
pub use error::{
    AuthError, EngineError, ForwardError, FrameError, GatewayError, RoutingError,
    SessionSetupError,
};
pub use http::{create_router, AppState};
pub use routing::{parse_host, Credentials};
pub use session::{ResponseFormatter, TranscriptionResponse, TranscriptionWord};
