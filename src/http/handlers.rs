use super::state::AppState;
use crate::engine::EngineStream;
use crate::error::GatewayError;
use crate::routing::parse_host;
use crate::session::{
    open_session, ForwarderTask, FrameWriter, Multiplexer, SessionState, RESPONSE_BOUNDARY,
};
use axum::{
    body::Body,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{field, info_span, Instrument, Span};
use uuid::Uuid;

/// POST /NmspServlet/
/// Bridge one dictation upload to a recognition session
///
/// Everything that can fail with an HTTP status happens before the response
/// headers are sent. Once streaming starts, failures only end the stream.
pub async fn dictation(State(state): State<AppState>, request: Request) -> Response {
    let span = info_span!(
        "dictation",
        request_id = %Uuid::new_v4(),
        language = field::Empty
    );

    match bridge(state, request, span.clone()).instrument(span).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn bridge(state: AppState, request: Request, span: Span) -> Result<Response, GatewayError> {
    let mut phase = SessionState::Init;

    let credentials = parse_host(&request_host(&request))?;
    span.record("language", credentials.language.as_str());

    phase.advance(SessionState::Authenticating);
    if let Err(e) = state.validator.validate(&credentials.token).await {
        phase.advance(SessionState::Rejected);
        return Err(e.into());
    }

    let parts = Multipart::from_request(request, &())
        .await
        .map_err(|e| GatewayError::Multipart(e.body_text()))?;

    let EngineStream { requests, events } =
        match open_session(state.engine.as_ref(), &credentials, &state.model).await {
            Ok(stream) => stream,
            Err(e) => {
                phase.advance(SessionState::SessionSetupFailed);
                return Err(e.into());
            }
        };
    phase.advance(SessionState::SessionOpen);

    let forwarder = ForwarderTask::spawn(parts, requests, span.clone());
    let writer = FrameWriter::new(RESPONSE_BOUNDARY);
    let content_type = writer.content_type();
    let mux = Multiplexer::new(events, forwarder, writer, phase, span);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        Body::from_stream(mux.into_stream()),
    )
        .into_response())
}

fn request_host(request: &Request) -> String {
    request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| request.uri().host())
        .unwrap_or_default()
        .to_string()
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
