//! Router construction and request handlers.
//!
//! Routing carries no meaning in this service: every method on every
//! path resolves to the same handler, so the routers are built entirely
//! out of fallbacks. What varies is the response body, selected once at
//! startup via [`ResponseMode`].

use crate::server::config::ResponseMode;
use crate::server::service::config::Generator;
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// Shared per-worker state for the payload handler.
#[derive(Clone)]
struct AppState {
    generator: Arc<Generator>,
}

/// Builds the worker router for the given response mode.
pub fn build_router(mode: ResponseMode) -> Router {
    match mode {
        ResponseMode::Plain => Router::new().fallback(plain),
        ResponseMode::Payload => {
            let state = AppState {
                generator: Arc::new(Generator::default()),
            };
            Router::new().fallback(payload).with_state(state)
        }
    }
}

/// Constant greeting, `text/plain`.
async fn plain() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "Hello World\n")
}

/// Freshly generated payload, `application/json`.
///
/// Generation spills a file on every request. If the spill fails the
/// worker is broken, so it dies loudly with a non-zero status and leaves
/// replacement to the supervisor.
async fn payload(State(state): State<AppState>) -> Response {
    match state.generator.generate() {
        Ok(payload) => Json(payload).into_response(),
        Err(err) => {
            eprintln!("payload generation failed: {err}");
            std::process::exit(1);
        }
    }
}
