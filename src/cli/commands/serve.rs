//! HTTP server: the conversion API and the single-page front end.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// Message used when a failure carries no message of its own.
const GENERIC_FAILURE: &str = "Failed to convert video";

/// Shared application state.
pub struct AppState {
    pub orchestrator: Orchestrator,
}

/// Run the HTTP server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    let generation_enabled = orchestrator.generation_enabled();

    let app = router(Arc::new(AppState { orchestrator }));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Tubecast Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Web UI", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("Convert", "POST /api/convert");
    println!();
    if !generation_enabled {
        Output::warning("OPENAI_API_KEY not set; podcast copy will use the built-in template.");
    }
    Output::info("Press Ctrl+C to stop the server.");

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/convert", post(convert))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConvertRequest {
    #[serde(default)]
    youtube_url: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    let error = if message.is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        message
    };
    (status, Json(ErrorResponse { error })).into_response()
}

fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    error!("Request handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, String::new())
}

// === Handlers ===

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn convert(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    // Any body that is not a JSON object of the expected shape is an
    // unexpected failure, not an input error.
    let req: ConvertRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            error!("Conversion error: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    match state.orchestrator.convert(req.youtube_url.as_deref()).await {
        Ok(result) => Json(result).into_response(),
        Err(e) if e.is_client_error() => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e) => {
            error!("Conversion error: {:?}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
