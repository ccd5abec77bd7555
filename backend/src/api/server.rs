//! HTTP server for the ZIP lookup API.
//!
//! # API Endpoints
//!
//! | Method | Path                    | Description                       |
//! |--------|-------------------------|-----------------------------------|
//! | GET    | `/health`               | Load status and counts            |
//! | GET    | `/api/providers/by-zip` | Providers and counties for a ZIP  |
//!
//! Handlers only read the shared [`DataSnapshot`]; nothing is locked.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::any::Any;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::types::{HealthResponse, ProvidersByZipResponse};
use crate::config::ServerConfig;
use crate::error::{LookupError, ServerError, ServerResult};
use crate::index::DataSnapshot;
use crate::lookup::{lookup, parse_zip_query};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<DataSnapshot>,
}

/// Query string of `/api/providers/by-zip`.
#[derive(Debug, Default, Deserialize)]
pub struct ByZipQuery {
    pub zip: Option<String>,
    /// Accepted for older clients; the response reports the load path instead.
    pub source: Option<String>,
}

impl ByZipQuery {
    /// Fold decoded query pairs. A repeated key keeps its last value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "zip" => query.zip = Some(value),
                "source" => query.source = Some(value),
                _ => {}
            }
        }
        query
    }
}

type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Build the router with CORS, tracing and panic handling.
pub fn build_router(snapshot: Arc<DataSnapshot>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/providers/by-zip", get(providers_by_zip))
        .with_state(AppState { snapshot })
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the HTTP server
pub async fn start_server(config: &ServerConfig, snapshot: DataSnapshot) -> ServerResult<()> {
    let app = build_router(Arc::new(snapshot));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "zipfinder listening");
    tracing::info!("   GET /api/providers/by-zip?zip=<zip> - Providers for a ZIP code");
    tracing::info!("   GET /health                         - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::from(state.snapshot.as_ref()))
}

/// ZIP lookup endpoint
async fn providers_by_zip(
    State(state): State<AppState>,
    pairs: QueryPairs,
) -> Result<Json<ProvidersByZipResponse>, ServerError> {
    let Query(pairs) = pairs.map_err(|e| LookupError::MalformedQuery(e.body_text()))?;
    let query = ByZipQuery::from_pairs(pairs);
    let zip = parse_zip_query(query.zip.as_deref())?;
    let result = lookup(&state.snapshot, &zip);
    tracing::debug!(%zip, providers = result.providers.len(), "lookup");
    Ok(Json(result.into()))
}

/// Turn a handler panic into a 500 with the panic message.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ServerError::Internal(message).into_response()
}
