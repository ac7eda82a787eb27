//! # memo-api
//!
//! HTTP API for memo: model-backed tag suggestion and summarization.
//!
//! Routes:
//! - `POST /api/generate-tags`
//! - `POST /api/memos/summarize`
//! - `GET /health`
//! - `GET /openapi.json`

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use uuid::Uuid;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Memo API",
        description = "Tag suggestion and summarization for memo notes"
    ),
    paths(
        handlers::health::health_check,
        handlers::tags::generate_tags,
        handlers::summarize::summarize
    ),
    components(schemas(
        handlers::HealthResponse,
        handlers::GenerateTagsRequest,
        handlers::GenerateTagsResponse,
        handlers::SummarizeRequest,
        handlers::SummarizeResponse
    )),
    tags(
        (name = "AI", description = "Model-backed note assistance"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the router with default middleware settings.
pub fn create_router(state: AppState) -> Router {
    create_router_with_config(state, &ServerConfig::default())
}

/// Build the router with the given CORS origins and body limit.
pub fn create_router_with_config(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi_json))
        .route("/api/generate-tags", post(handlers::generate_tags))
        .route("/api/memos/summarize", post(handlers::summarize))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer(&config.allowed_origins))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .with_state(state)
}

/// Any origin when the list is empty, otherwise exactly the listed ones.
fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([HeaderName::from_static("x-request-id")])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins.to_vec()))
    }
}
