mod product_detail;
mod products;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;
use shipadmin_wp::{WpClient, WpError};

#[derive(Clone)]
pub struct AppState {
    pub wp: Arc<WpClient>,
    pub default_per_page: u32,
    /// Route list requests through the search plugin endpoint.
    pub search_enabled: bool,
}

/// Errors surfaced by the proxy handlers.
///
/// Upstream failures are relayed verbatim — same status, same body — so
/// callers see exactly what WordPress said. Everything decided locally
/// (validation, malformed ids, transport failures) gets a small JSON body.
#[derive(Debug)]
pub enum ProxyError {
    /// Rejected before any outbound call.
    Validation(String),
    /// Malformed identifier, short-circuited locally.
    NotFound,
    /// Non-2xx from WordPress, relayed as-is.
    Upstream { status: u16, body: String },
    /// Transport or decoding failure between this proxy and WordPress.
    Gateway(String),
}

impl From<WpError> for ProxyError {
    fn from(err: WpError) -> Self {
        match err {
            WpError::Upstream { status, body } => ProxyError::Upstream { status, body },
            other => ProxyError::Gateway(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody { error: message }),
            )
                .into_response(),
            ProxyError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: "not found".to_string(),
                }),
            )
                .into_response(),
            ProxyError::Upstream { status, body } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                Response::builder()
                    .status(status)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response())
            }
            ProxyError::Gateway(message) => {
                tracing::error!(error = %message, "upstream request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorBody { error: message }),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/{id}",
            get(product_detail::get_product)
                .patch(product_detail::update_product)
                .delete(product_detail::delete_product),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}
