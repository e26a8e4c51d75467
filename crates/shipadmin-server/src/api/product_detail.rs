//! Single-record handlers: fetch, partial update, permanent delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use shipadmin_wp::payload::{assemble_update, ProductInput};
use shipadmin_wp::types::ProductRecord;

use super::{AppState, ProxyError};

/// Accepts only all-digit ids. Anything else is answered 404 locally so a
/// malformed path segment never produces an outbound request.
fn parse_id(raw: &str) -> Result<u64, ProxyError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProxyError::NotFound);
    }
    raw.parse().map_err(|_| ProxyError::NotFound)
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductRecord>, ProxyError> {
    let id = parse_id(&id)?;
    let record = state.wp.get(id).await?;
    Ok(Json(record))
}

pub(super) async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductRecord>, ProxyError> {
    let id = parse_id(&id)?;
    let body = assemble_update(&input);
    let record = state.wp.update(id, &body).await?;
    Ok(Json(record))
}

pub(super) async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ProxyError> {
    let id = parse_id(&id)?;
    state.wp.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
