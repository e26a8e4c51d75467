//! Collection handlers: filtered listing and creation.

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::Json;

use shipadmin_wp::payload::{assemble_create, ProductInput};
use shipadmin_wp::types::{ProductRecord, SearchResponse};
use shipadmin_wp::{ListQuery, SearchFilters};

use super::{AppState, ProxyError};

/// Query parameters accepted on `GET /api/products`.
///
/// The query string is parsed by hand because `child_category` may appear
/// multiple times; a typed extractor would keep only the last occurrence.
#[derive(Debug, Default)]
struct ListParams {
    page: Option<u32>,
    per_page: Option<u32>,
    id: Option<String>,
    q: Option<String>,
    sheet: Option<i64>,
    categories: Vec<String>,
    shipping_actual_yen_max: Option<String>,
    weight_g_max: Option<String>,
    applied_weight_g_max: Option<String>,
    carrier: Option<String>,
    amazon_size_label: Option<String>,
}

fn parse_list_params(raw: &str) -> ListParams {
    let mut params = ListParams::default();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "page" => params.page = value.parse().ok(),
            "per_page" => params.per_page = value.parse().ok(),
            "id" => params.id = Some(value.to_string()),
            // `q` and the legacy `search` key are interchangeable; the
            // first non-empty one wins.
            "q" | "search" => {
                if params.q.is_none() {
                    params.q = Some(value.to_string());
                }
            }
            "product_sheet" => params.sheet = value.parse().ok(),
            "child_category" => merge_categories(&mut params.categories, value),
            "shipping_actual_yen_max" => {
                params.shipping_actual_yen_max = Some(value.to_string());
            }
            "weight_g_max" => params.weight_g_max = Some(value.to_string()),
            "applied_weight_g_max" => {
                params.applied_weight_g_max = Some(value.to_string());
            }
            "carrier" => params.carrier = Some(value.to_string()),
            "amazon_size_label" => params.amazon_size_label = Some(value.to_string()),
            _ => {}
        }
    }
    params
}

/// Folds one `child_category` value into the accumulated list. Values may
/// themselves be comma-separated; duplicates are dropped while first-seen
/// order is preserved.
fn merge_categories(categories: &mut Vec<String>, value: &str) {
    for slug in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !categories.iter().any(|c| c == slug) {
            categories.push(slug.to_string());
        }
    }
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<SearchResponse>, ProxyError> {
    let params = parse_list_params(raw.as_deref().unwrap_or(""));
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(state.default_per_page);

    let envelope = if state.search_enabled {
        state
            .wp
            .search(&SearchFilters {
                sheet: params.sheet,
                categories: params.categories,
                id: params.id,
                q: params.q,
                shipping_actual_yen_max: params.shipping_actual_yen_max,
                weight_g_max: params.weight_g_max,
                applied_weight_g_max: params.applied_weight_g_max,
                carrier: params.carrier,
                amazon_size_label: params.amazon_size_label,
                page,
                per_page,
            })
            .await?
    } else {
        state
            .wp
            .list(&ListQuery {
                page,
                per_page,
                search: params.q,
            })
            .await?
    };
    Ok(Json(envelope))
}

pub(super) async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<ProductRecord>), ProxyError> {
    let body =
        assemble_create(&input).map_err(|e| ProxyError::Validation(e.to_string()))?;
    let record = state.wp.create(&body).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
