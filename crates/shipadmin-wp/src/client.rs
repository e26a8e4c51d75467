//! HTTP client for the WordPress REST API.
//!
//! Wraps `reqwest` with Basic-auth credential handling, base-URL
//! normalization, and typed response decoding. Non-2xx statuses surface as
//! [`WpError::Upstream`] with the verbatim body so the proxy layer can
//! relay them unchanged.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::WpError;
use crate::payload::{CreateProduct, UpdateProduct};
use crate::types::{ProductRecord, SearchMeta, SearchResponse};

const PRODUCT_ROUTE: &str = "wp-json/wp/v2/product";
const SEARCH_ROUTE: &str = "wp-json/shipping/v1/search";

/// Error code WordPress emits when a REST route is not registered. The
/// search plugin being absent manifests as this on its route; the proxy
/// must treat that as zero results, not a failure.
const REST_NO_ROUTE: &str = "rest_no_route";

/// Connection settings for [`WpClient`], taken from application config at
/// startup. Credentials are server-side only.
#[derive(Debug, Clone)]
pub struct WpSettings {
    pub origin: String,
    pub username: Option<String>,
    pub app_password: Option<String>,
    pub timeout_secs: u64,
}

/// Standard collection listing parameters.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
}

/// Filters forwarded to the `shipping/v1/search` plugin endpoint. The
/// range filters and `id` are passed through as received; the category
/// list is joined into one comma-separated parameter.
#[derive(Debug, Clone)]
pub struct SearchFilters {
    pub sheet: Option<i64>,
    pub categories: Vec<String>,
    pub id: Option<String>,
    pub q: Option<String>,
    pub shipping_actual_yen_max: Option<String>,
    pub weight_g_max: Option<String>,
    pub applied_weight_g_max: Option<String>,
    pub carrier: Option<String>,
    pub amazon_size_label: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            sheet: None,
            categories: Vec::new(),
            id: None,
            q: None,
            shipping_actual_yen_max: None,
            weight_g_max: None,
            applied_weight_g_max: None,
            carrier: None,
            amazon_size_label: None,
            page: 1,
            per_page: 20,
        }
    }
}

/// Client for the WordPress REST API behind the admin.
///
/// Holds the HTTP client, normalized base URL, and the optional Basic-auth
/// pair. Use [`WpClient::new`] with settings derived from `AppConfig`; in
/// tests, point `origin` at a wiremock server.
pub struct WpClient {
    client: Client,
    base_url: Url,
    auth: Option<(String, String)>,
}

impl WpClient {
    /// Creates a client for the configured WordPress origin.
    ///
    /// # Errors
    ///
    /// Returns [`WpError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`WpError::BaseUrl`] if the origin does not parse.
    pub fn new(settings: &WpSettings) -> Result<Self, WpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("shipadmin/0.1 (wp-proxy)")
            .build()?;

        // Ensure exactly one trailing slash so Url::join appends route
        // segments instead of replacing the last path segment.
        let normalized = format!("{}/", settings.origin.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|_| WpError::BaseUrl(settings.origin.clone()))?;

        let auth = match (&settings.username, &settings.app_password) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => {
                tracing::warn!("WP_USER/WP_APP_PASS not set; requests will be unauthenticated");
                None
            }
        };

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Lists products via the standard `wp/v2/product` collection.
    ///
    /// WordPress returns a bare JSON array and carries the totals in the
    /// `X-WP-Total` / `X-WP-TotalPages` headers; those are folded into the
    /// same `{ data, meta }` envelope the search endpoint produces.
    ///
    /// # Errors
    ///
    /// [`WpError::Upstream`] on non-2xx, [`WpError::Http`] on transport
    /// failure, [`WpError::Deserialize`] on an unexpected body.
    pub async fn list(&self, query: &ListQuery) -> Result<SearchResponse, WpError> {
        let mut url = self.route(PRODUCT_ROUTE)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("per_page", &query.per_page.to_string());
            pairs.append_pair("page", &query.page.to_string());
            if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair("search", search);
            }
        }

        let response = self.send(self.client.get(url.clone())).await?;
        let total = header_i64(&response, "x-wp-total");
        let pages = header_i64(&response, "x-wp-totalpages");
        let data: Vec<ProductRecord> = read_json(response, url.as_str()).await?;

        let mut envelope = SearchResponse {
            meta: SearchMeta {
                total: total.unwrap_or(data.len() as i64),
                pages: pages.unwrap_or(1),
                page: i64::from(query.page),
                per_page: i64::from(query.per_page),
            },
            data,
        };
        envelope.mirror_categories();
        Ok(envelope)
    }

    /// Searches products via the `shipping/v1/search` plugin endpoint.
    ///
    /// A routing 404 (`rest_no_route`) means the plugin is not installed;
    /// that case is masked as an empty result set rather than an error.
    ///
    /// # Errors
    ///
    /// [`WpError::Upstream`] on any other non-2xx, [`WpError::Http`] on
    /// transport failure, [`WpError::Deserialize`] on an unexpected body.
    pub async fn search(&self, filters: &SearchFilters) -> Result<SearchResponse, WpError> {
        let mut url = self.route(SEARCH_ROUTE)?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(sheet) = filters.sheet {
                pairs.append_pair("product_sheet", &sheet.to_string());
            }
            if !filters.categories.is_empty() {
                pairs.append_pair("child_category", &filters.categories.join(","));
            }
            let passthrough = [
                ("id", &filters.id),
                ("q", &filters.q),
                ("shipping_actual_yen_max", &filters.shipping_actual_yen_max),
                ("weight_g_max", &filters.weight_g_max),
                ("applied_weight_g_max", &filters.applied_weight_g_max),
                ("carrier", &filters.carrier),
                ("amazon_size_label", &filters.amazon_size_label),
            ];
            for (key, value) in passthrough {
                if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                    pairs.append_pair(key, v);
                }
            }
            pairs.append_pair("page", &filters.page.to_string());
            pairs.append_pair("per_page", &filters.per_page.to_string());
        }

        let response = self.request(self.client.get(url.clone())).await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            if body.contains(REST_NO_ROUTE) {
                tracing::warn!("search route missing upstream; returning zero results");
                return Ok(SearchResponse::empty(
                    i64::from(filters.page),
                    i64::from(filters.per_page),
                ));
            }
            return Err(WpError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        let response = check_status(response).await?;

        let mut envelope: SearchResponse = read_json(response, url.as_str()).await?;
        envelope.mirror_categories();
        Ok(envelope)
    }

    /// Fetches a single product by id.
    ///
    /// # Errors
    ///
    /// [`WpError::Upstream`] on non-2xx (including upstream 404),
    /// [`WpError::Http`] on transport failure, [`WpError::Deserialize`] on
    /// an unexpected body.
    pub async fn get(&self, id: u64) -> Result<ProductRecord, WpError> {
        let url = self.product_url(id)?;
        let response = self.send(self.client.get(url.clone())).await?;
        let mut record: ProductRecord = read_json(response, url.as_str()).await?;
        record.mirror_category();
        Ok(record)
    }

    /// Creates a product (`status: publish`).
    ///
    /// # Errors
    ///
    /// [`WpError::Upstream`] on non-2xx, [`WpError::Http`] on transport
    /// failure, [`WpError::Deserialize`] on an unexpected body.
    pub async fn create(&self, body: &CreateProduct) -> Result<ProductRecord, WpError> {
        let url = self.route(PRODUCT_ROUTE)?;
        let response = self.send(self.client.post(url.clone()).json(body)).await?;
        let mut record: ProductRecord = read_json(response, url.as_str()).await?;
        record.mirror_category();
        Ok(record)
    }

    /// Updates a product with the supplied fields. `PUT` is used; WordPress
    /// merges the supplied meta keys into the stored bag.
    ///
    /// # Errors
    ///
    /// [`WpError::Upstream`] on non-2xx, [`WpError::Http`] on transport
    /// failure, [`WpError::Deserialize`] on an unexpected body.
    pub async fn update(&self, id: u64, body: &UpdateProduct) -> Result<ProductRecord, WpError> {
        let url = self.product_url(id)?;
        let response = self.send(self.client.put(url.clone()).json(body)).await?;
        let mut record: ProductRecord = read_json(response, url.as_str()).await?;
        record.mirror_category();
        Ok(record)
    }

    /// Permanently deletes a product (`force=true`, no trash).
    ///
    /// # Errors
    ///
    /// [`WpError::Upstream`] on non-2xx, [`WpError::Http`] on transport
    /// failure.
    pub async fn delete(&self, id: u64) -> Result<(), WpError> {
        let mut url = self.product_url(id)?;
        url.query_pairs_mut().append_pair("force", "true");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    fn route(&self, path: &str) -> Result<Url, WpError> {
        self.base_url
            .join(path)
            .map_err(|_| WpError::BaseUrl(self.base_url.to_string()))
    }

    fn product_url(&self, id: u64) -> Result<Url, WpError> {
        self.route(&format!("{PRODUCT_ROUTE}/{id}"))
    }

    /// Attach credentials and send, without status interpretation.
    async fn request(&self, builder: RequestBuilder) -> Result<Response, WpError> {
        let builder = match &self.auth {
            Some((user, pass)) => builder.basic_auth(user, Some(pass)),
            None => builder,
        };
        Ok(builder.send().await?)
    }

    /// Attach credentials, send, and require a 2xx status.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, WpError> {
        let response = self.request(builder).await?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, WpError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(WpError::Upstream {
        status: status.as_u16(),
        body,
    })
}

fn header_i64(response: &Response, name: &str) -> Option<i64> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, WpError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| WpError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}
