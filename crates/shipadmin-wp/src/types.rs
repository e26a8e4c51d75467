//! WordPress response shapes, validated at the proxy boundary.
//!
//! The plugin and the core REST API disagree on details — `title` is a
//! plain string in search rows but `{ "rendered": ... }` on `wp/v2`
//! records, and metadata numbers sometimes arrive as numeric strings — so
//! decoding is deliberately lenient. Unknown keys are carried through in
//! flattened maps rather than dropped.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `title` as returned by `wp/v2` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WpTitle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
}

/// `title` in either of the shapes WordPress produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TitleField {
    Plain(String),
    Rendered(WpTitle),
}

impl TitleField {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            TitleField::Plain(s) => Some(s),
            TitleField::Rendered(t) => t.rendered.as_deref(),
        }
    }
}

/// A category value that legacy rows store either as a single slug or as a
/// list of slugs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryValue {
    One(String),
    Many(Vec<String>),
}

impl CategoryValue {
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            CategoryValue::One(s) => Some(s.as_str()),
            CategoryValue::Many(v) => v.first().map(String::as_str),
        }
    }
}

/// Product metadata bag. Every field is optional; absent means absent, and
/// serialization never re-introduces a key that was not set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMeta {
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub length_cm: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub width_cm: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub height_cm: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight_g: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume_cm3: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub applied_weight_g: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub shipping_actual_yen: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amazon_size_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductMeta {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == ProductMeta::default()
    }
}

/// A product record as returned by either endpoint family. Search rows may
/// also surface metadata at the top level; those keys ride in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProductMeta>,
    /// Legacy top-level category, as stored before the meta key existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_category: Option<CategoryValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductRecord {
    /// Resolve the record's category with the fixed precedence:
    /// canonical meta key, legacy meta key, then the first element of the
    /// top-level legacy value.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        let meta = self.meta.as_ref();
        meta.and_then(|m| m.product_category.as_deref())
            .filter(|s| !s.is_empty())
            .or_else(|| {
                meta.and_then(|m| m.child_category.as_deref())
                    .filter(|s| !s.is_empty())
            })
            .or_else(|| self.child_category.as_ref().and_then(CategoryValue::first))
    }

    /// Backward-compatibility mirror: copy `meta.product_category` into
    /// `meta.child_category` when only the canonical key is present.
    /// Older client code still reads the legacy key. Idempotent.
    pub fn mirror_category(&mut self) {
        let Some(meta) = self.meta.as_mut() else {
            return;
        };
        let legacy_missing = meta
            .child_category
            .as_deref()
            .is_none_or(str::is_empty);
        if legacy_missing {
            if let Some(canonical) = meta.product_category.clone().filter(|s| !s.is_empty()) {
                meta.child_category = Some(canonical);
            }
        }
    }
}

/// Pagination block of the search plugin's envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMeta {
    pub total: i64,
    pub pages: i64,
    pub page: i64,
    #[serde(rename = "perPage")]
    pub per_page: i64,
}

/// `{ data, meta }` envelope returned by `shipping/v1/search` and
/// synthesized for standard collection listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<ProductRecord>,
    pub meta: SearchMeta,
}

impl SearchResponse {
    /// Zero-result envelope, used when the search route is missing upstream.
    #[must_use]
    pub fn empty(page: i64, per_page: i64) -> Self {
        Self {
            data: Vec::new(),
            meta: SearchMeta {
                total: 0,
                pages: 0,
                page,
                per_page,
            },
        }
    }

    /// Apply the category mirror to every row.
    pub fn mirror_categories(&mut self) {
        for record in &mut self.data {
            record.mirror_category();
        }
    }
}

/// Decode a metadata number that may arrive as a JSON number, a numeric
/// string, an empty string, or null. Anything non-finite decodes to `None`
/// rather than an error — records with junk in one field must still load.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(finite_value))
}

fn finite_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}
