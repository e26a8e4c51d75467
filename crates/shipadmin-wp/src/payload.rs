//! Outbound payload assembly.
//!
//! Callers still send a mix of historical field names (`child_category` vs
//! `product_category`, `notes` vs `remark`) and loosely-typed values
//! (numbers as strings, empty strings for "unset"). This module folds all
//! of that into one canonical outbound schema: a key appears in the
//! assembled metadata only when its parsed value is actually defined —
//! never as a forced `0` or `""`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProductMeta;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("title is required")]
    MissingTitle,
}

/// A numeric field as callers send it: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Coerce to a finite number; empty or unparseable input is "no value".
    #[must_use]
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            RawNumber::Number(n) => Some(*n).filter(|f| f.is_finite()),
            RawNumber::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
            }
        }
    }
}

/// Request body accepted by both the create and update operations.
/// Every field is optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductInput {
    pub title: Option<String>,
    /// Legacy alias for `title`, still sent by the oldest client code.
    pub name: Option<String>,
    pub cost: Option<RawNumber>,
    pub length_cm: Option<RawNumber>,
    pub width_cm: Option<RawNumber>,
    pub height_cm: Option<RawNumber>,
    pub weight_g: Option<RawNumber>,
    pub volume_cm3: Option<RawNumber>,
    pub shipping_actual_yen: Option<RawNumber>,
    pub carrier: Option<String>,
    pub amazon_size_label: Option<String>,
    pub remark: Option<String>,
    /// Legacy alias for `remark`.
    pub notes: Option<String>,
    /// Canonical category key.
    pub product_category: Option<String>,
    /// Legacy category key.
    pub child_category: Option<String>,
    pub product_sheet: Option<Vec<RawNumber>>,
}

/// Body for `POST wp/v2/product`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProduct {
    pub title: String,
    pub status: &'static str,
    pub meta: ProductMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_sheet: Option<Vec<i64>>,
}

/// Body for `PUT wp/v2/product/{id}` — only supplied fields are present;
/// WordPress merges meta keys rather than clearing omitted ones.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProductMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_sheet: Option<Vec<i64>>,
}

/// Assemble a creation payload. Title (or its legacy alias `name`) is
/// mandatory and must be non-blank after trimming.
///
/// # Errors
///
/// Returns [`PayloadError::MissingTitle`] when no usable title is present.
pub fn assemble_create(input: &ProductInput) -> Result<CreateProduct, PayloadError> {
    let title = input
        .title
        .as_deref()
        .or(input.name.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(PayloadError::MissingTitle)?;

    Ok(CreateProduct {
        title: title.to_string(),
        status: "publish",
        meta: assemble_meta(input),
        product_sheet: sheet_ids(input.product_sheet.as_deref()),
    })
}

/// Assemble a partial update payload from the supplied fields only.
#[must_use]
pub fn assemble_update(input: &ProductInput) -> UpdateProduct {
    let title = input
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string);

    let meta = assemble_meta(input);
    UpdateProduct {
        title,
        meta: (!meta.is_empty()).then_some(meta),
        product_sheet: sheet_ids(input.product_sheet.as_deref()),
    }
}

/// Map input fields onto the canonical metadata schema, dropping anything
/// undefined and folding the legacy key names into their canonical
/// counterparts (`child_category` → `product_category`, `notes` → `remark`).
fn assemble_meta(input: &ProductInput) -> ProductMeta {
    let number = |v: &Option<RawNumber>| v.as_ref().and_then(RawNumber::as_finite);

    ProductMeta {
        cost: number(&input.cost),
        length_cm: number(&input.length_cm),
        width_cm: number(&input.width_cm),
        height_cm: number(&input.height_cm),
        weight_g: number(&input.weight_g),
        volume_cm3: number(&input.volume_cm3),
        shipping_actual_yen: number(&input.shipping_actual_yen),
        carrier: clean_text(input.carrier.as_deref()),
        amazon_size_label: clean_text(input.amazon_size_label.as_deref()),
        remark: clean_text(input.remark.as_deref()).or_else(|| clean_text(input.notes.as_deref())),
        product_category: clean_text(input.product_category.as_deref())
            .or_else(|| clean_text(input.child_category.as_deref())),
        ..ProductMeta::default()
    }
}

fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Coerce sheet term ids, discarding non-finite entries. `None` unless at
/// least one id survives.
fn sheet_ids(values: Option<&[RawNumber]>) -> Option<Vec<i64>> {
    let ids: Vec<i64> = values?
        .iter()
        .filter_map(RawNumber::as_finite)
        .map(|n| n as i64)
        .collect();
    (!ids.is_empty()).then_some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_from(json: serde_json::Value) -> ProductInput {
        serde_json::from_value(json).expect("input should deserialize")
    }

    #[test]
    fn create_requires_title() {
        let result = assemble_create(&input_from(serde_json::json!({ "carrier": "EMS" })));
        assert!(matches!(result, Err(PayloadError::MissingTitle)));
    }

    #[test]
    fn create_rejects_whitespace_only_title() {
        let result = assemble_create(&input_from(serde_json::json!({ "title": "   " })));
        assert!(matches!(result, Err(PayloadError::MissingTitle)));
    }

    #[test]
    fn create_accepts_legacy_name_alias() {
        let created = assemble_create(&input_from(serde_json::json!({ "name": " T-shirt " })))
            .expect("name alias should satisfy the title requirement");
        assert_eq!(created.title, "T-shirt");
        assert_eq!(created.status, "publish");
    }

    #[test]
    fn undefined_values_never_reach_the_payload() {
        let created = assemble_create(&input_from(serde_json::json!({
            "title": "X",
            "length_cm": "",
            "width_cm": null,
            "height_cm": "abc",
            "weight_g": "350",
            "carrier": "  ",
        })))
        .expect("create");

        let meta = serde_json::to_value(&created.meta).expect("serialize meta");
        let keys: Vec<&str> = meta.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["weight_g"], "only the defined key survives");
        assert_eq!(meta["weight_g"], 350.0);
    }

    #[test]
    fn zero_is_kept_when_explicitly_entered() {
        let created = assemble_create(&input_from(serde_json::json!({
            "title": "X",
            "shipping_actual_yen": 0
        })))
        .expect("create");
        assert_eq!(created.meta.shipping_actual_yen, Some(0.0));
    }

    #[test]
    fn category_normalizes_to_canonical_key_only() {
        let created = assemble_create(&input_from(serde_json::json!({
            "title": "X",
            "child_category": "toys"
        })))
        .expect("create");
        assert_eq!(created.meta.product_category.as_deref(), Some("toys"));
        assert_eq!(created.meta.child_category, None);

        let out = serde_json::to_value(&created).expect("serialize");
        assert!(out["meta"].get("child_category").is_none());
    }

    #[test]
    fn canonical_category_wins_over_legacy() {
        let created = assemble_create(&input_from(serde_json::json!({
            "title": "X",
            "product_category": "anime",
            "child_category": "toys"
        })))
        .expect("create");
        assert_eq!(created.meta.product_category.as_deref(), Some("anime"));
    }

    #[test]
    fn category_normalization_is_idempotent() {
        let first = assemble_update(&input_from(serde_json::json!({
            "child_category": "toys"
        })));
        let again = assemble_update(&input_from(serde_json::json!({
            "product_category": "toys"
        })));
        assert_eq!(
            first.meta.as_ref().unwrap().product_category,
            again.meta.as_ref().unwrap().product_category
        );
    }

    #[test]
    fn notes_folds_into_remark() {
        let created = assemble_create(&input_from(serde_json::json!({
            "title": "X",
            "notes": "fragile"
        })))
        .expect("create");
        assert_eq!(created.meta.remark.as_deref(), Some("fragile"));
        assert_eq!(created.meta.notes, None);
    }

    #[test]
    fn sheet_ids_drop_junk_entries() {
        let created = assemble_create(&input_from(serde_json::json!({
            "title": "X",
            "product_sheet": [3, "4", "", "abc"]
        })))
        .expect("create");
        assert_eq!(created.product_sheet, Some(vec![3, 4]));
    }

    #[test]
    fn sheet_omitted_when_nothing_survives() {
        let created = assemble_create(&input_from(serde_json::json!({
            "title": "X",
            "product_sheet": ["", "abc"]
        })))
        .expect("create");
        assert_eq!(created.product_sheet, None);
    }

    #[test]
    fn update_with_no_fields_sends_nothing() {
        let update = assemble_update(&input_from(serde_json::json!({})));
        let out = serde_json::to_value(&update).expect("serialize");
        assert_eq!(out, serde_json::json!({}), "empty update body: {out}");
    }

    #[test]
    fn update_sends_only_supplied_fields() {
        let update = assemble_update(&input_from(serde_json::json!({
            "weight_g": 500,
            "carrier": "FedEx"
        })));
        assert_eq!(update.title, None);
        let meta = update.meta.expect("meta");
        assert_eq!(meta.weight_g, Some(500.0));
        assert_eq!(meta.carrier.as_deref(), Some("FedEx"));
        assert_eq!(meta.length_cm, None);
    }

    #[test]
    fn round_trip_preserves_numeric_values() {
        let created = assemble_create(&input_from(serde_json::json!({
            "title": "Figure",
            "length_cm": "10",
            "width_cm": 4,
            "height_cm": "5",
            "weight_g": 350,
            "volume_cm3": 40
        })))
        .expect("create");

        // Simulate the external system echoing the payload back.
        let echoed = serde_json::json!({
            "id": 1,
            "title": { "rendered": created.title },
            "meta": serde_json::to_value(&created.meta).unwrap()
        });
        let record: crate::types::ProductRecord =
            serde_json::from_value(echoed).expect("echoed record");
        let meta = record.meta.expect("meta");
        assert_eq!(meta.length_cm, Some(10.0));
        assert_eq!(meta.width_cm, Some(4.0));
        assert_eq!(meta.height_cm, Some(5.0));
        assert_eq!(meta.weight_g, Some(350.0));
        assert_eq!(meta.volume_cm3, Some(40.0));
    }
}
