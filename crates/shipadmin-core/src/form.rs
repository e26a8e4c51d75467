//! In-memory state of one product editing session.
//!
//! Numeric fields hold strings while the user types; coercion to numbers
//! happens only at submit. The derived volume field is read-only and
//! recomputed from the three dimensions on a short debounce, so rapid typing
//! does not thrash the displayed value. Normalization of a field is deferred
//! while an IME composition is in flight on it.

use std::time::{Duration, Instant};

use crate::input::{normalize_numeric_input, parse_decimal};
use crate::metric::volumetric_weight_opt;

/// Delay between the last dimension edit and the derived-metric recompute.
pub const RECOMPUTE_DEBOUNCE: Duration = Duration::from_millis(200);

/// User-editable numeric fields. The derived volume is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    ShippingActualYen,
    LengthCm,
    WidthCm,
    HeightCm,
    WeightG,
}

impl NumericField {
    fn is_dimension(self) -> bool {
        matches!(
            self,
            NumericField::LengthCm | NumericField::WidthCm | NumericField::HeightCm
        )
    }
}

/// Free-text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Carrier,
    AmazonSizeLabel,
    Remark,
}

/// Values coerced out of the form at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub title: String,
    pub shipping_actual_yen: Option<f64>,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub weight_g: Option<f64>,
    pub volume_cm3: Option<f64>,
    pub carrier: String,
    pub amazon_size_label: String,
    pub remark: String,
}

/// State of a single editing session. Not shared across sessions; dropping
/// the form discards unsaved edits.
#[derive(Debug, Default, Clone)]
pub struct ProductForm {
    title: String,
    shipping_actual_yen: String,
    length_cm: String,
    width_cm: String,
    height_cm: String,
    weight_g: String,
    volume_cm3: String,
    carrier: String,
    amazon_size_label: String,
    remark: String,
    composing: Option<NumericField>,
    recompute_due: Option<Instant>,
}

impl ProductForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the form from an existing record's values, as when editing.
    #[must_use]
    pub fn from_values(values: &FormValues) -> Self {
        let show = |v: Option<f64>| v.map(display_number).unwrap_or_default();
        Self {
            title: values.title.clone(),
            shipping_actual_yen: show(values.shipping_actual_yen),
            length_cm: show(values.length_cm),
            width_cm: show(values.width_cm),
            height_cm: show(values.height_cm),
            weight_g: show(values.weight_g),
            volume_cm3: show(values.volume_cm3),
            carrier: values.carrier.clone(),
            amazon_size_label: values.amazon_size_label.clone(),
            remark: values.remark.clone(),
            composing: None,
            recompute_due: None,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: &str) {
        *self.text_slot(field) = value.to_string();
    }

    /// Apply a keystroke to a numeric field.
    ///
    /// The raw value is sanitized immediately unless an IME composition is
    /// active on the field, in which case the raw text is kept verbatim
    /// until [`end_composition`](Self::end_composition). Edits to a
    /// dimension schedule a debounced recompute of the derived volume.
    pub fn input_numeric(&mut self, field: NumericField, raw: &str, now: Instant) {
        let value = if self.composing == Some(field) {
            raw.to_string()
        } else {
            normalize_numeric_input(raw)
        };
        *self.numeric_slot(field) = value;
        if field.is_dimension() {
            self.recompute_due = Some(now + RECOMPUTE_DEBOUNCE);
        }
    }

    /// Mark the start of an IME composition on a numeric field.
    pub fn begin_composition(&mut self, field: NumericField) {
        self.composing = Some(field);
    }

    /// End an IME composition: the accumulated raw text is normalized now.
    pub fn end_composition(&mut self, field: NumericField, now: Instant) {
        if self.composing != Some(field) {
            return;
        }
        self.composing = None;
        let normalized = normalize_numeric_input(self.numeric_slot(field));
        *self.numeric_slot(field) = normalized;
        if field.is_dimension() {
            self.recompute_due = Some(now + RECOMPUTE_DEBOUNCE);
        }
    }

    /// Apply a pending derived-metric recompute if its debounce has elapsed.
    ///
    /// Returns `true` when the volume field was updated.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.recompute_due {
            Some(due) if now >= due => {
                self.recompute_due = None;
                self.recompute_volume();
                true
            }
            _ => false,
        }
    }

    /// Force any pending recompute, regardless of the debounce. Used on
    /// blur and before submit.
    pub fn flush(&mut self) {
        if self.recompute_due.take().is_some() {
            self.recompute_volume();
        }
    }

    /// Derived volume as displayed. Read-only: there is no setter.
    #[must_use]
    pub fn volume_cm3(&self) -> &str {
        &self.volume_cm3
    }

    #[must_use]
    pub fn numeric(&self, field: NumericField) -> &str {
        match field {
            NumericField::ShippingActualYen => &self.shipping_actual_yen,
            NumericField::LengthCm => &self.length_cm,
            NumericField::WidthCm => &self.width_cm,
            NumericField::HeightCm => &self.height_cm,
            NumericField::WeightG => &self.weight_g,
        }
    }

    #[must_use]
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.title,
            TextField::Carrier => &self.carrier,
            TextField::AmazonSizeLabel => &self.amazon_size_label,
            TextField::Remark => &self.remark,
        }
    }

    /// Coerce the current state into submit values, flushing any pending
    /// recompute first. Blank or unparseable numerics come out as `None`.
    pub fn submit(&mut self) -> FormValues {
        self.flush();
        FormValues {
            title: self.title.trim().to_string(),
            shipping_actual_yen: parse_decimal(&self.shipping_actual_yen),
            length_cm: parse_decimal(&self.length_cm),
            width_cm: parse_decimal(&self.width_cm),
            height_cm: parse_decimal(&self.height_cm),
            weight_g: parse_decimal(&self.weight_g),
            volume_cm3: parse_decimal(&self.volume_cm3),
            carrier: self.carrier.trim().to_string(),
            amazon_size_label: self.amazon_size_label.trim().to_string(),
            remark: self.remark.trim().to_string(),
        }
    }

    fn recompute_volume(&mut self) {
        let derived = volumetric_weight_opt(
            parse_decimal(&self.length_cm),
            parse_decimal(&self.width_cm),
            parse_decimal(&self.height_cm),
        );
        self.volume_cm3 = derived.map(display_number).unwrap_or_default();
    }

    fn numeric_slot(&mut self, field: NumericField) -> &mut String {
        match field {
            NumericField::ShippingActualYen => &mut self.shipping_actual_yen,
            NumericField::LengthCm => &mut self.length_cm,
            NumericField::WidthCm => &mut self.width_cm,
            NumericField::HeightCm => &mut self.height_cm,
            NumericField::WeightG => &mut self.weight_g,
        }
    }

    fn text_slot(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Title => &mut self.title,
            TextField::Carrier => &mut self.carrier,
            TextField::AmazonSizeLabel => &mut self.amazon_size_label,
            TextField::Remark => &mut self.remark,
        }
    }
}

/// Render a number for display: integers without a fraction part.
fn display_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}
