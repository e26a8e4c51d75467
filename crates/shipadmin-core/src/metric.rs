//! Volumetric-weight derivation from package dimensions.

/// Divisor applied to `L×W×H` when deriving the shipping metric.
///
/// The billing estimate in production divides raw volume by 5; see DESIGN.md
/// for the record of that choice.
pub const VOLUMETRIC_DIVISOR: f64 = 5.0;

/// Derive the volumetric weight from package dimensions in centimeters.
///
/// Returns `None` unless all three dimensions are finite — a partially
/// filled form yields no derived value rather than a misleading zero.
#[must_use]
pub fn volumetric_weight(length_cm: f64, width_cm: f64, height_cm: f64) -> Option<f64> {
    if !(length_cm.is_finite() && width_cm.is_finite() && height_cm.is_finite()) {
        return None;
    }
    let derived = (length_cm * width_cm * height_cm / VOLUMETRIC_DIVISOR).round();
    derived.is_finite().then_some(derived)
}

/// Convenience for optional dimensions: any missing dimension clears the
/// derived metric.
#[must_use]
pub fn volumetric_weight_opt(
    length_cm: Option<f64>,
    width_cm: Option<f64>,
    height_cm: Option<f64>,
) -> Option<f64> {
    volumetric_weight(length_cm?, width_cm?, height_cm?)
}
