//! Incremental normalization of numeric keystrokes.
//!
//! Dimension and price fields are held as strings while the user types, so
//! intermediate states like `"-"` or `"3."` must survive normalization.
//! Full parsing to a number happens only at submit time via
//! [`parse_decimal`].

const FULL_WIDTH: &str = "０１２３４５６７８９．－";
const HALF_WIDTH: &[u8] = b"0123456789.-";

/// Fold a full-width digit, period, or minus into its half-width equivalent.
fn fold_full_width(ch: char) -> char {
    FULL_WIDTH
        .chars()
        .position(|c| c == ch)
        .map_or(ch, |i| HALF_WIDTH[i] as char)
}

/// Sanitize a raw keystroke string into something later parseable as a
/// decimal, without rounding or reformatting the in-progress value.
///
/// - full-width digits/`．`/`－` become half-width
/// - everything outside `[0-9.-]` is stripped
/// - at most one minus sign survives, and only as a leading sign
/// - at most one decimal point survives (the first)
#[must_use]
pub fn normalize_numeric_input(raw: &str) -> String {
    let mut out: String = raw
        .trim()
        .chars()
        .map(fold_full_width)
        .filter(|c| matches!(c, '0'..='9' | '.' | '-'))
        .collect();

    if out.contains('-') {
        let leading = out.starts_with('-');
        out.retain(|c| c != '-');
        if leading {
            out.insert(0, '-');
        }
    }

    if let Some(i) = out.find('.') {
        let (head, tail) = out.split_at(i + 1);
        let mut kept = head.to_string();
        kept.extend(tail.chars().filter(|c| *c != '.'));
        out = kept;
    }
    out
}

/// Submit-time coercion: blank or non-numeric input means "no value".
///
/// Returns `Some` only for finite parses; `""`, `"-"`, `"."` and the like
/// all map to `None` rather than zero.
#[must_use]
pub fn parse_decimal(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_numbers_through() {
        assert_eq!(normalize_numeric_input("980"), "980");
        assert_eq!(normalize_numeric_input("12.5"), "12.5");
        assert_eq!(normalize_numeric_input("-3"), "-3");
    }

    #[test]
    fn folds_full_width_digits() {
        assert_eq!(normalize_numeric_input("１２３"), "123");
        assert_eq!(normalize_numeric_input("１２．５"), "12.5");
        assert_eq!(normalize_numeric_input("－７"), "-7");
    }

    #[test]
    fn strips_non_numeric_characters() {
        assert_eq!(normalize_numeric_input("12cm"), "12");
        assert_eq!(normalize_numeric_input("¥1,980"), "1980");
        assert_eq!(normalize_numeric_input("abc"), "");
    }

    #[test]
    fn collapses_minus_to_leading_sign() {
        assert_eq!(normalize_numeric_input("--5"), "-5");
        assert_eq!(normalize_numeric_input("-5-"), "-5");
        // Interior minus with no leading sign disappears entirely.
        assert_eq!(normalize_numeric_input("5-2"), "52");
        // Sign position is judged after stripping foreign characters.
        assert_eq!(normalize_numeric_input("a-5"), "-5");
    }

    #[test]
    fn keeps_first_decimal_point_only() {
        assert_eq!(normalize_numeric_input("1.2.3"), "1.23");
        assert_eq!(normalize_numeric_input("..5"), ".5");
    }

    #[test]
    fn preserves_in_progress_states() {
        // A user mid-keystroke must not have the field rewritten under them.
        assert_eq!(normalize_numeric_input("-"), "-");
        assert_eq!(normalize_numeric_input("3."), "3.");
        assert_eq!(normalize_numeric_input(""), "");
    }

    #[test]
    fn parse_decimal_maps_blank_to_none() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_decimal("."), None);
    }

    #[test]
    fn parse_decimal_accepts_finite_numbers() {
        assert_eq!(parse_decimal("40"), Some(40.0));
        assert_eq!(parse_decimal(" 12.5 "), Some(12.5));
        assert_eq!(parse_decimal("0"), Some(0.0));
        assert_eq!(parse_decimal("-2.5"), Some(-2.5));
    }

    #[test]
    fn parse_decimal_rejects_non_finite() {
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }
}
