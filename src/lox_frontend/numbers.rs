//! Canonical text for numbers: trailing fractional zeros are dropped but at
//! least one digit always follows the decimal point.

/// Normalizes a scanned number lexeme, e.g. `2` -> `2.0`, `200.00` -> `200.0`.
pub fn normalize_number_literal(lexeme: &str) -> String {
    let mut text = if lexeme.contains('.') {
        lexeme.trim_end_matches('0').to_owned()
    } else {
        format!("{}.", lexeme)
    };

    if text.ends_with('.') {
        text.push('0');
    }
    text
}

/// Display form of a runtime number.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}Infinity", sign);
    }

    let mut text = value.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}
