//! Minimum-budget check. The threshold is defined in EUR and converted with a
//! fixed rate table; unknown currency codes convert at 1.

/// Smallest accepted budget bound, in EUR.
pub const BASE_MINIMUM_EUR: f64 = 300.0;

const CURRENCY_RATES: &[(&str, f64)] = &[
    ("EUR", 1.0),
    ("USD", 1.07),
    ("GBP", 0.86),
    ("JPY", 160.0),
    ("CAD", 1.46),
    ("AUD", 1.65),
    ("CHF", 0.96),
    ("CNY", 7.75),
    ("INR", 89.0),
];

pub fn exchange_rate(code: &str) -> f64 {
    CURRENCY_RATES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, rate)| *rate)
        .unwrap_or(1.0)
}

pub fn minimum_required(code: &str) -> f64 {
    BASE_MINIMUM_EUR * exchange_rate(code)
}

/// Returns the message to show under the budget fields, or `None` when the
/// range is acceptable.
pub fn validate_budget(from: f64, to: f64, code: &str) -> Option<String> {
    let minimum = minimum_required(code);

    // NaN bounds (an unparsable input) fail the minimum check too.
    if !(from >= minimum) || !(to >= minimum) {
        return Some(format!(
            "Minimum budget is €{} or equivalent ({:.2} {})",
            BASE_MINIMUM_EUR, minimum, code
        ));
    }
    if to <= from {
        return Some("Budget To must be greater than Budget From.".to_string());
    }
    None
}
