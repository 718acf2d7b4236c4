//! Locale-tolerant numeric cell parsing.
//!
//! Exports arrive with English (`1,234.5`) and Danish (`1.234,5`) number
//! formatting, optional `%` suffixes and stray spaces. Anything that still
//! fails to parse degrades to zero at the call site.

const NBSP: char = '\u{a0}';

/// Parses a session count. Grouping separators are dropped; a trailing
/// fractional part (separator not followed by exactly three digits) is
/// truncated.
pub fn parse_count(raw: &str) -> u64 {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != NBSP)
        .collect();
    let integral = match compact.rfind(|c: char| c == '.' || c == ',') {
        Some(idx) if compact[idx + 1..].len() != 3 => &compact[..idx],
        _ => compact.as_str(),
    };
    let digits: String = integral.chars().filter(|c| *c != ',' && *c != '.').collect();
    digits.parse::<u64>().unwrap_or(0)
}

/// Parses a decimal cell. Returns the value and whether it carried a `%`
/// suffix.
pub fn parse_decimal(raw: &str) -> Option<(f64, bool)> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != NBSP)
        .collect();
    let (number, is_percent) = match compact.strip_suffix('%') {
        Some(stripped) => (stripped, true),
        None => (compact.as_str(), false),
    };
    let normalized = if number.contains(',') && !number.contains('.') {
        number.replace(',', ".")
    } else {
        number.replace(',', "")
    };
    let value = normalized.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((value, is_percent))
}

/// Converts a rate cell to a percentage. Fractions are scaled by 100;
/// values already written as `45%` are taken as-is.
pub fn parse_rate_percent(raw: &str) -> f64 {
    match parse_decimal(raw) {
        Some((value, true)) => value,
        Some((value, false)) => value * 100.0,
        None => 0.0,
    }
}

pub fn parse_position(raw: &str) -> f64 {
    parse_decimal(raw)
        .map(|(value, _)| value.max(0.0))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::{parse_count, parse_decimal, parse_position, parse_rate_percent};

    #[test]
    fn counts_accept_grouping_separators() {
        assert_eq!(parse_count("1234"), 1234);
        assert_eq!(parse_count("1,234"), 1234);
        assert_eq!(parse_count("1.234.567"), 1_234_567);
        assert_eq!(parse_count("12 345"), 12_345);
        assert_eq!(parse_count("12.0"), 12);
        assert_eq!(parse_count("1,234.50"), 1234);
    }

    #[test]
    fn bad_counts_default_to_zero() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("n/a"), 0);
        assert_eq!(parse_count("-5"), 0);
    }

    #[test]
    fn decimals_handle_both_locales() {
        assert_eq!(parse_decimal("0.45"), Some((0.45, false)));
        assert_eq!(parse_decimal("0,45"), Some((0.45, false)));
        assert_eq!(parse_decimal("1,234.5"), Some((1234.5, false)));
        assert_eq!(parse_decimal("45%"), Some((45.0, true)));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn rates_become_percentages() {
        assert!((parse_rate_percent("0.5") - 50.0).abs() < 1e-9);
        assert!((parse_rate_percent("0,3") - 30.0).abs() < 1e-9);
        assert!((parse_rate_percent("45.5%") - 45.5).abs() < 1e-9);
        assert_eq!(parse_rate_percent(""), 0.0);
    }

    #[test]
    fn positions_are_never_negative() {
        assert!((parse_position("7.3") - 7.3).abs() < 1e-9);
        assert_eq!(parse_position("-2"), 0.0);
        assert_eq!(parse_position("-"), 0.0);
    }
}
