//! Number formatting for delimited reports.

/// Maximum number of fractional digits written for a decimal value
pub const MAX_FRACTION_DIGITS: usize = 5;

/// Format `value` with at least one integer digit, at most
/// [`MAX_FRACTION_DIGITS`] fractional digits and no trailing zeros, using
/// `decimal_separator` between integer and fraction.
///
/// ```
/// use match_eval::utils::format::format_decimal;
///
/// assert_eq!(format_decimal(0.5, '.'), "0.5");
/// assert_eq!(format_decimal(2.0, '.'), "2");
/// assert_eq!(format_decimal(1.234_567, ','), "1,23457");
/// ```
#[must_use]
pub fn format_decimal(value: f64, decimal_separator: char) -> String {
    let fixed = format!("{value:.prec$}", prec = MAX_FRACTION_DIGITS);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    if trimmed == "-0" {
        return "0".to_string();
    }
    trimmed.replacen('.', &decimal_separator.to_string(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(0.0, '.'), "0");
        assert_eq!(format_decimal(0.52, '.'), "0.52");
        assert_eq!(format_decimal(0.52, ','), "0,52");
        assert_eq!(format_decimal(12.0, ','), "12");
        assert_eq!(format_decimal(3.141_592_65, '.'), "3.14159");
        assert_eq!(format_decimal(0.000_001, '.'), "0");
        assert_eq!(format_decimal(-0.000_001, '.'), "0");
        assert_eq!(format_decimal(1_234_567.5, '.'), "1234567.5");
    }
}
