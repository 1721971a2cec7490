/// Maximum fraction digits, matching the `en-US` number format.
const MAX_FRACTION_DIGITS: usize = 3;

/// Format a number the way `en-US` locale formatting does: comma thousands
/// separators, at most three fraction digits, trailing zeros dropped.
/// Halves round away from zero.
///
/// `13278.0781` becomes `"13,278.078"`, `15.0` becomes `"15"`.
pub fn format_locale(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, round_half_away(value.abs()));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    let negative = value < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac_part.is_empty());
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Round to `MAX_FRACTION_DIGITS` places. `format!` alone rounds ties to even.
fn round_half_away(value: f64) -> f64 {
    let scale = 10f64.powi(MAX_FRACTION_DIGITS as i32);
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

/// Insert a comma every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers() {
        assert_eq!(format_locale(0.0), "0");
        assert_eq!(format_locale(15.0), "15");
        assert_eq!(format_locale(999.0), "999");
        assert_eq!(format_locale(1000.0), "1,000");
        assert_eq!(format_locale(1234567.0), "1,234,567");
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(format_locale(13278.0781), "13,278.078");
        assert_eq!(format_locale(1234.5), "1,234.5");
        assert_eq!(format_locale(0.0004), "0");
        assert_eq!(format_locale(2.9996), "3");
    }

    #[test]
    fn test_halves_round_away_from_zero() {
        assert_eq!(format_locale(0.0625), "0.063");
        assert_eq!(format_locale(1234.5625), "1,234.563");
        assert_eq!(format_locale(-0.0625), "-0.063");
        assert_eq!(format_locale(0.0005), "0.001");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_locale(-1234.25), "-1,234.25");
        assert_eq!(format_locale(-0.0001), "0");
    }
}
