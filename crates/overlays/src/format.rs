//! Number formatting for popup text.

/// Digits after the point that always cover the exact decimal expansion
/// of an f64 (at most 767 significant digits).
const EXACT_DIGITS: usize = 800;

/// Format `value` with `digits` significant digits.
///
/// Follows the browser's `Number.prototype.toPrecision`: fixed notation
/// unless the exponent is below -6 or at least `digits`, in which case the
/// result looks like `1.2e+3`. Exact ties round away from zero. `digits`
/// is clamped to 1..=100 as in the browser.
pub fn to_precision(value: f64, digits: usize) -> String {
    let digits = digits.clamp(1, 100);

    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }

    let (kept, exponent) = round_half_up(value.abs(), digits);
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -6 || exponent >= digits as i32 {
        let mut mantissa = kept[..1].to_string();
        if digits > 1 {
            mantissa.push('.');
            mantissa.push_str(&kept[1..]);
        }
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{}{}e{}{}", sign, mantissa, exp_sign, exponent.abs())
    } else if exponent >= 0 {
        let (int, frac) = kept.split_at(exponent as usize + 1);
        if frac.is_empty() {
            format!("{}{}", sign, int)
        } else {
            format!("{}{}.{}", sign, int, frac)
        }
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{}0.{}{}", sign, zeros, kept)
    }
}

/// The first `digits` significant digits of a positive finite `value`,
/// rounded half up on its exact expansion, with the decimal exponent of
/// the leading digit.
fn round_half_up(value: f64, digits: usize) -> (String, i32) {
    let exact = format!("{:.*e}", EXACT_DIGITS, value);
    let (mantissa, exponent) = match exact.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (exact.as_str(), 0),
    };

    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let mut kept = all[..digits].to_vec();
    let mut exponent = exponent;

    if all[digits] >= b'5' {
        let mut i = digits;
        loop {
            if i == 0 {
                // Every kept digit was 9: 99 -> 10 with the exponent bumped.
                kept.insert(0, b'1');
                kept.truncate(digits);
                exponent += 1;
                break;
            }
            i -= 1;
            if kept[i] == b'9' {
                kept[i] = b'0';
            } else {
                kept[i] += 1;
                break;
            }
        }
    }

    (String::from_utf8_lossy(&kept).into_owned(), exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_notation() {
        assert_eq!(to_precision(5.234, 2), "5.2");
        assert_eq!(to_precision(12.34, 2), "12");
        assert_eq!(to_precision(0.5, 2), "0.50");
        assert_eq!(to_precision(0.0123, 2), "0.012");
        assert_eq!(to_precision(-3.14159, 3), "-3.14");
    }

    #[test]
    fn test_exponential_notation() {
        assert_eq!(to_precision(123.4, 2), "1.2e+2");
        assert_eq!(to_precision(1234.0, 2), "1.2e+3");
        assert_eq!(to_precision(0.00000012, 2), "1.2e-7");
    }

    #[test]
    fn test_rounding_carries_into_exponent() {
        assert_eq!(to_precision(9.96, 2), "10");
        assert_eq!(to_precision(99.7, 2), "1.0e+2");
    }

    #[test]
    fn test_exact_ties_round_up() {
        assert_eq!(to_precision(12.5, 2), "13");
        assert_eq!(to_precision(0.125, 2), "0.13");
        assert_eq!(to_precision(2.5, 1), "3");
        assert_eq!(to_precision(-2.5, 1), "-3");
        assert_eq!(to_precision(242.5, 2), "2.4e+2");
    }

    #[test]
    fn test_near_ties_follow_the_binary_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(to_precision(1.005, 3), "1.00");
        // 0.15 is stored as 0.1499999999999999944...
        assert_eq!(to_precision(0.15, 1), "0.1");
    }

    #[test]
    fn test_zero_and_non_finite() {
        assert_eq!(to_precision(0.0, 2), "0.0");
        assert_eq!(to_precision(f64::NAN, 2), "NaN");
    }
}
