// Parsing and formatting helpers.
//
// Numeric cells are read the way a browser reads them with `parseInt` /
// `parseFloat`: skip leading whitespace, take the longest numeric prefix and
// ignore whatever follows. `"1,234"` is therefore 1 and `"5%"` is 5.
use num_format::{Locale, ToFormattedString};

/// Split an optional leading sign off `s`. Returns `(negative, rest)`.
fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

fn digit_prefix_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Parse a count from the leading digits of `s`.
///
/// - Leading whitespace and a `+` sign are skipped.
/// - Reading stops at the first non-digit (`"12abc"` -> 12, `"7.8"` -> 7,
///   `"1e3"` -> 1, `"1,234"` -> 1).
/// - No leading digit, a negative value or a value past `u64::MAX` yields
///   `None`.
pub fn parse_count_safe(s: Option<&str>) -> Option<u64> {
    let (negative, rest) = split_sign(s?.trim_start());
    let digits = &rest[..digit_prefix_len(rest)];
    if digits.is_empty() {
        return None;
    }
    let n = digits.parse::<u64>().ok()?;
    if negative && n != 0 {
        return None;
    }
    Some(n)
}

/// Parse a ratio from the longest decimal prefix of `s` (`"3.75%"` -> 3.75).
///
/// The prefix is `[sign] digits [. digits] [e [sign] digits]` with at least
/// one digit before the exponent. Negative or non-finite values yield `None`.
pub fn parse_ratio_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim_start();
    let (_, unsigned) = split_sign(s);
    let sign_len = s.len() - unsigned.len();

    let int_len = digit_prefix_len(unsigned);
    let mut end = int_len;
    let mut mantissa_digits = int_len;
    if unsigned[end..].starts_with('.') {
        let frac_len = digit_prefix_len(&unsigned[end + 1..]);
        mantissa_digits += frac_len;
        end += 1 + frac_len;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if let Some(exp) = unsigned[end..].strip_prefix(|c| c == 'e' || c == 'E') {
        let (_, exp_digits) = split_sign(exp);
        let exp_len = digit_prefix_len(exp_digits);
        if exp_len > 0 {
            end += 1 + (exp.len() - exp_digits.len()) + exp_len;
        }
    }

    let n = s[..sign_len + end].parse::<f64>().ok()?;
    ratio_from_f64(n)
}

fn ratio_from_f64(n: f64) -> Option<f64> {
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    Some(n)
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // `num-format` inserts locale-aware separators, e.g. `9,855`.
    n.to_formatted_string(&Locale::en)
}

/// Fixed two-decimal rendering used for CTR cells.
pub fn format_ratio(n: f64) -> String {
    format!("{:.2}", n)
}
