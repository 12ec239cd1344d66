//! Number formatting for the worksheet display.
//!
//! Currency amounts are rounded half away from zero on their shortest decimal
//! representation, so `216.675`, which is stored in binary as slightly less,
//! still shows as `216.68`. Integer slots round half up, matching how the grid has always
//! shown per-point sums.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "฿";
const GROUP_SEPARATOR: char = ',';

/// Fixed currency convention: symbol prefix, thousands grouping, fixed fraction digits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub fraction_digits: usize,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            fraction_digits: 2,
        }
    }
}

impl CurrencyFormat {
    pub fn with_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Format a monetary amount, e.g. `฿1,234.50` or `-฿12.00`
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return format!("{}{}", self.symbol, non_finite(value));
        }

        let (negative, int_part, frac_part) = to_fixed(value, self.fraction_digits);
        let sign = if negative { "-" } else { "" };
        if frac_part.is_empty() {
            format!("{}{}{}", sign, self.symbol, group_thousands(&int_part))
        } else {
            format!("{}{}{}.{}", sign, self.symbol, group_thousands(&int_part), frac_part)
        }
    }
}

/// Round half up to the nearest integer (`2.5 -> 3`, `-2.5 -> -2`)
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Format a value as a grouped integer with no fraction digits, e.g. `12,345`
pub fn format_integer(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value).to_string();
    }

    let (negative, int_part, _) = to_fixed(round_half_up(value), 0);
    let sign = if negative { "-" } else { "" };
    format!("{}{}", sign, group_thousands(&int_part))
}

/// Insert thousands separators into a string of ASCII digits
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Truncate a string to at most `max_len` characters, marking the cut with an ellipsis
pub fn truncate_string(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_len.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn non_finite(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value > 0.0 {
        "∞"
    } else {
        "-∞"
    }
}

/// Split `value` into sign, integer digits and exactly `digits` fraction digits.
/// Negative zero and values that round to zero are reported as non-negative.
fn to_fixed(value: f64, digits: usize) -> (bool, String, String) {
    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut buf: Vec<u8> = int_part.bytes().collect();
    let frac_bytes = frac_part.as_bytes();
    for i in 0..digits {
        buf.push(frac_bytes.get(i).copied().unwrap_or(b'0'));
    }

    if frac_bytes.get(digits).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for byte in buf.iter_mut().rev() {
            if *byte == b'9' {
                *byte = b'0';
            } else {
                *byte += 1;
                carry = false;
                break;
            }
        }
        if carry {
            buf.insert(0, b'1');
        }
    }

    let split = buf.len() - digits;
    let int_digits = String::from_utf8_lossy(&buf[..split]).into_owned();
    let frac_digits = String::from_utf8_lossy(&buf[split..]).into_owned();
    let is_zero = buf.iter().all(|b| *b == b'0');

    (value < 0.0 && !is_zero, int_digits, frac_digits)
}
