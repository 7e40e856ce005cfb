//! Decimal patterns for axis tick labels.
//!
//! A pattern is an integer part made of `#`, `0` and `,`, an optional `.`
//! followed by a fraction part of `0` and `#`, an optional exponent `E0…`,
//! and an optional `%` suffix:
//!
//! | pattern   | 1234.5678   | 0.456  |
//! |-----------|-------------|--------|
//! | `#.##`    | `1234.57`   | `.46`  |
//! | `0.00`    | `1234.57`   | `0.46` |
//! | `#,##0.0` | `1,234.6`   | `0.5`  |
//! | `0.0E0`   | `1.2E3`     | `4.6E-1` |
//! | `0%`      | `123457%`   | `46%`  |

use fnplot_common::{PlotError, Result};
use std::fmt;
use std::str::FromStr;

/// A parsed decimal pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pattern: String,
    min_integer_digits: usize,
    min_fraction_digits: usize,
    max_fraction_digits: usize,
    grouping: Option<usize>,
    min_exponent_digits: Option<usize>,
    percent: bool,
}

impl NumberFormat {
    /// Parses a pattern such as `#.##` or `#,##0.00`.
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| {
            PlotError::invalid_field(format!("bad number pattern '{pattern}': {reason}"), "number_format")
        };

        let (body, percent) = match pattern.strip_suffix('%') {
            Some(body) => (body, true),
            None => (pattern, false),
        };
        let (mantissa, exponent) = match body.split_once('E') {
            Some((mantissa, exponent)) => (mantissa, Some(exponent)),
            None => (body, None),
        };
        let (integer, fraction) = match mantissa.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (mantissa, ""),
        };

        if integer.is_empty() && fraction.is_empty() {
            return Err(invalid("no digit placeholders"));
        }
        if !integer.chars().all(|c| matches!(c, '#' | '0' | ',')) {
            return Err(invalid("integer part may only contain '#', '0' and ','"));
        }
        if integer.trim_start_matches(|c: char| c == '#' || c == ',').contains('#') {
            return Err(invalid("'#' may not follow '0' in the integer part"));
        }
        if !fraction.chars().all(|c| matches!(c, '#' | '0')) {
            return Err(invalid("fraction part may only contain '0' and '#'"));
        }
        if fraction.trim_start_matches('0').contains('0') {
            return Err(invalid("'0' may not follow '#' in the fraction part"));
        }

        let grouping = match integer.rfind(',') {
            Some(pos) => {
                let size = integer.len() - pos - 1;
                if size == 0 {
                    return Err(invalid("grouping separator at the end of the integer part"));
                }
                Some(size)
            }
            None => None,
        };

        let min_exponent_digits = match exponent {
            Some(exp) if !exp.is_empty() && exp.chars().all(|c| c == '0') => Some(exp.len()),
            Some(_) => return Err(invalid("exponent must be one or more '0'")),
            None => None,
        };
        if min_exponent_digits.is_some() && (percent || grouping.is_some()) {
            return Err(invalid("scientific patterns cannot use grouping or '%'"));
        }

        let min_integer_digits = integer.chars().filter(|&c| c == '0').count();
        let min_fraction_digits = fraction.chars().filter(|&c| c == '0').count();

        Ok(Self {
            pattern: pattern.to_string(),
            min_integer_digits,
            min_fraction_digits,
            max_fraction_digits: fraction.len(),
            grouping,
            min_exponent_digits,
            percent,
        })
    }

    /// The pattern this format was parsed from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Formats `value` according to the pattern.
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "∞" } else { "-∞" }.to_string();
        }

        match self.min_exponent_digits {
            Some(digits) => self.format_scientific(value, digits),
            None => {
                let scaled = if self.percent { value * 100.0 } else { value };
                let mut text = self.format_fixed(scaled);
                if self.percent {
                    text.push('%');
                }
                text
            }
        }
    }

    fn format_fixed(&self, value: f64) -> String {
        let rounded = format!("{:.*}", self.max_fraction_digits, value.abs());
        let (integer, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

        let fraction = trim_fraction(fraction, self.min_fraction_digits);
        let integer = integer.trim_start_matches('0');
        let mut integer = format!("{integer:0>width$}", width = self.min_integer_digits);
        if integer.is_empty() && fraction.is_empty() {
            integer.push('0');
        }
        if let Some(size) = self.grouping {
            integer = group_digits(&integer, size);
        }

        let is_zero = rounded.bytes().all(|b| b == b'0' || b == b'.');
        let sign = if value < 0.0 && !is_zero { "-" } else { "" };
        if fraction.is_empty() {
            format!("{sign}{integer}")
        } else {
            format!("{sign}{integer}.{fraction}")
        }
    }

    fn format_scientific(&self, value: f64, exponent_digits: usize) -> String {
        let integer_digits = self.min_integer_digits.max(1) as i32;
        let (mut mantissa, mut exponent) = if value == 0.0 {
            (0.0, 0)
        } else {
            let exponent = value.abs().log10().floor() as i32 - (integer_digits - 1);
            (value / 10f64.powi(exponent), exponent)
        };

        // Rounding can carry into a new leading digit, e.g. 9.96 -> 10.0.
        let limit = 10f64.powi(integer_digits);
        let rounded: f64 = format!("{:.*}", self.max_fraction_digits, mantissa.abs())
            .parse()
            .unwrap_or(mantissa.abs());
        if rounded >= limit {
            mantissa /= 10.0;
            exponent += 1;
        }

        let mantissa = self.format_fixed(mantissa);
        let sign = if exponent < 0 { "-" } else { "" };
        format!(
            "{mantissa}E{sign}{:0>width$}",
            exponent.unsigned_abs(),
            width = exponent_digits
        )
    }
}

fn trim_fraction(fraction: &str, min_digits: usize) -> &str {
    let mut end = fraction.len();
    while end > min_digits && fraction.as_bytes()[end - 1] == b'0' {
        end -= 1;
    }
    &fraction[..end]
}

fn group_digits(digits: &str, size: usize) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / size);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % size == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            pattern: "#.##".to_string(),
            min_integer_digits: 0,
            min_fraction_digits: 0,
            max_fraction_digits: 2,
            grouping: None,
            min_exponent_digits: None,
            percent: false,
        }
    }
}

impl FromStr for NumberFormat {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
