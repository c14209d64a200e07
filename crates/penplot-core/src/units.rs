//! Unit conversion utilities
//!
//! Handles conversion between millimetres and inches for machine dimensions
//! and user-entered lengths. Supports decimal and fractional inch parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Length unit used to declare machine dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimetres
    #[default]
    Mm,
    /// Inches
    In,
}

impl LengthUnit {
    /// Millimetres per one of this unit.
    pub fn factor(self) -> f64 {
        match self {
            Self::Mm => 1.0,
            Self::In => MM_PER_INCH,
        }
    }

    /// Convert a value expressed in this unit to millimetres.
    pub fn to_mm(self, value: f64) -> f64 {
        value * self.factor()
    }

    /// Convert a millimetre value into this unit.
    pub fn from_mm(self, value_mm: f64) -> f64 {
        value_mm / self.factor()
    }

    /// Short label ("mm" or "in")
    pub fn label(self) -> &'static str {
        match self {
            Self::Mm => "mm",
            Self::In => "in",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "metric" | "millimeter" | "millimetre" => Ok(Self::Mm),
            "in" | "inch" | "inches" | "imperial" => Ok(Self::In),
            other => Err(Error::UnknownUnit {
                unit: other.to_string(),
            }),
        }
    }
}

/// Millimetres to inches
#[inline]
pub fn mm_to_in(value_mm: f64) -> f64 {
    value_mm / MM_PER_INCH
}

/// Inches to millimetres
#[inline]
pub fn in_to_mm(value_in: f64) -> f64 {
    value_in * MM_PER_INCH
}

/// Convert `value` from one unit to another.
pub fn convert(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    if from == to {
        return value;
    }
    to.from_mm(from.to_mm(value))
}

/// Format length value for display
///
/// * `value_mm` - Value in millimetres
/// * `unit` - Target unit
pub fn format_length(value_mm: f64, unit: LengthUnit) -> String {
    format!("{:.3}", unit.from_mm(value_mm))
}

/// Parse length string to millimetres
///
/// Inch input accepts fractions such as `"1 1/2"` or `"-1/4"`.
/// An empty string parses as zero.
pub fn parse_length(input: &str, unit: LengthUnit) -> Result<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    let invalid = |reason: &str| Error::InvalidLength {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    match unit {
        LengthUnit::Mm => input.parse::<f64>().map_err(|e| invalid(&e.to_string())),
        LengthUnit::In => {
            if !input.contains('/') {
                let inches = input.parse::<f64>().map_err(|e| invalid(&e.to_string()))?;
                return Ok(in_to_mm(inches));
            }

            let mut total_inches = 0.0;
            let mut negative = false;
            for part in input.split_whitespace() {
                let value = if let Some((num, den)) = part.split_once('/') {
                    if den.contains('/') {
                        return Err(invalid("invalid fraction format"));
                    }
                    let num = num
                        .parse::<f64>()
                        .map_err(|_| invalid("invalid numerator"))?;
                    let den = den
                        .parse::<f64>()
                        .map_err(|_| invalid("invalid denominator"))?;
                    if den == 0.0 {
                        return Err(invalid("division by zero"));
                    }
                    num / den
                } else {
                    part.parse::<f64>()
                        .map_err(|_| invalid("invalid number part"))?
                };
                if value.is_sign_negative() {
                    negative = true;
                }
                total_inches += value.abs();
            }

            let inches = if negative { -total_inches } else { total_inches };
            Ok(in_to_mm(inches))
        }
    }
}

/// Parses the longest numeric prefix of `input`, so `"210mm"` yields 210.
pub fn leading_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Optional exponent, only consumed when complete
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
