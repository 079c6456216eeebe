//! # Numeric Literals
//!
//! Numeric literals in a function expression are unsigned decimal numbers.
//! A leading `-` or `+` is never part of the literal: it is parsed as a unary
//! operator, so `-2^2` evaluates as `-(2^2)`.
//!
//! ## Grammar
//!
//! ```bnf
//! number ::= { [digit]+[.[digit]*] | [digit]*.[digit]+ }[{E | e} [{+ | -}] [digit]+]
//! ```
//!
//! The validation gate only admits the first half of this grammar (the
//! letter `e` is not whitelisted), but the evaluator accepts exponents so
//! that programmatic callers can pass values such as `1e-3` straight through.
//!
//! ## Examples
//!
//! ```rust
//! use curvecross::NumericConstant;
//! use std::str::FromStr;
//!
//! let whole = NumericConstant::from_str("14.").unwrap();
//! let fraction = NumericConstant::from_str(".375").unwrap();
//! let small = NumericConstant::from_str("8.123e-10").unwrap();
//!
//! let value: f64 = whole.into();
//! assert_eq!(value, 14.0);
//! assert_eq!(f64::from(fraction), 0.375);
//! assert!(f64::from(small) < 1e-9);
//!
//! // Signs belong to the expression, not the literal
//! assert!(NumericConstant::from_str("-1").is_err());
//! ```

use std::{fmt, str::FromStr};
use thiserror::Error;

/// Errors that can occur while reading a numeric literal.
#[derive(Debug, Error)]
pub enum NumericConstantError {
    /// The input string is empty or contains only whitespace.
    #[error("Empty numeric constant")]
    EmptyNumericConstant,

    /// Multiple decimal points found in the number, e.g. `"1.2.3"`.
    #[error("Multiple decimal points: '{0}'")]
    MultipleDecimalPoints(String),

    /// Exponent marker without a valid exponent, e.g. `"1E"` or `"1e+"`.
    #[error("Invalid scientific notation: '{0}'")]
    InvalidScientificNotation(String),

    /// A character that cannot appear in a literal, including signs on
    /// the mantissa.
    #[error("Unexpected character: '{1}' in '{0}'")]
    UnexpectedCharacter(String, char),

    /// No digits found in the mantissa, e.g. `"."`.
    #[error("No digits: '{0}'")]
    NoDigits(String),

    /// The literal is too large to be represented as a finite `f64`.
    #[error("Not a real number: '{0}' is not a valid real number")]
    NotARealNumber(String),

    #[error("Parse error: '{0}' cannot be parsed as a number: {1}")]
    ParseFloatError(String, std::num::ParseFloatError),
}

/// A finite, non-negative numeric literal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NumericConstant(pub f64);

/// Splits a numeric string into mantissa and optional exponent part.
fn split_exponent(input: &str) -> (&str, Option<&str>) {
    match input.find(['E', 'e']) {
        Some(pos) => (&input[0..pos], Some(&input[pos..])),
        None => (input, None),
    }
}

fn check_mantissa(full: &str, input: &str) -> Result<(), NumericConstantError> {
    if input.is_empty() {
        return Err(NumericConstantError::InvalidScientificNotation(
            full.to_string(),
        ));
    }

    let mut has_digits = false;
    let mut has_decimal = false;

    for ch in input.chars() {
        match ch {
            '0'..='9' => has_digits = true,
            '.' if has_decimal => {
                return Err(NumericConstantError::MultipleDecimalPoints(
                    full.to_string(),
                ));
            }
            '.' => has_decimal = true,
            c => {
                return Err(NumericConstantError::UnexpectedCharacter(
                    full.to_string(),
                    c,
                ));
            }
        }
    }

    if !has_digits {
        return Err(NumericConstantError::NoDigits(full.to_string()));
    }

    Ok(())
}

fn check_exponent(full: &str, input: &str) -> Result<(), NumericConstantError> {
    // Skip the 'E' or 'e'
    let digits = input[1..]
        .strip_prefix(['+', '-'])
        .unwrap_or(&input[1..]);

    if digits.is_empty() {
        return Err(NumericConstantError::InvalidScientificNotation(
            full.to_string(),
        ));
    }

    match digits.chars().find(|c| !c.is_ascii_digit()) {
        Some(c) => Err(NumericConstantError::UnexpectedCharacter(
            full.to_string(),
            c,
        )),
        None => Ok(()),
    }
}

impl FromStr for NumericConstant {
    type Err = NumericConstantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        if input.is_empty() {
            return Err(NumericConstantError::EmptyNumericConstant);
        }

        let (mantissa, exponent) = split_exponent(input);
        check_mantissa(input, mantissa)?;
        if let Some(exponent) = exponent {
            check_exponent(input, exponent)?;
        }

        match input.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(NumericConstant(value)),
            Ok(_) => Err(NumericConstantError::NotARealNumber(input.to_string())),
            Err(err) => Err(NumericConstantError::ParseFloatError(
                input.to_string(),
                err,
            )),
        }
    }
}

impl From<f64> for NumericConstant {
    fn from(value: f64) -> Self {
        NumericConstant(value)
    }
}

impl From<NumericConstant> for f64 {
    fn from(value: NumericConstant) -> Self {
        value.0
    }
}

impl fmt::Display for NumericConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
