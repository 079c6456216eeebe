//! # Function Text Validation
//!
//! A coarse lexical gate run on user input before any sampling. It is not a
//! grammar parser; it answers "does this text look like something built
//! only from `x`, numbers, `+ - * / ^`, parentheses, `sqrt(...)` and
//! `log10(...)`?" in three steps:
//!
//! 1. **Character whitelist**: digits, `.`, `x`, `+ - * / ^ ( )`, whitespace
//!    and the letters of `sqrt` and `log10`.
//! 2. **Parenthesis balance**: equal counts of `(` and `)`.
//! 3. **Structure**: every `log10(...)` call, then every `sqrt(...)` call,
//!    then every numeric literal is collapsed to `x`. What remains must be
//!    one or more of `x + - * / ^ ( )` and whitespace. `**` therefore
//!    passes, and the parser reads it as `^`.
//!
//! ## Known restrictions
//!
//! The call pattern does not recurse, so an argument ends at its first `)`
//! and its contents are never inspected. Strings that are malformed but
//! still collapse to valid characters (`x +`, `2x`, `x x`, `sqrt(x+)`)
//! pass the gate; they then fail to parse and every sample of
//! them is undefined.
//!
//! ```rust
//! use curvecross::equation::{validate, ValidationError};
//!
//! assert!(validate("5*x^2 + 2*x").is_ok());
//! assert!(validate("sqrt(x^2 + 4)").is_ok());
//! assert!(matches!(validate("sin(x)"), Err(ValidationError::InvalidCharacters(_))));
//! assert!(matches!(validate("((2*x)"), Err(ValidationError::UnbalancedParentheses { .. })));
//! ```

use thiserror::Error;

use crate::equation::lexical::{call_argument, number_literal, replace_all};

/// Reasons a function text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A character outside the whitelist.
    #[error(
        "Invalid characters detected ('{0}'). Allowed: numbers, x, +, -, *, /, ^, log10(), sqrt()"
    )]
    InvalidCharacters(char),

    #[error("Unbalanced parentheses: {open} '(' but {close} ')'")]
    UnbalancedParentheses { open: usize, close: usize },

    /// The text collapses to something other than operators, parentheses
    /// and placeholders. The empty string ends up here.
    #[error("Invalid function format")]
    InvalidFormat,
}

const ALLOWED_SYMBOLS: &str = "x0123456789+-*/^().";
const ALLOWED_LETTERS: &str = "sqrtlog";
const STRUCTURE_SYMBOLS: &str = "x+-*/^()";

fn is_allowed(c: char) -> bool {
    c.is_whitespace() || ALLOWED_SYMBOLS.contains(c) || ALLOWED_LETTERS.contains(c)
}

/// Collapses calls and literals to placeholders, in gate order.
fn simplify(text: &str) -> String {
    let simplified = replace_all(text, call_argument("log10"));
    let simplified = replace_all(&simplified, call_argument("sqrt"));
    replace_all(&simplified, number_literal)
}

/// Checks `expr` against the function-text gate.
///
/// Letters are compared case-insensitively.
pub fn validate(expr: &str) -> Result<(), ValidationError> {
    let text = expr.to_lowercase();

    if let Some(c) = text.chars().find(|&c| !is_allowed(c)) {
        return Err(ValidationError::InvalidCharacters(c));
    }

    let open = text.matches('(').count();
    let close = text.matches(')').count();
    if open != close {
        return Err(ValidationError::UnbalancedParentheses { open, close });
    }

    let simplified = simplify(&text);
    let well_formed = !simplified.is_empty()
        && simplified
            .chars()
            .all(|c| c.is_whitespace() || STRUCTURE_SYMBOLS.contains(c));

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat)
    }
}
