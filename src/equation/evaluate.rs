//! Evaluation of a parsed [`Expression`] at a single value of `x`.
//!
//! Arithmetic is plain IEEE `f64`. Every operation that would leave the
//! reals, divide by zero, or overflow a finite input to infinity is
//! reported as an [`EvaluationErrorKind`] instead of producing `NaN` or
//! `inf`, so that a result is always a finite real number.

use thiserror::Error;

use crate::equation::{
    expression::function::Restriction,
    parse::{ParseError, parse_expression},
};
use crate::Expression;

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationErrorKind {
    /// The text is not a well-formed expression.
    #[error("malformed expression: {0}")]
    Malformed(#[from] ParseError),

    #[error("division by zero")]
    DivisionByZero,

    /// Exponentiation with a negative base and a non-integer exponent.
    #[error("{base}^{exponent} is not a real number")]
    NonReal { base: f64, exponent: f64 },

    /// A `sqrt` or `log10` argument outside the function's domain.
    #[error("{0} argument outside its domain")]
    Domain(Restriction),

    /// A finite computation produced an infinite value.
    #[error("numerical result out of range")]
    Overflow,
}

/// Evaluation failure with the offending expression and input attached.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Error evaluating '{expression}' at x = {x}: {kind}")]
pub struct EvaluationError {
    pub expression: String,
    pub x: f64,
    pub kind: EvaluationErrorKind,
}

impl EvaluationError {
    pub fn new(expression: impl Into<String>, x: f64, kind: EvaluationErrorKind) -> Self {
        Self {
            expression: expression.into(),
            x,
            kind,
        }
    }
}

fn checked(lhs: f64, rhs: f64, result: f64) -> Result<f64, EvaluationErrorKind> {
    if result.is_finite() || !lhs.is_finite() || !rhs.is_finite() {
        Ok(result)
    } else {
        Err(EvaluationErrorKind::Overflow)
    }
}

fn power(base: f64, exponent: f64) -> Result<f64, EvaluationErrorKind> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvaluationErrorKind::DivisionByZero);
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvaluationErrorKind::NonReal { base, exponent });
    }
    checked(base, exponent, base.powf(exponent))
}

impl Expression {
    /// Evaluates the tree with the variable bound to `x`.
    pub fn evaluate(&self, x: f64) -> Result<f64, EvaluationErrorKind> {
        match self {
            Expression::Constant(value) => Ok(value.0),
            Expression::Variable => Ok(x),
            Expression::Parentheses(expr) | Expression::UnaryPlus(expr) => expr.evaluate(x),
            Expression::UnaryMinus(expr) => Ok(-expr.evaluate(x)?),
            Expression::Exponentiation(base, exponent) => {
                power(base.evaluate(x)?, exponent.evaluate(x)?)
            }
            Expression::Multiply(lhs, rhs) => {
                let (lhs, rhs) = (lhs.evaluate(x)?, rhs.evaluate(x)?);
                checked(lhs, rhs, lhs * rhs)
            }
            Expression::Divide(lhs, rhs) => {
                let (lhs, rhs) = (lhs.evaluate(x)?, rhs.evaluate(x)?);
                if rhs == 0.0 {
                    return Err(EvaluationErrorKind::DivisionByZero);
                }
                checked(lhs, rhs, lhs / rhs)
            }
            Expression::Add(lhs, rhs) => {
                let (lhs, rhs) = (lhs.evaluate(x)?, rhs.evaluate(x)?);
                checked(lhs, rhs, lhs + rhs)
            }
            Expression::Subtract(lhs, rhs) => {
                let (lhs, rhs) = (lhs.evaluate(x)?, rhs.evaluate(x)?);
                checked(lhs, rhs, lhs - rhs)
            }
            Expression::FunctionCall { function, argument } => {
                let argument = argument.evaluate(x)?;
                match function.restriction(argument) {
                    Some(restriction) => Err(EvaluationErrorKind::Domain(restriction)),
                    None => Ok(function.apply(argument)),
                }
            }
        }
    }
}

/// Parses `expr` and evaluates it at `x`.
///
/// No validation gate is applied; text that does not parse is reported as
/// [`EvaluationErrorKind::Malformed`]. Letters are case-insensitive.
///
/// ```rust
/// use curvecross::equation::evaluate;
///
/// assert_eq!(evaluate("x^2", 3.0).unwrap(), 9.0);
/// assert_eq!(evaluate("2*x + 1", 2.0).unwrap(), 5.0);
/// assert!(evaluate("1/x", 0.0).is_err());
/// ```
pub fn evaluate(expr: &str, x: f64) -> Result<f64, EvaluationError> {
    parse_expression(expr)
        .map_err(EvaluationErrorKind::from)
        .and_then(|tree| tree.evaluate(x))
        .map_err(|kind| EvaluationError::new(expr, x, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_float_eq;

    fn kind_of(expr: &str, x: f64) -> EvaluationErrorKind {
        evaluate(expr, x).unwrap_err().kind
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate("x + 1", 2.0).unwrap(), 3.0);
        assert_eq!(evaluate("x^2", 3.0).unwrap(), 9.0);
        assert_eq!(evaluate("2*x + 3", 4.0).unwrap(), 11.0);
        assert_eq!(evaluate("2*x^2 + 3*x + 1", 2.0).unwrap(), 15.0);
        assert_eq!(evaluate("7/2", 0.0).unwrap(), 3.5);
        assert_eq!(evaluate("x - -1", 1.0).unwrap(), 2.0);
    }

    #[test]
    fn test_trailing_decimal_literal() {
        assert_eq!(evaluate("0.5", 0.0).unwrap(), 0.5);
        assert_eq!(evaluate("2*x - 0.25", 1.0).unwrap(), 1.75);
        assert_float_eq(evaluate("x^0.5", 9.0).unwrap(), 3.0, 1e-12);
        assert_eq!(evaluate("x ** 2", -3.0).unwrap(), 9.0);
    }

    #[test]
    fn test_named_functions() {
        assert_float_eq(evaluate("log10(100)", 0.0).unwrap(), 2.0, 1e-9);
        assert_eq!(evaluate("sqrt(16)", 0.0).unwrap(), 4.0);
        assert_float_eq(evaluate("sqrt(x^2 + 16)", 3.0).unwrap(), 5.0, 1e-12);
    }

    #[test]
    fn test_variable_binding_is_not_textual() {
        // Substituting "-1" into "x^2" as text would read "-1^2" = -1
        assert_eq!(evaluate("x^2", -1.0).unwrap(), 1.0);
        assert_eq!(evaluate("-x^2", 3.0).unwrap(), -9.0);
        assert_eq!(evaluate("(-x)^2", 3.0).unwrap(), 9.0);
    }

    #[test]
    fn test_exponentiation() {
        assert_eq!(evaluate("2^3^2", 0.0).unwrap(), 512.0);
        assert_eq!(evaluate("2^-1", 0.0).unwrap(), 0.5);
        assert_eq!(evaluate("x^2", -3.0).unwrap(), 9.0);
        assert_float_eq(evaluate("x^0.5", 4.0).unwrap(), 2.0, 1e-12);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(kind_of("1/x", 0.0), EvaluationErrorKind::DivisionByZero);
        assert_eq!(kind_of("1/(x - 2)", 2.0), EvaluationErrorKind::DivisionByZero);
        assert_eq!(kind_of("x^-1", 0.0), EvaluationErrorKind::DivisionByZero);
    }

    #[test]
    fn test_non_real_power() {
        assert!(matches!(
            kind_of("x^0.5", -4.0),
            EvaluationErrorKind::NonReal { .. }
        ));
        // Integer exponents keep negative bases real
        assert_eq!(evaluate("x^3", -2.0).unwrap(), -8.0);
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(
            kind_of("sqrt(x)", -1.0),
            EvaluationErrorKind::Domain(Restriction::Sqrt)
        );
        assert_eq!(
            kind_of("log10(x)", 0.0),
            EvaluationErrorKind::Domain(Restriction::Log)
        );
    }

    #[test]
    fn test_overflow() {
        assert_eq!(kind_of("10^400", 0.0), EvaluationErrorKind::Overflow);
        assert_eq!(kind_of("x*x", 1e200), EvaluationErrorKind::Overflow);
    }

    #[test]
    fn test_malformed() {
        let err = evaluate("invalid", 1.0).unwrap_err();
        assert!(matches!(err.kind, EvaluationErrorKind::Malformed(_)));
        assert_eq!(err.expression, "invalid");
        assert_eq!(err.x, 1.0);
        assert!(err.to_string().contains("invalid"));
    }
}
