use log::debug;
use std::{fmt, str::FromStr};

use crate::equation::{
    EvaluationError, EvaluationErrorKind, ValidationError, domain_check,
    expression::function::Restriction,
    parse::{ParseError, parse_expression},
    validate,
};
use crate::Expression;

/// Function text that has passed the validation gate.
///
/// The text is parsed once on construction. Because the gate is coarser
/// than the grammar, text can pass validation and still fail to parse
/// (`2x`); such a value is kept, and every call to [`eval`](Self::eval)
/// reports [`EvaluationErrorKind::Malformed`].
///
/// ```rust
/// use curvecross::FunctionExpression;
///
/// let f = FunctionExpression::new("5*x^2 + 2*x").unwrap();
/// assert_eq!(f.eval(1.0).unwrap(), 7.0);
/// assert!(FunctionExpression::new("sin(x)").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpression {
    source: String,
    tree: Result<Expression, ParseError>,
}

impl FunctionExpression {
    pub fn new(source: &str) -> Result<Self, ValidationError> {
        validate(source)?;
        Ok(Self {
            source: source.to_string(),
            tree: parse_expression(source),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed tree, if the text is well-formed.
    pub fn tree(&self) -> Option<&Expression> {
        self.tree.as_ref().ok()
    }

    pub fn is_well_formed(&self) -> bool {
        self.tree.is_ok()
    }

    pub fn eval(&self, x: f64) -> Result<f64, EvaluationError> {
        let result = match &self.tree {
            Ok(tree) => tree.evaluate(x),
            Err(err) => Err(EvaluationErrorKind::Malformed(err.clone())),
        };
        result.map_err(|kind| EvaluationError::new(self.source.as_str(), x, kind))
    }

    pub fn domain_check(&self, x: f64) -> Option<Restriction> {
        domain_check(&self.source, x)
    }

    /// Evaluates at `x` with the domain check applied first.
    ///
    /// Returns `None` for a restricted sample or a failed evaluation; both
    /// mean the curve is undefined at `x`.
    pub fn sample(&self, x: f64) -> Option<f64> {
        if self.domain_check(x).is_some() {
            return None;
        }
        self.eval(x)
            .inspect_err(|err| debug!("{}", err))
            .ok()
    }
}

impl FromStr for FunctionExpression {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionExpression::new(s)
    }
}

impl fmt::Display for FunctionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
