use std::fmt;

use function::Function;
use operator::Operator;

use super::NumericConstant;

/// Parsed form of a function expression.
///
/// The tree is closed over a single variable (`x`) and the two named
/// functions in [`Function`]; there is no variant through which any other
/// symbol could be referenced.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(NumericConstant),
    /// The bound variable `x`.
    Variable,
    Parentheses(Box<Expression>),
    Exponentiation(Box<Expression>, Box<Expression>),
    UnaryPlus(Box<Expression>),
    UnaryMinus(Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    FunctionCall {
        function: Function,
        argument: Box<Expression>,
    },
}

impl Expression {
    pub fn parentheses(expr: Expression) -> Self {
        Expression::Parentheses(Box::new(expr))
    }

    pub fn exponentiation(base: Expression, exponent: Expression) -> Self {
        Expression::Exponentiation(Box::new(base), Box::new(exponent))
    }

    pub fn unary_plus(expr: Expression) -> Self {
        Expression::UnaryPlus(Box::new(expr))
    }

    pub fn unary_minus(expr: Expression) -> Self {
        Expression::UnaryMinus(Box::new(expr))
    }

    pub fn multiply(lhs: Expression, rhs: Expression) -> Self {
        Expression::Multiply(Box::new(lhs), Box::new(rhs))
    }

    pub fn divide(lhs: Expression, rhs: Expression) -> Self {
        Expression::Divide(Box::new(lhs), Box::new(rhs))
    }

    pub fn add(lhs: Expression, rhs: Expression) -> Self {
        Expression::Add(Box::new(lhs), Box::new(rhs))
    }

    pub fn subtract(lhs: Expression, rhs: Expression) -> Self {
        Expression::Subtract(Box::new(lhs), Box::new(rhs))
    }

    pub fn function_call(function: Function, argument: Expression) -> Self {
        Expression::FunctionCall {
            function,
            argument: Box::new(argument),
        }
    }

    pub fn binary(op: Operator, lhs: Expression, rhs: Expression) -> Self {
        match op {
            Operator::Exponentiation => Expression::exponentiation(lhs, rhs),
            Operator::Multiply => Expression::multiply(lhs, rhs),
            Operator::Divide => Expression::divide(lhs, rhs),
            Operator::Add => Expression::add(lhs, rhs),
            Operator::Subtract => Expression::subtract(lhs, rhs),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(value) => write!(f, "{}", value),
            Expression::Variable => write!(f, "x"),
            Expression::Parentheses(expr) => write!(f, "({})", expr),
            Expression::Exponentiation(base, exponent) => write!(f, "{}^{}", base, exponent),
            Expression::UnaryPlus(expr) => write!(f, "+{}", expr),
            Expression::UnaryMinus(expr) => write!(f, "-{}", expr),
            Expression::Multiply(lhs, rhs) => write!(f, "{} * {}", lhs, rhs),
            Expression::Divide(lhs, rhs) => write!(f, "{} / {}", lhs, rhs),
            Expression::Add(lhs, rhs) => write!(f, "{} + {}", lhs, rhs),
            Expression::Subtract(lhs, rhs) => write!(f, "{} - {}", lhs, rhs),
            Expression::FunctionCall { function, argument } => {
                write!(f, "{}({})", function, argument)
            }
        }
    }
}

pub mod operator {
    //! ### Operators
    //!
    //! Precedence, tightest first. Binary `+ - * /` associate left to right;
    //! exponentiation associates right to left and binds tighter than a unary
    //! sign on its left, so `-x^2` is `-(x^2)`, while its right operand may
    //! itself carry a sign (`2^-1`).
    //!
    //! | Operators | Precedence Group         |
    //! |:---------:|:-------------------------|
    //! | ( )       | Parentheses              |
    //! | ^         | Exponentiation           |
    //! | + -       | Unary sign               |
    //! | * /       | Multiplication, division |
    //! | + -       | Addition, subtraction    |
    //!
    //! Unary signs and parentheses have their own tree variants and no
    //! [`Operator`].

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub enum Operator {
        Exponentiation,
        Multiply,
        Divide,
        Add,
        Subtract,
    }

    impl Operator {
        pub fn symbol(&self) -> char {
            match self {
                Operator::Exponentiation => '^',
                Operator::Multiply => '*',
                Operator::Divide => '/',
                Operator::Add => '+',
                Operator::Subtract => '-',
            }
        }
    }
}

pub mod function {
    //! ### Named Functions
    //!
    //! Exactly two unary functions are callable: `sqrt` and `log10`. Both
    //! are partial over the reals; [`Function::restriction`] reports when an
    //! argument falls outside the domain.

    use serde::{Deserialize, Serialize};
    use std::fmt;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub enum Function {
        Sqrt,
        Log10,
    }

    /// Which domain rule a sample violates.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Restriction {
        /// Negative argument to `sqrt`.
        Sqrt,
        /// Non-positive argument to `log10`.
        Log,
    }

    impl Function {
        pub fn name(&self) -> &'static str {
            match self {
                Function::Sqrt => "sqrt",
                Function::Log10 => "log10",
            }
        }

        /// Returns the violated rule if `argument` is outside the domain.
        pub fn restriction(&self, argument: f64) -> Option<Restriction> {
            match self {
                Function::Sqrt if argument < 0.0 => Some(Restriction::Sqrt),
                Function::Log10 if argument <= 0.0 => Some(Restriction::Log),
                _ => None,
            }
        }

        pub fn apply(&self, argument: f64) -> f64 {
            match self {
                Function::Sqrt => argument.sqrt(),
                Function::Log10 => argument.log10(),
            }
        }
    }

    impl fmt::Display for Function {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.name())
        }
    }

    impl fmt::Display for Restriction {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Restriction::Sqrt => write!(f, "sqrt"),
                Restriction::Log => write!(f, "log"),
            }
        }
    }

    impl Restriction {
        /// The explanation shown when asking whether to restrict plotting.
        pub fn describe(&self) -> &'static str {
            match self {
                Restriction::Sqrt => "The function contains square root of negative values.",
                Restriction::Log => "The function contains logarithm of non-positive values.",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let expr = Expression::subtract(
            Expression::multiply(
                Expression::Constant(NumericConstant(5.0)),
                Expression::exponentiation(Expression::Variable, Expression::Constant(NumericConstant(2.0))),
            ),
            Expression::function_call(Function::Sqrt, Expression::Variable),
        );
        assert_eq!(expr.to_string(), "5 * x^2 - sqrt(x)");
    }

    #[test]
    fn test_binary_builds_matching_variant() {
        let expr = Expression::binary(Operator::Divide, Expression::Variable, Expression::Constant(NumericConstant(2.0)));
        assert!(matches!(expr, Expression::Divide(_, _)));
        let expr = Expression::binary(Operator::Exponentiation, Expression::Variable, Expression::Variable);
        assert_eq!(expr.to_string(), "x^x");
        assert_eq!(Operator::Subtract.symbol(), '-');
    }

    #[test]
    fn test_restrictions() {
        assert_eq!(Function::Sqrt.restriction(-1.0), Some(function::Restriction::Sqrt));
        assert_eq!(Function::Sqrt.restriction(0.0), None);
        assert_eq!(Function::Log10.restriction(0.0), Some(function::Restriction::Log));
        assert_eq!(Function::Log10.restriction(1.0), None);
    }
}
