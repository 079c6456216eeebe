pub mod domain;
pub mod evaluate;
pub mod expression;
pub mod function_expression;
pub mod lexical;
pub mod numeric;
pub mod parse;
pub mod validation;

pub use domain::domain_check;
pub use evaluate::{EvaluationError, EvaluationErrorKind, evaluate};
pub use expression::{
    Expression,
    function::{Function, Restriction},
    operator::Operator,
};
pub use function_expression::FunctionExpression;
pub use numeric::{NumericConstant, NumericConstantError};
pub use parse::{ParseError, parse_expression};
pub use validation::{ValidationError, validate};
