use log::trace;

use crate::equation::{
    expression::function::{Function, Restriction},
    lexical::{call_argument, find_all},
    parse::parse_expression,
};

/// Checks whether any `sqrt` or `log10` call in `expr` receives an argument
/// outside its domain at `x`.
///
/// Call arguments are found textually (see [`crate::equation::validation`]
/// for the non-nested matching rule) and evaluated with the variable bound
/// to `x`. Arguments that fail to parse or evaluate impose no restriction.
/// Every `sqrt` argument is checked before any `log10` argument, and the
/// first restriction found is returned.
///
/// ```rust
/// use curvecross::equation::{domain_check, Restriction};
///
/// assert_eq!(domain_check("sqrt(x)", -1.0), Some(Restriction::Sqrt));
/// assert_eq!(domain_check("sqrt(x)", 1.0), None);
/// assert_eq!(domain_check("log10(x)", 0.0), Some(Restriction::Log));
/// ```
pub fn domain_check(expr: &str, x: f64) -> Option<Restriction> {
    let text = expr.to_lowercase();

    [Function::Sqrt, Function::Log10]
        .into_iter()
        .flat_map(|function| {
            find_all(&text, call_argument(function.name()))
                .into_iter()
                .map(move |argument| (function, argument))
        })
        .find_map(|(function, argument)| {
            match parse_expression(argument).map(|tree| tree.evaluate(x)) {
                Ok(Ok(value)) => function.restriction(value),
                Ok(Err(kind)) => {
                    trace!("skipping {}({}) at x = {}: {}", function, argument, x, kind);
                    None
                }
                Err(err) => {
                    trace!("skipping {}({}): {}", function, argument, err);
                    None
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_restriction() {
        assert_eq!(domain_check("sqrt(x)", -1.0), Some(Restriction::Sqrt));
        assert_eq!(domain_check("sqrt(x)", 1.0), None);
        assert_eq!(domain_check("sqrt(x)", 0.0), None);
        assert_eq!(domain_check("sqrt(4 - x^2)", 3.0), Some(Restriction::Sqrt));
    }

    #[test]
    fn test_decimal_in_argument() {
        assert_eq!(domain_check("sqrt(x - 0.5)", 0.2), Some(Restriction::Sqrt));
        assert_eq!(domain_check("sqrt(x - 0.5)", 0.7), None);
        assert_eq!(domain_check("log10(x + 0.25)", -0.25), Some(Restriction::Log));
    }

    #[test]
    fn test_log_restriction() {
        assert_eq!(domain_check("log10(x)", 0.0), Some(Restriction::Log));
        assert_eq!(domain_check("log10(x)", -2.0), Some(Restriction::Log));
        assert_eq!(domain_check("log10(x)", 1.0), None);
    }

    #[test]
    fn test_sqrt_checked_before_log() {
        assert_eq!(
            domain_check("log10(x) + sqrt(x)", -1.0),
            Some(Restriction::Sqrt)
        );
        assert_eq!(
            domain_check("log10(x) + sqrt(x + 5)", -1.0),
            Some(Restriction::Log)
        );
    }

    #[test]
    fn test_no_calls_means_no_restriction() {
        assert_eq!(domain_check("x^2 - 3*x", -100.0), None);
        assert_eq!(domain_check("1/x", 0.0), None);
    }

    #[test]
    fn test_failing_arguments_are_skipped() {
        // "(x+1" is the textual argument and does not parse
        assert_eq!(domain_check("sqrt((x+1))", -5.0), None);
        // Division by zero inside the argument
        assert_eq!(domain_check("sqrt(1/x)", 0.0), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(domain_check("SQRT(X)", -1.0), Some(Restriction::Sqrt));
    }
}
