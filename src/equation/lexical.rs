//! Text-level scanning shared by the validation gate and the domain check.
//!
//! These helpers work on raw (lower-cased) text rather than on the parsed
//! tree. A call pattern matches `name(` followed by one or more characters
//! other than `)` and then `)`, so the argument never contains a nested
//! closing parenthesis: `sqrt((x+1))` matches as `sqrt((x+1)` with argument
//! `(x+1`.

use nom::{
    IResult, Parser,
    bytes::complete::{is_not, tag},
    character::complete::{char, digit1},
    combinator::{opt, recognize},
    sequence::delimited,
};

/// Character substituted for every collapsed call and literal.
pub const PLACEHOLDER: char = 'x';

/// Matches `name(arg)` with a non-nested argument, yielding the argument.
pub fn call_argument<'a>(
    name: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    delimited((tag(name), char('(')), is_not(")"), char(')'))
}

/// Matches `\d+\.?\d*`.
pub fn number_literal(input: &str) -> IResult<&str, &str> {
    recognize((digit1, opt(char('.')), opt(digit1))).parse(input)
}

/// Replaces every non-overlapping, leftmost match of `pattern` with
/// [`PLACEHOLDER`].
pub fn replace_all<'a, P>(input: &'a str, mut pattern: P) -> String
where
    P: Parser<&'a str, Error = nom::error::Error<&'a str>>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while !rest.is_empty() {
        match pattern.parse(rest) {
            Ok((remaining, _)) if remaining.len() < rest.len() => {
                out.push(PLACEHOLDER);
                rest = remaining;
            }
            _ => {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    out.push(c);
                }
                rest = chars.as_str();
            }
        }
    }

    out
}

/// Collects the output of every non-overlapping, leftmost match of
/// `pattern`.
pub fn find_all<'a, P>(input: &'a str, mut pattern: P) -> Vec<P::Output>
where
    P: Parser<&'a str, Error = nom::error::Error<&'a str>>,
{
    let mut found = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        match pattern.parse(rest) {
            Ok((remaining, output)) if remaining.len() < rest.len() => {
                found.push(output);
                rest = remaining;
            }
            _ => {
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str();
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_calls() {
        assert_eq!(replace_all("log10(x) + 1", call_argument("log10")), "x + 1");
        assert_eq!(replace_all("sqrt(x^2 + 4)", call_argument("sqrt")), "x");
        assert_eq!(replace_all("sqrt()", call_argument("sqrt")), "sqrt()");
    }

    #[test]
    fn test_nested_argument_stops_at_first_close() {
        assert_eq!(replace_all("sqrt((x+1))", call_argument("sqrt")), "x)");
        assert_eq!(find_all("sqrt((x+1))", call_argument("sqrt")), vec!["(x+1"]);
    }

    #[test]
    fn test_replace_numbers() {
        assert_eq!(replace_all("5*x^2 + 2.5*x", number_literal), "x*x^x + x*x");
        assert_eq!(replace_all("12.", number_literal), "x");
        assert_eq!(replace_all(".5", number_literal), ".x");
    }

    #[test]
    fn test_number_literal_at_end_of_input() {
        assert_eq!(number_literal("0.25"), Ok(("", "0.25")));
        assert_eq!(number_literal("12"), Ok(("", "12")));
        assert_eq!(number_literal("1.5*x"), Ok(("*x", "1.5")));
    }

    #[test]
    fn test_find_all_arguments_in_order() {
        let args = find_all("sqrt(x) - sqrt(2*x) + log10(x)", call_argument("sqrt"));
        assert_eq!(args, vec!["x", "2*x"]);
        assert!(find_all("x + 1", call_argument("log10")).is_empty());
    }
}
