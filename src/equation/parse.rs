use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    sequence::{delimited, pair, preceded},
};
use thiserror::Error;

use crate::{
    Expression, NumericConstant, Operator,
    equation::expression::function::Function,
};

/// The input could not be read as a function expression.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unexpected input at offset {offset} in '{input}'")]
pub struct ParseError {
    pub input: String,
    pub offset: usize,
}

/// Parse whitespace (spaces, tabs, newlines)
fn ws<'a, P, O>(inner: P) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse an unsigned numeric literal, optionally with an exponent
///
/// `digit0` is avoided: on `&str` it reports a misplaced remainder when the
/// digits run to the end of input, which `recognize` then mis-measures.
fn numeric_constant(input: &str) -> IResult<&str, NumericConstant> {
    map_res(
        recognize((
            alt((
                recognize(pair(digit1, opt(pair(char('.'), opt(digit1))))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(recognize((one_of("eE"), opt(one_of("+-")), digit1))),
        )),
        |s: &str| s.parse::<NumericConstant>(),
    )
    .parse(input)
}

/// Parse the bound variable
fn variable(input: &str) -> IResult<&str, Expression> {
    value(Expression::Variable, one_of("xX")).parse(input)
}

/// Parse one of the named functions
fn function_name(input: &str) -> IResult<&str, Function> {
    alt((
        value(Function::Sqrt, tag_no_case("sqrt")),
        value(Function::Log10, tag_no_case("log10")),
    ))
    .parse(input)
}

/// Parse a function call with exactly one argument
fn function_call(input: &str) -> IResult<&str, Expression> {
    map(
        pair(
            function_name,
            delimited(ws(char('(')), expression, ws(char(')'))),
        ),
        |(function, argument)| Expression::function_call(function, argument),
    )
    .parse(input)
}

/// Parse a parenthesised expression
fn parentheses(input: &str) -> IResult<&str, Expression> {
    map(
        delimited(ws(char('(')), expression, ws(char(')'))),
        Expression::parentheses,
    )
    .parse(input)
}

/// Parse primary expressions (atoms)
fn primary(input: &str) -> IResult<&str, Expression> {
    ws(alt((
        map(numeric_constant, Expression::Constant),
        function_call,
        variable,
        parentheses,
    )))
    .parse(input)
}

/// Alternative spelling of the exponentiation operator.
pub const POWER_ALIAS: &str = "**";

/// Parse one of two binary operators of the same precedence
fn binary_operator<'a>(
    [first, second]: [Operator; 2],
) -> impl Parser<&'a str, Output = Operator, Error = nom::error::Error<&'a str>> {
    alt((
        value(first, ws(char(first.symbol()))),
        value(second, ws(char(second.symbol()))),
    ))
}

/// Parse exponentiation (right-associative, exponent may carry a sign)
///
/// `**` is accepted as a second spelling of `^`.
fn exponentiation(input: &str) -> IResult<&str, Expression> {
    let (input, base) = primary(input)?;
    let power = Operator::Exponentiation;
    let power_sign = alt((tag(POWER_ALIAS), recognize(char(power.symbol()))));

    if let Ok((input, _)) = ws(power_sign).parse(input) {
        let (input, exponent) = unary(input)?;
        Ok((input, Expression::binary(power, base, exponent)))
    } else {
        Ok((input, base))
    }
}

/// Parse unary expressions (unary operators)
fn unary(input: &str) -> IResult<&str, Expression> {
    alt((
        map(preceded(ws(char('+')), unary), Expression::unary_plus),
        map(preceded(ws(char('-')), unary), Expression::unary_minus),
        exponentiation,
    ))
    .parse(input)
}

/// Parse multiplication and division (left-associative)
fn multiplicative(input: &str) -> IResult<&str, Expression> {
    let (mut input, mut left) = unary(input)?;

    loop {
        let op_result =
            binary_operator([Operator::Multiply, Operator::Divide]).parse(input);

        let Ok((new_input, op)) = op_result else {
            break;
        };
        let (new_input, right) = unary(new_input)?;
        input = new_input;
        left = Expression::binary(op, left, right);
    }

    Ok((input, left))
}

/// Parse addition and subtraction (left-associative)
fn additive(input: &str) -> IResult<&str, Expression> {
    let (mut input, mut left) = multiplicative(input)?;

    loop {
        let op_result = binary_operator([Operator::Add, Operator::Subtract]).parse(input);

        let Ok((new_input, op)) = op_result else {
            break;
        };
        let (new_input, right) = multiplicative(new_input)?;
        input = new_input;
        left = Expression::binary(op, left, right);
    }

    Ok((input, left))
}

/// Parse a complete expression
pub fn expression(input: &str) -> IResult<&str, Expression> {
    ws(additive).parse(input)
}

/// Parses the whole of `input` as a single expression.
pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    match all_consuming(expression).parse(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(err) | nom::Err::Failure(err)) => Err(ParseError {
            input: input.to_string(),
            offset: input.len() - err.input.len(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(ParseError {
            input: input.to_string(),
            offset: input.len(),
        }),
    }
}
