//! `nom` grammar for the expression syntax accepted on each side of an equation.
//!
//! Python-style power (`**`, with `^` as an alias) binds tighter than a leading
//! minus, so `-x**2` reads as `-(x**2)` and `2**-1` is allowed.

use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit0, digit1, multispace0, satisfy};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::error::{VerboseError, VerboseErrorKind, convert_error};
use nom::multi::{fold_many0, many0_count};
use nom::sequence::{delimited, pair, tuple};
use num_bigint::BigInt;
use num_traits::{Num, One};

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Parentheses, signs and exponents nested deeper than this are rejected.
const MAX_NESTING: usize = 64;

/// Parsed trees deeper than this (long operator chains included) are rejected.
const MAX_TREE_DEPTH: usize = 256;

pub fn parse_expr(input: &str) -> Result<Expr> {
    let expr = match all_consuming(ws(add_sub(0)))(input) {
        Ok((_, expr)) => expr,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(CasError::Parse(convert_error(input, e).trim_end().to_string()));
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(CasError::Parse(format!("incomplete input: {input:?}")));
        }
    };
    if expr.depth() > MAX_TREE_DEPTH {
        return Err(CasError::Parse(format!(
            "expression deeper than {MAX_TREE_DEPTH} levels"
        )));
    }
    Ok(expr)
}

/// Fails without backtracking once `depth` passes [`MAX_NESTING`].
fn nested(input: &str, depth: usize) -> std::result::Result<usize, nom::Err<VerboseError<&str>>> {
    if depth >= MAX_NESTING {
        return Err(nom::Err::Failure(VerboseError {
            errors: vec![(input, VerboseErrorKind::Context("expression nested too deeply"))],
        }));
    }
    Ok(depth + 1)
}

fn add_sub<'a>(depth: usize) -> impl FnMut(&'a str) -> ParseResult<'a, Expr> {
    move |input| parse_add_sub(input, depth)
}

fn mul_div<'a>(depth: usize) -> impl FnMut(&'a str) -> ParseResult<'a, Expr> {
    move |input| parse_mul_div(input, depth)
}

fn unary<'a>(depth: usize) -> impl FnMut(&'a str) -> ParseResult<'a, Expr> {
    move |input| parse_unary(input, depth)
}

fn parens<'a>(depth: usize) -> impl FnMut(&'a str) -> ParseResult<'a, Expr> {
    move |input| parse_parens(input, depth)
}

fn call<'a>(depth: usize) -> impl FnMut(&'a str) -> ParseResult<'a, Expr> {
    move |input| parse_call(input, depth)
}

fn parse_add_sub(input: &str, depth: usize) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_mul_div(input, depth)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), mul_div(depth)),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            _ => Expr::Sub(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

fn parse_mul_div(input: &str, depth: usize) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_unary(input, depth)?;
    fold_many0(
        pair(ws(alt((char('*'), char('/')))), unary(depth)),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            _ => Expr::Div(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

fn parse_unary(input: &str, depth: usize) -> ParseResult<'_, Expr> {
    let (after_sign, sign) = opt(ws(alt((char('-'), char('+')))))(input)?;
    let Some(sign) = sign else {
        return parse_pow(input, depth);
    };
    let inner = nested(input, depth)?;
    let (rest, expr) = parse_unary(after_sign, inner)?;
    if sign == '-' {
        Ok((rest, Expr::Neg(expr.boxed())))
    } else {
        Ok((rest, expr))
    }
}

fn parse_pow(input: &str, depth: usize) -> ParseResult<'_, Expr> {
    let (rest, base) = parse_primary(input, depth)?;
    let Ok((after_op, _)) = ws(alt((tag("**"), tag("^"))))(rest) else {
        return Ok((rest, base));
    };
    let inner = nested(rest, depth)?;
    match parse_unary(after_op, inner) {
        Ok((next, exp)) => Ok((next, Expr::Pow(base.boxed(), exp.boxed()))),
        Err(nom::Err::Failure(e)) => Err(nom::Err::Failure(e)),
        Err(_) => Ok((rest, base)),
    }
}

fn parse_primary(input: &str, depth: usize) -> ParseResult<'_, Expr> {
    alt((parens(depth), call(depth), parse_number, parse_identifier))(input)
}

fn parse_parens(input: &str, depth: usize) -> ParseResult<'_, Expr> {
    let (after_open, _) = ws(char('('))(input)?;
    let inner = nested(input, depth)?;
    let (rest, expr) = parse_add_sub(after_open, inner)?;
    let (rest, _) = ws(char(')'))(rest)?;
    Ok((rest, expr))
}

fn parse_call(input: &str, depth: usize) -> ParseResult<'_, Expr> {
    let (after_name, name) = ws(identifier)(input)?;
    let (after_open, _) = ws(char('('))(after_name)?;
    let inner = nested(input, depth)?;
    let (rest, arg) = parse_add_sub(after_open, inner)?;
    let (rest, _) = ws(char(')'))(rest)?;
    match build_call(name, arg) {
        Ok(expr) => Ok((rest, expr)),
        Err(_) => Err(nom::Err::Error(VerboseError {
            errors: vec![(input, VerboseErrorKind::Context("unknown function"))],
        })),
    }
}

fn build_call(name: &str, arg: Expr) -> Result<Expr> {
    let arg = arg.boxed();
    let expr = match name {
        "sin" => Expr::Sin(arg),
        "cos" => Expr::Cos(arg),
        "tan" => Expr::Tan(arg),
        "asin" => Expr::Asin(arg),
        "acos" => Expr::Acos(arg),
        "atan" => Expr::Atan(arg),
        "exp" => Expr::Exp(arg),
        "log" => Expr::Log(arg),
        "sqrt" => Expr::Sqrt(arg),
        "abs" => Expr::Abs(arg),
        other => return Err(CasError::Parse(format!("unknown function {other}"))),
    };
    Ok(expr)
}

fn parse_number(input: &str) -> ParseResult<'_, Expr> {
    map_res(
        ws(alt((
            recognize(tuple((digit1, char('.'), digit0))),
            recognize(pair(char('.'), digit1)),
            digit1,
        ))),
        |text: &str| decimal_to_rational(text).map(Expr::Constant),
    )(input)
}

fn parse_identifier(input: &str) -> ParseResult<'_, Expr> {
    map(ws(identifier), |s: &str| Expr::Variable(s.to_string()))(input)
}

fn identifier(input: &str) -> ParseResult<'_, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        many0_count(satisfy(|c| c.is_ascii_alphanumeric() || c == '_')),
    ))(input)
}

/// Reads `12`, `0.25`, `3.` or `.5` exactly.
fn decimal_to_rational(text: &str) -> Result<Rational> {
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
    let digits = format!("{int_part}{frac_part}");
    let numer = BigInt::from_str_radix(if digits.is_empty() { "0" } else { &digits }, 10)
        .map_err(|e| CasError::Parse(format!("invalid number {text:?}: {e}")))?;
    let mut denom = BigInt::one();
    for _ in 0..frac_part.len() {
        denom *= 10;
    }
    Ok(Rational::new(numer, denom))
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{mul, neg, pow};

    #[test]
    fn decimals_are_exact() {
        assert_eq!(parse_expr("0.25").unwrap(), Expr::constant(1, 4));
        assert_eq!(parse_expr(".5").unwrap(), Expr::constant(1, 2));
        assert_eq!(parse_expr("3.").unwrap(), Expr::integer(3));
    }

    #[test]
    fn leading_minus_binds_looser_than_power() {
        let parsed = parse_expr("-x**2").unwrap();
        assert_eq!(parsed, neg(pow(Expr::var("x"), Expr::integer(2))));
    }

    #[test]
    fn caret_is_power_alias() {
        assert_eq!(parse_expr("x^3").unwrap(), parse_expr("x**3").unwrap());
    }

    #[test]
    fn power_is_right_associative() {
        let parsed = parse_expr("2**3**2").unwrap();
        let expected = pow(Expr::integer(2), pow(Expr::integer(3), Expr::integer(2)));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn negative_exponent_and_signed_factor() {
        assert_eq!(
            parse_expr("x**-1").unwrap(),
            pow(Expr::var("x"), neg(Expr::integer(1)))
        );
        assert_eq!(
            parse_expr("2*-y").unwrap(),
            mul(Expr::integer(2), neg(Expr::var("y")))
        );
    }

    #[test]
    fn functions_need_parentheses() {
        assert_eq!(parse_expr("sin(x)").unwrap(), Expr::Sin(Expr::var("x").boxed()));
        assert_eq!(parse_expr("sin").unwrap(), Expr::var("sin"));
        assert!(parse_expr("foo(x)").is_err());
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let parens = format!("{}x{}", "(".repeat(1000), ")".repeat(1000));
        assert!(matches!(parse_expr(&parens), Err(CasError::Parse(_))));
        assert!(matches!(parse_expr(&format!("{}x", "-".repeat(1000))), Err(CasError::Parse(_))));
        assert!(matches!(parse_expr(&"x**".repeat(1000)), Err(CasError::Parse(_))));
        let nested = format!("{}x{}", "(".repeat(40), ")".repeat(40));
        assert_eq!(parse_expr(&nested).unwrap(), Expr::var("x"));
    }

    #[test]
    fn long_chains_are_capped() {
        assert!(parse_expr(&vec!["x"; 100].join(" + ")).is_ok());
        assert!(matches!(
            parse_expr(&vec!["x"; 1000].join(" + ")),
            Err(CasError::Parse(_))
        ));
    }

    #[test]
    fn rejects_dangling_operators() {
        assert!(parse_expr("").is_err());
        assert!(parse_expr("x +").is_err());
        assert!(parse_expr("2x").is_err());
        assert!(parse_expr("(x").is_err());
    }
}
