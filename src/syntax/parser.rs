// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/syntax/parser.rs
// Parser for terms and queries using nom

use crate::ast::*;
use crate::error::ParseError;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0},
    combinator::{map, map_opt, map_res, opt, recognize, verify},
    error::{context, convert_error, VerboseError},
    multi::{fold_many0, many0, separated_list0},
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

type ParseResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

// ============================================================================
// Lexer
// ============================================================================

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn identifier(input: &str) -> ParseResult<'_, &str> {
    context(
        "identifier",
        ws(recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        ))),
    )(input)
}

// ============================================================================
// Literals
// ============================================================================

/// A number with a fraction or an exponent; plain digits are left to `integer`
fn float(input: &str) -> ParseResult<'_, Term> {
    context(
        "float",
        map_opt(
            ws(verify(recognize_float, |s: &str| {
                s.contains(|c: char| matches!(c, '.' | 'e' | 'E'))
            })),
            |s: &str| s.parse::<f64>().ok().filter(|x| x.is_finite()).map(Term::float),
        ),
    )(input)
}

fn integer(input: &str) -> ParseResult<'_, Term> {
    context(
        "integer",
        map_res(
            ws(recognize(pair(opt(char('-')), digit1))),
            |s: &str| s.parse::<i64>().map(Term::int),
        ),
    )(input)
}

fn text(input: &str) -> ParseResult<'_, Term> {
    context(
        "string",
        map(
            ws(delimited(char('"'), take_while(|c: char| c != '"'), char('"'))),
            Term::text,
        ),
    )(input)
}

/// `true` and `false` are keywords, any other identifier names a variable
fn name(input: &str) -> ParseResult<'_, Term> {
    map(identifier, |s| match s {
        "true" => Term::bool(true),
        "false" => Term::bool(false),
        _ => Term::var(s),
    })(input)
}

// ============================================================================
// Compound Terms
// ============================================================================

/// `()`, `(t)` or `(a, b)`
fn parenthesized(input: &str) -> ParseResult<'_, Term> {
    context(
        "parenthesized",
        delimited(
            ws(char('(')),
            map(
                opt(pair(term, opt(preceded(ws(char(',')), term)))),
                |inner| match inner {
                    None => Term::Empty,
                    Some((t, None)) => t,
                    Some((first, Some(second))) => Term::pair(first, second),
                },
            ),
            ws(char(')')),
        ),
    )(input)
}

fn list(input: &str) -> ParseResult<'_, Term> {
    context(
        "list",
        map(
            delimited(
                ws(char('[')),
                separated_list0(ws(char(',')), term),
                ws(char(']')),
            ),
            Term::list,
        ),
    )(input)
}

fn atom(input: &str) -> ParseResult<'_, Term> {
    context(
        "atom",
        alt((float, integer, text, parenthesized, list, name)),
    )(input)
}

// ============================================================================
// Binary Expressions
// ============================================================================

// Precedence, tightest first: `* / %`, `+ -`, `&`, `|`. All left-associative.

fn binary_level<'a>(
    operand: fn(&'a str) -> ParseResult<'a, Term>,
    operators: &'static [(char, BinaryOp)],
) -> impl FnMut(&'a str) -> ParseResult<'a, Term> {
    move |input: &'a str| {
        let (input, init) = operand(input)?;
        fold_many0(
            pair(ws(operator(operators)), operand),
            move || init.clone(),
            |acc, (op, rhs)| Term::expr(acc, op, rhs),
        )(input)
    }
}

fn operator<'a>(
    operators: &'static [(char, BinaryOp)],
) -> impl FnMut(&'a str) -> ParseResult<'a, BinaryOp> {
    move |input: &'a str| {
        for (symbol, op) in operators {
            if let Ok((rest, _)) = char::<_, VerboseError<&'a str>>(*symbol)(input) {
                return Ok((rest, *op));
            }
        }
        context("operator", nom::combinator::fail)(input)
    }
}

fn multiplicative(input: &str) -> ParseResult<'_, Term> {
    binary_level(
        atom,
        &[('*', BinaryOp::Times), ('/', BinaryOp::Div), ('%', BinaryOp::Mod)],
    )(input)
}

fn additive(input: &str) -> ParseResult<'_, Term> {
    binary_level(multiplicative, &[('+', BinaryOp::Plus), ('-', BinaryOp::Minus)])(input)
}

fn conjunction(input: &str) -> ParseResult<'_, Term> {
    binary_level(additive, &[('&', BinaryOp::And)])(input)
}

fn term(input: &str) -> ParseResult<'_, Term> {
    binary_level(conjunction, &[('|', BinaryOp::Or)])(input)
}

// ============================================================================
// Queries
// ============================================================================

fn relation(input: &str) -> ParseResult<'_, Relation> {
    context(
        "relation",
        ws(alt((
            nom::combinator::value(Relation::Disunify, tag("!=")),
            nom::combinator::value(Relation::Unify, tag("=")),
        ))),
    )(input)
}

fn query(input: &str) -> ParseResult<'_, Query> {
    map(tuple((term, relation, term)), |(left, relation, right)| Query {
        left,
        relation,
        right,
    })(input)
}

// ============================================================================
// Public API
// ============================================================================

fn finish<'a, T>(input: &'a str, result: ParseResult<'a, T>) -> Result<T, ParseError> {
    match result {
        Ok(("", parsed)) => Ok(parsed),
        Ok((remaining, _)) => Err(ParseError::Trailing(remaining.to_string())),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(ParseError::Syntax(convert_error(input, e)))
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError::Incomplete),
    }
}

pub fn parse_term_str(input: &str) -> Result<Term, ParseError> {
    finish(input, term(input))
}

pub fn parse_query_str(input: &str) -> Result<Query, ParseError> {
    finish(input, query(input))
}
