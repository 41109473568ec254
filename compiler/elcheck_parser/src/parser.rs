// Parser for single property-path expressions
//
// Only the path subset of EL is understood: a variable followed by `.name`,
// `['key']`, `["key"]` and `[0]` accessors, optionally wrapped in `#{...}` or
// `${...}`. Operators and method calls are not part of this grammar.
//
// Override keys reuse the same accessors, may also address an index in its
// rendered form (`items.0`) and may end in `.*`.

use std::fmt;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, digit1, multispace0, satisfy};
use nom::combinator::{all_consuming, map, opt, recognize};
use nom::error::ErrorKind;
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;

/// A variable and the property names accessed on it, in source order.
///
/// Bracketed keys are stored without brackets or quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub variable: String,
    pub properties: Vec<String>,
}

/// A parsed override key: a path, optionally addressing all of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideKey {
    pub path: ParsedPath,
    /// The key ended in `.*`.
    pub wildcard: bool,
}

impl fmt::Display for OverrideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path.variable)?;
        for property in &self.path.properties {
            write!(f, ".{property}")?;
        }
        if self.wildcard {
            f.write_str(".*")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,
    #[error("invalid path expression '{input}' at offset {offset} ({kind:?})")]
    Syntax {
        input: String,
        offset: usize,
        kind: ErrorKind,
    },
    /// A bracketed key containing `.` would collide with the nested path of the same spelling.
    #[error("bracketed key '{segment}' in '{input}' contains '.'")]
    DottedKey { input: String, segment: String },
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    ))(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
    ))(input)
}

fn dot_access(input: &str) -> IResult<&str, &str> {
    preceded(char('.'), ws(identifier))(input)
}

fn index_access(input: &str) -> IResult<&str, &str> {
    delimited(char('['), ws(alt((quoted, digit1))), char(']'))(input)
}

fn accessor(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alt((dot_access, index_access)))(input)
}

fn path(input: &str) -> IResult<&str, ParsedPath> {
    let (input, variable) = identifier(input)?;
    let (input, properties) = many0(accessor)(input)?;
    Ok((
        input,
        ParsedPath {
            variable: variable.to_string(),
            properties: properties.into_iter().map(str::to_string).collect(),
        },
    ))
}

fn key_accessor(input: &str) -> IResult<&str, &str> {
    preceded(
        multispace0,
        alt((dot_access, preceded(char('.'), ws(digit1)), index_access)),
    )(input)
}

fn override_key(input: &str) -> IResult<&str, OverrideKey> {
    let (input, variable) = identifier(input)?;
    let (input, properties) = many0(key_accessor)(input)?;
    let (input, wildcard) = map(
        opt(preceded(pair(multispace0, char('.')), ws(char('*')))),
        |star| star.is_some(),
    )(input)?;
    Ok((
        input,
        OverrideKey {
            path: ParsedPath {
                variable: variable.to_string(),
                properties: properties.into_iter().map(str::to_string).collect(),
            },
            wildcard,
        },
    ))
}

fn wrapped(input: &str) -> IResult<&str, ParsedPath> {
    delimited(alt((tag("#{"), tag("${"))), ws(path), char('}'))(input)
}

/// Parse one path expression, e.g. `#{order.items[0].price}` or `user.name`.
pub fn parse_path(input: &str) -> Result<ParsedPath, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    match all_consuming(ws(alt((wrapped, path))))(input) {
        Ok((_, parsed)) => {
            log::debug!(
                "parsed '{input}' into variable '{}' with {} properties",
                parsed.variable,
                parsed.properties.len()
            );
            Ok(parsed)
        }
        Err(e) => Err(syntax_error(input, e)),
    }
}

/// Parse a type override key such as `order.items.*` or `bean.map['k']`.
///
/// Bracketed keys may not contain `.`: the key `m['a.b']` would render the
/// same as the nested path `m.a.b`.
pub fn parse_override_key(input: &str) -> Result<OverrideKey, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let key = match all_consuming(ws(override_key))(input) {
        Ok((_, key)) => key,
        Err(e) => return Err(syntax_error(input, e)),
    };
    if let Some(segment) = key.path.properties.iter().find(|p| p.contains('.')) {
        return Err(ParseError::DottedKey {
            input: input.to_string(),
            segment: segment.clone(),
        });
    }
    Ok(key)
}

fn syntax_error(input: &str, err: nom::Err<nom::error::Error<&str>>) -> ParseError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => ParseError::Syntax {
            input: input.to_string(),
            offset: input.len() - e.input.len(),
            kind: e.code,
        },
        nom::Err::Incomplete(_) => ParseError::Syntax {
            input: input.to_string(),
            offset: input.len(),
            kind: ErrorKind::Eof,
        },
    }
}
