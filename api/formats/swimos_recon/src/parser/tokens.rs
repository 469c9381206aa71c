// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use nom::branch::alt;
use nom::character::complete as character;
use nom::combinator::{map, map_res, opt, recognize};
use nom::multi::{many0_count, many1_count};
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;
use swimos_model::identifier::{is_identifier_char, is_identifier_start};
use swimos_model::Value;

use super::Span;

fn unwrap_span(span: Span<'_>) -> &str {
    *span
}

/// Unescape a string using Java conventions. Returns `None` if the string contains an invalid
/// escape.
fn unescape(literal: &str) -> Option<String> {
    let mut unescaped = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            '\\' => '\\',
            '"' => '"',
            '/' => '/',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                let mut code = 0;
                for _ in 0..4 {
                    code = (code << 4) | chars.next()?.to_digit(16)?;
                }
                char::from_u32(code)?
            }
            _ => return None,
        };
        unescaped.push(escaped);
    }
    Some(unescaped)
}

#[derive(Debug)]
struct InvalidEscapes(String);

impl Display for InvalidEscapes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" contains invalid escape sequences.", self.0)
    }
}

impl std::error::Error for InvalidEscapes {}

fn resolve_escapes(span: Span<'_>) -> Result<Cow<'_, str>, InvalidEscapes> {
    let input = unwrap_span(span);
    if input.contains('\\') {
        unescape(input)
            .map(Cow::Owned)
            .ok_or_else(|| InvalidEscapes(input.to_string()))
    } else {
        Ok(Cow::Borrowed(input))
    }
}

fn escape(input: Span<'_>) -> IResult<Span<'_>, Span<'_>> {
    recognize(pair(character::char('\\'), character::anychar))(input)
}

pub fn string_literal(input: Span<'_>) -> IResult<Span<'_>, Cow<'_, str>> {
    map_res(
        delimited(
            character::char('"'),
            recognize(many0_count(alt((
                recognize(character::satisfy(|c| c != '\\' && c != '"')),
                escape,
            )))),
            character::char('"'),
        ),
        resolve_escapes,
    )(input)
}

pub fn identifier(input: Span<'_>) -> IResult<Span<'_>, &str> {
    map(
        recognize(pair(
            character::satisfy(is_identifier_start),
            many0_count(character::satisfy(is_identifier_char)),
        )),
        unwrap_span,
    )(input)
}

/// Identifiers, with the exception of the boolean literals, are text.
pub fn identifier_or_bool(input: Span<'_>) -> IResult<Span<'_>, Value> {
    map(identifier, |id| match id {
        "true" => Value::BooleanValue(true),
        "false" => Value::BooleanValue(false),
        _ => Value::text(id),
    })(input)
}

#[derive(Debug)]
struct InvalidNumber;

fn to_number(span: Span<'_>) -> Result<Value, InvalidNumber> {
    let rep = unwrap_span(span);
    if rep.contains(['.', 'e', 'E']) {
        rep.parse::<f64>()
            .map(Value::Float64Value)
            .map_err(|_| InvalidNumber)
    } else {
        rep.parse::<i64>()
            .map(Value::Int64Value)
            .map_err(|_| InvalidNumber)
    }
}

pub fn numeric_literal(input: Span<'_>) -> IResult<Span<'_>, Value> {
    map_res(
        recognize(tuple((
            opt(character::char('-')),
            character::digit1,
            opt(pair(character::char('.'), character::digit1)),
            opt(tuple((
                character::one_of("eE"),
                opt(character::one_of("+-")),
                character::digit1,
            ))),
        ))),
        to_number,
    )(input)
}

fn base64_digit(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

fn padding(c: char) -> bool {
    c == '='
}

fn base64_digit_or_padding(c: char) -> bool {
    base64_digit(c) || padding(c)
}

fn base64_block(input: Span<'_>) -> IResult<Span<'_>, Span<'_>> {
    let digit = character::satisfy(base64_digit);
    let mut block = recognize(tuple((&digit, &digit, &digit, &digit)));
    block(input)
}

fn base64_final_block(input: Span<'_>) -> IResult<Span<'_>, Span<'_>> {
    let digit = character::satisfy(base64_digit);
    let padding = character::satisfy(padding);
    let digit_or_padding = character::satisfy(base64_digit_or_padding);
    let mut block = recognize(tuple((&digit, &digit, &digit_or_padding, &padding)));
    block(input)
}

fn base64(input: Span<'_>) -> IResult<Span<'_>, Span<'_>> {
    recognize(pair(many0_count(base64_block), opt(base64_final_block)))(input)
}

pub fn blob(input: Span<'_>) -> IResult<Span<'_>, Vec<u8>> {
    map_res(preceded(character::char('%'), base64), |span| {
        STANDARD.decode(unwrap_span(span))
    })(input)
}

pub fn selector(input: Span<'_>) -> IResult<Span<'_>, String> {
    preceded(
        character::char('$'),
        alt((
            map(identifier, str::to_string),
            map(string_literal, Cow::into_owned),
        )),
    )(input)
}

/// Markup text up to the next special character. Escaped characters are taken literally.
pub fn markup_text(input: Span<'_>) -> IResult<Span<'_>, String> {
    map(
        recognize(many1_count(alt((
            recognize(character::none_of("\\@[]{}")),
            escape,
        )))),
        |span| {
            let mut text = String::new();
            let mut chars = unwrap_span(span).chars();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => text.extend(chars.next()),
                    _ => text.push(c),
                }
            }
            text
        },
    )(input)
}

#[cfg(test)]
mod tests {
    use super::unescape;

    #[test]
    fn unescape_strings() {
        assert_eq!(unescape("plain").as_deref(), Some("plain"));
        assert_eq!(unescape("a\\\"b").as_deref(), Some("a\"b"));
        assert_eq!(unescape("\\n\\t\\\\").as_deref(), Some("\n\t\\"));
        assert_eq!(unescape("\\u0041\\u2135").as_deref(), Some("Aℵ"));
        assert_eq!(unescape("\\q"), None);
        assert_eq!(unescape("\\u12"), None);
        assert_eq!(unescape("trailing\\"), None);
    }
}
