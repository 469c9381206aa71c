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

mod tokens;

#[cfg(test)]
mod tests;

use std::borrow::Cow;

use nom::branch::alt;
use nom::character::complete::{char, multispace0, one_of, space0};
use nom::combinator::{eof, map, opt};
use nom::error::ErrorKind;
use nom::multi::{fold_many0, many0, separated_list0};
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::IResult;
use nom_locate::LocatedSpan;
use swimos_model::{Attr, Item, Value};
use thiserror::Error;

use tokens::{
    blob, identifier, identifier_or_bool, markup_text, numeric_literal, selector, string_literal,
};

pub type Span<'a> = LocatedSpan<&'a str>;

/// Error produced when a string is not a valid Recon document.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Invalid Recon at offset {offset} ({kind:?}).")]
pub struct ReconParseError {
    pub offset: usize,
    pub kind: ErrorKind,
}

/// Parse a complete Recon document into a [`Value`]. This accepts everything that the Recon
/// writers produce, along with insignificant whitespace and newline separated items.
///
/// # Examples
///
/// ```
/// use swimos_model::{record, Attr};
/// use swimos_recon::parse_recon;
///
/// let value = parse_recon("@foo{a:1,b:2}").unwrap();
/// assert_eq!(value, record!(Attr::of("foo"), ("a", 1), ("b", 2)));
/// ```
pub fn parse_recon(input: &str) -> Result<Value, ReconParseError> {
    match document(Span::new(input)) {
        Ok((_, value)) => Ok(value),
        Err(nom::Err::Error(err) | nom::Err::Failure(err)) => Err(ReconParseError {
            offset: err.input.location_offset(),
            kind: err.code,
        }),
        Err(nom::Err::Incomplete(_)) => Err(ReconParseError {
            offset: input.len(),
            kind: ErrorKind::Eof,
        }),
    }
}

fn document(input: Span<'_>) -> IResult<Span<'_>, Value> {
    map(
        terminated(delimited(multispace0, block_items, multispace0), eof),
        block_value,
    )(input)
}

/// A block with no items is extant and a block with a single value item is that value.
fn block_value(mut items: Vec<Item>) -> Value {
    if items.len() == 1 && matches!(items.first(), Some(Item::ValueItem(_))) {
        if let Some(Item::ValueItem(value)) = items.pop() {
            return value;
        }
    }
    if items.is_empty() {
        Value::Extant
    } else {
        Value::Record(items)
    }
}

fn separator(input: Span<'_>) -> IResult<Span<'_>, char> {
    delimited(space0, one_of(",;\n"), multispace0)(input)
}

fn block_items(input: Span<'_>) -> IResult<Span<'_>, Vec<Item>> {
    separated_list0(separator, block_item)(input)
}

fn slot_colon(input: Span<'_>) -> IResult<Span<'_>, char> {
    delimited(space0, char(':'), space0)(input)
}

fn block_item(input: Span<'_>) -> IResult<Span<'_>, Item> {
    alt((
        map(
            pair(value_seq, opt(preceded(slot_colon, opt(value_seq)))),
            |(key, value)| match value {
                Some(value) => Item::Slot(key, value.unwrap_or_default()),
                None => Item::ValueItem(key),
            },
        ),
        map(preceded(slot_colon, opt(value_seq)), |value| {
            Item::Slot(Value::Extant, value.unwrap_or_default())
        }),
    ))(input)
}

enum Part {
    Attr(Attr),
    Items(Vec<Item>),
    Literal(Value),
}

fn part(input: Span<'_>) -> IResult<Span<'_>, Part> {
    alt((
        map(attr, Part::Attr),
        map(braces, Part::Items),
        map(markup, Part::Items),
        map(literal, Part::Literal),
    ))(input)
}

/// A sequence of juxtaposed parts. A lone literal stands for itself, anything else is
/// assembled into a record.
fn value_seq(input: Span<'_>) -> IResult<Span<'_>, Value> {
    map(pair(part, many0(preceded(space0, part))), |(first, rest)| {
        if rest.is_empty() {
            if let Part::Literal(value) = first {
                return value;
            }
        }
        let mut items = vec![];
        for part in std::iter::once(first).chain(rest) {
            match part {
                Part::Attr(attr) => items.push(Item::Attr(attr)),
                Part::Items(block) => items.extend(block),
                Part::Literal(value) => items.push(Item::ValueItem(value)),
            }
        }
        Value::Record(items)
    })(input)
}

fn literal(input: Span<'_>) -> IResult<Span<'_>, Value> {
    alt((
        map(string_literal, |s| Value::Text(s.into_owned())),
        numeric_literal,
        identifier_or_bool,
        map(blob, Value::Data),
        map(selector, Value::Selector),
    ))(input)
}

fn attr_name(input: Span<'_>) -> IResult<Span<'_>, String> {
    alt((map(identifier, str::to_string), map(string_literal, Cow::into_owned)))(input)
}

fn attr(input: Span<'_>) -> IResult<Span<'_>, Attr> {
    map(
        preceded(
            char('@'),
            pair(
                attr_name,
                opt(delimited(
                    char('('),
                    delimited(multispace0, block_items, multispace0),
                    char(')'),
                )),
            ),
        ),
        |(name, body)| Attr {
            name,
            value: body.map(block_value).unwrap_or_default(),
        },
    )(input)
}

fn braces(input: Span<'_>) -> IResult<Span<'_>, Vec<Item>> {
    delimited(
        char('{'),
        delimited(multispace0, block_items, multispace0),
        char('}'),
    )(input)
}

enum MarkupPart {
    Text(String),
    Block(Vec<Item>),
    Inline(Item),
}

/// An attribute within markup, optionally followed by a block or nested markup, is a single
/// record item.
fn inline_record(input: Span<'_>) -> IResult<Span<'_>, Item> {
    map(pair(attr, opt(alt((braces, markup)))), |(attr, body)| {
        let mut items = vec![Item::Attr(attr)];
        items.extend(body.into_iter().flatten());
        Item::ValueItem(Value::Record(items))
    })(input)
}

fn markup(input: Span<'_>) -> IResult<Span<'_>, Vec<Item>> {
    let part = alt((
        map(markup_text, MarkupPart::Text),
        map(braces, MarkupPart::Block),
        map(inline_record, MarkupPart::Inline),
    ));
    let body = fold_many0(part, Vec::new, |mut items, part| {
        match part {
            MarkupPart::Text(text) => items.push(Item::ValueItem(Value::Text(text))),
            MarkupPart::Block(block) => items.extend(block),
            MarkupPart::Inline(item) => items.push(item),
        }
        items
    });
    delimited(char('['), body, char(']'))(input)
}
