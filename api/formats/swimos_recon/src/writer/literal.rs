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

use std::iter::{self, Chain, FlatMap, Once, Peekable};
use std::str::Chars;

use swimos_codec::{Output, Writer, Writing};
use swimos_model::identifier::is_identifier;

static DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// The characters produced by escaping a single character.
#[derive(Debug, Clone)]
pub struct Escaped {
    chars: [char; 6],
    index: usize,
    len: usize,
}

impl Escaped {
    fn one(c: char) -> Self {
        Escaped {
            chars: [c, '\0', '\0', '\0', '\0', '\0'],
            index: 0,
            len: 1,
        }
    }

    fn two(c1: char, c2: char) -> Self {
        Escaped {
            chars: [c1, c2, '\0', '\0', '\0', '\0'],
            index: 0,
            len: 2,
        }
    }

    fn unicode(c: char) -> Self {
        let n = c as usize;
        Escaped {
            chars: [
                '\\',
                'u',
                DIGITS[(n >> 12) & 0xf],
                DIGITS[(n >> 8) & 0xf],
                DIGITS[(n >> 4) & 0xf],
                DIGITS[n & 0xf],
            ],
            index: 0,
            len: 6,
        }
    }
}

impl Iterator for Escaped {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.len {
            let c = self.chars[self.index];
            self.index += 1;
            Some(c)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

fn escape_string_char(c: char) -> Escaped {
    match c {
        '"' => Escaped::two('\\', '"'),
        '\\' => Escaped::two('\\', '\\'),
        '\r' => Escaped::two('\\', 'r'),
        '\n' => Escaped::two('\\', 'n'),
        '\t' => Escaped::two('\\', 't'),
        '\u{08}' => Escaped::two('\\', 'b'),
        '\u{0c}' => Escaped::two('\\', 'f'),
        cp if cp < '\u{20}' => Escaped::unicode(cp),
        _ => Escaped::one(c),
    }
}

fn escape_markup_char(c: char) -> Escaped {
    match c {
        '\\' | '@' | '{' | '}' | '[' | ']' => Escaped::two('\\', c),
        _ => Escaped::one(c),
    }
}

type EscapeFn = fn(char) -> Escaped;

pub type QuotedChars<'a> =
    Chain<Chain<Once<char>, FlatMap<Chars<'a>, Escaped, EscapeFn>>, Once<char>>;

pub type MarkupChars<'a> = FlatMap<Chars<'a>, Escaped, EscapeFn>;

/// The characters of a quoted and escaped string literal.
pub fn quoted_chars(text: &str) -> QuotedChars<'_> {
    let escape: EscapeFn = escape_string_char;
    iter::once('"')
        .chain(text.chars().flat_map(escape))
        .chain(iter::once('"'))
}

/// The characters of text written as the body of markup.
pub fn markup_chars(text: &str) -> MarkupChars<'_> {
    let escape: EscapeFn = escape_markup_char;
    text.chars().flat_map(escape)
}

/// The number of characters required to write a string literal (without quotes if the string
/// is an identifier).
pub fn string_literal_len(text: &str) -> usize {
    if is_identifier(text) {
        text.chars().count()
    } else {
        quoted_chars(text).count()
    }
}

pub fn markup_text_len(text: &str) -> usize {
    markup_chars(text).count()
}

/// Writes the characters produced by an iterator.
pub struct CharsWriter<I: Iterator<Item = char>> {
    chars: Peekable<I>,
}

impl<I: Iterator<Item = char>> CharsWriter<I> {
    pub fn new(chars: I) -> Self {
        CharsWriter {
            chars: chars.peekable(),
        }
    }
}

impl<I: Iterator<Item = char>> Writer for CharsWriter<I> {
    fn pull<O: Output>(mut self, output: &mut O) -> Writing<Self> {
        while let Some(c) = self.chars.peek().copied() {
            if output.is_cont() {
                output.write(c);
                self.chars.next();
            } else {
                return Writing::stalled(self, output);
            }
        }
        Writing::Done
    }
}
