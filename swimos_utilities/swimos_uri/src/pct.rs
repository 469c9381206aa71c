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

use std::mem;

use percent_encoding::{AsciiSet, CONTROLS};
use swimos_codec::{Input, ParseError};

const HEX_DIGIT: &str = "a hex digit";

pub fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

pub fn is_sub_delim(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}

pub fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

pub fn is_authority_char(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || matches!(c, ':' | '@' | '[' | ']' | '%')
}

pub fn is_path_char(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || matches!(c, ':' | '@')
}

pub fn is_query_char(c: char) -> bool {
    is_path_char(c) || matches!(c, '/' | '?')
}

pub fn is_fragment_char(c: char) -> bool {
    is_query_char(c)
}

/// Characters that must be escaped in user names and passwords.
pub const USER: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Characters that must be escaped in host names.
pub const HOST: &AsciiSet = USER;

/// Characters that must be escaped in a path segment.
pub const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A leading segment of a path without a scheme or authority must not contain a colon.
pub const FIRST_SEGMENT: &AsciiSet = &SEGMENT.add(b':');

/// Characters that must be escaped in query keys and values.
pub const PARAM: &AsciiSet = &SEGMENT.add(b'&').add(b'=');

/// Characters that must be escaped in a fragment.
pub const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Escape {
    #[default]
    None,
    Percent,
    High(u8),
}

/// Accumulates percent decoded text one character at a time. An escape sequence may be split
/// across any number of chunks of input.
#[derive(Debug, Default, Clone)]
pub struct PctText {
    bytes: Vec<u8>,
    escape: Escape,
}

impl PctText {
    /// Whether an escape sequence has been started but not completed.
    pub fn in_escape(&self) -> bool {
        self.escape != Escape::None
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty() && !self.in_escape()
    }

    /// Add the character at the head of the input. The caller is responsible for stepping the
    /// input afterwards.
    pub fn push<I: Input>(&mut self, c: char, input: &I) -> Result<(), ParseError> {
        match self.escape {
            Escape::None if c == '%' => {
                self.escape = Escape::Percent;
            }
            Escape::None => {
                let mut buf = [0u8; 4];
                self.bytes
                    .extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            Escape::Percent => {
                let high = hex_value(c).ok_or_else(|| ParseError::expected(HEX_DIGIT, input))?;
                self.escape = Escape::High(high);
            }
            Escape::High(high) => {
                let low = hex_value(c).ok_or_else(|| ParseError::expected(HEX_DIGIT, input))?;
                self.bytes.push((high << 4) | low);
                self.escape = Escape::None;
            }
        }
        Ok(())
    }

    /// Fails if the text ends part way through an escape.
    pub fn check_complete<I: Input>(&self, input: &I) -> Result<(), ParseError> {
        if self.in_escape() {
            Err(ParseError::expected(HEX_DIGIT, input))
        } else {
            Ok(())
        }
    }

    /// Take the decoded text, leaving this empty. Invalid UTF-8 sequences are replaced.
    pub fn take(&mut self) -> String {
        let bytes = mem::take(&mut self.bytes);
        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }
}

fn hex_value(c: char) -> Option<u8> {
    c.to_digit(16).and_then(|d| u8::try_from(d).ok())
}

/// Percent decode a complete string, reporting errors relative to `start`.
pub fn decode_str(text: &str, start: usize) -> Result<String, ParseError> {
    let mut decoded = PctText::default();
    for (index, c) in text.char_indices() {
        let position = Position {
            head: Some(c),
            offset: start + index,
        };
        decoded.push(c, &position)?;
    }
    let end = Position {
        head: None,
        offset: start + text.len(),
    };
    decoded.check_complete(&end)?;
    Ok(decoded.take())
}

/// A fixed position within text that has already been consumed, used to report errors found
/// after the fact.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub head: Option<char>,
    pub offset: usize,
}

impl Position {
    pub fn within(text: &str, index: usize, start: usize) -> Self {
        Position {
            head: text.get(index..).and_then(|rest| rest.chars().next()),
            offset: start + index,
        }
    }
}

impl Input for Position {
    fn is_cont(&self) -> bool {
        self.head.is_some()
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn is_done(&self) -> bool {
        self.head.is_none()
    }

    fn is_error(&self) -> bool {
        false
    }

    fn head(&self) -> Option<char> {
        self.head
    }

    fn step(&mut self) {}

    fn position(&self) -> usize {
        self.offset
    }

    fn trap(&mut self) -> Option<swimos_codec::CursorError> {
        None
    }
}

#[cfg(test)]
mod tests {
    use swimos_codec::{Expected, ParseError};

    use super::decode_str;

    #[test]
    fn decode_escapes() {
        assert_eq!(decode_str("a%20b", 0).unwrap(), "a b");
        assert_eq!(decode_str("%E2%84%B5", 0).unwrap(), "ℵ");
        assert_eq!(decode_str("plain", 0).unwrap(), "plain");
    }

    #[test]
    fn bad_escapes() {
        match decode_str("ab%zz", 10) {
            Err(ParseError::Malformed {
                expected,
                found,
                offset,
            }) => {
                assert_eq!(expected, Expected::Description("a hex digit"));
                assert_eq!(found, Some('z'));
                assert_eq!(offset, 13);
            }
            ow => panic!("Unexpected result: {:?}", ow),
        }
        assert!(matches!(
            decode_str("ab%4", 0),
            Err(ParseError::Malformed {
                found: None,
                offset: 4,
                ..
            })
        ));
    }
}
