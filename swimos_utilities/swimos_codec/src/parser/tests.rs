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

use crate::{parse_chunks, parse_str, Expected, Input, ParseError, Parser, Parsing, StrInput};

/// Parses a run of decimal digits terminated by `;`.
#[derive(Debug, Default)]
struct Digits {
    value: u64,
}

impl Parser for Digits {
    type Output = u64;

    fn feed<I: Input>(mut self, input: &mut I) -> Parsing<Self, Self::Output> {
        while let Some(c) = input.head() {
            if let Some(d) = c.to_digit(10) {
                input.step();
                self.value = self.value * 10 + u64::from(d);
            } else if c == ';' {
                input.step();
                return Parsing::Done(self.value);
            } else {
                return Parsing::Error(ParseError::expected("a digit", input));
            }
        }
        Parsing::stalled(self, input)
    }
}

#[test]
fn parse_complete_string() {
    assert_eq!(parse_str(Digits::default(), "1234;").unwrap(), 1234);
}

#[test]
fn parse_incomplete_string() {
    let err = parse_str(Digits::default(), "12").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Malformed {
            found: None,
            offset: 2,
            ..
        }
    ));
}

#[test]
fn parse_trailing_input() {
    let err = parse_str(Digits::default(), "12;x").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Malformed {
            found: Some('x'),
            offset: 3,
            ..
        }
    ));
}

#[test]
fn parse_bad_character() {
    let err = parse_str(Digits::default(), "1a;").unwrap_err();
    match err {
        ParseError::Malformed {
            expected,
            found,
            offset,
        } => {
            assert_eq!(expected, Expected::Description("a digit"));
            assert_eq!(found, Some('a'));
            assert_eq!(offset, 1);
        }
        ow => panic!("Unexpected error: {:?}", ow),
    }
    assert_eq!(
        err_message("1a;"),
        "Expected a digit at offset 1 but found 'a'."
    );
}

fn err_message(input: &str) -> String {
    parse_str(Digits::default(), input).unwrap_err().to_string()
}

#[test]
fn parse_in_chunks() {
    let result = parse_chunks(Digits::default(), ["1", "23", "", "4;"]);
    assert_eq!(result.unwrap(), 1234);
}

#[test]
fn chunked_error_offsets() {
    let err = parse_chunks(Digits::default(), ["12", "3", "x"]).unwrap_err();
    assert_eq!(err.offset(), Some(3));
}

#[test]
fn chunked_trailing_input() {
    let err = parse_chunks(Digits::default(), ["12;", "", "z"]).unwrap_err();
    assert!(matches!(
        err,
        ParseError::Malformed {
            found: Some('z'),
            offset: 3,
            ..
        }
    ));
}

#[test]
fn suspends_on_partial_input() {
    let mut input = StrInput::new("56").is_part(true);
    let parser = match Digits::default().feed(&mut input) {
        Parsing::Cont(p) => p,
        ow => panic!("Unexpected result: {:?}", ow),
    };
    assert_eq!(parser.value, 56);
    assert!(input.is_empty());

    let mut input = StrInput::new("7;");
    assert!(matches!(parser.feed(&mut input), Parsing::Done(567)));
}
