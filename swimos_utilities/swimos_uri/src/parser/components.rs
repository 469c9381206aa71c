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

use std::net::{Ipv4Addr, Ipv6Addr};

use swimos_codec::{Input, ParseError, Parser, Parsing};

use crate::pct::{
    decode_str, is_authority_char, is_fragment_char, is_path_char, is_query_char, is_scheme_char,
    PctText, Position,
};
use crate::{
    UriAuthority, UriFragment, UriHost, UriPath, UriPathBuilder, UriQuery, UriScheme, UriUser,
};

const SCHEME: &str = "a scheme";
const IPV6: &str = "an IPv6 address";
const HOST_NAME: &str = "a host name";
const PORT: &str = "a port number";

/// Parses `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`. Completes at the first character that
/// cannot be part of a scheme.
#[derive(Debug, Default)]
pub struct SchemeParser {
    name: String,
}

impl Parser for SchemeParser {
    type Output = UriScheme;

    fn feed<I: Input>(mut self, input: &mut I) -> Parsing<Self, UriScheme> {
        while let Some(c) = input.head() {
            let accepted = if self.name.is_empty() {
                c.is_ascii_alphabetic()
            } else {
                is_scheme_char(c)
            };
            if accepted {
                self.name.push(c);
                input.step();
            } else if self.name.is_empty() {
                return Parsing::Error(ParseError::expected(SCHEME, input));
            } else {
                return Parsing::Done(UriScheme::new(self.name));
            }
        }
        if !input.is_done() {
            Parsing::stalled(self, input)
        } else if self.name.is_empty() {
            Parsing::Error(ParseError::expected(SCHEME, input))
        } else {
            Parsing::Done(UriScheme::new(self.name))
        }
    }
}

/// Parses `[user "@"] host [":" port]`. Whether the authority has user information cannot be
/// known until its end so the raw text is collected and interpreted once it is complete.
#[derive(Debug, Default)]
pub struct AuthorityParser {
    raw: String,
    start: Option<usize>,
}

impl Parser for AuthorityParser {
    type Output = UriAuthority;

    fn feed<I: Input>(mut self, input: &mut I) -> Parsing<Self, UriAuthority> {
        let start = *self.start.get_or_insert(input.position());
        while let Some(c) = input.head() {
            if !is_authority_char(c) {
                return to_parsing(interpret_authority(&self.raw, start));
            }
            self.raw.push(c);
            input.step();
        }
        if input.is_done() {
            to_parsing(interpret_authority(&self.raw, start))
        } else {
            Parsing::stalled(self, input)
        }
    }
}

fn to_parsing<P, T>(result: Result<T, ParseError>) -> Parsing<P, T> {
    match result {
        Ok(value) => Parsing::Done(value),
        Err(err) => Parsing::Error(err),
    }
}

fn interpret_authority(raw: &str, start: usize) -> Result<UriAuthority, ParseError> {
    let (user, host_index) = match raw.rfind('@') {
        Some(at) => (Some(interpret_user(&raw[..at], start)?), at + 1),
        None => (None, 0),
    };
    let host_port = &raw[host_index..];
    let host_start = start + host_index;
    let (host, port_index) = if host_port.starts_with('[') {
        let close = host_port
            .find(']')
            .ok_or_else(|| expected_at(']', host_port, host_port.len(), host_start))?;
        let addr = host_port[1..close]
            .parse::<Ipv6Addr>()
            .map_err(|_| expected_at(IPV6, host_port, 1, host_start))?;
        (UriHost::Ipv6(addr), close + 1)
    } else {
        let end = host_port.find(':').unwrap_or(host_port.len());
        let name = &host_port[..end];
        if let Some(index) = name.find(['[', ']']) {
            return Err(expected_at(HOST_NAME, name, index, host_start));
        }
        let host = match name.parse::<Ipv4Addr>() {
            Ok(addr) => UriHost::Ipv4(addr),
            Err(_) => UriHost::name(decode_str(name, host_start)?),
        };
        (host, end)
    };
    let rest = &host_port[port_index..];
    let port = if rest.is_empty() {
        None
    } else if let Some(digits) = rest.strip_prefix(':') {
        interpret_port(digits, host_start + port_index + 1)?
    } else {
        return Err(expected_at(':', rest, 0, host_start + port_index));
    };
    Ok(UriAuthority::new(user, host, port))
}

fn interpret_user(userinfo: &str, start: usize) -> Result<UriUser, ParseError> {
    match userinfo.split_once(':') {
        Some((username, password)) => {
            let password_start = start + username.len() + 1;
            Ok(UriUser::new(
                decode_str(username, start)?,
                Some(decode_str(password, password_start)?),
            ))
        }
        None => Ok(UriUser::new(decode_str(userinfo, start)?, None)),
    }
}

fn interpret_port(digits: &str, start: usize) -> Result<Option<u16>, ParseError> {
    if digits.is_empty() {
        return Ok(None);
    }
    if let Some(index) = digits.find(|c: char| !c.is_ascii_digit()) {
        return Err(expected_at(PORT, digits, index, start));
    }
    digits
        .parse::<u16>()
        .map(Some)
        .map_err(|_| expected_at(PORT, digits, 0, start))
}

fn expected_at<E: Into<swimos_codec::Expected>>(
    expected: E,
    text: &str,
    index: usize,
    start: usize,
) -> ParseError {
    ParseError::expected(expected, &Position::within(text, index, start))
}

/// Parses a (possibly empty) path. Completes at the first character that cannot be part of a
/// path.
#[derive(Debug, Default)]
pub struct PathParser {
    builder: UriPathBuilder,
    segment: PctText,
}

impl PathParser {
    pub fn new(builder: UriPathBuilder) -> Self {
        PathParser {
            builder,
            segment: PctText::default(),
        }
    }

    fn finish<I: Input>(mut self, input: &I) -> Parsing<Self, UriPath> {
        if let Err(err) = self.segment.check_complete(input) {
            return Parsing::Error(err);
        }
        self.builder.push_segment(self.segment.take());
        Parsing::Done(self.builder.build())
    }
}

impl Parser for PathParser {
    type Output = UriPath;

    fn feed<I: Input>(mut self, input: &mut I) -> Parsing<Self, UriPath> {
        while let Some(c) = input.head() {
            if self.segment.in_escape() || (c != '/' && (is_path_char(c) || c == '%')) {
                if let Err(err) = self.segment.push(c, input) {
                    return Parsing::Error(err);
                }
            } else if c == '/' {
                self.builder.push_segment(self.segment.take());
                self.builder.push_slash();
            } else {
                return self.finish(input);
            }
            input.step();
        }
        if input.is_done() {
            self.finish(input)
        } else {
            Parsing::stalled(self, input)
        }
    }
}

/// Parses `&` separated parameters. Completes at the first character that cannot be part of a
/// query.
#[derive(Debug, Default)]
pub struct QueryParser {
    params: Vec<(Option<String>, String)>,
    key: Option<String>,
    text: PctText,
}

impl QueryParser {
    fn finish<I: Input>(mut self, input: &I) -> Parsing<Self, UriQuery> {
        if let Err(err) = self.text.check_complete(input) {
            return Parsing::Error(err);
        }
        if !(self.params.is_empty() && self.key.is_none() && self.text.is_empty()) {
            self.params.push((self.key.take(), self.text.take()));
        }
        Parsing::Done(UriQuery::new(self.params))
    }
}

impl Parser for QueryParser {
    type Output = UriQuery;

    fn feed<I: Input>(mut self, input: &mut I) -> Parsing<Self, UriQuery> {
        while let Some(c) = input.head() {
            if self.text.in_escape() {
                if let Err(err) = self.text.push(c, input) {
                    return Parsing::Error(err);
                }
            } else if c == '&' {
                self.params.push((self.key.take(), self.text.take()));
            } else if c == '=' && self.key.is_none() {
                self.key = Some(self.text.take());
            } else if is_query_char(c) || c == '%' {
                if let Err(err) = self.text.push(c, input) {
                    return Parsing::Error(err);
                }
            } else {
                return self.finish(input);
            }
            input.step();
        }
        if input.is_done() {
            self.finish(input)
        } else {
            Parsing::stalled(self, input)
        }
    }
}

/// Parses a fragment. Completes at the first character that cannot be part of a fragment.
#[derive(Debug, Default)]
pub struct FragmentParser {
    text: PctText,
}

impl FragmentParser {
    fn finish<I: Input>(mut self, input: &I) -> Parsing<Self, UriFragment> {
        match self.text.check_complete(input) {
            Ok(_) => Parsing::Done(UriFragment::new(self.text.take())),
            Err(err) => Parsing::Error(err),
        }
    }
}

impl Parser for FragmentParser {
    type Output = UriFragment;

    fn feed<I: Input>(mut self, input: &mut I) -> Parsing<Self, UriFragment> {
        while let Some(c) = input.head() {
            if self.text.in_escape() || is_fragment_char(c) || c == '%' {
                if let Err(err) = self.text.push(c, input) {
                    return Parsing::Error(err);
                }
            } else {
                return self.finish(input);
            }
            input.step();
        }
        if input.is_done() {
            self.finish(input)
        } else {
            Parsing::stalled(self, input)
        }
    }
}
