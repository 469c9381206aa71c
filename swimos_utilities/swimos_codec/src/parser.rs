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

#[cfg(test)]
mod tests;

use tracing::trace;

use crate::{Input, ParseError, StrInput};

/// The result of feeding input to a [`Parser`].
#[derive(Debug)]
pub enum Parsing<P, T> {
    /// The parser consumed all of the input it could and needs more to finish.
    Cont(P),
    /// The parser produced a value.
    Done(T),
    /// The input was invalid or the input cursor failed.
    Error(ParseError),
}

impl<P, T> Parsing<P, T> {
    pub fn is_cont(&self) -> bool {
        matches!(self, Parsing::Cont(_))
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Parsing::Done(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Parsing::Error(_))
    }

    pub fn map<F, P2>(self, f: F) -> Parsing<P2, T>
    where
        F: FnOnce(P) -> P2,
    {
        match self {
            Parsing::Cont(p) => Parsing::Cont(f(p)),
            Parsing::Done(value) => Parsing::Done(value),
            Parsing::Error(err) => Parsing::Error(err),
        }
    }

    /// Determine the result for a parser that cannot make progress because the input has no
    /// character available. A failed input traps the parse, otherwise the parser is returned so
    /// that it can be resumed.
    pub fn stalled<I: Input>(parser: P, input: &mut I) -> Self {
        if input.is_error() {
            Parsing::Error(ParseError::Trapped(input.trap().unwrap_or_default()))
        } else {
            Parsing::Cont(parser)
        }
    }
}

/// A resumable parser. Each call to `feed` consumes as much of the input as it can and either
/// completes, fails or returns a continuation that must be fed the remainder of the stream.
pub trait Parser: Sized {
    type Output;

    fn feed<I: Input>(self, input: &mut I) -> Parsing<Self, Self::Output>;
}

const COMPLETE_INPUT: &str = "a complete input";
const END_OF_INPUT: &str = "the end of the input";

fn finish<P: Parser>(parser: P, input: &mut StrInput<'_>) -> Result<P::Output, ParseError> {
    match parser.feed(input) {
        Parsing::Done(_) if input.is_cont() => Err(ParseError::expected(END_OF_INPUT, input)),
        Parsing::Done(value) => Ok(value),
        Parsing::Cont(_) => Err(ParseError::expected(COMPLETE_INPUT, input)),
        Parsing::Error(err) => Err(err),
    }
}

/// Run a parser over a complete string. The parser must consume all of the input.
pub fn parse_str<P: Parser>(parser: P, input: &str) -> Result<P::Output, ParseError> {
    finish(parser, &mut StrInput::new(input))
}

/// Run a parser over a sequence of chunks, each of which is presented as a partial input. Any
/// input that the parser leaves unconsumed at the end of a chunk is presented again, followed
/// by the next chunk. Positions are reported relative to the start of the first chunk.
pub fn parse_chunks<P, It, S>(parser: P, chunks: It) -> Result<P::Output, ParseError>
where
    P: Parser,
    It: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pending = String::new();
    let mut base = 0;
    let mut parser = parser;
    let mut chunks = chunks.into_iter();
    while let Some(chunk) = chunks.next() {
        pending.push_str(chunk.as_ref());
        let mut input = StrInput::new(&pending).is_part(true).with_offset(base);
        match parser.feed(&mut input) {
            Parsing::Cont(p) => {
                let consumed = input.consumed();
                trace!(consumed, offset = base, "Parser suspended at the end of a chunk.");
                parser = p;
                base += consumed;
                pending.drain(..consumed);
            }
            Parsing::Done(value) => {
                let offset = input.position();
                let mut rest = input.remaining().chars();
                let found = match rest.next() {
                    Some(c) => Some(c),
                    None => chunks.find_map(|chunk| chunk.as_ref().chars().next()),
                };
                return match found {
                    Some(c) => Err(ParseError::Malformed {
                        expected: END_OF_INPUT.into(),
                        found: Some(c),
                        offset,
                    }),
                    None => Ok(value),
                };
            }
            Parsing::Error(err) => return Err(err),
        }
    }
    finish(parser, &mut StrInput::new(&pending).with_offset(base))
}
