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

use std::mem;
use std::num::NonZeroUsize;

use bytes::{Buf, BytesMut};
use swimos_codec::{Input, ParseError, Parser, Parsing, StrInput};
use thiserror::Error;
use tokio_util::codec::Decoder;
use tracing::{debug, trace};

use crate::{Uri, UriAbsoluteParser};

const DEFAULT_MAX_LINE_LENGTH: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(8192) };

const END_OF_LINE: &str = "the end of the line";

/// Configuration for a [`UriLineDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// The maximum length of a line in bytes (excluding the line terminator).
    pub max_line_length: NonZeroUsize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

/// Errors that can be produced by a [`UriLineDecoder`].
#[derive(Debug, Error)]
pub enum UriDecoderError {
    #[error("Invalid URI: {0}")]
    Parse(#[from] ParseError),
    #[error("A line contained invalid UTF-8.")]
    BadUtf8,
    #[error("A line exceeded the maximum length of {0} bytes.")]
    LineTooLong(usize),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

enum LineState {
    Reading {
        parser: UriAbsoluteParser,
        line_len: usize,
    },
    Discarding {
        error: Option<UriDecoderError>,
    },
}

impl Default for LineState {
    fn default() -> Self {
        LineState::Reading {
            parser: UriAbsoluteParser::default(),
            line_len: 0,
        }
    }
}

/// Decodes newline delimited URIs. Blank lines are skipped and a trailing carriage return is
/// ignored. The bytes of a line are fed to the URI parser as they arrive, so the parser is
/// resumed across frames rather than waiting for the whole line. After an error, the remainder
/// of the offending line is discarded before the error is reported.
#[derive(Default)]
pub struct UriLineDecoder {
    config: DecoderConfig,
    state: LineState,
}

impl UriLineDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        UriLineDecoder {
            config,
            state: LineState::default(),
        }
    }
}

/// The longest prefix of the buffer that is valid UTF-8. A multi-byte character that is split
/// at the end of the buffer is left for the next frame.
fn utf8_prefix(bytes: &[u8]) -> Result<&str, UriDecoderError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) if err.error_len().is_none() => {
            std::str::from_utf8(&bytes[..err.valid_up_to()]).map_err(|_| UriDecoderError::BadUtf8)
        }
        Err(_) => Err(UriDecoderError::BadUtf8),
    }
}

fn finish_line(parser: UriAbsoluteParser, line: &[u8], offset: usize) -> Result<Uri, UriDecoderError> {
    let text = std::str::from_utf8(line).map_err(|_| UriDecoderError::BadUtf8)?;
    let mut input = StrInput::new(text).with_offset(offset);
    match parser.feed(&mut input) {
        Parsing::Done(_) if input.is_cont() => {
            Err(ParseError::expected(END_OF_LINE, &input).into())
        }
        Parsing::Done(uri) => Ok(uri),
        Parsing::Cont(_) => Err(ParseError::expected("a complete URI", &input).into()),
        Parsing::Error(err) => Err(err.into()),
    }
}

fn strip_line_end(line: &mut BytesMut) {
    if line.last() == Some(&b'\n') {
        line.truncate(line.len() - 1);
    }
    if line.last() == Some(&b'\r') {
        line.truncate(line.len() - 1);
    }
}

impl Decoder for UriLineDecoder {
    type Item = Uri;
    type Error = UriDecoderError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let UriLineDecoder { config, state } = self;
        let max = config.max_line_length.get();
        loop {
            match state {
                LineState::Reading { parser, line_len } => {
                    if let Some(end) = src.iter().position(|b| *b == b'\n') {
                        let mut line = src.split_to(end + 1);
                        strip_line_end(&mut line);
                        let offset = *line_len;
                        if offset == 0 && line.is_empty() {
                            trace!("Skipping a blank line.");
                            continue;
                        }
                        let parser = mem::take(parser);
                        *state = LineState::default();
                        let length = offset + line.len();
                        if length > max {
                            debug!(length, max, "Line too long.");
                            break Err(UriDecoderError::LineTooLong(max));
                        }
                        trace!(length, "Decoding the end of a line.");
                        break finish_line(parser, &line, offset).map(Some);
                    }
                    if *line_len + src.len() > max {
                        debug!(max, "Line too long. Discarding the remainder.");
                        *state = LineState::Discarding {
                            error: Some(UriDecoderError::LineTooLong(max)),
                        };
                        continue;
                    }
                    let offset = *line_len;
                    let current = mem::take(parser);
                    let (consumed, result) = {
                        let text = match utf8_prefix(src) {
                            Ok(text) => text,
                            Err(err) => {
                                *state = LineState::Discarding { error: Some(err) };
                                continue;
                            }
                        };
                        // A carriage return may be the start of the line terminator.
                        let text = text.strip_suffix('\r').unwrap_or(text);
                        let mut input = StrInput::new(text).is_part(true).with_offset(offset);
                        let result = match current.feed(&mut input) {
                            Parsing::Cont(next) => Ok(next),
                            Parsing::Done(_) => Err(ParseError::expected(END_OF_LINE, &input)),
                            Parsing::Error(err) => Err(err),
                        };
                        (input.consumed(), result)
                    };
                    match result {
                        Ok(next) => {
                            trace!(consumed, offset, "URI parser suspended at the end of a frame.");
                            src.advance(consumed);
                            *state = LineState::Reading {
                                parser: next,
                                line_len: offset + consumed,
                            };
                            break Ok(None);
                        }
                        Err(err) => {
                            debug!(error = %err, "Invalid URI. Discarding the remainder of the line.");
                            *state = LineState::Discarding {
                                error: Some(err.into()),
                            };
                        }
                    }
                }
                LineState::Discarding { error } => {
                    if let Some(end) = src.iter().position(|b| *b == b'\n') {
                        src.advance(end + 1);
                        let error = error.take();
                        *state = LineState::default();
                        if let Some(err) = error {
                            break Err(err);
                        }
                    } else {
                        src.clear();
                        break Ok(None);
                    }
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(uri) = self.decode(src)? {
            return Ok(Some(uri));
        }
        match mem::take(&mut self.state) {
            LineState::Reading { parser, line_len } => {
                let mut line = src.split();
                strip_line_end(&mut line);
                if line_len == 0 && line.is_empty() {
                    Ok(None)
                } else {
                    trace!(length = line_len + line.len(), "Decoding the final line.");
                    finish_line(parser, &line, line_len).map(Some)
                }
            }
            LineState::Discarding { error } => {
                src.clear();
                match error {
                    Some(err) => Err(err),
                    None => Ok(None),
                }
            }
        }
    }
}
