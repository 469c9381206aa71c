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

use crate::CursorError;

/// A cursor over a stream of characters. At any time the cursor is in exactly one of four states:
///
/// - Continue: a character is available at the head of the cursor.
/// - Empty: no character is available now but more may be supplied later.
/// - Done: the input has ended.
/// - Error: the underlying source failed (see [`Input::trap`]).
///
/// Cloning an input must be cheap (constant time) as parsers clone the cursor to look ahead
/// without consuming from the original.
pub trait Input: Clone {
    fn is_cont(&self) -> bool;

    fn is_empty(&self) -> bool;

    fn is_done(&self) -> bool;

    fn is_error(&self) -> bool;

    /// The character at the head of the input, if the input is in the continue state.
    fn head(&self) -> Option<char>;

    /// Advance past the head character. This has no effect unless the input is in the continue
    /// state.
    fn step(&mut self);

    /// The offset of the head of the input from the start of the stream.
    fn position(&self) -> usize;

    /// Retrieve the cause of the failure when the input is in the error state.
    fn trap(&mut self) -> Option<CursorError>;
}

/// An [`Input`] over a single chunk of text. If the chunk is marked as partial, reaching its
/// end leaves the input in the empty state (more text may follow in a subsequent chunk).
/// Otherwise the input is done at the end of the chunk.
#[derive(Debug, Clone, Copy)]
pub struct StrInput<'a> {
    source: &'a str,
    index: usize,
    offset: usize,
    is_part: bool,
}

impl<'a> StrInput<'a> {
    pub fn new(source: &'a str) -> Self {
        StrInput {
            source,
            index: 0,
            offset: 0,
            is_part: false,
        }
    }

    /// Mark whether more input may follow this chunk.
    pub fn is_part(mut self, is_part: bool) -> Self {
        self.is_part = is_part;
        self
    }

    /// Set the stream offset of the start of this chunk (used when reporting positions).
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// The number of bytes of the chunk that have been consumed.
    pub fn consumed(&self) -> usize {
        self.index
    }

    /// The unconsumed remainder of the chunk.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.index..]
    }
}

impl<'a> Input for StrInput<'a> {
    fn is_cont(&self) -> bool {
        self.index < self.source.len()
    }

    fn is_empty(&self) -> bool {
        !self.is_cont() && self.is_part
    }

    fn is_done(&self) -> bool {
        !self.is_cont() && !self.is_part
    }

    fn is_error(&self) -> bool {
        false
    }

    fn head(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn step(&mut self) {
        if let Some(c) = self.head() {
            self.index += c.len_utf8();
        }
    }

    fn position(&self) -> usize {
        self.offset + self.index
    }

    fn trap(&mut self) -> Option<CursorError> {
        None
    }
}
