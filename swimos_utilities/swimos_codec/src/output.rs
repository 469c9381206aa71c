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

use std::fmt::{Formatter, Write};

use bytes::{BufMut, BytesMut};

use crate::CursorError;

/// A sink for characters. At any time the cursor is in exactly one of four states:
///
/// - Continue: at least one more character can be written.
/// - Full: the current capacity is exhausted but more may be made available later.
/// - Done: no more characters will ever be accepted.
/// - Error: the underlying sink failed (see [`Output::trap`]).
pub trait Output {
    fn is_cont(&self) -> bool;

    fn is_full(&self) -> bool;

    fn is_done(&self) -> bool;

    fn is_error(&self) -> bool;

    /// Write a single character. This has no effect unless the output is in the continue state.
    fn write(&mut self, c: char);

    /// Retrieve the cause of the failure when the output is in the error state.
    fn trap(&mut self) -> Option<CursorError>;
}

#[derive(Debug, Clone, Copy)]
struct Capacity {
    limit: Option<usize>,
    written: usize,
    is_part: bool,
}

impl Capacity {
    fn unbounded() -> Self {
        Capacity {
            limit: None,
            written: 0,
            is_part: false,
        }
    }

    fn bounded(limit: usize) -> Self {
        Capacity {
            limit: Some(limit),
            written: 0,
            is_part: false,
        }
    }

    fn has_room(&self) -> bool {
        self.limit.map(|l| self.written < l).unwrap_or(true)
    }

    fn extend(&mut self, n: usize) {
        if let Some(limit) = self.limit.as_mut() {
            *limit = limit.saturating_add(n);
        }
    }
}

/// An [`Output`] that accumulates characters in a [`String`]. The output may have an optional
/// capacity (counted in characters). When that capacity is exhausted, the output is full if it
/// has been marked as partial and done otherwise.
#[derive(Debug)]
pub struct StringOutput {
    buffer: String,
    capacity: Capacity,
}

impl Default for StringOutput {
    fn default() -> Self {
        StringOutput::new()
    }
}

impl StringOutput {
    /// An output that will accept any number of characters.
    pub fn new() -> Self {
        StringOutput {
            buffer: String::new(),
            capacity: Capacity::unbounded(),
        }
    }

    /// An output that will accept at most `n` characters until more capacity is added.
    pub fn with_capacity(n: usize) -> Self {
        StringOutput {
            buffer: String::with_capacity(n),
            capacity: Capacity::bounded(n),
        }
    }

    pub fn is_part(mut self, is_part: bool) -> Self {
        self.capacity.is_part = is_part;
        self
    }

    /// Allow a further `n` characters to be written.
    pub fn extend_capacity(&mut self, n: usize) {
        self.capacity.extend(n);
    }

    /// The number of characters written so far.
    pub fn written(&self) -> usize {
        self.capacity.written
    }

    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl Output for StringOutput {
    fn is_cont(&self) -> bool {
        self.capacity.has_room()
    }

    fn is_full(&self) -> bool {
        !self.capacity.has_room() && self.capacity.is_part
    }

    fn is_done(&self) -> bool {
        !self.capacity.has_room() && !self.capacity.is_part
    }

    fn is_error(&self) -> bool {
        false
    }

    fn write(&mut self, c: char) {
        if self.is_cont() {
            self.buffer.push(c);
            self.capacity.written += 1;
        }
    }

    fn trap(&mut self) -> Option<CursorError> {
        None
    }
}

/// An [`Output`] that appends the UTF-8 encoding of each character to a [`BytesMut`]. The
/// capacity semantics are the same as for [`StringOutput`].
#[derive(Debug)]
pub struct BytesOutput<'a> {
    buffer: &'a mut BytesMut,
    capacity: Capacity,
}

impl<'a> BytesOutput<'a> {
    pub fn new(buffer: &'a mut BytesMut) -> Self {
        BytesOutput {
            buffer,
            capacity: Capacity::unbounded(),
        }
    }

    pub fn with_capacity(buffer: &'a mut BytesMut, n: usize) -> Self {
        BytesOutput {
            buffer,
            capacity: Capacity::bounded(n),
        }
    }

    pub fn is_part(mut self, is_part: bool) -> Self {
        self.capacity.is_part = is_part;
        self
    }

    pub fn extend_capacity(&mut self, n: usize) {
        self.capacity.extend(n);
    }

    /// Reserve space for at least `additional` more bytes in the underlying buffer.
    pub fn reserve(&mut self, additional: usize) {
        self.buffer.reserve(additional);
    }

    /// The number of characters written so far.
    pub fn written(&self) -> usize {
        self.capacity.written
    }
}

impl<'a> Output for BytesOutput<'a> {
    fn is_cont(&self) -> bool {
        self.capacity.has_room()
    }

    fn is_full(&self) -> bool {
        !self.capacity.has_room() && self.capacity.is_part
    }

    fn is_done(&self) -> bool {
        !self.capacity.has_room() && !self.capacity.is_part
    }

    fn is_error(&self) -> bool {
        false
    }

    fn write(&mut self, c: char) {
        if self.is_cont() {
            let mut buf = [0u8; 4];
            self.buffer.put_slice(c.encode_utf8(&mut buf).as_bytes());
            self.capacity.written += 1;
        }
    }

    fn trap(&mut self) -> Option<CursorError> {
        None
    }
}

/// An [`Output`] that writes through to a [`Formatter`]. If the formatter fails, the output
/// enters the error state and remains there.
pub struct FmtOutput<'a, 'b> {
    f: &'a mut Formatter<'b>,
    failed: bool,
}

impl<'a, 'b> FmtOutput<'a, 'b> {
    pub fn new(f: &'a mut Formatter<'b>) -> Self {
        FmtOutput { f, failed: false }
    }
}

impl<'a, 'b> Output for FmtOutput<'a, 'b> {
    fn is_cont(&self) -> bool {
        !self.failed
    }

    fn is_full(&self) -> bool {
        false
    }

    fn is_done(&self) -> bool {
        false
    }

    fn is_error(&self) -> bool {
        self.failed
    }

    fn write(&mut self, c: char) {
        if !self.failed && self.f.write_char(c).is_err() {
            self.failed = true;
        }
    }

    fn trap(&mut self) -> Option<CursorError> {
        if self.failed {
            Some(CursorError::new(std::fmt::Error))
        } else {
            None
        }
    }
}
