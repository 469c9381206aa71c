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
use std::num::NonZeroUsize;

use tracing::debug;

use crate::{Output, StringOutput, WriteError};

/// The result of pulling from a [`Writer`].
#[derive(Debug)]
pub enum Writing<W> {
    /// The output could not accept more characters. The writer must be resumed with more
    /// capacity.
    Cont(W),
    /// The writer has emitted everything.
    Done,
    /// The write failed and cannot be resumed.
    Error(WriteError),
}

impl<W> Writing<W> {
    pub fn is_cont(&self) -> bool {
        matches!(self, Writing::Cont(_))
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Writing::Done)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Writing::Error(_))
    }

    pub fn map<F, W2>(self, f: F) -> Writing<W2>
    where
        F: FnOnce(W) -> W2,
    {
        match self {
            Writing::Cont(w) => Writing::Cont(f(w)),
            Writing::Done => Writing::Done,
            Writing::Error(err) => Writing::Error(err),
        }
    }

    /// Determine the result for a writer that cannot make progress because the output is not in
    /// the continue state. A done output truncates the write and a failed output traps it.
    /// Otherwise the writer is returned so that it can be resumed.
    pub fn stalled<O: Output>(writer: W, output: &mut O) -> Self {
        if output.is_done() {
            debug!("Output ended before the writer completed.");
            Writing::Error(WriteError::Truncated)
        } else if output.is_error() {
            let cause = output.trap().unwrap_or_default();
            debug!(error = %cause, "Output cursor failed.");
            Writing::Error(WriteError::Trapped(cause))
        } else {
            Writing::Cont(writer)
        }
    }
}

/// A resumable serializer. Each call to `pull` writes as many characters as the output will
/// accept and either completes or returns a continuation holding exactly the remaining work.
pub trait Writer: Sized {
    fn pull<O: Output>(self, output: &mut O) -> Writing<Self>;
}

/// Writes a fixed piece of text verbatim.
#[derive(Debug, Clone)]
pub struct TextWriter<'a> {
    text: Cow<'a, str>,
    offset: usize,
}

impl<'a> TextWriter<'a> {
    pub fn new<T: Into<Cow<'a, str>>>(text: T) -> Self {
        TextWriter {
            text: text.into(),
            offset: 0,
        }
    }

    /// The number of characters that remain to be written.
    pub fn remaining(&self) -> usize {
        self.text[self.offset..].chars().count()
    }
}

impl<'a> Writer for TextWriter<'a> {
    fn pull<O: Output>(mut self, output: &mut O) -> Writing<Self> {
        while let Some(c) = self.text[self.offset..].chars().next() {
            if output.is_cont() {
                output.write(c);
                self.offset += c.len_utf8();
            } else {
                return Writing::stalled(self, output);
            }
        }
        Writing::Done
    }
}

/// Run a writer to completion with an unbounded output.
pub fn write_to_string<W: Writer>(writer: W) -> Result<String, WriteError> {
    let mut output = StringOutput::new();
    let mut writer = writer;
    loop {
        match writer.pull(&mut output) {
            Writing::Cont(w) => writer = w,
            Writing::Done => break Ok(output.into_string()),
            Writing::Error(err) => break Err(err),
        }
    }
}

/// Run a writer to completion, making the output capacity available `chunk` characters at a
/// time.
pub fn write_with_capacity<W: Writer>(writer: W, chunk: NonZeroUsize) -> Result<String, WriteError> {
    let mut output = StringOutput::with_capacity(chunk.get()).is_part(true);
    let mut writer = writer;
    loop {
        match writer.pull(&mut output) {
            Writing::Cont(w) => {
                output.extend_capacity(chunk.get());
                writer = w;
            }
            Writing::Done => break Ok(output.into_string()),
            Writing::Error(err) => break Err(err),
        }
    }
}
