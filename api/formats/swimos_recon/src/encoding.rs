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

use std::num::NonZeroUsize;

use bytes::BytesMut;
use swimos_codec::{BytesOutput, WriteError, Writer, Writing};
use swimos_model::Value;
use thiserror::Error;
use tokio_util::codec::Encoder;
use tracing::{debug, trace};

use crate::{recon_size, writer::ModelWriter};

#[cfg(test)]
mod tests;

const DEFAULT_CHUNK_SIZE: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(4096) };

/// Write the Recon representation of a value into a buffer. Returns the number of characters
/// that were written.
///
/// One byte is reserved for each character before writing. This is exact for ASCII output and a
/// lower bound otherwise (the buffer grows as required).
pub fn write_recon(dst: &mut BytesMut, value: &Value) -> Result<usize, WriteError> {
    dst.reserve(recon_size(value));
    let mut output = BytesOutput::new(dst);
    let mut writer = (&ModelWriter).write_value(value);
    loop {
        match writer.pull(&mut output) {
            Writing::Done => break Ok(output.written()),
            Writing::Cont(w) => writer = w,
            Writing::Error(err) => break Err(err),
        }
    }
}

/// Configuration for a [`ReconEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Compute the size of each value in characters and reserve that many bytes before it is
    /// written. The reservation is a lower bound if the value contains non-ASCII text.
    pub presize: bool,
    /// The number of characters the writer may produce before more space is reserved in the
    /// buffer.
    pub chunk_size: NonZeroUsize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            presize: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Error)]
pub enum EncoderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Failed to write a Recon value: {0}")]
    Write(#[from] WriteError),
}

/// Encodes values as compact Recon strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconEncoder {
    config: EncoderConfig,
}

impl ReconEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        ReconEncoder { config }
    }
}

impl<'a> Encoder<&'a Value> for ReconEncoder {
    type Error = EncoderError;

    fn encode(&mut self, item: &'a Value, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let EncoderConfig {
            presize,
            chunk_size,
        } = self.config;
        let expected = if presize {
            let size = recon_size(item);
            debug!(size, "Reserving space for a Recon value.");
            dst.reserve(size);
            Some(size)
        } else {
            None
        };
        let chunk = chunk_size.get();
        let mut output = BytesOutput::with_capacity(dst, chunk).is_part(true);
        let mut writer = (&ModelWriter).write_value(item);
        loop {
            match writer.pull(&mut output) {
                Writing::Done => break,
                Writing::Cont(w) => {
                    trace!(written = output.written(), "Extending the encoder output.");
                    if !presize {
                        output.reserve(chunk);
                    }
                    output.extend_capacity(chunk);
                    writer = w;
                }
                Writing::Error(err) => return Err(err.into()),
            }
        }
        debug_assert!(expected.map(|size| size == output.written()).unwrap_or(true));
        Ok(())
    }
}
