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

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use thiserror::Error;

use crate::Input;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// The cause of a failure reported by an [`Input`] or [`crate::Output`] cursor. The underlying
/// error is kept unchanged and can be recovered with [`CursorError::into_inner`].
pub struct CursorError(BoxError);

impl CursorError {
    pub fn new<E: Into<BoxError>>(err: E) -> Self {
        CursorError(err.into())
    }

    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

impl Default for CursorError {
    fn default() -> Self {
        CursorError::new("The cursor failed without reporting a cause.")
    }
}

impl Debug for CursorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CursorError").field(&self.0).finish()
    }
}

impl Display for CursorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Error for CursorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

/// Errors that can terminate a [`crate::Writer`].
#[derive(Debug, Error)]
pub enum WriteError {
    /// The output was exhausted while the writer still had pending structure to emit.
    #[error("The output ended before the writer completed.")]
    Truncated,
    /// The output cursor failed.
    #[error(transparent)]
    Trapped(CursorError),
}

/// Description of what a parser was expecting when it encountered malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A specific character.
    Char(char),
    /// A named grammatical construct.
    Description(&'static str),
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Char(c) => write!(f, "'{}'", c.escape_default()),
            Expected::Description(desc) => f.write_str(desc),
        }
    }
}

impl From<char> for Expected {
    fn from(c: char) -> Self {
        Expected::Char(c)
    }
}

impl From<&'static str> for Expected {
    fn from(desc: &'static str) -> Self {
        Expected::Description(desc)
    }
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("'{}'", c.escape_default()),
        None => "the end of the input".to_string(),
    }
}

/// Errors that can terminate a [`crate::Parser`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input did not match the grammar.
    #[error("Expected {expected} at offset {offset} but found {}.", describe_found(.found))]
    Malformed {
        expected: Expected,
        /// The offending character or `None` if the input ended.
        found: Option<char>,
        offset: usize,
    },
    /// The input cursor failed.
    #[error(transparent)]
    Trapped(CursorError),
}

impl ParseError {
    /// Create an error describing the current head of an input.
    pub fn expected<E, I>(expected: E, input: &I) -> Self
    where
        E: Into<Expected>,
        I: Input,
    {
        ParseError::Malformed {
            expected: expected.into(),
            found: input.head(),
            offset: input.position(),
        }
    }

    /// The offset in the input at which the error occurred, if it is known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Malformed { offset, .. } => Some(*offset),
            ParseError::Trapped(_) => None,
        }
    }
}
