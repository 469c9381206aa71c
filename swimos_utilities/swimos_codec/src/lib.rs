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

//! # SwimOS incremental codecs
//!
//! Parsers and writers in SwimOS are resumable state machines. They consume (or produce) one
//! character at a time from a cursor and, when the cursor cannot make progress, return a
//! continuation that captures exactly the work that remains. The caller resumes the continuation
//! when more input (or more output capacity) becomes available.
//!
//! This crate contains:
//!
//! - The [`Input`] and [`Output`] cursor abstractions and concrete cursors over strings, byte
//! buffers and [`std::fmt::Formatter`]s.
//! - The [`Parser`] and [`Writer`] continuation contracts.
//! - The errors produced by parsers and writers.
//! - Drivers that run continuations over complete or chunked data.

mod error;
mod input;
mod output;
mod parser;
mod writer;

pub use error::{CursorError, Expected, ParseError, WriteError};
pub use input::{Input, StrInput};
pub use output::{BytesOutput, FmtOutput, Output, StringOutput};
pub use parser::{parse_chunks, parse_str, Parser, Parsing};
pub use writer::{write_to_string, write_with_capacity, TextWriter, Writer, Writing};
