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

//! # SwimOS Recon
//!
//! Incremental serialization of the SwimOS data model as Recon. Writers are resumable: they
//! emit as much text as an output cursor will accept and return a continuation holding the
//! remaining work. Each writer has a twin that computes the exact number of characters it will
//! produce, so buffers can be sized before writing.
//!
//! A nom based reader is also provided so that written documents can be read back.

mod encoding;
mod parser;
mod printer;
pub mod writer;

pub use encoding::{write_recon, EncoderConfig, EncoderError, ReconEncoder};
pub use parser::{parse_recon, ReconParseError};
pub use printer::{print_recon, recon_size};
