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

//! # SwimOS Data Model
//!
//! A generic, self-describing representation of Recon documents. A [`Value`] is either a
//! primitive or a record: an ordered sequence of [`Item`]s, each of which is an attribute, a
//! slot (key and value pair) or a plain value.

mod attr;
pub mod identifier;
mod item;
#[macro_use]
mod macros;
#[cfg(test)]
mod tests;
mod value;

pub use attr::Attr;
pub use item::Item;
pub use value::Value;
