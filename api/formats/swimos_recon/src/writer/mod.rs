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

//! Incremental Recon writers.
//!
//! The layout of a sequence of record items is decided by [`BlockWriter`], which is independent
//! of the representation of the items. Everything that depends on the representation is provided
//! by an implementation of [`ReconWriter`]. [`ModelWriter`] is the implementation for the
//! [`swimos_model`] types.

mod block;
mod literal;
mod model;

use swimos_codec::Writer;

pub use block::BlockWriter;
pub use model::{ModelItemWriter, ModelWriter};

/// Strategy describing how the items of a record are classified and serialized.
///
/// The predicates all refer to a single item of a record. A *value* item is neither an
/// attribute nor a slot. The *text*, *record*, *number* and *boolean* predicates only hold for
/// value items of the corresponding kind.
///
/// Each `write_*` method has a `size_of_*` counterpart that must return exactly the number of
/// characters that the writer will produce.
pub trait ReconWriter {
    type Item;
    type Value;

    /// Writer for a single item (or a slot or a run of markup text).
    type ItemWriter<'a>: Writer
    where
        Self: 'a;

    fn is_attr(&self, item: &Self::Item) -> bool;

    /// Attributes and slots.
    fn is_field(&self, item: &Self::Item) -> bool;

    fn is_text(&self, item: &Self::Item) -> bool;

    /// Text that can be written without quotes.
    fn is_ident(&self, item: &Self::Item) -> bool;

    fn is_record(&self, item: &Self::Item) -> bool;

    fn is_num(&self, item: &Self::Item) -> bool;

    fn is_bool(&self, item: &Self::Item) -> bool;

    fn is_value(&self, item: &Self::Item) -> bool;

    /// Values that are resolved elsewhere (such as selectors). These disable the promotion of
    /// text to markup.
    fn is_expression(&self, item: &Self::Item) -> bool;

    /// Whether the items of a record can be written inline within markup.
    fn is_markup_safe(&self, items: &[Self::Item]) -> bool;

    /// The items of a record item (empty for any other item).
    fn items<'a>(&self, item: &'a Self::Item) -> &'a [Self::Item];

    /// The key of a slot.
    fn key<'a>(&self, item: &'a Self::Item) -> Option<&'a Self::Value>;

    /// The value of a slot.
    fn value<'a>(&self, item: &'a Self::Item) -> Option<&'a Self::Value>;

    fn write_item<'a>(&'a self, item: &'a Self::Item) -> Self::ItemWriter<'a>;

    fn write_slot<'a>(&'a self, key: &'a Self::Value, value: &'a Self::Value)
        -> Self::ItemWriter<'a>;

    /// Write a text item as the body of markup.
    fn write_markup_text<'a>(&'a self, item: &'a Self::Item) -> Self::ItemWriter<'a>;

    fn size_of_item(&self, item: &Self::Item) -> usize;

    fn size_of_slot(&self, key: &Self::Value, value: &Self::Value) -> usize;

    fn size_of_markup_text(&self, item: &Self::Item) -> usize;
}
