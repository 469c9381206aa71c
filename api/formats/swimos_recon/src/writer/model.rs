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
use std::collections::VecDeque;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use swimos_codec::{Output, TextWriter, Writer, Writing};
use swimos_model::identifier::is_identifier;
use swimos_model::{Attr, Item, Value};

use super::literal::{
    markup_chars, markup_text_len, quoted_chars, string_literal_len, CharsWriter, MarkupChars,
    QuotedChars,
};
use super::{BlockWriter, ReconWriter};

/// [`ReconWriter`] implementation for the types in [`swimos_model`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModelWriter;

/// Writes a single item, slot or value in the Recon format.
pub struct ModelItemWriter<'a> {
    segments: VecDeque<Segment<'a>>,
}

enum Segment<'a> {
    Raw(TextWriter<'a>),
    Quoted(CharsWriter<QuotedChars<'a>>),
    Markup(CharsWriter<MarkupChars<'a>>),
    Block(Box<BlockWriter<'a, ModelWriter>>),
}

impl<'a> Writer for Segment<'a> {
    fn pull<O: Output>(self, output: &mut O) -> Writing<Self> {
        match self {
            Segment::Raw(w) => w.pull(output).map(Segment::Raw),
            Segment::Quoted(w) => w.pull(output).map(Segment::Quoted),
            Segment::Markup(w) => w.pull(output).map(Segment::Markup),
            Segment::Block(w) => (*w).pull(output).map(|w| Segment::Block(Box::new(w))),
        }
    }
}

impl<'a> Writer for ModelItemWriter<'a> {
    fn pull<O: Output>(mut self, output: &mut O) -> Writing<Self> {
        while let Some(segment) = self.segments.pop_front() {
            match segment.pull(output) {
                Writing::Done => {}
                Writing::Cont(segment) => {
                    self.segments.push_front(segment);
                    return Writing::Cont(self);
                }
                Writing::Error(err) => return Writing::Error(err),
            }
        }
        Writing::Done
    }
}

impl<'a> ModelItemWriter<'a> {
    fn new() -> Self {
        ModelItemWriter {
            segments: VecDeque::new(),
        }
    }

    fn raw<T: Into<Cow<'a, str>>>(mut self, text: T) -> Self {
        self.segments.push_back(Segment::Raw(TextWriter::new(text)));
        self
    }

    fn string_literal(mut self, text: &'a str) -> Self {
        let segment = if is_identifier(text) {
            Segment::Raw(TextWriter::new(text))
        } else {
            Segment::Quoted(CharsWriter::new(quoted_chars(text)))
        };
        self.segments.push_back(segment);
        self
    }

    fn markup_text(mut self, text: &'a str) -> Self {
        self.segments
            .push_back(Segment::Markup(CharsWriter::new(markup_chars(text))));
        self
    }

    fn block(mut self, items: &'a [Item], in_block: bool) -> Self {
        let writer = BlockWriter::new(&ModelWriter, items, in_block, false);
        self.segments.push_back(Segment::Block(Box::new(writer)));
        self
    }

    fn value(self, value: &'a Value) -> Self {
        match value {
            Value::Extant => self,
            Value::BooleanValue(true) => self.raw("true"),
            Value::BooleanValue(false) => self.raw("false"),
            Value::Int64Value(n) => self.raw(n.to_string()),
            Value::Float64Value(x) => self.raw(format_float(*x)),
            Value::Text(text) => self.string_literal(text),
            Value::Data(data) => self.raw(format_data(data)),
            Value::Selector(name) => self.raw("$").string_literal(name),
            Value::Record(items) if items.is_empty() => self.raw("{}"),
            Value::Record(items) => self.block(items, false),
        }
    }

    fn attr(self, attr: &'a Attr) -> Self {
        let Attr { name, value } = attr;
        let this = self.raw("@").string_literal(name);
        match value {
            Value::Extant => this,
            Value::Record(items) if is_block_body(items) => {
                this.raw("(").block(items, true).raw(")")
            }
            _ => this.raw("(").value(value).raw(")"),
        }
    }
}

fn format_float(x: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    buffer.format(x).to_string()
}

fn format_data(data: &[u8]) -> String {
    format!("%{}", STANDARD.encode(data))
}

/// The body of an attribute is written without braces if it is a record with no attributes
/// consisting of a single slot or more than one item.
fn is_block_body(items: &[Item]) -> bool {
    !items.iter().any(Item::is_attr)
        && match items {
            [Item::Slot(_, _)] => true,
            _ => items.len() > 1,
        }
}

impl ModelWriter {
    /// Create a writer for a complete value.
    pub fn write_value<'a>(&'a self, value: &'a Value) -> ModelItemWriter<'a> {
        ModelItemWriter::new().value(value)
    }

    /// The number of characters produced by [`ModelWriter::write_value`].
    pub fn size_of_value(&self, value: &Value) -> usize {
        match value {
            Value::Extant => 0,
            Value::BooleanValue(true) => 4,
            Value::BooleanValue(false) => 5,
            Value::Int64Value(n) => n.to_string().len(),
            Value::Float64Value(x) => format_float(*x).len(),
            Value::Text(text) => string_literal_len(text),
            Value::Data(data) => format_data(data).len(),
            Value::Selector(name) => 1 + string_literal_len(name),
            Value::Record(items) if items.is_empty() => 2,
            Value::Record(items) => BlockWriter::size_of(self, items, false, false),
        }
    }

    fn size_of_attr(&self, attr: &Attr) -> usize {
        let Attr { name, value } = attr;
        let header = 1 + string_literal_len(name);
        match value {
            Value::Extant => header,
            Value::Record(items) if is_block_body(items) => {
                header + 2 + BlockWriter::size_of(self, items, true, false)
            }
            _ => header + 2 + self.size_of_value(value),
        }
    }
}

impl ReconWriter for ModelWriter {
    type Item = Item;
    type Value = Value;
    type ItemWriter<'a> = ModelItemWriter<'a>;

    fn is_attr(&self, item: &Item) -> bool {
        item.is_attr()
    }

    fn is_field(&self, item: &Item) -> bool {
        item.is_field()
    }

    fn is_text(&self, item: &Item) -> bool {
        matches!(item, Item::ValueItem(Value::Text(_)))
    }

    fn is_ident(&self, item: &Item) -> bool {
        matches!(item, Item::ValueItem(Value::Text(text)) if is_identifier(text))
    }

    fn is_record(&self, item: &Item) -> bool {
        matches!(item, Item::ValueItem(Value::Record(_)))
    }

    fn is_num(&self, item: &Item) -> bool {
        matches!(
            item,
            Item::ValueItem(Value::Int64Value(_) | Value::Float64Value(_))
        )
    }

    fn is_bool(&self, item: &Item) -> bool {
        matches!(item, Item::ValueItem(Value::BooleanValue(_)))
    }

    fn is_value(&self, item: &Item) -> bool {
        matches!(item, Item::ValueItem(_))
    }

    fn is_expression(&self, item: &Item) -> bool {
        matches!(item, Item::ValueItem(Value::Selector(_)))
    }

    fn is_markup_safe(&self, items: &[Item]) -> bool {
        match items.split_first() {
            Some((Item::Attr(_), rest)) => rest
                .iter()
                .all(|item| !item.is_attr() && !self.is_expression(item)),
            _ => false,
        }
    }

    fn items<'a>(&self, item: &'a Item) -> &'a [Item] {
        match item {
            Item::ValueItem(Value::Record(items)) => items.as_slice(),
            _ => &[],
        }
    }

    fn key<'a>(&self, item: &'a Item) -> Option<&'a Value> {
        item.key()
    }

    fn value<'a>(&self, item: &'a Item) -> Option<&'a Value> {
        match item {
            Item::Slot(_, value) => Some(value),
            _ => None,
        }
    }

    fn write_item<'a>(&'a self, item: &'a Item) -> ModelItemWriter<'a> {
        match item {
            Item::Attr(attr) => ModelItemWriter::new().attr(attr),
            Item::Slot(key, value) => self.write_slot(key, value),
            Item::ValueItem(value) => self.write_value(value),
        }
    }

    fn write_slot<'a>(&'a self, key: &'a Value, value: &'a Value) -> ModelItemWriter<'a> {
        ModelItemWriter::new().value(key).raw(":").value(value)
    }

    fn write_markup_text<'a>(&'a self, item: &'a Item) -> ModelItemWriter<'a> {
        match item {
            Item::ValueItem(Value::Text(text)) => ModelItemWriter::new().markup_text(text),
            _ => self.write_item(item),
        }
    }

    fn size_of_item(&self, item: &Item) -> usize {
        match item {
            Item::Attr(attr) => self.size_of_attr(attr),
            Item::Slot(key, value) => self.size_of_slot(key, value),
            Item::ValueItem(value) => self.size_of_value(value),
        }
    }

    fn size_of_slot(&self, key: &Value, value: &Value) -> usize {
        self.size_of_value(key) + 1 + self.size_of_value(value)
    }

    fn size_of_markup_text(&self, item: &Item) -> usize {
        match item {
            Item::ValueItem(Value::Text(text)) => markup_text_len(text),
            _ => self.size_of_item(item),
        }
    }
}
