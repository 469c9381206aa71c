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

use crate::{Attr, Item};

/// The generic representation of a Recon document.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// A value that exists but carries no information.
    #[default]
    Extant,

    BooleanValue(bool),

    Int64Value(i64),

    Float64Value(f64),

    /// A textual value.
    Text(String),

    /// A binary blob.
    Data(Vec<u8>),

    /// A reference to a value that is resolved elsewhere.
    Selector(String),

    /// An ordered sequence of attributes, slots and values.
    Record(Vec<Item>),
}

impl Value {
    /// Create a text value.
    pub fn text<T: Into<String>>(text: T) -> Value {
        Value::Text(text.into())
    }

    /// Create a binary value.
    pub fn data<D: Into<Vec<u8>>>(data: D) -> Value {
        Value::Data(data.into())
    }

    pub fn selector<T: Into<String>>(name: T) -> Value {
        Value::Selector(name.into())
    }

    /// Create a record with no items.
    pub fn empty_record() -> Value {
        Value::Record(vec![])
    }

    /// Create a record from a vector of items.
    ///
    /// #Examples
    ///
    /// ```
    /// use swimos_model::{Item, Value};
    ///
    /// let rec = Value::from_vec(vec![Item::of(1), Item::slot("a", 2)]);
    /// assert_eq!(rec, Value::Record(vec![
    ///     Item::ValueItem(Value::Int64Value(1)),
    ///     Item::Slot(Value::text("a"), Value::Int64Value(2)),
    /// ]));
    /// ```
    pub fn from_vec<I: Into<Item>>(items: Vec<I>) -> Value {
        Value::Record(items.into_iter().map(Into::into).collect())
    }

    /// Create a record consisting of a single attribute.
    pub fn of_attr<A: Into<Attr>>(attr: A) -> Value {
        Value::Record(vec![Item::Attr(attr.into())])
    }

    pub fn is_extant(&self) -> bool {
        matches!(self, Value::Extant)
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// The items of a record or `None` for any other kind of value.
    pub fn items(&self) -> Option<&[Item]> {
        match self {
            Value::Record(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Whether this value is a record containing at least one attribute.
    pub fn has_attrs(&self) -> bool {
        self.items()
            .map(|items| items.iter().any(Item::is_attr))
            .unwrap_or(false)
    }

    /// Add an item to the end of a record. Any other kind of value is first converted into a
    /// record containing only that value (an extant value becomes an empty record).
    pub fn push<I: Into<Item>>(&mut self, item: I) {
        match self {
            Value::Record(items) => items.push(item.into()),
            Value::Extant => *self = Value::Record(vec![item.into()]),
            ow => {
                let first = std::mem::take(ow);
                *ow = Value::Record(vec![Item::ValueItem(first), item.into()]);
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::BooleanValue(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int64Value(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int64Value(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64Value(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float64Value(x)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<Item>> for Value {
    fn from(items: Vec<Item>) -> Self {
        Value::Record(items)
    }
}
