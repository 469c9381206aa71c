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

use crate::{Attr, Value};

/// An item that may occur in the body of a record [`Value`].
#[derive(Clone, PartialEq, Debug)]
pub enum Item {
    /// An attribute of the record.
    Attr(Attr),

    /// An item that is a key value pair where both are [`Value`]s.
    Slot(Value, Value),

    /// An item consisting of a single [`Value`].
    ValueItem(Value),
}

impl Item {
    /// Create a value [`Item`] from anything that can be converted to a [`Value`].
    ///
    /// #Examples
    ///
    /// ```
    /// use swimos_model::{Item, Value};
    ///
    /// assert_eq!(Item::of("name"), Item::ValueItem(Value::text("name")));
    /// assert_eq!(Item::of(1), Item::ValueItem(Value::Int64Value(1)));
    /// ```
    pub fn of<V: Into<Value>>(value: V) -> Item {
        Item::ValueItem(value.into())
    }

    /// Create a slot [`Item`] from a pair of things that can be converted to [`Value`]s.
    ///
    /// #Examples
    ///
    /// ```
    /// use swimos_model::{Value, Item};
    ///
    /// assert_eq!(Item::slot("key", 1), Item::Slot(Value::text("key"), Value::Int64Value(1)));
    /// ```
    pub fn slot<K: Into<Value>, V: Into<Value>>(key: K, value: V) -> Item {
        Item::Slot(key.into(), value.into())
    }

    /// Create an attribute [`Item`].
    pub fn attr<A: Into<Attr>>(attr: A) -> Item {
        Item::Attr(attr.into())
    }

    pub fn is_attr(&self) -> bool {
        matches!(self, Item::Attr(_))
    }

    /// Attributes and slots are both fields.
    pub fn is_field(&self) -> bool {
        matches!(self, Item::Attr(_) | Item::Slot(_, _))
    }

    /// The key of a slot.
    pub fn key(&self) -> Option<&Value> {
        match self {
            Item::Slot(key, _) => Some(key),
            _ => None,
        }
    }

    /// The value of the item (the value of a field or the item itself for a value item).
    pub fn value(&self) -> &Value {
        match self {
            Item::Attr(Attr { value, .. }) => value,
            Item::Slot(_, value) => value,
            Item::ValueItem(value) => value,
        }
    }
}

impl From<Value> for Item {
    fn from(value: Value) -> Self {
        Item::ValueItem(value)
    }
}

impl From<Attr> for Item {
    fn from(attr: Attr) -> Self {
        Item::Attr(attr)
    }
}

impl<K: Into<Value>, V: Into<Value>> From<(K, V)> for Item {
    fn from((key, value): (K, V)) -> Self {
        Item::Slot(key.into(), value.into())
    }
}

macro_rules! value_item_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Item {
                fn from(value: $t) -> Self {
                    Item::ValueItem(value.into())
                }
            }
        )*
    };
}

value_item_from!(bool, i32, u32, i64, f64, &str, String);
