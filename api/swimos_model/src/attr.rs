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

use crate::Value;

/// An attribute of a record: a name with an associated value. An attribute with no meaningful
/// value carries [`Value::Extant`].
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Attr {
    pub name: String,
    pub value: Value,
}

impl Attr {
    /// Create an attribute from anything that can be converted to one.
    ///
    /// #Examples
    ///
    /// ```
    /// use swimos_model::{Attr, Value};
    ///
    /// assert_eq!(Attr::of("name"), Attr { name: "name".to_string(), value: Value::Extant });
    /// assert_eq!(Attr::of(("name", 1)), Attr { name: "name".to_string(), value: Value::Int64Value(1) });
    /// ```
    pub fn of<A: Into<Attr>>(attr: A) -> Attr {
        attr.into()
    }

    pub fn with_value<N: Into<String>, V: Into<Value>>(name: N, value: V) -> Attr {
        Attr {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl From<&str> for Attr {
    fn from(name: &str) -> Self {
        Attr::with_value(name, Value::Extant)
    }
}

impl From<String> for Attr {
    fn from(name: String) -> Self {
        Attr::with_value(name, Value::Extant)
    }
}

impl<N: Into<String>, V: Into<Value>> From<(N, V)> for Attr {
    fn from((name, value): (N, V)) -> Self {
        Attr::with_value(name, value)
    }
}
