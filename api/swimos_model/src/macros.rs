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

/// Creates a record from the provided items. Each argument may be anything that can be
/// converted into an [`Item`](crate::Item).
///
/// ## An empty record:
/// ```
/// use swimos_model::{Value, record};
///
/// assert_eq!(record!(), Value::Record(vec![]));
/// ```
///
/// ## From attributes, slots and values:
/// ```
/// use swimos_model::{Attr, Item, Value, record};
///
/// let value = record!(Attr::of("tag"), ("key", 1), Value::text("value"));
/// assert_eq!(value, Value::Record(vec![
///     Item::Attr(Attr::of("tag")),
///     Item::slot("key", 1),
///     Item::of("value"),
/// ]));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Value::Record(vec![])
    };
    ($($items:expr),+ $(,)?) => {
        $crate::Value::Record(vec![$($crate::Item::from($items)),+])
    };
}
