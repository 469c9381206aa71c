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

use crate::{Attr, Item, Value};

#[test]
fn item_predicates() {
    let attr = Item::attr("tag");
    let slot = Item::slot("a", 1);
    let value = Item::of(true);

    assert!(attr.is_attr());
    assert!(attr.is_field());
    assert!(!slot.is_attr());
    assert!(slot.is_field());
    assert!(!value.is_attr());
    assert!(!value.is_field());
}

#[test]
fn item_accessors() {
    let attr = Item::attr(("tag", 3));
    let slot = Item::slot("a", 1);
    let value = Item::of("x");

    assert_eq!(attr.key(), None);
    assert_eq!(attr.value(), &Value::Int64Value(3));
    assert_eq!(slot.key(), Some(&Value::text("a")));
    assert_eq!(slot.value(), &Value::Int64Value(1));
    assert_eq!(value.key(), None);
    assert_eq!(value.value(), &Value::text("x"));
}

#[test]
fn attr_constructors() {
    assert_eq!(
        Attr::of("name"),
        Attr {
            name: "name".to_string(),
            value: Value::Extant
        }
    );
    assert_eq!(Attr::of(("name", 2.5)), Attr::with_value("name", 2.5));
}

#[test]
fn record_macro() {
    let rec = record!(Attr::of("a"), ("b", 1), Value::from(false));
    assert_eq!(
        rec,
        Value::Record(vec![
            Item::Attr(Attr::of("a")),
            Item::Slot(Value::text("b"), Value::Int64Value(1)),
            Item::ValueItem(Value::BooleanValue(false)),
        ])
    );
    assert!(rec.has_attrs());
    assert_eq!(rec.items().map(<[Item]>::len), Some(3));
}

#[test]
fn push_items() {
    let mut value = Value::Extant;
    value.push(Item::of(1));
    assert_eq!(value, record!(Value::from(1)));

    let mut value = Value::text("a");
    value.push(Item::slot("b", 2));
    assert_eq!(value, record!(Value::text("a"), ("b", 2)));
}

#[test]
fn primitive_conversions() {
    assert_eq!(Value::from(5i32), Value::Int64Value(5));
    assert_eq!(Value::from(5u32), Value::Int64Value(5));
    assert_eq!(Value::from(-5i64), Value::Int64Value(-5));
    assert_eq!(Value::from("x"), Value::Text("x".to_string()));
    assert_eq!(Value::data(vec![1u8, 2]), Value::Data(vec![1, 2]));
    assert!(!Value::empty_record().has_attrs());
    assert!(Value::default().is_extant());
}
