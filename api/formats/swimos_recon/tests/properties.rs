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

use std::num::NonZeroUsize;

use proptest::prelude::*;
use swimos_codec::write_with_capacity;
use swimos_model::{Attr, Item, Value};
use swimos_recon::writer::ModelWriter;
use swimos_recon::{parse_recon, print_recon, recon_size};

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,8}"
}

fn name() -> impl Strategy<Value = String> {
    prop_oneof!["[a-z][a-z0-9]{0,4}", "[a-z ]{1,5}"]
}

fn primitive() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::BooleanValue),
        any::<i64>().prop_map(Value::Int64Value),
        (-1.0e9f64..1.0e9).prop_map(Value::Float64Value),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(Value::Data),
        "[a-z]{1,4}".prop_map(Value::Selector),
    ]
}

/// Arbitrary values, including text items that the writer may render as markup.
fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![primitive(), text().prop_map(Value::Text)];
    leaf.prop_recursive(4, 32, 6, |inner| {
        let item = prop_oneof![
            (name(), prop::option::of(inner.clone())).prop_map(|(name, value)| {
                Item::Attr(Attr {
                    name,
                    value: value.unwrap_or_default(),
                })
            }),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| Item::Slot(k, v)),
            inner.prop_map(Item::ValueItem),
        ];
        prop::collection::vec(item, 0..6).prop_map(Value::Record)
    })
}

/// Values that read back unchanged. Text only appears as a slot key or value, at the top level
/// or as an attribute body, so adjacent text items never merge within markup.
fn readable_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![primitive(), name().prop_map(Value::Text)];
    leaf.prop_recursive(4, 32, 6, |inner| {
        let non_text = inner
            .clone()
            .prop_filter("text value items", |v| !matches!(v, Value::Text(_)));
        let item = prop_oneof![
            (name(), prop::option::of(inner.clone())).prop_map(|(name, value)| {
                Item::Attr(Attr {
                    name,
                    value: value.unwrap_or_default(),
                })
            }),
            (inner.clone(), inner).prop_map(|(k, v)| Item::Slot(k, v)),
            non_text.prop_map(Item::ValueItem),
        ];
        prop::collection::vec(item, 0..6).prop_map(Value::Record)
    })
}

proptest! {
    #[test]
    fn size_matches_written_length(v in value()) {
        let written = print_recon(&v).to_string();
        prop_assert_eq!(recon_size(&v), written.chars().count());
    }
}

proptest! {
    #[test]
    fn output_independent_of_capacity(v in value(), n in 1usize..16) {
        let expected = print_recon(&v).to_string();
        let chunk = NonZeroUsize::new(n).unwrap();
        let written = write_with_capacity((&ModelWriter).write_value(&v), chunk).unwrap();
        prop_assert_eq!(written, expected);
    }
}

proptest! {
    #[test]
    fn written_values_read_back(v in readable_value()) {
        let written = print_recon(&v).to_string();
        prop_assert_eq!(parse_recon(&written), Ok(v), "Written as: {}", written);
    }
}
