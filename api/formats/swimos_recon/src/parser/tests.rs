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

use nom::error::ErrorKind;
use swimos_model::{record, Attr, Item, Value};

use crate::{parse_recon, print_recon, ReconParseError};

fn round_trip(value: Value) {
    let printed = print_recon(&value).to_string();
    assert_eq!(parse_recon(&printed), Ok(value), "Printed as: {}", printed);
}

#[test]
fn primitive_values() {
    assert_eq!(parse_recon(""), Ok(Value::Extant));
    assert_eq!(parse_recon("  "), Ok(Value::Extant));
    assert_eq!(parse_recon("true"), Ok(Value::BooleanValue(true)));
    assert_eq!(parse_recon("false"), Ok(Value::BooleanValue(false)));
    assert_eq!(parse_recon("-42"), Ok(Value::Int64Value(-42)));
    assert_eq!(parse_recon("1.5"), Ok(Value::Float64Value(1.5)));
    assert_eq!(parse_recon("1e16"), Ok(Value::Float64Value(1e16)));
    assert_eq!(parse_recon("name"), Ok(Value::text("name")));
    assert_eq!(parse_recon("\"a \\\"b\\\"\""), Ok(Value::text("a \"b\"")));
    assert_eq!(parse_recon("%AQID"), Ok(Value::data(vec![1u8, 2, 3])));
    assert_eq!(parse_recon("%"), Ok(Value::data(Vec::<u8>::new())));
    assert_eq!(parse_recon("$x"), Ok(Value::selector("x")));
    assert_eq!(parse_recon("$\"a b\""), Ok(Value::selector("a b")));
}

#[test]
fn records() {
    assert_eq!(parse_recon("{}"), Ok(Value::empty_record()));
    assert_eq!(parse_recon("{1, 2}"), Ok(record!(1, 2)));
    assert_eq!(parse_recon("a:1,b:2"), Ok(record!(("a", 1), ("b", 2))));
    assert_eq!(parse_recon("a: 1\nb: 2"), Ok(record!(("a", 1), ("b", 2))));
    assert_eq!(parse_recon("{k:}"), Ok(record!(("k", Value::Extant))));
    assert_eq!(
        parse_recon("@foo{a:1,b:2}"),
        Ok(record!(Attr::of("foo"), ("a", 1), ("b", 2)))
    );
    assert_eq!(
        parse_recon("@a(b:1,c:2)"),
        Ok(record!(Attr::with_value(
            "a",
            record!(("b", 1), ("c", 2))
        )))
    );
    assert_eq!(
        parse_recon("5@a 6"),
        Ok(record!(5, Attr::of("a"), 6))
    );
}

#[test]
fn markup() {
    assert_eq!(parse_recon("[hi{5}]"), Ok(record!("hi", 5)));
    assert_eq!(parse_recon("[a\\@b{5}]"), Ok(record!("a@b", 5)));
    assert_eq!(
        parse_recon("[hi@b[x]yo]"),
        Ok(record!(
            "hi",
            record!(Attr::of("b"), "x"),
            "yo"
        ))
    );
    assert_eq!(
        parse_recon("[hi{{1,2}}]"),
        Ok(record!("hi", record!(1, 2)))
    );
}

#[test]
fn invalid_documents() {
    assert_eq!(
        parse_recon("{1,2"),
        Err(ReconParseError {
            offset: 0,
            kind: ErrorKind::Eof,
        })
    );
    assert!(parse_recon("\"unterminated").is_err());
    assert!(parse_recon("@").is_err());
    assert!(parse_recon("\"\\q\"").is_err());
    let err = parse_recon("a b ]").unwrap_err();
    assert_eq!(err.offset, 4);
}

#[test]
fn error_message() {
    let err = ReconParseError {
        offset: 3,
        kind: ErrorKind::Eof,
    };
    assert_eq!(err.to_string(), "Invalid Recon at offset 3 (Eof).");
}

#[test]
fn round_trip_written_values() {
    round_trip(Value::Extant);
    round_trip(Value::text("2nd"));
    round_trip(Value::text("true"));
    round_trip(Value::text("tab\there"));
    round_trip(Value::Int64Value(i64::MIN));
    round_trip(Value::Float64Value(3.0));
    round_trip(record!(Attr::of("foo"), ("a", 1), ("b", 2)));
    round_trip(record!(Attr::of("my attr"), ("a b", "c\"d")));
    round_trip(record!(
        ("a", 1.5),
        ("b", Value::data(vec![1u8, 2, 3])),
        ("c", Value::selector("d"))
    ));
    round_trip(record!(Attr::with_value("a", record!(("b", 1)))));
    round_trip(record!(Attr::with_value("a", record!(Attr::of("b")))));
    round_trip(record!(Attr::with_value("a", Value::empty_record())));
    round_trip(record!(Attr::with_value("a", record!(1, 2))));
    round_trip(record!(Attr::of("a"), "hi", record!(Attr::of("b"), 5)));
    round_trip(record!(("k", record!(("inner", record!(1, 2))))));
    round_trip(Value::Record(vec![Item::of(1), Item::ValueItem(Value::empty_record())]));
}
