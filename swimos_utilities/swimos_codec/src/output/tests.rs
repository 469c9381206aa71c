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

use std::fmt::{Display, Formatter};

use bytes::BytesMut;

use crate::{BytesOutput, FmtOutput, Output, StringOutput};

#[test]
fn unbounded_string_output() {
    let mut output = StringOutput::new();
    for c in "hello".chars() {
        assert!(output.is_cont());
        output.write(c);
    }
    assert!(output.is_cont());
    assert_eq!(output.written(), 5);
    assert_eq!(output.into_string(), "hello");
}

#[test]
fn bounded_string_output_done() {
    let mut output = StringOutput::with_capacity(2);
    output.write('a');
    output.write('b');
    assert!(output.is_done());
    assert!(!output.is_full());
    output.write('c');
    assert_eq!(output.as_str(), "ab");
}

#[test]
fn partial_string_output_full() {
    let mut output = StringOutput::with_capacity(1).is_part(true);
    output.write('a');
    assert!(output.is_full());
    assert!(!output.is_done());
    output.extend_capacity(1);
    assert!(output.is_cont());
    output.write('ℵ');
    assert_eq!(output.as_str(), "aℵ");
    assert_eq!(output.written(), 2);
}

#[test]
fn bytes_output_encodes_utf8() {
    let mut buffer = BytesMut::new();
    let mut output = BytesOutput::with_capacity(&mut buffer, 2).is_part(true);
    output.write('ℵ');
    output.write('x');
    assert!(output.is_full());
    output.write('y');
    assert_eq!(output.written(), 2);
    assert_eq!(buffer.as_ref(), "ℵx".as_bytes());
}

struct Chars(&'static str);

impl Display for Chars {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut output = FmtOutput::new(f);
        for c in self.0.chars() {
            output.write(c);
        }
        if output.is_error() {
            Err(std::fmt::Error)
        } else {
            Ok(())
        }
    }
}

#[test]
fn fmt_output_writes_through() {
    assert_eq!(Chars("abc").to_string(), "abc");
}
