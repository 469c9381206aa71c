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

use crate::{Input, StrInput};

#[test]
fn complete_input_states() {
    let mut input = StrInput::new("ab");
    assert!(input.is_cont());
    assert_eq!(input.head(), Some('a'));
    input.step();
    assert_eq!(input.head(), Some('b'));
    assert_eq!(input.position(), 1);
    input.step();
    assert!(!input.is_cont());
    assert!(input.is_done());
    assert!(!input.is_empty());
    assert_eq!(input.head(), None);

    input.step();
    assert_eq!(input.position(), 2);
}

#[test]
fn partial_input_states() {
    let mut input = StrInput::new("a").is_part(true);
    input.step();
    assert!(input.is_empty());
    assert!(!input.is_done());
    assert!(!input.is_error());
}

#[test]
fn multi_byte_characters() {
    let mut input = StrInput::new("ℵx");
    assert_eq!(input.head(), Some('ℵ'));
    input.step();
    assert_eq!(input.head(), Some('x'));
    assert_eq!(input.consumed(), 'ℵ'.len_utf8());
    assert_eq!(input.remaining(), "x");
}

#[test]
fn offset_positions() {
    let mut input = StrInput::new("xyz").with_offset(10);
    input.step();
    assert_eq!(input.position(), 11);
}

#[test]
fn clone_does_not_consume() {
    let input = StrInput::new("abc");
    let mut look = input;
    look.step();
    look.step();
    assert_eq!(look.head(), Some('c'));
    assert_eq!(input.head(), Some('a'));
}
