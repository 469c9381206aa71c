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

use bytes::BytesMut;
use swimos_model::{Item, Value};
use tokio_util::codec::Encoder;

use crate::{parse_recon, write_recon, EncoderConfig, ReconEncoder};

fn sample_value() -> Value {
    Value::from_vec(vec![
        Item::attr("foo"),
        Item::slot("a", 1),
        Item::slot("b", Value::from_vec(vec![Item::of("x y"), Item::of(2.5)])),
    ])
}

const EXPECTED: &str = "@foo{a:1,b:[x y{2.5}]}";

#[test]
fn write_recon_to_buffer() {
    let mut buffer = BytesMut::new();
    let written = write_recon(&mut buffer, &sample_value()).expect("Writing failed.");
    assert_eq!(written, EXPECTED.len());
    assert_eq!(buffer.as_ref(), EXPECTED.as_bytes());
}

#[test]
fn write_non_ascii_recon() {
    let value = Value::from_vec(vec![Item::slot("ℵ", "café au lait")]);
    let expected = "{ℵ:\"café au lait\"}";
    let mut buffer = BytesMut::new();
    let written = write_recon(&mut buffer, &value).expect("Writing failed.");
    assert_eq!(written, expected.chars().count());
    assert!(buffer.len() > written);
    assert_eq!(buffer.as_ref(), expected.as_bytes());

    for presize in [true, false] {
        let config = EncoderConfig {
            presize,
            chunk_size: NonZeroUsize::new(3).unwrap(),
        };
        let mut buffer = BytesMut::new();
        assert!(ReconEncoder::new(config).encode(&value, &mut buffer).is_ok());
        assert_eq!(buffer.as_ref(), expected.as_bytes());
    }
}

#[test]
fn write_recon_appends() {
    let mut buffer = BytesMut::from("prefix ");
    write_recon(&mut buffer, &Value::from(7)).expect("Writing failed.");
    assert_eq!(buffer.as_ref(), b"prefix 7");
}

#[test]
fn default_encoder() {
    let mut encoder = ReconEncoder::default();
    let mut buffer = BytesMut::new();

    let value = sample_value();
    assert!(encoder.encode(&value, &mut buffer).is_ok());
    assert_eq!(buffer.as_ref(), EXPECTED.as_bytes());

    let restored = parse_recon(std::str::from_utf8(buffer.as_ref()).unwrap()).unwrap();
    assert_eq!(restored, value);
}

#[test]
fn encoder_with_small_chunks() {
    for presize in [true, false] {
        for n in [1, 2, 3, 7] {
            let config = EncoderConfig {
                presize,
                chunk_size: NonZeroUsize::new(n).unwrap(),
            };
            let mut encoder = ReconEncoder::new(config);
            let mut buffer = BytesMut::new();
            assert!(encoder.encode(&sample_value(), &mut buffer).is_ok());
            assert_eq!(buffer.as_ref(), EXPECTED.as_bytes());
        }
    }
}

#[test]
fn encode_twice() {
    let mut encoder = ReconEncoder::default();
    let mut buffer = BytesMut::new();
    assert!(encoder.encode(&Value::text("a"), &mut buffer).is_ok());
    assert!(encoder.encode(&Value::text("b c"), &mut buffer).is_ok());
    assert_eq!(buffer.as_ref(), b"a\"b c\"");
}

#[test]
fn default_config() {
    let config = EncoderConfig::default();
    assert!(config.presize);
    assert_eq!(config.chunk_size.get(), 4096);
}
