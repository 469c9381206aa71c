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
use tokio_util::codec::Decoder;

use crate::{DecoderConfig, Uri, UriDecoderError, UriLineDecoder};

fn uri(text: &str) -> Uri {
    text.parse().unwrap()
}

#[test]
fn default_config() {
    assert_eq!(DecoderConfig::default().max_line_length.get(), 8192);
}

#[test]
fn decode_complete_lines() {
    let mut decoder = UriLineDecoder::default();
    let mut buffer = BytesMut::from("a:b\r\n//host/x\n");
    assert_eq!(decoder.decode(&mut buffer).unwrap(), Some(uri("a:b")));
    assert_eq!(decoder.decode(&mut buffer).unwrap(), Some(uri("//host/x")));
    assert_eq!(decoder.decode(&mut buffer).unwrap(), None);
    assert!(buffer.is_empty());
}

#[test]
fn skip_blank_lines() {
    let mut decoder = UriLineDecoder::default();
    let mut buffer = BytesMut::from("\n\r\n/p\n");
    assert_eq!(decoder.decode(&mut buffer).unwrap(), Some(uri("/p")));
}

#[test]
fn decode_across_frames() {
    let mut decoder = UriLineDecoder::default();
    let mut buffer = BytesMut::new();
    let frames = ["ws", "://exa", "mple.com/a%2", "0b?k=", "v\r", "\nnext"];
    let mut decoded = vec![];
    for frame in frames {
        buffer.extend_from_slice(frame.as_bytes());
        if let Some(result) = decoder.decode(&mut buffer).unwrap() {
            decoded.push(result);
        }
    }
    assert_eq!(decoded, vec![uri("ws://example.com/a%20b?k=v")]);
    assert_eq!(decoder.decode_eof(&mut buffer).unwrap(), Some(uri("next")));
    assert_eq!(decoder.decode_eof(&mut buffer).unwrap(), None);
}

#[test]
fn split_multi_byte_character() {
    let mut decoder = UriLineDecoder::default();
    let bytes = "/ℵ\n".as_bytes();
    let mut buffer = BytesMut::from(&bytes[..2]);
    assert_eq!(decoder.decode(&mut buffer).unwrap(), None);
    buffer.extend_from_slice(&bytes[2..]);
    match decoder.decode(&mut buffer) {
        Err(UriDecoderError::Parse(err)) => {
            assert_eq!(err.offset(), Some(1));
        }
        ow => panic!("Unexpected result: {:?}", ow),
    }
}

#[test]
fn invalid_line_is_discarded() {
    let mut decoder = UriLineDecoder::default();
    let mut buffer = BytesMut::from("%zz and more");
    assert_eq!(decoder.decode(&mut buffer).unwrap(), None);
    buffer.extend_from_slice(b" still more\n/ok\n");
    assert!(matches!(
        decoder.decode(&mut buffer),
        Err(UriDecoderError::Parse(_))
    ));
    assert_eq!(decoder.decode(&mut buffer).unwrap(), Some(uri("/ok")));
}

#[test]
fn trailing_input_on_line() {
    let mut decoder = UriLineDecoder::default();
    let mut buffer = BytesMut::from("/a b\n/c\n");
    match decoder.decode(&mut buffer) {
        Err(UriDecoderError::Parse(err)) => assert_eq!(err.offset(), Some(2)),
        ow => panic!("Unexpected result: {:?}", ow),
    }
    assert_eq!(decoder.decode(&mut buffer).unwrap(), Some(uri("/c")));
}

#[test]
fn bad_utf8() {
    let mut decoder = UriLineDecoder::default();
    let mut buffer = BytesMut::from(&b"/a\xff\n/b\n"[..]);
    assert!(matches!(
        decoder.decode(&mut buffer),
        Err(UriDecoderError::BadUtf8)
    ));
    assert_eq!(decoder.decode(&mut buffer).unwrap(), Some(uri("/b")));
}

#[test]
fn line_too_long() {
    let config = DecoderConfig {
        max_line_length: NonZeroUsize::new(4).unwrap(),
    };
    let mut decoder = UriLineDecoder::new(config);
    let mut buffer = BytesMut::from("/abcdef");
    assert_eq!(decoder.decode(&mut buffer).unwrap(), None);
    assert!(buffer.is_empty());
    buffer.extend_from_slice(b"gh\n/ab\n");
    assert!(matches!(
        decoder.decode(&mut buffer),
        Err(UriDecoderError::LineTooLong(4))
    ));
    assert_eq!(decoder.decode(&mut buffer).unwrap(), Some(uri("/ab")));

    let mut buffer = BytesMut::from("/abcd\n");
    assert!(matches!(
        decoder.decode(&mut buffer),
        Err(UriDecoderError::LineTooLong(4))
    ));
}

#[test]
fn error_at_end_of_stream() {
    let mut decoder = UriLineDecoder::default();
    let mut buffer = BytesMut::from("%z");
    assert!(matches!(
        decoder.decode_eof(&mut buffer),
        Err(UriDecoderError::Parse(_))
    ));
}
