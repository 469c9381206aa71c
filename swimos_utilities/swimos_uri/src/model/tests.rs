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

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::{
    Uri, UriAuthority, UriFragment, UriHost, UriPath, UriPathBuilder, UriQuery, UriScheme,
    UriUser,
};

fn path(parts: &[&str]) -> UriPath {
    let mut builder = UriPathBuilder::default();
    for part in parts {
        if *part == "/" {
            builder.push_slash();
        } else {
            builder.push_segment(*part);
        }
    }
    builder.build()
}

#[test]
fn display_components() {
    assert_eq!(UriScheme::new("WARP").to_string(), "warp");
    assert_eq!(
        UriUser::new("a b", Some("p:w".to_string())).to_string(),
        "a%20b:p%3Aw"
    );
    assert_eq!(UriHost::name("Swim.AI").to_string(), "swim.ai");
    assert_eq!(
        UriHost::Ipv4(Ipv4Addr::new(10, 0, 0, 1)).to_string(),
        "10.0.0.1"
    );
    assert_eq!(UriHost::Ipv6(Ipv6Addr::LOCALHOST).to_string(), "[::1]");
    assert_eq!(
        UriAuthority::new(None, UriHost::name("host"), Some(80)).to_string(),
        "host:80"
    );
    assert_eq!(path(&["/", "a b", "/", "c"]).to_string(), "/a%20b/c");
    assert_eq!(
        UriQuery::new(vec![
            (Some("k".to_string()), "a&b".to_string()),
            (None, "x=y".to_string()),
        ])
        .to_string(),
        "k=a%26b&x%3Dy"
    );
    assert_eq!(UriFragment::new("a#b c").to_string(), "a%23b%20c");
}

#[test]
fn display_uri() {
    let uri = Uri::new(
        Some(UriScheme::new("warp")),
        Some(UriAuthority::new(
            Some(UriUser::new("me", None)),
            UriHost::name("localhost"),
            Some(9001),
        )),
        Some(path(&["/", "node", "/", "1"])),
        Some(UriQuery::new(vec![(Some("lane".to_string()), "x".to_string())])),
        Some(UriFragment::new("top")),
    );
    assert_eq!(uri.to_string(), "warp://me@localhost:9001/node/1?lane=x#top");
}

#[test]
fn leading_colon_is_escaped_without_scheme() {
    let uri = Uri::new(None, None, Some(path(&["a:b", "/", "c:d"])), None, None);
    let written = uri.to_string();
    assert_eq!(written, "a%3Ab/c:d");
    assert_eq!(written.parse::<Uri>().unwrap(), uri);

    let uri = Uri::new(
        Some(UriScheme::new("s")),
        None,
        Some(path(&["a:b"])),
        None,
        None,
    );
    assert_eq!(uri.to_string(), "s:a:b");
}

#[test]
fn empty_segments_are_ignored() {
    let mut builder = UriPathBuilder::default();
    builder.push_segment("");
    assert!(builder.is_empty());
    builder.push_slash();
    assert!(builder.build().is_absolute());
    assert!(UriPath::empty().is_empty());
}

#[test]
fn path_segments() {
    let p = path(&["/", "a", "/", "/", "b"]);
    assert_eq!(p.segments().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn query_lookup() {
    let query = UriQuery::new(vec![
        (None, "bare".to_string()),
        (Some("k".to_string()), "1".to_string()),
        (Some("k".to_string()), "2".to_string()),
    ]);
    assert_eq!(query.get("k"), Some("1"));
    assert_eq!(query.get("bare"), None);
}

#[test]
fn parse_and_display() {
    for text in [
        "warp://localhost:9001/unit/foo?lane=info#x",
        "a:b",
        "//host",
        "/",
        "?q",
        "#f",
        "mailto:me@example.com",
        "http://[::1]:80/",
        "",
    ] {
        let uri: Uri = text.parse().unwrap();
        assert_eq!(uri.to_string(), text);
        assert_eq!(Uri::try_from(text).unwrap(), uri);
    }
}
