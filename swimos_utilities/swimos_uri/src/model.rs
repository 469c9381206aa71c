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

#[cfg(test)]
mod tests;

use std::fmt::{Display, Formatter, Write};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet};
use swimos_codec::{parse_str, ParseError};

use crate::pct::{FIRST_SEGMENT, FRAGMENT, HOST, PARAM, SEGMENT, USER};
use crate::{StandardUriParser, UriAbsoluteParser};

/// The scheme of a URI, normalized to lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UriScheme(String);

impl UriScheme {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        UriScheme(name.as_ref().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UriScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// User information from the authority of a URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriUser {
    username: String,
    password: Option<String>,
}

impl UriUser {
    pub fn new<S: Into<String>>(username: S, password: Option<String>) -> Self {
        UriUser {
            username: username.into(),
            password,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl Display for UriUser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let UriUser { username, password } = self;
        write!(f, "{}", utf8_percent_encode(username, USER))?;
        if let Some(password) = password {
            write!(f, ":{}", utf8_percent_encode(password, USER))?;
        }
        Ok(())
    }
}

/// The host of a URI authority.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UriHost {
    /// A registered name, normalized to lower case.
    Name(String),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
}

impl UriHost {
    pub fn name<S: AsRef<str>>(name: S) -> Self {
        UriHost::Name(name.as_ref().to_lowercase())
    }
}

impl Display for UriHost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UriHost::Name(name) => write!(f, "{}", utf8_percent_encode(name, HOST)),
            UriHost::Ipv4(addr) => write!(f, "{}", addr),
            UriHost::Ipv6(addr) => write!(f, "[{}]", addr),
        }
    }
}

/// The authority component of a URI: `[user "@"] host [":" port]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriAuthority {
    user: Option<UriUser>,
    host: UriHost,
    port: Option<u16>,
}

impl UriAuthority {
    pub fn new(user: Option<UriUser>, host: UriHost, port: Option<u16>) -> Self {
        UriAuthority { user, host, port }
    }

    pub fn user(&self) -> Option<&UriUser> {
        self.user.as_ref()
    }

    pub fn host(&self) -> &UriHost {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl Display for UriAuthority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let UriAuthority { user, host, port } = self;
        if let Some(user) = user {
            write!(f, "{}@", user)?;
        }
        write!(f, "{}", host)?;
        if let Some(port) = port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

/// An element of a URI path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Slash,
    /// A percent decoded segment.
    Segment(String),
}

/// The path component of a URI, as a sequence of slashes and (non-empty) segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UriPath(Vec<PathSegment>);

impl UriPath {
    pub fn empty() -> Self {
        UriPath::default()
    }

    /// The path consisting of a single slash.
    pub fn slash() -> Self {
        UriPath(vec![PathSegment::Slash])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self.0.first(), Some(PathSegment::Slash))
    }

    pub fn parts(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns an iterator that will yield each segment in the path, skipping the slashes.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|part| match part {
            PathSegment::Slash => None,
            PathSegment::Segment(segment) => Some(segment.as_str()),
        })
    }

    fn write_with(&self, f: &mut Formatter<'_>, first: &'static AsciiSet) -> std::fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            match part {
                PathSegment::Slash => f.write_char('/')?,
                PathSegment::Segment(segment) => {
                    let set = if i == 0 { first } else { SEGMENT };
                    write!(f, "{}", utf8_percent_encode(segment, set))?;
                }
            }
        }
        Ok(())
    }
}

impl Display for UriPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.write_with(f, SEGMENT)
    }
}

/// Builds a [`UriPath`] one part at a time.
#[derive(Debug, Clone, Default)]
pub struct UriPathBuilder {
    parts: Vec<PathSegment>,
}

impl UriPathBuilder {
    pub fn push_slash(&mut self) {
        self.parts.push(PathSegment::Slash);
    }

    /// Append a segment. Empty segments are ignored.
    pub fn push_segment<S: Into<String>>(&mut self, segment: S) {
        let segment = segment.into();
        if !segment.is_empty() {
            self.parts.push(PathSegment::Segment(segment));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn build(self) -> UriPath {
        UriPath(self.parts)
    }
}

/// The query component of a URI. Each parameter is either `key=value` or a bare value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UriQuery(Vec<(Option<String>, String)>);

impl UriQuery {
    pub fn new(params: Vec<(Option<String>, String)>) -> Self {
        UriQuery(params)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn params(&self) -> &[(Option<String>, String)] {
        &self.0
    }

    /// Find the value of the first parameter with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find_map(|(k, v)| match k {
            Some(k) if k == key => Some(v.as_str()),
            _ => None,
        })
    }
}

impl Display for UriQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char('&')?;
            }
            if let Some(key) = key {
                write!(f, "{}=", utf8_percent_encode(key, PARAM))?;
            }
            write!(f, "{}", utf8_percent_encode(value, PARAM))?;
        }
        Ok(())
    }
}

/// The fragment component of a URI (percent decoded).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UriFragment(String);

impl UriFragment {
    pub fn new<S: Into<String>>(fragment: S) -> Self {
        UriFragment(fragment.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UriFragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", utf8_percent_encode(&self.0, FRAGMENT))
    }
}

/// A URI of the form `[scheme ":"] ["//" authority] path ["?" query] ["#" fragment]`.
/// Components that were not present are `None` rather than empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Uri {
    scheme: Option<UriScheme>,
    authority: Option<UriAuthority>,
    path: Option<UriPath>,
    query: Option<UriQuery>,
    fragment: Option<UriFragment>,
}

impl Uri {
    pub fn new(
        scheme: Option<UriScheme>,
        authority: Option<UriAuthority>,
        path: Option<UriPath>,
        query: Option<UriQuery>,
        fragment: Option<UriFragment>,
    ) -> Self {
        Uri {
            scheme,
            authority,
            path,
            query,
            fragment,
        }
    }

    pub fn scheme(&self) -> Option<&UriScheme> {
        self.scheme.as_ref()
    }

    pub fn authority(&self) -> Option<&UriAuthority> {
        self.authority.as_ref()
    }

    pub fn path(&self) -> Option<&UriPath> {
        self.path.as_ref()
    }

    pub fn query(&self) -> Option<&UriQuery> {
        self.query.as_ref()
    }

    pub fn fragment(&self) -> Option<&UriFragment> {
        self.fragment.as_ref()
    }
}

impl Display for Uri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Uri {
            scheme,
            authority,
            path,
            query,
            fragment,
        } = self;
        if let Some(scheme) = scheme {
            write!(f, "{}:", scheme)?;
        }
        if let Some(authority) = authority {
            write!(f, "//{}", authority)?;
        }
        if let Some(path) = path {
            let first = if scheme.is_none() && authority.is_none() {
                FIRST_SEGMENT
            } else {
                SEGMENT
            };
            path.write_with(f, first)?;
        }
        if let Some(query) = query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(UriAbsoluteParser::<StandardUriParser>::default(), s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}
