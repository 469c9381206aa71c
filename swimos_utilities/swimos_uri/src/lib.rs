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

//! # SwimOS URIs
//!
//! An incremental parser for URIs of the form
//! `[scheme ":"] ["//" authority] path ["?" query] ["#" fragment]`. The parser can be fed
//! input in chunks of any size and resumed when more becomes available. The components of the
//! URI are parsed by sub-parsers supplied by a [`UriParser`] so that the grammar of each
//! component can be replaced.
//!
//! # Examples
//!
//! ```
//! use swimos_uri::{Uri, UriHost};
//!
//! let uri: Uri = "warp://Example.com:9001/unit/1?lane=info#top".parse().unwrap();
//! assert_eq!(uri.scheme().unwrap().as_str(), "warp");
//! let authority = uri.authority().unwrap();
//! assert_eq!(authority.host(), &UriHost::Name("example.com".to_string()));
//! assert_eq!(authority.port(), Some(9001));
//! assert_eq!(uri.path().unwrap().segments().collect::<Vec<_>>(), vec!["unit", "1"]);
//! assert_eq!(uri.query().unwrap().get("lane"), Some("info"));
//! assert_eq!(uri.fragment().unwrap().as_str(), "top");
//! ```

mod decoder;
mod model;
mod parser;
mod pct;

pub use decoder::{DecoderConfig, UriDecoderError, UriLineDecoder};
pub use model::{
    PathSegment, Uri, UriAuthority, UriFragment, UriHost, UriPath, UriPathBuilder, UriQuery,
    UriScheme, UriUser,
};
pub use parser::{
    AuthorityParser, FragmentParser, PathParser, QueryParser, SchemeParser, StandardUriParser,
    UriAbsoluteParser, UriParser,
};
