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

mod components;


use std::fmt::{Debug, Formatter};
use std::mem;

use swimos_codec::{Input, ParseError, Parser, Parsing};
use tracing::{debug, trace};

use crate::pct;
use crate::{Uri, UriAuthority, UriFragment, UriPath, UriPathBuilder, UriQuery, UriScheme};

pub use components::{AuthorityParser, FragmentParser, PathParser, QueryParser, SchemeParser};

/// Supplies the parsers for the components of a URI. [`UriAbsoluteParser`] only decides which
/// component comes next. Everything else is delegated to an implementation of this trait.
pub trait UriParser {
    type SchemeParser: Parser<Output = UriScheme> + Debug;
    type AuthorityParser: Parser<Output = UriAuthority> + Debug;
    type PathParser: Parser<Output = UriPath> + Debug;
    type QueryParser: Parser<Output = UriQuery> + Debug;
    type FragmentParser: Parser<Output = UriFragment> + Debug;

    /// Whether a character may occur in a scheme. This drives the lookahead that distinguishes a
    /// scheme from a path.
    fn is_scheme_char(&self, c: char) -> bool;

    fn parse_scheme(&self) -> Self::SchemeParser;

    fn parse_authority(&self) -> Self::AuthorityParser;

    fn path_builder(&self) -> UriPathBuilder;

    /// Create a path parser, optionally continuing from a path that has already been started.
    fn parse_path(&self, builder: Option<UriPathBuilder>) -> Self::PathParser;

    fn parse_query(&self) -> Self::QueryParser;

    fn parse_fragment(&self) -> Self::FragmentParser;

    fn slash_path(&self) -> UriPath;

    fn absolute(
        &self,
        scheme: Option<UriScheme>,
        authority: Option<UriAuthority>,
        path: Option<UriPath>,
        query: Option<UriQuery>,
        fragment: Option<UriFragment>,
    ) -> Uri;
}

/// The grammar of RFC 3986 URIs with percent decoded components.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StandardUriParser;

impl UriParser for StandardUriParser {
    type SchemeParser = SchemeParser;
    type AuthorityParser = AuthorityParser;
    type PathParser = PathParser;
    type QueryParser = QueryParser;
    type FragmentParser = FragmentParser;

    fn is_scheme_char(&self, c: char) -> bool {
        pct::is_scheme_char(c)
    }

    fn parse_scheme(&self) -> SchemeParser {
        SchemeParser::default()
    }

    fn parse_authority(&self) -> AuthorityParser {
        AuthorityParser::default()
    }

    fn path_builder(&self) -> UriPathBuilder {
        UriPathBuilder::default()
    }

    fn parse_path(&self, builder: Option<UriPathBuilder>) -> PathParser {
        PathParser::new(builder.unwrap_or_default())
    }

    fn parse_query(&self) -> QueryParser {
        QueryParser::default()
    }

    fn parse_fragment(&self) -> FragmentParser {
        FragmentParser::default()
    }

    fn slash_path(&self) -> UriPath {
        UriPath::slash()
    }

    fn absolute(
        &self,
        scheme: Option<UriScheme>,
        authority: Option<UriAuthority>,
        path: Option<UriPath>,
        query: Option<UriQuery>,
        fragment: Option<UriFragment>,
    ) -> Uri {
        Uri::new(scheme, authority, path, query, fragment)
    }
}

enum AbsoluteStep<P: UriParser> {
    /// The number of scheme characters already scanned ahead of the head of the input.
    Lookahead(usize),
    Scheme(P::SchemeParser),
    SchemeColon,
    Branch,
    Slash,
    Authority(P::AuthorityParser),
    AfterAuthority,
    Path(P::PathParser),
    AfterPath,
    Query(P::QueryParser),
    AfterQuery,
    Fragment(P::FragmentParser),
}

impl<P: UriParser> Debug for AbsoluteStep<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AbsoluteStep::Lookahead(n) => f.debug_tuple("Lookahead").field(n).finish(),
            AbsoluteStep::Scheme(p) => f.debug_tuple("Scheme").field(p).finish(),
            AbsoluteStep::SchemeColon => f.write_str("SchemeColon"),
            AbsoluteStep::Branch => f.write_str("Branch"),
            AbsoluteStep::Slash => f.write_str("Slash"),
            AbsoluteStep::Authority(p) => f.debug_tuple("Authority").field(p).finish(),
            AbsoluteStep::AfterAuthority => f.write_str("AfterAuthority"),
            AbsoluteStep::Path(p) => f.debug_tuple("Path").field(p).finish(),
            AbsoluteStep::AfterPath => f.write_str("AfterPath"),
            AbsoluteStep::Query(p) => f.debug_tuple("Query").field(p).finish(),
            AbsoluteStep::AfterQuery => f.write_str("AfterQuery"),
            AbsoluteStep::Fragment(p) => f.debug_tuple("Fragment").field(p).finish(),
        }
    }
}

/// Resumable parser for a complete URI:
/// `[scheme ":"] ["//" authority] path ["?" query] ["#" fragment]`.
///
/// Whether the URI starts with a scheme is decided by scanning ahead on a clone of the input for
/// a `:` following scheme characters. If the available input ends before that can be decided,
/// the parser suspends without consuming anything. Each component is parsed by a sub-parser from
/// the [`UriParser`], which is resumed (never restarted) when more input arrives. The first
/// failure of a sub-parser is the failure of the whole parse.
pub struct UriAbsoluteParser<P: UriParser = StandardUriParser> {
    uri: P,
    scheme: Option<UriScheme>,
    authority: Option<UriAuthority>,
    path: Option<UriPath>,
    query: Option<UriQuery>,
    step: AbsoluteStep<P>,
}

impl<P: UriParser + Debug> Debug for UriAbsoluteParser<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UriAbsoluteParser")
            .field("uri", &self.uri)
            .field("scheme", &self.scheme)
            .field("authority", &self.authority)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("step", &self.step)
            .finish()
    }
}

impl<P: UriParser + Default> Default for UriAbsoluteParser<P> {
    fn default() -> Self {
        UriAbsoluteParser::new(P::default())
    }
}

impl<P: UriParser> UriAbsoluteParser<P> {
    pub fn new(uri: P) -> Self {
        UriAbsoluteParser {
            uri,
            scheme: None,
            authority: None,
            path: None,
            query: None,
            step: AbsoluteStep::Lookahead(0),
        }
    }

    fn suspend<I: Input>(mut self, step: AbsoluteStep<P>, input: &mut I) -> Parsing<Self, Uri> {
        self.step = step;
        Parsing::stalled(self, input)
    }

    fn complete(self, fragment: Option<UriFragment>) -> Parsing<Self, Uri> {
        let UriAbsoluteParser {
            uri,
            scheme,
            authority,
            path,
            query,
            ..
        } = self;
        Parsing::Done(uri.absolute(scheme, authority, path, query, fragment))
    }
}

fn failed<P, T>(component: &'static str, err: ParseError) -> Parsing<P, T> {
    debug!(component, error = %err, "URI component parser failed.");
    Parsing::Error(err)
}

impl<P: UriParser> Parser for UriAbsoluteParser<P> {
    type Output = Uri;

    fn feed<I: Input>(mut self, input: &mut I) -> Parsing<Self, Uri> {
        let mut step = mem::replace(&mut self.step, AbsoluteStep::Lookahead(0));
        loop {
            step = match step {
                AbsoluteStep::Lookahead(scanned) => {
                    let mut look = input.clone();
                    for _ in 0..scanned {
                        look.step();
                    }
                    let mut scanned = scanned;
                    while let Some(c) = look.head() {
                        if self.uri.is_scheme_char(c) {
                            look.step();
                            scanned += 1;
                        } else {
                            break;
                        }
                    }
                    match look.head() {
                        Some(':') => {
                            trace!(offset = input.position(), "URI has a scheme.");
                            AbsoluteStep::Scheme(self.uri.parse_scheme())
                        }
                        Some(_) => AbsoluteStep::Branch,
                        None if look.is_done() => AbsoluteStep::Branch,
                        None if look.is_error() => {
                            return Parsing::Error(ParseError::Trapped(
                                look.trap().unwrap_or_default(),
                            ));
                        }
                        None => {
                            trace!(
                                scanned,
                                "Deferring the scheme decision until more input is available."
                            );
                            return self.suspend(AbsoluteStep::Lookahead(scanned), input);
                        }
                    }
                }
                AbsoluteStep::Scheme(parser) => match parser.feed(input) {
                    Parsing::Cont(parser) => {
                        return self.suspend(AbsoluteStep::Scheme(parser), input)
                    }
                    Parsing::Done(scheme) => {
                        self.scheme = Some(scheme);
                        AbsoluteStep::SchemeColon
                    }
                    Parsing::Error(err) => return failed("scheme", err),
                },
                AbsoluteStep::SchemeColon => match input.head() {
                    Some(':') => {
                        input.step();
                        AbsoluteStep::Branch
                    }
                    Some(_) => return Parsing::Error(ParseError::expected(':', input)),
                    None if input.is_done() => {
                        return Parsing::Error(ParseError::expected(':', input))
                    }
                    None => return self.suspend(AbsoluteStep::SchemeColon, input),
                },
                AbsoluteStep::Branch => match input.head() {
                    Some('/') => {
                        input.step();
                        AbsoluteStep::Slash
                    }
                    Some('?') => {
                        input.step();
                        AbsoluteStep::Query(self.uri.parse_query())
                    }
                    Some('#') => {
                        input.step();
                        AbsoluteStep::Fragment(self.uri.parse_fragment())
                    }
                    Some(_) => AbsoluteStep::Path(self.uri.parse_path(None)),
                    None if input.is_done() => return self.complete(None),
                    None => return self.suspend(AbsoluteStep::Branch, input),
                },
                AbsoluteStep::Slash => match input.head() {
                    Some('/') => {
                        input.step();
                        AbsoluteStep::Authority(self.uri.parse_authority())
                    }
                    Some(_) => {
                        let mut builder = self.uri.path_builder();
                        builder.push_slash();
                        AbsoluteStep::Path(self.uri.parse_path(Some(builder)))
                    }
                    None if input.is_done() => {
                        self.path = Some(self.uri.slash_path());
                        return self.complete(None);
                    }
                    None => return self.suspend(AbsoluteStep::Slash, input),
                },
                AbsoluteStep::Authority(parser) => match parser.feed(input) {
                    Parsing::Cont(parser) => {
                        return self.suspend(AbsoluteStep::Authority(parser), input)
                    }
                    Parsing::Done(authority) => {
                        self.authority = Some(authority);
                        AbsoluteStep::AfterAuthority
                    }
                    Parsing::Error(err) => return failed("authority", err),
                },
                AbsoluteStep::AfterAuthority => match input.head() {
                    Some('?') => {
                        input.step();
                        AbsoluteStep::Query(self.uri.parse_query())
                    }
                    Some('#') => {
                        input.step();
                        AbsoluteStep::Fragment(self.uri.parse_fragment())
                    }
                    Some(_) => AbsoluteStep::Path(self.uri.parse_path(None)),
                    None if input.is_done() => return self.complete(None),
                    None => return self.suspend(AbsoluteStep::AfterAuthority, input),
                },
                AbsoluteStep::Path(parser) => match parser.feed(input) {
                    Parsing::Cont(parser) => {
                        return self.suspend(AbsoluteStep::Path(parser), input)
                    }
                    Parsing::Done(path) => {
                        self.path = Some(path);
                        AbsoluteStep::AfterPath
                    }
                    Parsing::Error(err) => return failed("path", err),
                },
                AbsoluteStep::AfterPath => match input.head() {
                    Some('?') => {
                        input.step();
                        AbsoluteStep::Query(self.uri.parse_query())
                    }
                    Some('#') => {
                        input.step();
                        AbsoluteStep::Fragment(self.uri.parse_fragment())
                    }
                    Some(_) => return self.complete(None),
                    None if input.is_done() => return self.complete(None),
                    None => return self.suspend(AbsoluteStep::AfterPath, input),
                },
                AbsoluteStep::Query(parser) => match parser.feed(input) {
                    Parsing::Cont(parser) => {
                        return self.suspend(AbsoluteStep::Query(parser), input)
                    }
                    Parsing::Done(query) => {
                        self.query = Some(query);
                        AbsoluteStep::AfterQuery
                    }
                    Parsing::Error(err) => return failed("query", err),
                },
                AbsoluteStep::AfterQuery => match input.head() {
                    Some('#') => {
                        input.step();
                        AbsoluteStep::Fragment(self.uri.parse_fragment())
                    }
                    Some(_) => return self.complete(None),
                    None if input.is_done() => return self.complete(None),
                    None => return self.suspend(AbsoluteStep::AfterQuery, input),
                },
                AbsoluteStep::Fragment(parser) => match parser.feed(input) {
                    Parsing::Cont(parser) => {
                        return self.suspend(AbsoluteStep::Fragment(parser), input)
                    }
                    Parsing::Done(fragment) => return self.complete(Some(fragment)),
                    Parsing::Error(err) => return failed("fragment", err),
                },
            };
        }
    }
}
