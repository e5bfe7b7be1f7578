// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small CSS selector subset for locating footnote markup.
//!
//! ## Supported syntax
//!
//! - Selector lists: `a, b`.
//! - Combinators: descendant (whitespace) and child (`>`).
//! - Compound parts: type (`button`), universal (`*`), `#id`, `.class`, and attribute selectors
//!   `[attr]`, `[attr=value]`, `[attr~=value]`, `[attr^=value]`, `[attr$=value]`,
//!   `[attr*=value]`. Values may be quoted with `'` or `"`.
//! - Backslash escapes inside identifiers (`#fn\:1`).
//!
//! Pseudo-classes and the sibling combinators are not supported and fail to parse.

use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::document::Document;
use crate::types::ElementId;

/// Error returned when a selector fails to parse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The selector, or one entry of a selector list, is empty.
    #[error("empty selector")]
    Empty,
    /// A character that cannot start or continue a selector part.
    #[error("unexpected `{found}` at offset {offset}")]
    Unexpected {
        /// Offending character.
        found: char,
        /// Byte offset in the input.
        offset: usize,
    },
    /// Input ended in the middle of a part.
    #[error("unexpected end of selector")]
    UnexpectedEnd,
}

/// How an attribute value is compared.
#[derive(Clone, Debug, PartialEq, Eq)]
enum AttributeMatcher {
    Exact(String),
    Includes(String),
    Prefix(String),
    Suffix(String),
    Substring(String),
}

impl AttributeMatcher {
    fn matches(&self, value: &str) -> bool {
        match self {
            Self::Exact(v) => value == v,
            Self::Includes(v) => value.split_ascii_whitespace().any(|w| w == v),
            Self::Prefix(v) => !v.is_empty() && value.starts_with(v.as_str()),
            Self::Suffix(v) => !v.is_empty() && value.ends_with(v.as_str()),
            Self::Substring(v) => !v.is_empty() && value.contains(v.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Simple {
    Universal,
    Type(String),
    Id(String),
    Class(String),
    Attribute {
        name: String,
        matcher: Option<AttributeMatcher>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// One compound selector and the combinator linking it to the compound on its left.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Compound {
    parts: Vec<Simple>,
    combinator: Option<Combinator>,
}

/// A parsed selector list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    // Each entry is a left-to-right chain of compounds; the last one is the subject.
    alternatives: Vec<Vec<Compound>>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser {
            chars: input.char_indices().collect(),
            pos: 0,
            len: input.len(),
        };
        let mut alternatives = Vec::new();
        loop {
            alternatives.push(parser.complex()?);
            parser.skip_whitespace();
            match parser.peek() {
                None => break,
                Some(',') => parser.pos += 1,
                Some(c) => return Err(parser.unexpected(c)),
            }
        }
        Ok(Self { alternatives })
    }

    /// Returns true if `id` matches any entry of the list.
    pub fn matches(&self, document: &Document, id: ElementId) -> bool {
        self.alternatives
            .iter()
            .any(|chain| matches_chain(document, id, chain))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn matches_chain(document: &Document, id: ElementId, chain: &[Compound]) -> bool {
    let Some((subject, rest)) = chain.split_last() else {
        return false;
    };
    if !matches_compound(document, id, subject) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }
    match subject.combinator {
        Some(Combinator::Child) => document
            .parent(id)
            .is_some_and(|parent| matches_chain(document, parent, rest)),
        Some(Combinator::Descendant) | None => {
            let mut cursor = document.parent(id);
            while let Some(ancestor) = cursor {
                if matches_chain(document, ancestor, rest) {
                    return true;
                }
                cursor = document.parent(ancestor);
            }
            false
        }
    }
}

fn matches_compound(document: &Document, id: ElementId, compound: &Compound) -> bool {
    let Some(data) = document.data(id) else {
        return false;
    };
    compound.parts.iter().all(|part| match part {
        Simple::Universal => true,
        Simple::Type(tag) => data.tag.eq_ignore_ascii_case(tag),
        Simple::Id(v) => data.attributes.get("id").is_some_and(|id| id == v),
        Simple::Class(class) => data.classes.iter().any(|c| c == class),
        Simple::Attribute { name, matcher } => match (data.attributes.get(name), matcher) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(value), Some(m)) => m.matches(value),
        },
    })
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
    len: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn offset(&self) -> usize {
        self.chars.get(self.pos).map_or(self.len, |&(o, _)| o)
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::Unexpected {
            found,
            offset: self.offset(),
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn complex(&mut self) -> Result<Vec<Compound>, SelectorError> {
        self.skip_whitespace();
        match self.peek() {
            None | Some(',') => return Err(SelectorError::Empty),
            _ => {}
        }
        let mut chain = Vec::new();
        let mut combinator = None;
        loop {
            let parts = self.compound()?;
            chain.push(Compound { parts, combinator });
            let had_space = self.skip_whitespace();
            combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    Some(Combinator::Child)
                }
                Some(_) if had_space => Some(Combinator::Descendant),
                Some(c) => return Err(self.unexpected(c)),
            };
        }
        Ok(chain)
    }

    fn compound(&mut self) -> Result<Vec<Simple>, SelectorError> {
        let mut parts = Vec::new();
        loop {
            match self.peek() {
                Some('*') if parts.is_empty() => {
                    self.pos += 1;
                    parts.push(Simple::Universal);
                }
                Some('#') => {
                    self.pos += 1;
                    parts.push(Simple::Id(self.ident()?));
                }
                Some('.') => {
                    self.pos += 1;
                    parts.push(Simple::Class(self.ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    parts.push(self.attribute()?);
                }
                Some(c) if parts.is_empty() && is_ident_start(c) => {
                    parts.push(Simple::Type(self.ident()?.to_ascii_lowercase()));
                }
                Some(c) if c.is_whitespace() || c == ',' || c == '>' => break,
                Some(c) => return Err(self.unexpected(c)),
                None => break,
            }
        }
        if parts.is_empty() {
            return match self.peek() {
                Some(c) => Err(self.unexpected(c)),
                None => Err(SelectorError::UnexpectedEnd),
            };
        }
        Ok(parts)
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let mut out = String::new();
        match self.peek() {
            Some(c) if is_ident_start(c) => {}
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(SelectorError::UnexpectedEnd),
        }
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                let Some(escaped) = self.peek() else {
                    return Err(SelectorError::UnexpectedEnd);
                };
                out.push(escaped);
                self.pos += 1;
            } else if is_ident_char(c) {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(out)
    }

    fn attribute(&mut self) -> Result<Simple, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();
        let op = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(Simple::Attribute {
                    name,
                    matcher: None,
                });
            }
            Some('=') => {
                self.pos += 1;
                '='
            }
            Some(c @ ('~' | '^' | '$' | '*')) => {
                self.pos += 1;
                if self.peek() != Some('=') {
                    return match self.peek() {
                        Some(next) => Err(self.unexpected(next)),
                        None => Err(SelectorError::UnexpectedEnd),
                    };
                }
                self.pos += 1;
                c
            }
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(SelectorError::UnexpectedEnd),
        };
        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => self.quoted(quote)?,
            Some(_) => self.ident()?,
            None => return Err(SelectorError::UnexpectedEnd),
        };
        self.skip_whitespace();
        match self.peek() {
            Some(']') => self.pos += 1,
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(SelectorError::UnexpectedEnd),
        }
        let matcher = match op {
            '~' => AttributeMatcher::Includes(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            '*' => AttributeMatcher::Substring(value),
            _ => AttributeMatcher::Exact(value),
        };
        Ok(Simple::Attribute {
            name,
            matcher: Some(matcher),
        })
    }

    fn quoted(&mut self, quote: char) -> Result<String, SelectorError> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some('\\') => {
                    self.pos += 1;
                    let Some(escaped) = self.peek() else {
                        return Err(SelectorError::UnexpectedEnd);
                    };
                    out.push(escaped);
                    self.pos += 1;
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
                None => return Err(SelectorError::UnexpectedEnd),
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '\\' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}
