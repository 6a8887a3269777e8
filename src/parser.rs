// src/parser.rs
use std::fmt;

use itertools::Itertools;

/// One delimiter-separated token of a notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Wildcard,
}

/// A parsed notation. Remembers the delimiter and wildcard it was parsed with
/// so any part of it can be rendered back for error messages.
#[derive(Debug, Clone)]
pub struct Path {
    segments: Vec<Segment>,
    delimiter: String,
    wildcard: String,
}

/// Split `notation` on every occurrence of `delimiter`; there is no escaping.
///
/// An empty notation yields one empty key. An empty delimiter keeps the whole
/// notation as a single key, and an empty wildcard token matches nothing.
pub fn parse(notation: &str, delimiter: &str, wildcard: &str) -> Path {
    let tokens: Vec<&str> = if delimiter.is_empty() {
        vec![notation]
    } else {
        notation.split(delimiter).collect()
    };
    let segments = tokens
        .into_iter()
        .map(|t| {
            if !wildcard.is_empty() && t == wildcard {
                Segment::Wildcard
            } else {
                Segment::Key(t.to_string())
            }
        })
        .collect();
    Path {
        segments,
        delimiter: delimiter.to_string(),
        wildcard: wildcard.to_string(),
    }
}

impl Path {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The notation text of a single segment.
    pub fn text<'a>(&'a self, segment: &'a Segment) -> &'a str {
        match segment {
            Segment::Key(k) => k,
            Segment::Wildcard => &self.wildcard,
        }
    }

    /// Render `segments` as a notation.
    pub fn render(&self, segments: &[Segment]) -> String {
        segments.iter().map(|s| self.text(s)).join(&self.delimiter)
    }

    /// Render `prefix`, `key`, `tail` as one notation: a concrete wildcard branch.
    pub fn render_branch(&self, prefix: &[Segment], key: &str, tail: &[Segment]) -> String {
        prefix
            .iter()
            .map(|s| self.text(s))
            .chain(std::iter::once(key))
            .chain(tail.iter().map(|s| self.text(s)))
            .join(&self.delimiter)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&self.segments))
    }
}
