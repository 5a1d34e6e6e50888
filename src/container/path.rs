//! Dotted-path addressing into a container tree
//!
//! A path like `a.b.0.c` is split on `.`; segments that parse as
//! non-negative integers address sequence indices, everything else addresses
//! mapping keys. The empty string is the identity path for the whole tree.

use std::fmt;
use std::str::FromStr;

use crate::container::Container;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A parsed path. Transient query object: built from a string, applied to a
/// tree, discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    raw: String,
    segments: Vec<Segment>,
}

impl Path {
    pub fn parse(raw: &str) -> Result<Path> {
        if raw.is_empty() {
            return Ok(Path { raw: String::new(), segments: Vec::new() });
        }

        let mut segments = Vec::new();
        for part in raw.split('.') {
            if part.is_empty() {
                return Err(Error::path(raw, "empty path segment"));
            }
            match part.parse::<usize>() {
                Ok(index) => segments.push(Segment::Index(index)),
                Err(_) => segments.push(Segment::Key(part.to_string())),
            }
        }
        Ok(Path { raw: raw.to_string(), segments })
    }

    /// The identity path addresses the whole tree.
    pub fn is_identity(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn resolve<'a>(&self, root: &'a Container) -> Result<&'a Container> {
        let mut node = root;
        for segment in &self.segments {
            node = match (segment, node) {
                (Segment::Key(key), Container::Map(map)) => map.get(key).ok_or_else(|| {
                    Error::path(&self.raw, format!("key '{key}' not found"))
                })?,
                (Segment::Index(index), Container::Seq(seq)) => {
                    seq.get(*index).ok_or_else(|| {
                        Error::path(
                            &self.raw,
                            format!("index {index} out of bounds (len {})", seq.len()),
                        )
                    })?
                }
                (Segment::Key(key), other) => {
                    return Err(Error::path(
                        &self.raw,
                        format!("cannot look up key '{key}' in a {}", other.type_name()),
                    ));
                }
                (Segment::Index(index), other) => {
                    return Err(Error::path(
                        &self.raw,
                        format!("cannot index {} with {index}", other.type_name()),
                    ));
                }
            };
        }
        Ok(node)
    }

    pub(crate) fn assign(&self, root: &mut Container, value: Container) -> Result<()> {
        if self.is_identity() {
            *root = value;
            return Ok(());
        }

        let mut node = root;
        let (last, intermediate) =
            self.segments.split_last().unwrap_or_else(|| unreachable!("non-empty path"));

        for segment in intermediate {
            node = match (segment, node) {
                (Segment::Key(key), Container::Map(map)) => {
                    // Absent intermediate keys become empty mappings so that
                    // `a.b.c` can be set into an empty tree.
                    let entry = map.entry(key.clone()).or_insert_with(Container::empty_map);
                    if !entry.is_map() && !entry.is_seq() {
                        return Err(Error::path(
                            &self.raw,
                            format!("cannot descend through {} at '{key}'", entry.type_name()),
                        ));
                    }
                    entry
                }
                (Segment::Index(index), Container::Seq(seq)) => {
                    let len = seq.len();
                    seq.get_mut(*index).ok_or_else(|| {
                        Error::path(
                            &self.raw,
                            format!("index {index} out of bounds (len {len})"),
                        )
                    })?
                }
                (segment, other) => {
                    return Err(Error::path(
                        &self.raw,
                        format!("cannot descend into {} at '{segment}'", other.type_name()),
                    ));
                }
            };
        }

        match (last, node) {
            (Segment::Key(key), Container::Map(map)) => {
                map.insert(key.clone(), value);
                Ok(())
            }
            (Segment::Index(index), Container::Seq(seq)) => {
                let len = seq.len();
                let slot = seq.get_mut(*index).ok_or_else(|| {
                    Error::path(&self.raw, format!("index {index} out of bounds (len {len})"))
                })?;
                *slot = value;
                Ok(())
            }
            (segment, other) => Err(Error::path(
                &self.raw,
                format!("cannot write '{segment}' into a {}", other.type_name()),
            )),
        }
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
