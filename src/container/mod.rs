//! The common in-memory configuration tree
//!
//! Every supported format parses into a [`Container`] and serializes back out
//! of one, so the merge engine and path accessors never see format-specific
//! types. Mappings preserve insertion order for round-trip fidelity.

use indexmap::IndexMap;

use crate::error::Result;

mod de;
mod ser;

pub mod path;

pub use path::Path;

/// A configuration value: a scalar, an ordered sequence, or an ordered
/// mapping of string keys. Containers are plain values; `clone` is a deep
/// copy and no tree is ever aliased across independent documents.
///
/// Equality is structural: order-insensitive for mappings, order-sensitive
/// for sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Container>),
    Map(IndexMap<String, Container>),
}

impl Container {
    /// An empty mapping, the usual starting point when building a tree.
    pub fn empty_map() -> Self {
        Container::Map(IndexMap::new())
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Container::Map(_))
    }

    pub fn is_seq(&self) -> bool {
        matches!(self, Container::Seq(_))
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Container>> {
        match self {
            Container::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Container]> {
        match self {
            Container::Seq(s) => Some(s),
            _ => None,
        }
    }

    /// Short human-readable name of the variant, used in path error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Container::Null => "null",
            Container::Bool(_) => "boolean",
            Container::Int(_) => "integer",
            Container::Float(_) => "float",
            Container::Str(_) => "string",
            Container::Seq(_) => "sequence",
            Container::Map(_) => "mapping",
        }
    }

    /// Resolve `path` against this tree. Fails with a path error when the
    /// path runs through a scalar, indexes a non-sequence, or names an
    /// absent key.
    pub fn get(&self, path: &Path) -> Result<&Container> {
        path.resolve(self)
    }

    /// Write `value` at `path`, creating missing intermediate mapping keys
    /// as empty mappings. Missing sequence indices are an error rather than
    /// auto-extending. The identity path replaces the whole tree.
    pub fn set(&mut self, path: &Path, value: Container) -> Result<()> {
        path.assign(self, value)
    }
}

impl From<bool> for Container {
    fn from(v: bool) -> Self {
        Container::Bool(v)
    }
}

impl From<i64> for Container {
    fn from(v: i64) -> Self {
        Container::Int(v)
    }
}

impl From<f64> for Container {
    fn from(v: f64) -> Self {
        Container::Float(v)
    }
}

impl From<&str> for Container {
    fn from(v: &str) -> Self {
        Container::Str(v.to_string())
    }
}

impl From<String> for Container {
    fn from(v: String) -> Self {
        Container::Str(v)
    }
}

impl From<Vec<Container>> for Container {
    fn from(v: Vec<Container>) -> Self {
        Container::Seq(v)
    }
}

impl FromIterator<(String, Container)> for Container {
    fn from_iter<T: IntoIterator<Item = (String, Container)>>(iter: T) -> Self {
        Container::Map(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Container)]) -> Container {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_map_equality_ignores_key_order() {
        let a = map(&[("x", Container::Int(1)), ("y", Container::Int(2))]);
        let b = map(&[("y", Container::Int(2)), ("x", Container::Int(1))]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seq_equality_is_order_sensitive() {
        let a = Container::Seq(vec![Container::Int(1), Container::Int(2)]);
        let b = Container::Seq(vec![Container::Int(2), Container::Int(1)]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = map(&[("inner", map(&[("k", Container::from("v"))]))]);
        let mut copy = original.clone();
        copy.set(&Path::parse("inner.k").expect("path"), Container::from("changed"))
            .expect("set");

        let path = Path::parse("inner.k").expect("path");
        assert_eq!(original.get(&path).expect("get"), &Container::from("v"));
        assert_eq!(copy.get(&path).expect("get"), &Container::from("changed"));
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let m = map(&[
            ("zebra", Container::Int(1)),
            ("apple", Container::Int(2)),
            ("mango", Container::Int(3)),
        ]);
        let keys: Vec<&str> = m.as_map().expect("map").keys().map(String::as_str).collect();
        assert_eq!(keys, ["zebra", "apple", "mango"]);
    }
}
