//! Serde deserialization for [`Container`]
//!
//! Mirrors the self-describing visitor `serde_json::Value` uses, so every
//! backend can deserialize straight into the common tree type. Mapping keys
//! must be strings; unsigned integers beyond `i64::MAX` degrade to floats.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::container::Container;

struct ContainerVisitor;

impl<'de> Visitor<'de> for ContainerVisitor {
    type Value = Container;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Container, E> {
        Ok(Container::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Container, E> {
        Ok(Container::Int(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Container, E> {
        if v <= i64::MAX as u64 {
            Ok(Container::Int(v as i64))
        } else {
            Ok(Container::Float(v as f64))
        }
    }

    fn visit_f64<E>(self, v: f64) -> Result<Container, E> {
        Ok(Container::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Container, E> {
        Ok(Container::Str(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Container, E> {
        Ok(Container::Str(v))
    }

    fn visit_unit<E>(self) -> Result<Container, E> {
        Ok(Container::Null)
    }

    fn visit_none<E>(self) -> Result<Container, E> {
        Ok(Container::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Container, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Container, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut seq = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(element) = access.next_element()? {
            seq.push(element);
        }
        Ok(Container::Seq(seq))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Container, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Container>()? {
            map.insert(key, value);
        }
        Ok(Container::Map(map))
    }
}

impl<'de> Deserialize<'de> for Container {
    fn deserialize<D>(deserializer: D) -> Result<Container, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ContainerVisitor)
    }
}
