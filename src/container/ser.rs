//! Serde serialization for [`Container`]

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::container::Container;

impl Serialize for Container {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Container::Null => serializer.serialize_unit(),
            Container::Bool(b) => serializer.serialize_bool(*b),
            Container::Int(i) => serializer.serialize_i64(*i),
            Container::Float(f) => serializer.serialize_f64(*f),
            Container::Str(s) => serializer.serialize_str(s),
            Container::Seq(seq) => {
                let mut state = serializer.serialize_seq(Some(seq.len()))?;
                for item in seq {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Container::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
        }
    }
}
