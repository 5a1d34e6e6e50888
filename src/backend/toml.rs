//! TOML backend (toml)
//!
//! TOML is stricter than the common tree type: the top level must be a
//! mapping and there is no null. Both limitations surface as serialize
//! errors rather than being papered over.

use crate::backend::Backend;
use crate::container::Container;
use crate::error::{Error, Result};

pub struct TomlBackend;

fn serialize_error(message: impl Into<String>) -> Error {
    Error::Serialize { format: "toml".to_string(), message: message.into() }
}

impl Backend for TomlBackend {
    fn id(&self) -> &'static str {
        "toml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["toml"]
    }

    fn parse(&self, bytes: &[u8]) -> Result<Container> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::Parse { format: "toml".to_string(), message: e.to_string() })?;
        ::toml::from_str(text)
            .map_err(|e| Error::Parse { format: "toml".to_string(), message: e.to_string() })
    }

    fn serialize(&self, tree: &Container) -> Result<Vec<u8>> {
        if !tree.is_map() {
            return Err(serialize_error(format!(
                "top-level value must be a mapping, got a {}",
                tree.type_name()
            )));
        }
        let text =
            ::toml::to_string_pretty(tree).map_err(|e| serialize_error(e.to_string()))?;
        Ok(text.into_bytes())
    }
}
