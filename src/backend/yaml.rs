//! YAML backend (serde_yaml)

use crate::backend::Backend;
use crate::container::Container;
use crate::error::{Error, Result};

pub struct YamlBackend;

impl Backend for YamlBackend {
    fn id(&self) -> &'static str {
        "yaml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn parse(&self, bytes: &[u8]) -> Result<Container> {
        serde_yaml::from_slice(bytes)
            .map_err(|e| Error::Parse { format: "yaml".to_string(), message: e.to_string() })
    }

    fn serialize(&self, tree: &Container) -> Result<Vec<u8>> {
        let text = serde_yaml::to_string(tree)
            .map_err(|e| Error::Serialize { format: "yaml".to_string(), message: e.to_string() })?;
        Ok(text.into_bytes())
    }
}
