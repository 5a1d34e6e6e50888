//! JSON backend (serde_json)

use crate::backend::Backend;
use crate::container::Container;
use crate::error::{Error, Result};

pub struct JsonBackend;

impl Backend for JsonBackend {
    fn id(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn parse(&self, bytes: &[u8]) -> Result<Container> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::Parse { format: "json".to_string(), message: e.to_string() })
    }

    fn serialize(&self, tree: &Container) -> Result<Vec<u8>> {
        let mut out = serde_json::to_vec_pretty(tree)
            .map_err(|e| Error::Serialize { format: "json".to_string(), message: e.to_string() })?;
        out.push(b'\n');
        Ok(out)
    }
}
