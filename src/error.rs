//! Error taxonomy for the loading and merging engine
//!
//! Every failure the core can produce is a typed variant here; nothing is
//! silently defaulted. The CLI layer wraps these in `anyhow` at the process
//! boundary and maps any error to a non-zero exit code.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No backend is registered for the requested type or file extension.
    #[error("unknown config type: {0}")]
    UnknownFormat(String),

    /// The format could not be determined at all (no explicit type given and
    /// the path carries no extension to detect from).
    #[error("cannot detect config type for '{}': no extension and no explicit type", .0.display())]
    AmbiguousFormat(PathBuf),

    /// A backend identifier was registered twice. Registry misconfiguration,
    /// fatal at startup.
    #[error("config type '{0}' is already registered")]
    DuplicateFormat(String),

    /// The backend could not parse the input bytes.
    #[error("failed to parse {format} input: {message}")]
    Parse { format: String, message: String },

    /// The container holds a value the output format cannot represent.
    #[error("cannot serialize to {format}: {message}")]
    Serialize { format: String, message: String },

    /// Malformed inline override entry (the `K:V;K2:V2,V3` grammar).
    #[error("malformed override entry '{0}': expected KEY:VALUE")]
    ArgumentSyntax(String),

    /// A dotted path does not fit the shape of the tree it is applied to.
    #[error("path error at '{path}': {message}")]
    Path { path: String, message: String },

    /// An input file does not exist and missing sources were not ignored.
    #[error("config source not found: {}", .0.display())]
    SourceNotFound(PathBuf),
}

impl Error {
    pub(crate) fn path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Path { path: path.into(), message: message.into() }
    }
}
