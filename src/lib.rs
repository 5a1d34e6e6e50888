//! confmix: load, merge and rewrite configuration across formats
//!
//! The core is format-agnostic: every supported format parses into the
//! common [`Container`] tree, trees combine under a named
//! [`MergeStrategy`], and dotted [`Path`]s address values inside the
//! result. Concrete codecs live behind the [`backend::Backend`] trait and
//! are looked up through an explicit [`backend::Registry`].

pub mod backend;
pub mod cli;
pub mod container;
pub mod error;
pub mod merge;
pub mod overrides;

pub use backend::{Backend, Registry};
pub use container::{Container, Path};
pub use error::{Error, Result};
pub use merge::{merge, merge_all, MergeStrategy};
