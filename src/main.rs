//! confmix: load, merge and rewrite configuration across formats
//!
//! Reads any number of JSON/TOML/YAML sources, merges them under a chosen
//! strategy, applies inline overrides and path-addressed edits, and writes
//! the result in any supported format.

use anyhow::Result;

fn main() -> Result<()> {
    confmix::cli::run()
}
