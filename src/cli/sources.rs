//! Input source enumeration
//!
//! Expands glob patterns and filters missing files before anything reaches
//! the core, which only ever sees an ordered list of resolved paths.
//! Pattern matches are sorted so merge order is deterministic.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use globset::Glob;
use walkdir::WalkDir;

use crate::error::Error;

/// Resolve the raw CLI inputs to an ordered list of existing files.
///
/// A literal path that does not exist, or a pattern that matches nothing, is
/// an error unless `ignore_missing` is set, in which case it is skipped with
/// a debug log.
pub fn expand(inputs: &[String], ignore_missing: bool) -> Result<Vec<PathBuf>> {
    let mut resolved = Vec::new();

    for raw in inputs {
        if is_pattern(raw) {
            let matches = expand_pattern(raw)?;
            if matches.is_empty() {
                if !ignore_missing {
                    return Err(Error::SourceNotFound(PathBuf::from(raw)).into());
                }
                tracing::debug!("pattern '{raw}' matched nothing, skipping");
            }
            resolved.extend(matches);
        } else {
            let path = PathBuf::from(raw);
            if path.is_file() {
                resolved.push(path);
            } else if ignore_missing {
                tracing::debug!("input {} does not exist, skipping", path.display());
            } else {
                return Err(Error::SourceNotFound(path).into());
            }
        }
    }

    Ok(resolved)
}

fn is_pattern(raw: &str) -> bool {
    raw.contains(['*', '?', '['])
}

fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Glob::new(pattern)
        .with_context(|| format!("invalid input pattern '{pattern}'"))?
        .compile_matcher();

    let root = literal_prefix(Path::new(pattern));
    let mut matches: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        // Walking "." yields "./x" paths; match with the prefix stripped so
        // a bare "*.json" still applies.
        .filter(|path| {
            matcher.is_match(path)
                || path.strip_prefix(".").map(|p| matcher.is_match(p)).unwrap_or(false)
        })
        .collect();

    matches.sort();
    Ok(matches)
}

/// The longest leading part of the pattern free of glob metacharacters,
/// used as the directory to walk. Falls back to the current directory.
fn literal_prefix(pattern: &Path) -> PathBuf {
    let mut prefix = PathBuf::new();
    for component in pattern.components() {
        match component {
            Component::Normal(part) if is_pattern(&part.to_string_lossy()) => break,
            other => prefix.push(other.as_os_str()),
        }
    }
    // Drop a trailing literal file name so we walk its directory.
    if prefix == pattern {
        prefix.pop();
    }
    if prefix.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_literal_paths_pass_through() {
        let tmp = TempDir::new().expect("tmp");
        let a = tmp.path().join("a.json");
        fs::write(&a, "{}").expect("write");

        let resolved =
            expand(&[a.to_string_lossy().to_string()], false).expect("expand");
        assert_eq!(resolved, vec![a]);
    }

    #[test]
    fn test_missing_literal_path_is_an_error() {
        let err = expand(&["definitely/not/here.json".to_string()], false).unwrap_err();
        assert!(err.to_string().contains("not found"), "got: {err}");
    }

    #[test]
    fn test_missing_literal_path_skipped_when_ignored() {
        let resolved = expand(&["definitely/not/here.json".to_string()], true).expect("expand");
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_pattern_expansion_is_sorted() {
        let tmp = TempDir::new().expect("tmp");
        for name in ["b.json", "a.json", "c.yaml"] {
            fs::write(tmp.path().join(name), "{}").expect("write");
        }

        let pattern = tmp.path().join("*.json").to_string_lossy().to_string();
        let resolved = expand(&[pattern], false).expect("expand");
        assert_eq!(
            resolved,
            vec![tmp.path().join("a.json"), tmp.path().join("b.json")]
        );
    }

    #[test]
    fn test_unmatched_pattern_is_an_error_unless_ignored() {
        let tmp = TempDir::new().expect("tmp");
        let pattern = tmp.path().join("*.json").to_string_lossy().to_string();

        assert!(expand(&[pattern.clone()], false).is_err());
        assert!(expand(&[pattern], true).expect("expand").is_empty());
    }

    #[test]
    fn test_order_of_inputs_is_preserved() {
        let tmp = TempDir::new().expect("tmp");
        let a = tmp.path().join("a.json");
        let b = tmp.path().join("b.json");
        fs::write(&a, "{}").expect("write");
        fs::write(&b, "{}").expect("write");

        let resolved = expand(
            &[b.to_string_lossy().to_string(), a.to_string_lossy().to_string()],
            false,
        )
        .expect("expand");
        assert_eq!(resolved, vec![b, a]);
    }
}
