//! Inline override parsing
//!
//! Overrides supplied without a backing file use a compact grammar:
//! `K:V` becomes `{K: V}`, `K:V0,V1` becomes `{K: [V0, V1]}`, and entries
//! are chained with `;`. Keys may be dotted paths (`a.b:1` sets `b` under
//! `a`). Scalars are coerced by ordered trial parse: integer, then float,
//! then boolean, else string.
//!
//! Callers wanting a richer syntax route the string through a backend
//! instead (e.g. inline JSON via `--atype json`); the two are mutually
//! exclusive per invocation.

use crate::container::{Container, Path};
use crate::error::{Error, Result};

/// Parse an override string into a container tree.
///
/// Duplicate keys keep the last occurrence; empty entries (a trailing `;`)
/// are skipped; a non-empty entry without `:` is a syntax error naming the
/// offending entry.
pub fn parse(input: &str) -> Result<Container> {
    let mut tree = Container::empty_map();

    for entry in input.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let (key, values) = entry
            .split_once(':')
            .ok_or_else(|| Error::ArgumentSyntax(entry.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::ArgumentSyntax(entry.to_string()));
        }

        let path = Path::parse(key)?;
        tree.set(&path, parse_values(values))?;
    }

    Ok(tree)
}

fn parse_values(values: &str) -> Container {
    let parts: Vec<&str> = values.split(',').collect();
    if parts.len() == 1 {
        coerce_scalar(parts[0])
    } else {
        Container::Seq(parts.into_iter().map(coerce_scalar).collect())
    }
}

/// Ordered trial parse: integer, float, boolean, else string. Also used for
/// the value half of `--set PATH=VALUE`.
pub fn coerce_scalar(raw: &str) -> Container {
    let raw = raw.trim();
    if let Ok(i) = raw.parse::<i64>() {
        return Container::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Container::Float(f);
    }
    match raw.to_ascii_lowercase().as_str() {
        "true" => Container::Bool(true),
        "false" => Container::Bool(false),
        _ => Container::Str(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Container)]) -> Container {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_single_entry_scalar() {
        let tree = parse("a:10").expect("parse");
        assert_eq!(tree, map(&[("a", Container::Int(10))]));
    }

    #[test]
    fn test_multiple_entries_with_coercion() {
        let tree = parse("a:10;name:x;d:3,4").expect("parse");
        assert_eq!(
            tree,
            map(&[
                ("a", Container::Int(10)),
                ("name", Container::from("x")),
                ("d", Container::Seq(vec![Container::Int(3), Container::Int(4)])),
            ])
        );
    }

    #[test]
    fn test_coercion_trial_order() {
        assert_eq!(coerce_scalar("42"), Container::Int(42));
        assert_eq!(coerce_scalar("-7"), Container::Int(-7));
        assert_eq!(coerce_scalar("2.5"), Container::Float(2.5));
        assert_eq!(coerce_scalar("true"), Container::Bool(true));
        assert_eq!(coerce_scalar("FALSE"), Container::Bool(false));
        assert_eq!(coerce_scalar("hello"), Container::from("hello"));
    }

    #[test]
    fn test_dotted_key_builds_nested_mapping() {
        let tree = parse("a.b:1;a.c:2").expect("parse");
        assert_eq!(
            tree,
            map(&[(
                "a",
                map(&[("b", Container::Int(1)), ("c", Container::Int(2))])
            )])
        );
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let tree = parse("k:1;k:2").expect("parse");
        assert_eq!(tree, map(&[("k", Container::Int(2))]));
    }

    #[test]
    fn test_trailing_separator_is_tolerated() {
        let tree = parse("a:1;").expect("parse");
        assert_eq!(tree, map(&[("a", Container::Int(1))]));
    }

    #[test]
    fn test_missing_colon_names_the_entry() {
        let err = parse("good:1;bad-entry").unwrap_err();
        assert!(err.to_string().contains("bad-entry"), "got: {err}");
    }

    #[test]
    fn test_empty_key_is_rejected() {
        assert!(parse(":1").is_err());
    }

    #[test]
    fn test_mixed_value_types_in_sequence() {
        let tree = parse("xs:1,2.5,yes,true").expect("parse");
        assert_eq!(
            tree,
            map(&[(
                "xs",
                Container::Seq(vec![
                    Container::Int(1),
                    Container::Float(2.5),
                    Container::from("yes"),
                    Container::Bool(true),
                ])
            )])
        );
    }
}
