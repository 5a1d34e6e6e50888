//! Combining configuration trees under a named strategy
//!
//! `merge` is a pure function over two trees; folding many sources is a
//! left-to-right reduction with the running result as the base. Overlay
//! values take precedence except under `NoReplace`.

use clap::ValueEnum;
use indexmap::IndexMap;

use crate::container::Container;

/// How two containers combine when overlaid. The CLI names match the
/// original tool's strategy identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MergeStrategy {
    /// Overlay wholly replaces base at any conflicting path.
    #[value(name = "replace")]
    Replace,
    /// Base wins on conflict; overlay only fills absent keys and paths.
    #[value(name = "noreplace")]
    NoReplace,
    /// Recursive mapping merge; conflicting sequences are replaced.
    #[default]
    #[value(name = "merge_dicts")]
    Dicts,
    /// Recursive mapping merge; conflicting sequences are concatenated.
    #[value(name = "merge_lists")]
    Lists,
}

impl MergeStrategy {
    /// All strategy names, in the order they are documented.
    pub fn names() -> [&'static str; 4] {
        ["replace", "noreplace", "merge_dicts", "merge_lists"]
    }
}

/// Merge `overlay` onto `base`, returning a new tree. Inputs are untouched;
/// there is no partially-merged intermediate state observable on any path.
///
/// A top-level shape mismatch (mapping vs sequence vs scalar) always
/// resolves as `Replace`, since structural merge is undefined across shapes.
pub fn merge(base: &Container, overlay: &Container, strategy: MergeStrategy) -> Container {
    match strategy {
        MergeStrategy::Replace => overlay.clone(),
        MergeStrategy::NoReplace => merge_no_replace(base, overlay),
        MergeStrategy::Dicts => merge_recursive(base, overlay, false),
        MergeStrategy::Lists => merge_recursive(base, overlay, true),
    }
}

/// Fold `sources` left to right, the running result serving as the base for
/// the next overlay. Callers must supply at least one source.
pub fn merge_all<I>(sources: I, strategy: MergeStrategy) -> Option<Container>
where
    I: IntoIterator<Item = Container>,
{
    let mut iter = sources.into_iter();
    let first = iter.next()?;
    Some(iter.fold(first, |acc, next| merge(&acc, &next, strategy)))
}

fn merge_no_replace(base: &Container, overlay: &Container) -> Container {
    match (base, overlay) {
        (Container::Map(base_map), Container::Map(overlay_map)) => {
            let mut merged: IndexMap<String, Container> = base_map.clone();
            for (key, overlay_value) in overlay_map {
                match merged.get_mut(key) {
                    // Recurse so overlay can still fill nested paths absent
                    // from base while base wins every direct conflict.
                    Some(base_value) => {
                        if base_value.is_map() && overlay_value.is_map() {
                            *base_value = merge_no_replace(base_value, overlay_value);
                        }
                    }
                    None => {
                        merged.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
            Container::Map(merged)
        }
        // Same structural kind: conflict, base wins.
        (Container::Seq(_), Container::Seq(_)) => base.clone(),
        (base_value, overlay_value)
            if !base_value.is_map()
                && !base_value.is_seq()
                && !overlay_value.is_map()
                && !overlay_value.is_seq() =>
        {
            base_value.clone()
        }
        // Shape mismatch: structural merge is undefined, overlay wins
        // regardless of strategy.
        (_, _) => overlay.clone(),
    }
}

fn merge_recursive(base: &Container, overlay: &Container, concat_seqs: bool) -> Container {
    match (base, overlay) {
        (Container::Map(base_map), Container::Map(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let combined = match merged.get(key) {
                    Some(base_value) => merge_recursive(base_value, overlay_value, concat_seqs),
                    None => overlay_value.clone(),
                };
                merged.insert(key.clone(), combined);
            }
            Container::Map(merged)
        }
        (Container::Seq(base_seq), Container::Seq(overlay_seq)) if concat_seqs => {
            let mut merged = base_seq.clone();
            merged.extend(overlay_seq.iter().cloned());
            Container::Seq(merged)
        }
        // Sequence vs sequence without concat, scalar vs scalar, and any
        // shape mismatch: overlay wins.
        (_, _) => overlay.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;

    fn map(entries: &[(&str, Container)]) -> Container {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn ints(values: &[i64]) -> Container {
        Container::Seq(values.iter().copied().map(Container::Int).collect())
    }

    #[test]
    fn test_merge_dicts_combines_by_key() {
        let base = map(&[("a", Container::Int(1)), ("b", Container::Int(2))]);
        let overlay = map(&[("b", Container::Int(3)), ("c", Container::Int(4))]);
        let merged = merge(&base, &overlay, MergeStrategy::Dicts);
        assert_eq!(
            merged,
            map(&[
                ("a", Container::Int(1)),
                ("b", Container::Int(3)),
                ("c", Container::Int(4))
            ])
        );
    }

    #[test]
    fn test_no_replace_keeps_base_values() {
        let base = map(&[("a", Container::Int(1)), ("b", Container::Int(2))]);
        let overlay = map(&[("b", Container::Int(3)), ("c", Container::Int(4))]);
        let merged = merge(&base, &overlay, MergeStrategy::NoReplace);
        assert_eq!(
            merged,
            map(&[
                ("a", Container::Int(1)),
                ("b", Container::Int(2)),
                ("c", Container::Int(4))
            ])
        );
    }

    #[test]
    fn test_no_replace_fills_nested_absent_paths() {
        let base = map(&[("outer", map(&[("kept", Container::Int(1))]))]);
        let overlay = map(&[(
            "outer",
            map(&[("kept", Container::Int(9)), ("added", Container::Int(2))]),
        )]);
        let merged = merge(&base, &overlay, MergeStrategy::NoReplace);
        assert_eq!(
            merged,
            map(&[(
                "outer",
                map(&[("kept", Container::Int(1)), ("added", Container::Int(2))])
            )])
        );
    }

    #[test]
    fn test_replace_discards_base() {
        let base = map(&[("a", Container::Int(1)), ("b", Container::Int(2))]);
        let overlay = map(&[("b", Container::Int(3)), ("c", Container::Int(4))]);
        let merged = merge(&base, &overlay, MergeStrategy::Replace);
        assert_eq!(merged, overlay);
    }

    #[test]
    fn test_merge_lists_concatenates_sequences() {
        let base = map(&[("d", ints(&[1, 2]))]);
        let overlay = map(&[("d", ints(&[3, 4]))]);
        let merged = merge(&base, &overlay, MergeStrategy::Lists);
        assert_eq!(merged, map(&[("d", ints(&[1, 2, 3, 4]))]));
    }

    #[test]
    fn test_merge_dicts_replaces_sequences() {
        let base = map(&[("d", ints(&[1, 2]))]);
        let overlay = map(&[("d", ints(&[3, 4]))]);
        for strategy in [MergeStrategy::Dicts, MergeStrategy::Replace] {
            let merged = merge(&base, &overlay, strategy);
            assert_eq!(merged, map(&[("d", ints(&[3, 4]))]), "strategy {strategy:?}");
        }
    }

    #[test]
    fn test_merge_dicts_recurses_into_nested_mappings() {
        let base = map(&[("svc", map(&[("host", Container::from("a")), ("port", Container::Int(1))]))]);
        let overlay = map(&[("svc", map(&[("port", Container::Int(2))]))]);
        let merged = merge(&base, &overlay, MergeStrategy::Dicts);
        assert_eq!(
            merged,
            map(&[(
                "svc",
                map(&[("host", Container::from("a")), ("port", Container::Int(2))])
            )])
        );
    }

    #[test]
    fn test_shape_mismatch_takes_overlay() {
        let base = map(&[("x", Container::Int(1))]);
        let overlay = ints(&[1, 2]);
        for strategy in [
            MergeStrategy::Replace,
            MergeStrategy::Dicts,
            MergeStrategy::Lists,
        ] {
            assert_eq!(merge(&base, &overlay, strategy), overlay, "strategy {strategy:?}");
        }
    }

    #[test]
    fn test_fold_matches_pairwise_merge() {
        let a = map(&[("a", Container::Int(1)), ("shared", Container::Int(1))]);
        let b = map(&[("b", Container::Int(2)), ("shared", Container::Int(2))]);
        let c = map(&[("c", Container::Int(3)), ("shared", Container::Int(3))]);

        for strategy in [
            MergeStrategy::Replace,
            MergeStrategy::NoReplace,
            MergeStrategy::Dicts,
            MergeStrategy::Lists,
        ] {
            let folded =
                merge_all([a.clone(), b.clone(), c.clone()], strategy).expect("non-empty");
            let pairwise = merge(&merge(&a, &b, strategy), &c, strategy);
            assert_eq!(folded, pairwise, "strategy {strategy:?}");
        }
    }

    #[test]
    fn test_merge_with_self_is_idempotent() {
        let tree = map(&[
            ("a", Container::Int(1)),
            ("b", map(&[("b", ints(&[1, 2])), ("c", Container::from("C"))])),
        ]);
        for strategy in [
            MergeStrategy::Replace,
            MergeStrategy::NoReplace,
            MergeStrategy::Dicts,
        ] {
            assert_eq!(merge(&tree, &tree, strategy), tree, "strategy {strategy:?}");
        }

        // merge_lists concatenates sequences, so self-merge is only
        // idempotent for sequence-free trees.
        let flat = map(&[("a", Container::Int(1)), ("b", map(&[("c", Container::from("C"))]))]);
        assert_eq!(merge(&flat, &flat, MergeStrategy::Lists), flat);
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let base = map(&[("a", Container::Int(1))]);
        let overlay = map(&[("a", Container::Int(2))]);
        let base_before = base.clone();
        let overlay_before = overlay.clone();
        let _ = merge(&base, &overlay, MergeStrategy::Dicts);
        assert_eq!(base, base_before);
        assert_eq!(overlay, overlay_before);
    }

    #[test]
    fn test_merge_all_empty_is_none() {
        assert!(merge_all(std::iter::empty(), MergeStrategy::Dicts).is_none());
    }
}
