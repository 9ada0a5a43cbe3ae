//! CSS selector derivation from icon identifiers.
//!
//! An icon id may carry a pseudo-class segment after the configured
//! separator (`button~hover` → `.icon-button:hover`). Derivation is a
//! two-pass affair: first collect which base segments have pseudo
//! variants anywhere in the set, then derive per icon, so that every base
//! class whose siblings have pseudo variants also gets a synthesized
//! `:regular` alias.

use std::collections::BTreeMap;

use crate::types::Selector;

/// Pre-pass over the full sorted id set: base segment → whether any icon
/// with that base carries a pseudo variant.
pub fn pseudo_map<'a, I>(ids: I, separator: &str) -> BTreeMap<String, bool>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut map = BTreeMap::new();
    for id in ids {
        let mut parts = id.splitn(2, separator);
        let base = parts.next().unwrap_or(id).to_string();
        let has_pseudo = parts.next().is_some();
        let entry = map.entry(base).or_insert(false);
        *entry = *entry || has_pseudo;
    }
    map
}

/// Derive the selector descriptors for one icon.
///
/// `has_pseudo_sibling` comes from [`pseudo_map`] for this icon's base
/// segment. Icons with a pseudo segment, and plain icons whose base has
/// pseudo siblings, get two descriptors; everything else gets one. The
/// `expression` form escapes the pseudo separator for stylesheet use, the
/// `raw` form does not.
pub fn derive(id: &str, separator: &str, prefix: &str, has_pseudo_sibling: bool) -> Vec<Selector> {
    let segments: Vec<&str> = id.split(separator).collect();
    let joined = segments.join(":");

    if !has_pseudo_sibling && segments.len() == 1 {
        return vec![Selector {
            expression: format!("{}-{}", prefix, joined),
            raw: format!("{}-{}", prefix, joined),
            first: true,
            last: true,
        }];
    }

    let (escaped, raw_alias) = if segments.len() > 1 {
        (segments.join("\\:"), joined.clone())
    } else {
        (
            format!("{}\\:regular", segments[0]),
            format!("{}:regular", segments[0]),
        )
    };

    vec![
        Selector {
            expression: format!("{}-{}", prefix, joined),
            raw: format!("{}-{}", prefix, joined),
            first: true,
            last: false,
        },
        Selector {
            expression: format!("{}-{}", prefix, escaped),
            raw: format!("{}-{}", prefix, raw_alias),
            first: false,
            last: true,
        },
    ]
}

/// Derive the dimension-rule selectors for one icon.
///
/// Plain ids get a single `-dims` class; pseudo ids get the compound
/// pseudo form plus an escaped single-class alias.
pub fn dimension_selectors(id: &str, separator: &str, prefix: &str) -> Vec<Selector> {
    let segments: Vec<&str> = id.split(separator).collect();

    if segments.len() == 1 {
        return vec![Selector {
            expression: format!("{}-{}-dims", prefix, segments[0]),
            raw: format!("{}-{}-dims", prefix, segments[0]),
            first: true,
            last: true,
        }];
    }

    vec![
        Selector {
            expression: format!("{}-{}-dims:{}", prefix, segments[0], segments[1]),
            raw: format!("{}-{}-dims:{}", prefix, segments[0], segments[1]),
            first: true,
            last: false,
        },
        Selector {
            expression: format!("{}-{}\\:{}-dims", prefix, segments[0], segments[1]),
            raw: format!("{}-{}:{}-dims", prefix, segments[0], segments[1]),
            first: false,
            last: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudo_map_flags_bases_with_variants() {
        let map = pseudo_map(["btn", "btn~hover", "logo"], "~");
        assert_eq!(map.get("btn"), Some(&true));
        assert_eq!(map.get("logo"), Some(&false));
    }

    #[test]
    fn test_pseudo_map_variant_without_base() {
        let map = pseudo_map(["btn~hover"], "~");
        assert_eq!(map.get("btn"), Some(&true));
    }

    #[test]
    fn test_plain_icon_yields_one_selector() {
        let selectors = derive("logo", "~", "icon", false);
        assert_eq!(
            selectors,
            vec![Selector {
                expression: "icon-logo".to_string(),
                raw: "icon-logo".to_string(),
                first: true,
                last: true,
            }]
        );
    }

    #[test]
    fn test_pseudo_icon_yields_compound_and_escaped_forms() {
        let selectors = derive("btn~hover", "~", "icon", true);
        assert_eq!(selectors.len(), 2);
        assert_eq!(selectors[0].expression, "icon-btn:hover");
        assert_eq!(selectors[0].raw, "icon-btn:hover");
        assert!(selectors[0].first && !selectors[0].last);
        assert_eq!(selectors[1].expression, "icon-btn\\:hover");
        assert_eq!(selectors[1].raw, "icon-btn:hover");
        assert!(!selectors[1].first && selectors[1].last);
    }

    #[test]
    fn test_base_with_pseudo_sibling_gets_regular_alias() {
        let selectors = derive("btn", "~", "icon", true);
        assert_eq!(selectors.len(), 2);
        assert_eq!(selectors[0].expression, "icon-btn");
        assert_eq!(selectors[1].expression, "icon-btn\\:regular");
        assert_eq!(selectors[1].raw, "icon-btn:regular");
    }

    #[test]
    fn test_sibling_pair_property() {
        // Every base with any pseudo sibling yields two descriptors,
        // bases without yield exactly one.
        let ids = ["btn", "btn~hover", "logo"];
        let map = pseudo_map(ids, "~");
        for id in ids {
            let base = id.split('~').next().unwrap();
            let selectors = derive(id, "~", "icon", map[base]);
            let expected = if map[base] { 2 } else { 1 };
            assert_eq!(selectors.len(), expected, "id={}", id);
        }
    }

    #[test]
    fn test_dimension_selectors_plain() {
        let selectors = dimension_selectors("logo", "~", "icon");
        assert_eq!(selectors.len(), 1);
        assert_eq!(selectors[0].expression, "icon-logo-dims");
    }

    #[test]
    fn test_dimension_selectors_pseudo() {
        let selectors = dimension_selectors("btn~hover", "~", "icon");
        assert_eq!(selectors.len(), 2);
        assert_eq!(selectors[0].expression, "icon-btn-dims:hover");
        assert_eq!(selectors[1].expression, "icon-btn\\:hover-dims");
        assert_eq!(selectors[1].raw, "icon-btn:hover-dims");
    }

    #[test]
    fn test_custom_separator() {
        let selectors = derive("tab--active", "--", "ui", true);
        assert_eq!(selectors[0].expression, "ui-tab:active");
    }
}
