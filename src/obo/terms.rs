//! GO term helpers: identifier and predicate normalization, namespace and
//! subset lookup on node metadata.

use std::sync::LazyLock;

use regex::Regex;

use crate::obo::OboMeta;

// Matches `.../GO_0003677` or `GO:0003677` endings.
static GO_IRI_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:/|#)?GO[_:](\d+)$").unwrap());

/// Short predicate names and the IRI/CURIE suffixes that map to them.
///
/// Checked top to bottom; the signed `regulates` variants come before the
/// plain one because they share its suffix.
const PREDICATES: &[(&str, &[&str])] = &[
    ("is_a", &["is_a"]),
    ("part_of", &["BFO_0000050", "BFO:0000050", "part_of"]),
    ("has_part", &["BFO_0000051", "BFO:0000051", "has_part"]),
    ("positively_regulates", &["RO_0002213", "RO:0002213", "positively_regulates"]),
    ("negatively_regulates", &["RO_0002212", "RO:0002212", "negatively_regulates"]),
    ("regulates", &["RO_0002211", "RO:0002211", "regulates"]),
];

/// `http://purl.obolibrary.org/obo/GO_0003677` or `GO:0003677` become
/// `GO:0003677`; other non-empty ids pass through.
pub fn norm_go_id(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match GO_IRI_RE.captures(raw) {
        Some(caps) => Some(format!("GO:{}", &caps[1])),
        None => Some(raw.to_string()),
    }
}

/// Short name for a GO/RO/BFO predicate IRI, CURIE or label.
pub fn pred_name(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    for (name, suffixes) in PREDICATES {
        if suffixes.iter().any(|s| raw.ends_with(s)) {
            return (*name).to_string();
        }
    }
    // Unknown predicate: keep its trailing path/fragment token.
    let tail = raw.rsplit('/').next().unwrap_or(raw);
    tail.rsplit('#').next().unwrap_or(tail).to_string()
}

/// OBO namespace from `hasOBONamespace` property values, else `meta.namespace`.
pub fn namespace_of(meta: Option<&OboMeta>) -> Option<String> {
    let meta = meta?;
    meta.basic_property_values
        .iter()
        .find(|pv| pv.pred.as_deref().is_some_and(|p| p.ends_with("hasOBONamespace")))
        .and_then(|pv| pv.val.clone())
        .or_else(|| meta.namespace.clone())
}

/// True when one of `meta.subsets` ends with `suffix`.
pub fn in_subset(meta: Option<&OboMeta>, suffix: &str) -> bool {
    meta.is_some_and(|m| {
        m.subsets
            .iter()
            .any(|s| s.as_str().is_some_and(|s| s.ends_with(suffix)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obo::PropertyValue;
    use serde_json::json;

    #[test]
    fn go_ids_are_curies() {
        assert_eq!(
            norm_go_id("http://purl.obolibrary.org/obo/GO_0003677").as_deref(),
            Some("GO:0003677")
        );
        assert_eq!(norm_go_id("GO:0008150").as_deref(), Some("GO:0008150"));
        assert_eq!(norm_go_id("http://x/obo/CHEBI_1").as_deref(), Some("http://x/obo/CHEBI_1"));
        assert_eq!(norm_go_id("  "), None);
    }

    #[test]
    fn predicates_shorten() {
        assert_eq!(pred_name("is_a"), "is_a");
        assert_eq!(pred_name("http://purl.obolibrary.org/obo/BFO_0000050"), "part_of");
        assert_eq!(pred_name("BFO:0000051"), "has_part");
        assert_eq!(pred_name("http://purl.obolibrary.org/obo/RO_0002211"), "regulates");
        assert_eq!(pred_name("http://purl.obolibrary.org/obo/RO_0002213"), "positively_regulates");
        assert_eq!(pred_name("negatively_regulates"), "negatively_regulates");
        assert_eq!(pred_name("http://example.org/rel#occurs_in"), "occurs_in");
        assert_eq!(pred_name(""), "");
    }

    #[test]
    fn namespace_prefers_property_values() {
        let meta = OboMeta {
            basic_property_values: vec![PropertyValue {
                pred: Some("http://www.geneontology.org/formats/oboInOwl#hasOBONamespace".to_string()),
                val: Some("biological_process".to_string()),
            }],
            subsets: vec![],
            namespace: Some("other".to_string()),
        };
        assert_eq!(namespace_of(Some(&meta)).as_deref(), Some("biological_process"));

        let meta = OboMeta {
            namespace: Some("cellular_component".to_string()),
            ..OboMeta::default()
        };
        assert_eq!(namespace_of(Some(&meta)).as_deref(), Some("cellular_component"));
        assert_eq!(namespace_of(None), None);
    }

    #[test]
    fn subset_membership_by_suffix() {
        let meta = OboMeta {
            subsets: vec![json!("http://purl.obolibrary.org/obo/go#goslim_drosophila"), json!(3)],
            ..OboMeta::default()
        };
        assert!(in_subset(Some(&meta), "goslim_drosophila"));
        assert!(!in_subset(Some(&meta), "goslim_yeast"));
        assert!(!in_subset(None, "goslim_drosophila"));
    }
}
