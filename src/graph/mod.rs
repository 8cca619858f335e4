//! Graph normalization for the arc diagram.
//!
//! Accepts a `{nodes, links}` document whose links reference nodes either by
//! array position or by id, and produces the canonical id-referenced form
//! with every node carrying `id`, `label` and `group`.

pub mod fields;

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::domain::{GraphDocument, GraphLink, GraphNode, LinkRefKind};
use crate::error::AppError;

pub use fields::{DEFAULT_GROUP, DEFAULT_LINK_TYPE, Field, first_present, scalar_text};

/// A link endpoint whose id is not among the normalized nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRef {
    pub link: usize,
    pub endpoint: &'static str,
    pub id: String,
}

/// Normalizer output plus what was learned about the source along the way.
#[derive(Debug, Clone)]
pub struct NormalizedGraph {
    pub document: GraphDocument,
    pub ref_kind: LinkRefKind,
    pub dangling: Vec<DanglingRef>,
    pub duplicate_ids: Vec<String>,
}

/// Parse and normalize raw graph JSON text.
pub fn normalize_graph(text: &str, strict_links: bool) -> Result<NormalizedGraph, AppError> {
    let raw: Value = serde_json::from_str(text.trim_start_matches('\u{feff}'))
        .map_err(|e| AppError::precondition(format!("Invalid graph JSON: {e}")))?;
    normalize_graph_value(&raw, strict_links)
}

/// Normalize an already parsed graph document.
pub fn normalize_graph_value(raw: &Value, strict_links: bool) -> Result<NormalizedGraph, AppError> {
    let root = raw
        .as_object()
        .ok_or_else(|| AppError::precondition("Graph JSON must be an object with `nodes` and `links` arrays."))?;
    let raw_nodes = required_array(root, "nodes")?;
    let raw_links = required_array(root, "links")?;

    if raw_nodes.is_empty() {
        return Err(AppError::empty("Graph JSON has an empty `nodes` array."));
    }

    let ref_kind = detect_ref_kind(raw_links);
    let nodes = normalize_nodes(raw_nodes, ref_kind)?;
    let links = match ref_kind {
        LinkRefKind::ByIndex => resolve_links_by_index(raw_links, &nodes)?,
        LinkRefKind::ById => resolve_links_by_id(raw_links)?,
    };

    let duplicate_ids = find_duplicate_ids(&nodes);
    for id in &duplicate_ids {
        tracing::warn!(%id, "node id appears more than once");
    }

    let dangling = find_dangling(&nodes, &links);
    if strict_links && !dangling.is_empty() {
        let listed = dangling
            .iter()
            .take(5)
            .map(|d| format!("links[{}].{} = {:?}", d.link, d.endpoint, d.id))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::precondition(format!(
            "{} link endpoint(s) reference unknown node ids: {listed}",
            dangling.len()
        )));
    }
    for d in &dangling {
        tracing::warn!(link = d.link, endpoint = d.endpoint, id = %d.id, "link references unknown node id");
    }

    Ok(NormalizedGraph {
        document: GraphDocument { nodes, links },
        ref_kind,
        dangling,
        duplicate_ids,
    })
}

/// Decide the link shape from the first link's `source`.
///
/// A numeric source means index references; anything else (including an
/// empty `links` array) is treated as id references.
pub fn detect_ref_kind(links: &[Value]) -> LinkRefKind {
    match links.first().and_then(|l| l.get("source")) {
        Some(Value::Number(_)) => LinkRefKind::ByIndex,
        _ => LinkRefKind::ById,
    }
}

/// Pretty-printed JSON text of a normalized document.
pub fn render_json(document: &GraphDocument) -> Result<String, AppError> {
    serde_json::to_string_pretty(document).map_err(|e| AppError::io(format!("Failed to serialize graph JSON: {e}")))
}

fn required_array<'a>(root: &'a Map<String, Value>, key: &str) -> Result<&'a [Value], AppError> {
    match root.get(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(AppError::precondition(format!(
            "Graph JSON field `{key}` must be an array, found {}.",
            json_type_name(other)
        ))),
        None => {
            let found = root.keys().map(|k| format!("`{k}`")).collect::<Vec<_>>().join(", ");
            Err(AppError::precondition(format!(
                "Graph JSON is missing the `{key}` array. Found keys: [{found}]"
            )))
        }
    }
}

fn normalize_nodes(raw_nodes: &[Value], kind: LinkRefKind) -> Result<Vec<GraphNode>, AppError> {
    raw_nodes
        .iter()
        .enumerate()
        .map(|(idx, raw)| normalize_node(idx, raw, kind))
        .collect()
}

fn normalize_node(idx: usize, raw: &Value, kind: LinkRefKind) -> Result<GraphNode, AppError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| AppError::precondition(format!("nodes[{idx}] is not an object.")))?;

    let id = first_present(obj, Field::NodeId.fallback_keys(kind)).ok_or_else(|| {
        let keys = Field::NodeId.fallback_keys(kind).join("` or `");
        AppError::precondition(format!("nodes[{idx}] has no usable `{keys}`."))
    })?;
    let label = first_present(obj, Field::NodeLabel.fallback_keys(kind)).unwrap_or_else(|| id.clone());
    let group =
        first_present(obj, Field::NodeGroup.fallback_keys(kind)).unwrap_or_else(|| DEFAULT_GROUP.to_string());

    Ok(GraphNode { id, label, group })
}

fn link_object(idx: usize, raw: &Value) -> Result<&Map<String, Value>, AppError> {
    raw.as_object()
        .ok_or_else(|| AppError::precondition(format!("links[{idx}] is not an object.")))
}

fn link_type(obj: &Map<String, Value>, kind: LinkRefKind) -> String {
    first_present(obj, Field::LinkType.fallback_keys(kind)).unwrap_or_else(|| DEFAULT_LINK_TYPE.to_string())
}

fn resolve_links_by_index(raw_links: &[Value], nodes: &[GraphNode]) -> Result<Vec<GraphLink>, AppError> {
    let endpoint = |idx: usize, obj: &Map<String, Value>, key: &str| -> Result<String, AppError> {
        let value = obj.get(key).unwrap_or(&Value::Null);
        let pos = as_index(value).ok_or_else(|| {
            AppError::precondition(format!(
                "links[{idx}].{key} must be a node index (links[0] uses indexes), found {value}."
            ))
        })?;
        nodes.get(pos).map(|n| n.id.clone()).ok_or_else(|| {
            AppError::precondition(format!(
                "links[{idx}].{key} = {pos} is out of range for {} node(s).",
                nodes.len()
            ))
        })
    };

    raw_links
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let obj = link_object(idx, raw)?;
            Ok(GraphLink {
                source: endpoint(idx, obj, "source")?,
                target: endpoint(idx, obj, "target")?,
                kind: link_type(obj, LinkRefKind::ByIndex),
            })
        })
        .collect()
}

fn resolve_links_by_id(raw_links: &[Value]) -> Result<Vec<GraphLink>, AppError> {
    let endpoint = |idx: usize, obj: &Map<String, Value>, key: &str| -> Result<String, AppError> {
        obj.get(key)
            .and_then(scalar_text)
            .ok_or_else(|| AppError::precondition(format!("links[{idx}] has no usable `{key}`.")))
    };

    raw_links
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let obj = link_object(idx, raw)?;
            Ok(GraphLink {
                source: endpoint(idx, obj, "source")?,
                target: endpoint(idx, obj, "target")?,
                kind: link_type(obj, LinkRefKind::ById),
            })
        })
        .collect()
}

fn as_index(v: &Value) -> Option<usize> {
    if let Some(u) = v.as_u64() {
        return usize::try_from(u).ok();
    }
    // `1.0` is a valid position too.
    let f = v.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64 {
        Some(f as usize)
    } else {
        None
    }
}

fn find_duplicate_ids(nodes: &[GraphNode]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dups = Vec::new();
    for n in nodes {
        if !seen.insert(n.id.as_str()) && !dups.contains(&n.id) {
            dups.push(n.id.clone());
        }
    }
    dups
}

fn find_dangling(nodes: &[GraphNode], links: &[GraphLink]) -> Vec<DanglingRef> {
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut out = Vec::new();
    for (idx, l) in links.iter().enumerate() {
        for (endpoint, id) in [("source", &l.source), ("target", &l.target)] {
            if !ids.contains(id.as_str()) {
                out.push(DanglingRef {
                    link: idx,
                    endpoint,
                    id: id.clone(),
                });
            }
        }
    }
    out
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
