//! GO dataset builder.
//!
//! Reads a GO OBO-Graphs JSON export, keeps a slim subset of terms and the
//! hierarchical edges between them, orders the terms topologically and
//! assigns depths. The resulting datasets feed the arc diagram (through the
//! graph normalizer) and a Sankey view.

pub mod export;
pub mod order;
pub mod terms;

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::domain::OboConfig;
use crate::error::AppError;
use crate::graph::first_present;

pub use export::{ArcDocument, SankeyDocument};
pub use order::{compute_depths, topo_order};
pub use terms::{in_subset, namespace_of, norm_go_id, pred_name};

const SUBJECT_KEYS: &[&str] = &["subj", "sub", "subject"];
const OBJECT_KEYS: &[&str] = &["obj", "object"];
const PREDICATE_KEYS: &[&str] = &["pred", "predicate", "pred_iri", "pred_curie"];

/// Top level of an OBO-Graphs JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OboDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub graphs: Vec<OboGraph>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OboGraph {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nodes: Vec<OboGraphNode>,
    /// Edge objects stay loosely typed: exporters disagree on the key names.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub edges: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OboGraphNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub lbl: Option<String>,
    #[serde(default)]
    pub meta: Option<OboMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OboMeta {
    #[serde(default, rename = "basicPropertyValues", deserialize_with = "null_as_empty")]
    pub basic_property_values: Vec<PropertyValue>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subsets: Vec<Value>,
    #[serde(default)]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyValue {
    #[serde(default)]
    pub pred: Option<String>,
    #[serde(default)]
    pub val: Option<String>,
}

/// Exporters write `null` for empty lists as often as they omit them.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A kept GO term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OboNode {
    pub id: String,
    pub label: String,
    pub namespace: Option<String>,
}

/// A kept hierarchical edge, pointing from child to parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OboEdge {
    pub child: String,
    pub parent: String,
    pub predicate: String,
}

/// Terms and edges that survived the filters.
#[derive(Debug, Clone, Default)]
pub struct OboSubset {
    /// Kept terms in first-seen order.
    pub nodes: Vec<OboNode>,
    index: HashMap<String, usize>,
    pub edges: Vec<OboEdge>,
    /// Terms without a kept parent edge.
    pub roots: Vec<String>,
}

impl OboSubset {
    pub fn get(&self, id: &str) -> Option<&OboNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Insert, or replace in place when the id was already kept.
    fn upsert(&mut self, node: OboNode) {
        match self.index.get(&node.id) {
            Some(&i) => self.nodes[i] = node,
            None => {
                self.index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }
}

/// Filter settings for `build_subset`.
#[derive(Debug, Clone)]
pub struct SubsetFilter<'a> {
    pub predicates: &'a [String],
    pub subset_suffix: Option<&'a str>,
    pub namespace: Option<&'a str>,
    pub include_ancestors: bool,
}

impl<'a> SubsetFilter<'a> {
    pub fn from_config(config: &'a OboConfig) -> Self {
        Self {
            predicates: &config.predicates,
            subset_suffix: config.subset_suffix.as_deref(),
            namespace: config.namespace.map(|ns| ns.as_str()),
            include_ancestors: config.include_ancestors,
        }
    }
}

/// The ordered dataset written by the exporters.
#[derive(Debug, Clone)]
pub struct OboDataset {
    pub subset: OboSubset,
    pub order: Vec<String>,
    pub depth: HashMap<String, usize>,
}

/// Parse OBO-Graphs JSON text and return its first graph.
pub fn load_graph(text: &str) -> Result<OboGraph, AppError> {
    let doc: OboDocument = serde_json::from_str(text.trim_start_matches('\u{feff}'))
        .map_err(|e| AppError::precondition(format!("Invalid OBO-Graphs JSON: {e}")))?;
    doc.graphs
        .into_iter()
        .next()
        .ok_or_else(|| AppError::precondition("No graphs[] found in OBO-Graphs JSON."))
}

/// Build, order and depth-annotate the subset described by `filter`.
pub fn build_dataset(graph: &OboGraph, filter: &SubsetFilter<'_>) -> Result<OboDataset, AppError> {
    let subset = build_subset(graph, filter);
    if subset.nodes.is_empty() {
        return Err(AppError::empty(
            "No nodes survived the filters; check --subset / --namespace and that the JSON has matching nodes.",
        ));
    }

    let order = topo_order(&subset);
    let depth = compute_depths(&subset);
    tracing::info!(
        graph = graph.id.as_deref().unwrap_or("?"),
        nodes = subset.nodes.len(),
        edges = subset.edges.len(),
        roots = subset.roots.len(),
        "built GO subset"
    );

    Ok(OboDataset { subset, order, depth })
}

/// Collect kept terms and the edges between them.
pub fn build_subset(graph: &OboGraph, filter: &SubsetFilter<'_>) -> OboSubset {
    let mut subset = OboSubset::default();
    let mut seeds: Vec<String> = Vec::new();

    for n in &graph.nodes {
        let Some(id) = n.id.as_deref().and_then(norm_go_id) else {
            continue;
        };
        let meta = n.meta.as_ref();
        let namespace = namespace_of(meta);

        // Terms without a namespace are kept.
        if let (Some(want), Some(ns)) = (filter.namespace, namespace.as_deref()) {
            if ns != want {
                continue;
            }
        }

        let keep = match filter.subset_suffix {
            Some(suffix) => in_subset(meta, suffix),
            None => true,
        };
        if !keep {
            continue;
        }
        if filter.subset_suffix.is_some() && !seeds.contains(&id) {
            seeds.push(id.clone());
        }
        subset.upsert(term(n, id, namespace));
    }

    let raw_edges = read_edges(graph, filter.predicates);

    if filter.include_ancestors {
        add_ancestors(graph, filter, &raw_edges, &seeds, &mut subset);
    }

    subset.edges = raw_edges
        .into_iter()
        .filter(|e| subset.contains(&e.child) && subset.contains(&e.parent))
        .collect();

    let has_parent: HashSet<&str> = subset.edges.iter().map(|e| e.child.as_str()).collect();
    subset.roots = subset.ids().filter(|id| !has_parent.contains(id)).map(str::to_string).collect();

    subset
}

fn term(n: &OboGraphNode, id: String, namespace: Option<String>) -> OboNode {
    let label = n.lbl.clone().filter(|l| !l.is_empty()).unwrap_or_else(|| id.clone());
    OboNode { id, label, namespace }
}

/// All edges with a kept predicate, whatever their endpoints.
fn read_edges(graph: &OboGraph, predicates: &[String]) -> Vec<OboEdge> {
    let mut out = Vec::new();
    for e in &graph.edges {
        let child = first_present(e, SUBJECT_KEYS).and_then(|s| norm_go_id(&s));
        let parent = first_present(e, OBJECT_KEYS).and_then(|s| norm_go_id(&s));
        let (Some(child), Some(parent)) = (child, parent) else {
            continue;
        };
        let predicate = pred_name(&first_present(e, PREDICATE_KEYS).unwrap_or_default());
        if predicates.iter().any(|p| *p == predicate) {
            out.push(OboEdge { child, parent, predicate });
        }
    }
    out
}

/// Walk up parent edges from the seeds, adding ancestors known to the source.
fn add_ancestors(
    graph: &OboGraph,
    filter: &SubsetFilter<'_>,
    raw_edges: &[OboEdge],
    seeds: &[String],
    subset: &mut OboSubset,
) {
    let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
    for e in raw_edges {
        let list = parents.entry(e.child.as_str()).or_default();
        if !list.contains(&e.parent.as_str()) {
            list.push(e.parent.as_str());
        }
    }

    let mut source_nodes: HashMap<String, &OboGraphNode> = HashMap::new();
    for n in &graph.nodes {
        if let Some(id) = n.id.as_deref().and_then(norm_go_id) {
            source_nodes.insert(id, n);
        }
    }

    let start: Vec<String> = if filter.subset_suffix.is_some() && !seeds.is_empty() {
        seeds.to_vec()
    } else {
        subset.ids().map(str::to_string).collect()
    };
    let mut visited: HashSet<String> = start.iter().cloned().collect();
    let mut frontier: VecDeque<String> = start.into();

    while let Some(u) = frontier.pop_front() {
        let Some(ps) = parents.get(u.as_str()) else {
            continue;
        };
        for &p in ps {
            if !visited.insert(p.to_string()) {
                continue;
            }
            frontier.push_back(p.to_string());

            if subset.contains(p) {
                continue;
            }
            let Some(raw) = source_nodes.get(p) else {
                continue;
            };
            let namespace = namespace_of(raw.meta.as_ref());
            let allowed = match (filter.namespace, namespace.as_deref()) {
                (Some(want), Some(ns)) => ns == want,
                _ => true,
            };
            if allowed {
                tracing::debug!(id = p, "adding ancestor term");
                subset.upsert(term(raw, p.to_string(), namespace));
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// A small slim with one non-slim ancestor and one off-namespace term.
    pub const GO_SLIM: &str = r#"{
      "graphs": [{
        "id": "http://purl.obolibrary.org/obo/go/subsets/goslim_drosophila.json",
        "nodes": [
          {"id": "http://purl.obolibrary.org/obo/GO_0008150", "lbl": "biological_process",
           "meta": {"subsets": ["http://purl.obolibrary.org/obo/go#goslim_drosophila"],
                    "basicPropertyValues": [{"pred": "http://www.geneontology.org/formats/oboInOwl#hasOBONamespace", "val": "biological_process"}]}},
          {"id": "http://purl.obolibrary.org/obo/GO_0009987", "lbl": "cellular process",
           "meta": {"basicPropertyValues": [{"pred": "http://www.geneontology.org/formats/oboInOwl#hasOBONamespace", "val": "biological_process"}]}},
          {"id": "http://purl.obolibrary.org/obo/GO_0006281", "lbl": "DNA repair",
           "meta": {"subsets": ["http://purl.obolibrary.org/obo/go#goslim_drosophila"],
                    "basicPropertyValues": [{"pred": "http://www.geneontology.org/formats/oboInOwl#hasOBONamespace", "val": "biological_process"}]}},
          {"id": "http://purl.obolibrary.org/obo/GO_0005634", "lbl": "nucleus",
           "meta": {"subsets": ["http://purl.obolibrary.org/obo/go#goslim_drosophila"],
                    "basicPropertyValues": [{"pred": "http://www.geneontology.org/formats/oboInOwl#hasOBONamespace", "val": "cellular_component"}]}}
        ],
        "edges": [
          {"sub": "http://purl.obolibrary.org/obo/GO_0006281", "pred": "is_a", "obj": "http://purl.obolibrary.org/obo/GO_0009987"},
          {"sub": "http://purl.obolibrary.org/obo/GO_0009987", "pred": "is_a", "obj": "http://purl.obolibrary.org/obo/GO_0008150"},
          {"subject": "GO:0006281", "predicate": "http://purl.obolibrary.org/obo/BFO_0000050", "object": "GO:0008150"},
          {"sub": "http://purl.obolibrary.org/obo/GO_0006281", "pred": "http://purl.obolibrary.org/obo/RO_0002211", "obj": "http://purl.obolibrary.org/obo/GO_0005634"}
        ]
      }]
    }"#;
}
