//! Dataset renderers: node/edge CSVs plus Sankey and arc-diagram JSON.
//!
//! The Sankey document references nodes by position, the arc document by id;
//! both are accepted by the graph normalizer.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::GraphLink;
use crate::error::AppError;
use crate::obo::OboDataset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SankeyNode {
    pub name: String,
    pub id: String,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SankeyLink {
    pub source: usize,
    pub target: usize,
    pub value: u32,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SankeyDocument {
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArcNode {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub depth: usize,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArcDocument {
    pub nodes: Vec<ArcNode>,
    pub links: Vec<GraphLink>,
}

impl OboDataset {
    /// Position of every term in topological order.
    pub fn positions(&self) -> HashMap<&str, usize> {
        self.order.iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect()
    }

    fn depth_of(&self, id: &str) -> Option<usize> {
        self.depth.get(id).copied()
    }

    /// `id,label,namespace,depth,index` in topological order. Terms without a
    /// depth (cycle members) get an empty cell.
    pub fn nodes_csv(&self) -> Result<String, AppError> {
        let mut w = csv::Writer::from_writer(Vec::new());
        w.write_record(["id", "label", "namespace", "depth", "index"])
            .map_err(csv_err)?;
        for (i, id) in self.order.iter().enumerate() {
            let Some(n) = self.subset.get(id) else { continue };
            let depth = self.depth_of(id).map(|d| d.to_string()).unwrap_or_default();
            let index = i.to_string();
            w.write_record([
                n.id.as_str(),
                n.label.as_str(),
                n.namespace.as_deref().unwrap_or(""),
                depth.as_str(),
                index.as_str(),
            ])
            .map_err(csv_err)?;
        }
        finish(w)
    }

    /// `source,target,type` with child -> parent direction.
    pub fn edges_csv(&self) -> Result<String, AppError> {
        let mut w = csv::Writer::from_writer(Vec::new());
        w.write_record(["source", "target", "type"]).map_err(csv_err)?;
        for e in &self.subset.edges {
            w.write_record([&e.child, &e.parent, &e.predicate]).map_err(csv_err)?;
        }
        finish(w)
    }

    pub fn sankey(&self) -> SankeyDocument {
        let pos = self.positions();
        let nodes = self
            .order
            .iter()
            .filter_map(|id| self.subset.get(id))
            .map(|n| SankeyNode {
                name: n.label.clone(),
                id: n.id.clone(),
                depth: self.depth_of(&n.id).unwrap_or(0),
            })
            .collect();
        let links = self
            .subset
            .edges
            .iter()
            .filter_map(|e| {
                Some(SankeyLink {
                    source: *pos.get(e.child.as_str())?,
                    target: *pos.get(e.parent.as_str())?,
                    value: 1,
                    kind: e.predicate.clone(),
                })
            })
            .collect();
        SankeyDocument { nodes, links }
    }

    pub fn arc(&self) -> ArcDocument {
        let nodes = self
            .order
            .iter()
            .enumerate()
            .filter_map(|(i, id)| self.subset.get(id).map(|n| (i, n)))
            .map(|(index, n)| ArcNode {
                id: n.id.clone(),
                label: n.label.clone(),
                namespace: n.namespace.clone(),
                depth: self.depth_of(&n.id).unwrap_or(0),
                index,
            })
            .collect();
        let links = self
            .subset
            .edges
            .iter()
            .map(|e| GraphLink {
                source: e.child.clone(),
                target: e.parent.clone(),
                kind: e.predicate.clone(),
            })
            .collect();
        ArcDocument { nodes, links }
    }
}

/// Pretty JSON text for any exported document.
pub fn to_json<T: Serialize>(doc: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(doc).map_err(|e| AppError::io(format!("Failed to serialize JSON: {e}")))
}

fn csv_err(e: csv::Error) -> AppError {
    AppError::io(format!("Failed to write CSV row: {e}"))
}

fn finish(w: csv::Writer<Vec<u8>>) -> Result<String, AppError> {
    let bytes = w
        .into_inner()
        .map_err(|e| AppError::io(format!("Failed to flush CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::io(format!("CSV is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::normalize_graph;
    use crate::obo::{SubsetFilter, build_dataset, fixtures, load_graph};
    use pretty_assertions::assert_eq;

    fn dataset() -> OboDataset {
        let graph = load_graph(fixtures::GO_SLIM).unwrap();
        let predicates = vec!["is_a".to_string()];
        let filter = SubsetFilter {
            predicates: &predicates,
            subset_suffix: Some("goslim_drosophila"),
            namespace: None,
            include_ancestors: true,
        };
        build_dataset(&graph, &filter).unwrap()
    }

    #[test]
    fn csv_outputs_follow_topological_order() {
        let ds = dataset();
        assert_eq!(
            ds.nodes_csv().unwrap(),
            "id,label,namespace,depth,index\n\
             GO:0008150,biological_process,biological_process,0,0\n\
             GO:0005634,nucleus,cellular_component,0,1\n\
             GO:0009987,cellular process,biological_process,1,2\n\
             GO:0006281,DNA repair,biological_process,2,3\n"
        );
        assert_eq!(
            ds.edges_csv().unwrap(),
            "source,target,type\nGO:0006281,GO:0009987,is_a\nGO:0009987,GO:0008150,is_a\n"
        );
    }

    #[test]
    fn sankey_links_use_positions() {
        let doc = dataset().sankey();
        assert_eq!(doc.nodes[3].id, "GO:0006281");
        assert_eq!(doc.nodes[3].name, "DNA repair");
        assert_eq!((doc.links[0].source, doc.links[0].target), (3, 2));
        assert_eq!(doc.links[0].value, 1);
    }

    #[test]
    fn both_documents_normalize_to_the_same_links() {
        let ds = dataset();
        let from_sankey = normalize_graph(&to_json(&ds.sankey()).unwrap(), true).unwrap();
        let from_arc = normalize_graph(&to_json(&ds.arc()).unwrap(), true).unwrap();

        assert_eq!(from_sankey.document.links, from_arc.document.links);
        assert_eq!(from_arc.document.nodes[0].group, "biological_process");
        assert_eq!(from_sankey.document.nodes[0].group, "unknown");
        assert_eq!(from_sankey.document.nodes[3].label, "DNA repair");
    }
}
