//! Shared domain types.
//!
//! These types are the normalized artifacts handed to the chart renderer plus
//! the resolved run configuration for each pipeline. They are plain values:
//! built once per run, never mutated after the normalizer returns them.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One per-season shooting-percentage observation.
///
/// Percentages are kept exactly as coerced from the source text: no range
/// check is applied and non-numeric cells are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRecord {
    /// Canonical `YYYY-YY` label, e.g. `2015-16`.
    pub season: String,
    pub fg: f64,
    pub tp3: f64,
    pub tp2: f64,
    pub ft: f64,
}

/// How header names in the season table are compared with the expected names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMatch {
    /// Case-insensitive, whitespace-tolerant, with a substring fallback for
    /// the season column.
    #[default]
    Tolerant,
    /// Exact, case-sensitive comparison after trimming.
    Strict,
}

/// A normalized graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub group: String,
}

/// A normalized graph edge whose endpoints are node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The canonical `{nodes, links}` document consumed by the arc diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// How link endpoints refer to nodes in a raw graph document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRefKind {
    /// Endpoints are integer positions into `nodes`.
    ByIndex,
    /// Endpoints are already node id strings.
    ById,
}

/// OBO namespaces a GO dataset can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum OboNamespace {
    BiologicalProcess,
    MolecularFunction,
    CellularComponent,
}

impl OboNamespace {
    pub fn as_str(self) -> &'static str {
        match self {
            OboNamespace::BiologicalProcess => "biological_process",
            OboNamespace::MolecularFunction => "molecular_function",
            OboNamespace::CellularComponent => "cellular_component",
        }
    }
}

/// Resolved settings for a season-table run.
#[derive(Debug, Clone)]
pub struct SeasonConfig {
    pub input: PathBuf,
    /// `None` writes to stdout.
    pub output: Option<PathBuf>,
    pub header_match: HeaderMatch,
}

/// Resolved settings for a graph normalization run.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub input: PathBuf,
    /// `None` writes to stdout.
    pub output: Option<PathBuf>,
    /// Fail when a link references a node id that is not in `nodes`.
    pub strict_links: bool,
}

/// Resolved settings for building GO datasets from OBO-Graphs JSON.
#[derive(Debug, Clone)]
pub struct OboConfig {
    pub input: PathBuf,
    /// Output file prefix; `_nodes.csv`, `_edges.csv`, `_sankey.json` and
    /// `_arc.json` are appended.
    pub out_prefix: String,
    /// Keep only nodes whose `meta.subsets` entry ends with this suffix.
    pub subset_suffix: Option<String>,
    pub namespace: Option<OboNamespace>,
    /// Short predicate names to keep (`is_a`, `part_of`, ...).
    pub predicates: Vec<String>,
    pub include_ancestors: bool,
}
