//! File-level pipelines used by the CLI.
//!
//! Each one reads its whole input, normalizes it in memory, renders every
//! artifact to text and only then writes. Errors short-circuit before any
//! output exists.

use std::path::PathBuf;

use crate::domain::{GraphConfig, OboConfig, SeasonConfig};
use crate::error::AppError;
use crate::graph::NormalizedGraph;
use crate::io::{prefixed_path, read_text, write_all, write_output};
use crate::obo::{OboDataset, SubsetFilter};
use crate::season::SeasonTable;

/// Season CSV -> normalized season CSV.
pub fn run_season(config: &SeasonConfig) -> Result<SeasonTable, AppError> {
    let text = read_text(&config.input)?;
    let table = crate::season::normalize_seasons(&text, config.header_match)?;
    let csv = crate::season::render_csv(&table.records)?;
    write_output(config.output.as_deref(), &csv)?;

    tracing::info!(
        input = %config.input.display(),
        read = table.rows_read,
        kept = table.records.len(),
        dropped = table.dropped.len(),
        "normalized season table"
    );
    Ok(table)
}

/// Raw graph JSON -> canonical `{nodes, links}` JSON.
pub fn run_graph(config: &GraphConfig) -> Result<NormalizedGraph, AppError> {
    let text = read_text(&config.input)?;
    let graph = crate::graph::normalize_graph(&text, config.strict_links)?;
    let json = crate::graph::render_json(&graph.document)?;
    write_output(config.output.as_deref(), &json)?;

    tracing::info!(
        input = %config.input.display(),
        shape = ?graph.ref_kind,
        nodes = graph.document.nodes.len(),
        links = graph.document.links.len(),
        dangling = graph.dangling.len(),
        "normalized graph"
    );
    Ok(graph)
}

/// OBO-Graphs JSON -> `_nodes.csv`, `_edges.csv`, `_sankey.json`, `_arc.json`.
pub fn run_obo(config: &OboConfig) -> Result<(OboDataset, Vec<PathBuf>), AppError> {
    let text = read_text(&config.input)?;
    let graph = crate::obo::load_graph(&text)?;
    let dataset = crate::obo::build_dataset(&graph, &SubsetFilter::from_config(config))?;

    let prefix = config.out_prefix.as_str();
    let files = vec![
        (prefixed_path(prefix, "_nodes.csv"), dataset.nodes_csv()?),
        (prefixed_path(prefix, "_edges.csv"), dataset.edges_csv()?),
        (prefixed_path(prefix, "_sankey.json"), crate::obo::export::to_json(&dataset.sankey())?),
        (prefixed_path(prefix, "_arc.json"), crate::obo::export::to_json(&dataset.arc())?),
    ];
    write_all(&files)?;

    let written = files.into_iter().map(|(path, _)| path).collect();
    Ok((dataset, written))
}
