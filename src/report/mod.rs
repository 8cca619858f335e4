//! Run summaries printed after a successful command.
//!
//! Formatting lives here so the normalizers only return data and the
//! wording of terminal output stays in one place.

use crate::domain::{GraphConfig, LinkRefKind, SeasonConfig};
use crate::graph::NormalizedGraph;
use crate::obo::OboDataset;
use crate::season::SeasonTable;

/// How many dropped rows are listed individually.
const MAX_LISTED: usize = 5;

pub fn format_season_summary(table: &SeasonTable, config: &SeasonConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("Input: {}\n", config.input.display()));
    out.push_str(&format!(
        "Rows: {} read, {} kept, {} dropped\n",
        table.rows_read,
        table.records.len(),
        table.dropped.len()
    ));
    for d in table.dropped.iter().take(MAX_LISTED) {
        out.push_str(&format!("  line {}: {}\n", d.line, d.reason));
    }
    if table.dropped.len() > MAX_LISTED {
        out.push_str(&format!("  ... and {} more\n", table.dropped.len() - MAX_LISTED));
    }
    if table.nan_cells > 0 {
        out.push_str(&format!("Non-numeric percentage cells kept as NaN: {}\n", table.nan_cells));
    }
    if let (Some(first), Some(last)) = (table.records.first(), table.records.last()) {
        out.push_str(&format!("Seasons: {} .. {}\n", first.season, last.season));
    }
    out
}

pub fn format_graph_summary(graph: &NormalizedGraph, config: &GraphConfig) -> String {
    let shape = match graph.ref_kind {
        LinkRefKind::ByIndex => "index-referenced",
        LinkRefKind::ById => "id-referenced",
    };
    let mut out = String::new();
    out.push_str(&format!("Input: {} ({shape} links)\n", config.input.display()));
    out.push_str(&format!(
        "Nodes: {}, links: {}\n",
        graph.document.nodes.len(),
        graph.document.links.len()
    ));
    if !graph.dangling.is_empty() {
        out.push_str(&format!(
            "Dangling link endpoints kept as-is: {}\n",
            graph.dangling.len()
        ));
    }
    if !graph.duplicate_ids.is_empty() {
        out.push_str(&format!("Duplicate node ids: {}\n", graph.duplicate_ids.join(", ")));
    }
    out
}

pub fn format_obo_summary(dataset: &OboDataset, written: &[std::path::PathBuf]) -> String {
    let max_depth = dataset.depth.values().copied().max().unwrap_or(0);
    let mut out = String::new();
    out.push_str(&format!(
        "Terms: {}, edges: {}, roots: {}, max depth: {}\n",
        dataset.subset.nodes.len(),
        dataset.subset.edges.len(),
        dataset.subset.roots.len(),
        max_depth
    ));
    out.push_str("Wrote:\n");
    for p in written {
        out.push_str(&format!("  {}\n", p.display()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeaderMatch;
    use crate::season::normalize_seasons;
    use std::path::PathBuf;

    #[test]
    fn season_summary_lists_drops() {
        let text = "Season,FG%,3P%,2P%,FT%\n2015-16,.5,N/A,.5,.9\nCareer,.5,.4,.5,.9\n";
        let table = normalize_seasons(text, HeaderMatch::Tolerant).unwrap();
        let config = SeasonConfig {
            input: PathBuf::from("curry.csv"),
            output: None,
            header_match: HeaderMatch::Tolerant,
        };
        let s = format_season_summary(&table, &config);
        assert!(s.contains("Rows: 2 read, 1 kept, 1 dropped"));
        assert!(s.contains("line 3: season label \"Career\" is not YYYY-YY"));
        assert!(s.contains("kept as NaN: 1"));
        assert!(s.contains("Seasons: 2015-16 .. 2015-16"));
    }

    #[test]
    fn graph_summary_names_shape() {
        let graph = crate::graph::normalize_graph(
            r#"{"nodes":[{"id":"a"}],"links":[{"source":"a","target":"zz"}]}"#,
            false,
        )
        .unwrap();
        let config = GraphConfig {
            input: PathBuf::from("g.json"),
            output: None,
            strict_links: false,
        };
        let s = format_graph_summary(&graph, &config);
        assert!(s.contains("id-referenced"));
        assert!(s.contains("Dangling link endpoints kept as-is: 1"));
    }
}
