//! Command-line parsing for the chart data preparation tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! normalizers; `app` turns the parsed arguments into config structs.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::OboNamespace;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "chartprep", version, about = "Normalize source data into chart-ready CSV/JSON")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `CHARTPREP_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize a per-season shooting table to `season,fg,tp3,tp2,ft` CSV.
    Season(SeasonArgs),
    /// Normalize a `{nodes, links}` graph to id-referenced JSON.
    Graph(GraphArgs),
    /// Build node/edge CSVs plus Sankey and arc JSON from GO OBO-Graphs JSON.
    Go(GoArgs),
}

#[derive(Debug, Args, Clone)]
pub struct SeasonArgs {
    /// Source CSV (UTF-8, optionally BOM-prefixed).
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Output CSV; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Require exact, case-sensitive header names.
    #[arg(long)]
    pub strict_headers: bool,
}

#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// Source graph JSON.
    #[arg(value_name = "JSON")]
    pub input: PathBuf,

    /// Output JSON; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail when a link points at a node id that does not exist.
    #[arg(long)]
    pub strict_links: bool,
}

#[derive(Debug, Args, Clone)]
pub struct GoArgs {
    /// GO OBO-Graphs JSON (e.g. goslim_drosophila.json).
    #[arg(value_name = "JSON")]
    pub input: PathBuf,

    /// Subset suffix to keep. Pass an empty string to disable subset filtering.
    #[arg(long, default_value = "goslim_drosophila")]
    pub subset: String,

    /// Restrict to one OBO namespace.
    #[arg(long, value_enum)]
    pub namespace: Option<OboNamespace>,

    /// Comma list of predicates to keep (is_a, part_of, has_part, regulates,
    /// positively_regulates, negatively_regulates).
    #[arg(long, default_value = "is_a,part_of")]
    pub predicates: String,

    /// Also include ancestors of slim terms (or of all kept terms without --subset).
    #[arg(long)]
    pub include_ancestors: bool,

    /// Output file prefix.
    #[arg(short, long, default_value = "go_out")]
    pub out: String,
}
