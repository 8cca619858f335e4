//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments into run configs
//! - runs one pipeline and prints its summary

use clap::Parser;

use crate::cli::{Cli, Command, GoArgs, GraphArgs, SeasonArgs};
use crate::domain::{GraphConfig, HeaderMatch, OboConfig, SeasonConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `chartprep` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is normal.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    crate::logging::init_logging(cli.verbose);

    match cli.command {
        Command::Season(args) => {
            let config = season_config_from_args(&args);
            let table = pipeline::run_season(&config)?;
            eprint!("{}", crate::report::format_season_summary(&table, &config));
        }
        Command::Graph(args) => {
            let config = graph_config_from_args(&args);
            let graph = pipeline::run_graph(&config)?;
            eprint!("{}", crate::report::format_graph_summary(&graph, &config));
        }
        Command::Go(args) => {
            let config = obo_config_from_args(&args);
            let (dataset, written) = pipeline::run_obo(&config)?;
            eprint!("{}", crate::report::format_obo_summary(&dataset, &written));
        }
    }
    Ok(())
}

pub fn season_config_from_args(args: &SeasonArgs) -> SeasonConfig {
    SeasonConfig {
        input: args.input.clone(),
        output: args.output.clone(),
        header_match: if args.strict_headers {
            HeaderMatch::Strict
        } else {
            HeaderMatch::Tolerant
        },
    }
}

pub fn graph_config_from_args(args: &GraphArgs) -> GraphConfig {
    GraphConfig {
        input: args.input.clone(),
        output: args.output.clone(),
        strict_links: args.strict_links,
    }
}

pub fn obo_config_from_args(args: &GoArgs) -> OboConfig {
    OboConfig {
        input: args.input.clone(),
        out_prefix: args.out.clone(),
        subset_suffix: Some(args.subset.trim().to_string()).filter(|s| !s.is_empty()),
        namespace: args.namespace,
        predicates: parse_predicates(&args.predicates),
        include_ancestors: args.include_ancestors,
    }
}

/// `"is_a, part_of,,"` -> `["is_a", "part_of"]`.
fn parse_predicates(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
