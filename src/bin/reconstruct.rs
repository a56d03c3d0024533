//! Reconstruct a correlation spanning tree from a CSV file.
//!
//! Usage:
//! ```text
//! cargo run --bin reconstruct -- --input prices.csv --distance inv_square --json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use correlation_spanning_tree::data::{load_observations, Layout};
use correlation_spanning_tree::{
    CorrelationSpanningTree, CorrelationSpanningTreeConfig, DistanceKind, Reconstructor,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Columns,
    Rows,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Columns => Layout::Columns,
            LayoutArg::Rows => Layout::Rows,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Build a minimum spanning tree from correlated time series")]
struct Args {
    /// CSV file with the observations
    #[arg(long)]
    input: PathBuf,

    /// Correlation to distance formula
    #[arg(long, default_value_t = DistanceKind::RootInv)]
    distance: DistanceKind,

    /// `columns`: header names entities, one sample per record.
    /// `rows`: one entity per record, label first.
    #[arg(long, value_enum, default_value = "columns")]
    layout: LayoutArg,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let observations = load_observations(&args.input, args.layout.into())
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    info!(
        entities = observations.num_entities(),
        samples = observations.num_samples(),
        "observations loaded"
    );

    let config = CorrelationSpanningTreeConfig::default().with_distance(args.distance);
    let result =
        CorrelationSpanningTree::with_config(config).reconstruct(observations.values.view())?;

    if args.json {
        let output = serde_json::json!({
            "labels": observations.labels,
            "graph": result.summary(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let summary = result.summary();
    println!(
        "{} nodes, {} edges, {} component(s), total weight {:.6}",
        summary.nodes,
        summary.edges.len(),
        summary.components,
        summary.total_weight
    );
    println!("{:-<50}", "");
    for edge in &summary.edges {
        println!(
            "{:<20} {:<20} {:>8.4}",
            observations.labels[edge.source], observations.labels[edge.target], edge.weight
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_accepts_option_names() {
        let argv = ["reconstruct", "--input", "x.csv", "--distance", "inv_square"];
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.distance, DistanceKind::InvSquare);

        let args = Args::try_parse_from(["reconstruct", "--input", "x.csv"]).unwrap();
        assert_eq!(args.distance, DistanceKind::RootInv);
    }

    #[test]
    fn test_distance_rejects_unknown() {
        let argv = ["reconstruct", "--input", "x.csv", "--distance", "cosine"];
        assert!(Args::try_parse_from(argv).is_err());
    }
}
