//! kgraph CLI: load a JSON dataset and query it
//!
//! Run without a subcommand to get the walkthrough report: full dump, a
//! property search, an adjacency lookup and a shortest path.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use kgraph::{
    load_path, Edge, GraphConfig, GraphResult, GraphStore, IndexMode, Node, NodeId, PathResult,
    PropertyValue,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kgraph", version, about = "Query a kgraph JSON dataset")]
struct Cli {
    /// Dataset file to load
    #[arg(long, default_value = "dataset.json", global = true, env = "KGRAPH_DATASET")]
    dataset: PathBuf,

    /// How the property index treats overwritten values
    #[arg(long, default_value = "history", global = true)]
    index_mode: IndexModeArg,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum IndexModeArg {
    History,
    Current,
}

impl From<IndexModeArg> for IndexMode {
    fn from(arg: IndexModeArg) -> Self {
        match arg {
            IndexModeArg::History => IndexMode::History,
            IndexModeArg::Current => IndexMode::Current,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every node and edge
    Dump,
    /// Find nodes by exact property value
    FindNodes {
        key: String,
        /// Matched as a string unless --typed is given
        value: String,
        /// Parse the value as a JSON scalar (30, 1.5, true, null)
        #[arg(long)]
        typed: bool,
    },
    /// List the edges touching a node
    Edges { node: String },
    /// Shortest path between two nodes
    Path { from: String, to: String },
    /// Print store counters
    Stats,
    /// Dump, then search name=Alice, edges of 1, and path 1 -> 4
    Report,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = GraphConfig {
        index_mode: cli.index_mode.into(),
        ..GraphConfig::default()
    };
    let (store, _report) = load_path(&cli.dataset, config)
        .with_context(|| format!("failed to load dataset {}", cli.dataset.display()))?;

    match cli.command.unwrap_or(Commands::Report) {
        Commands::Dump => run_dump(&store, cli.format),
        Commands::FindNodes { key, value, typed } => {
            let value = parse_value(&value, typed);
            let nodes = store.find_nodes_by_property(&key, &value);
            print_nodes(&nodes, cli.format)
        }
        Commands::Edges { node } => print_edges(&store.find_edges_by_node(&node), cli.format),
        Commands::Path { from, to } => print_path(&store, &from, &to, cli.format),
        Commands::Stats => run_stats(&store, cli.format),
        Commands::Report => run_report(&store),
    }
}

/// Dataset values are strings, so a raw argument is a string unless the
/// caller opts into typed parsing. A typed value that is not a JSON scalar
/// falls back to the raw string.
fn parse_value(raw: &str, typed: bool) -> PropertyValue {
    if !typed {
        return PropertyValue::from(raw);
    }
    serde_json::from_str(raw).unwrap_or_else(|_| PropertyValue::from(raw))
}

fn run_dump(store: &GraphStore, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let nodes: Vec<&Node> = store.nodes().collect();
            let edges: Vec<&Edge> = store.edges().collect();
            let dump = serde_json::json!({ "nodes": nodes, "edges": edges });
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
        OutputFormat::Table => println!("{}", store),
    }
    Ok(())
}

fn print_nodes(nodes: &[&Node], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(nodes)?),
        OutputFormat::Table => {
            if nodes.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["id", "label", "properties"]);
            for node in nodes {
                let props: Vec<String> = node
                    .properties
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                table.add_row(vec![
                    node.id.to_string(),
                    node.label.to_string(),
                    props.join(", "),
                ]);
            }
            println!("{}", table);
            println!("{} row(s)", nodes.len());
        }
    }
    Ok(())
}

fn print_edges(edges: &[&Edge], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(edges)?),
        OutputFormat::Table => {
            if edges.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["start", "end", "label"]);
            for edge in edges {
                table.add_row(vec![
                    edge.start.to_string(),
                    edge.end.to_string(),
                    edge.edge_type.to_string(),
                ]);
            }
            println!("{}", table);
            println!("{} row(s)", edges.len());
        }
    }
    Ok(())
}

fn print_path(store: &GraphStore, from: &str, to: &str, format: OutputFormat) -> Result<()> {
    let result = kgraph::algo::shortest_path(store, from, to);
    match format {
        OutputFormat::Json => {
            let body = match &result {
                Ok(Some(found)) => serde_json::json!({ "path": found.path, "hops": found.hops }),
                Ok(None) => serde_json::json!({ "path": null }),
                Err(e) => serde_json::json!({ "path": null, "error": e.to_string() }),
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => println!("{}", format_path(&result)),
    }
    Ok(())
}

fn format_path(result: &GraphResult<Option<PathResult>>) -> String {
    match result {
        Ok(Some(found)) => join_path(&found.path),
        Ok(None) => "No path found".to_string(),
        Err(e) => format!("No path found ({})", e),
    }
}

fn run_stats(store: &GraphStore, format: OutputFormat) -> Result<()> {
    let stats = store.statistics();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["metric", "value"]);
            table.add_row(vec!["nodes".to_string(), stats.node_count.to_string()]);
            table.add_row(vec!["edges".to_string(), stats.edge_count.to_string()]);
            table.add_row(vec!["indexed keys".to_string(), stats.indexed_keys.to_string()]);
            table.add_row(vec!["index entries".to_string(), stats.index_entries.to_string()]);
            table.add_row(vec!["max degree".to_string(), stats.max_degree.to_string()]);
            println!("{}", table);
        }
    }
    Ok(())
}

fn run_report(store: &GraphStore) -> Result<()> {
    print!("{}", render_report(store)?);
    Ok(())
}

fn render_report(store: &GraphStore) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", store)?;

    writeln!(out)?;
    writeln!(out, "Search for nodes with name 'Alice':")?;
    for node in store.find_nodes_by_property("name", &"Alice".into()) {
        writeln!(out, "{}", node)?;
    }

    writeln!(out, "\nSearch for edges connected to node '1':")?;
    for edge in store.find_edges_by_node("1") {
        writeln!(out, "{}", edge)?;
    }

    writeln!(out, "\nFind shortest path between nodes '1' and '4':")?;
    match store.shortest_path("1", "4") {
        Some(path) => writeln!(out, "{}", join_path(&path))?,
        None => writeln!(out, "No path found")?,
    }
    Ok(out)
}

fn join_path(path: &[NodeId]) -> String {
    path.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}
