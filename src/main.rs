use formtree::{json, parse_query_with, ParseOptions, DEFAULT_MAX_INDEX};

use clap::Parser;
use std::io::{self, Read};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Read a url-encoded form body from stdin and print it as a JSON tree.
#[derive(Debug, Parser)]
#[command(name = "formtree", version)]
struct Cli {
    /// Print the flattened `label -> value` mapping instead of the tree.
    #[arg(long, conflicts_with = "get")]
    flat: bool,

    /// Print only the subtree at this JSON path, e.g. '["form", 0]'.
    #[arg(long, value_name = "JSON")]
    get: Option<String>,

    /// Drop keys with an explicit list index above this value.
    #[arg(long, env = "FORMTREE_MAX_INDEX", default_value_t = DEFAULT_MAX_INDEX)]
    max_index: usize,

    /// Drop keys with more bracket segments than this.
    #[arg(long, env = "FORMTREE_MAX_DEPTH")]
    max_depth: Option<usize>,

    /// Exit with status 1 if any pair was dropped.
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("formtree=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        eprintln!("failed to read stdin: {err}");
        return ExitCode::FAILURE;
    }

    let options = ParseOptions {
        max_index: Some(cli.max_index),
        max_depth: cli.max_depth,
    };
    let result = parse_query_with(input.trim_end_matches(['\r', '\n']), &options);

    for err in &result.errors {
        eprintln!("dropped: {err} ({})", err.code());
    }

    let output = if cli.flat {
        json::flat_to_json_pretty(&result.value.key_values())
    } else if let Some(raw) = &cli.get {
        let path: Vec<serde_json::Value> = match serde_json::from_str(raw) {
            Ok(path) => path,
            Err(err) => {
                eprintln!("--get expects a JSON array: {err}");
                return ExitCode::FAILURE;
            }
        };
        match result.value.get_json(&path) {
            Ok(node) => node.to_json_pretty(),
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        result.value.to_json_pretty()
    };
    println!("{output}");

    if cli.strict && !result.errors.is_empty() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
