//! Inspect command - Print the parsed tree of a template file

use std::path::PathBuf;

use clap::Args;
use etch::{CliError, CliResult};
use serde_json::json;

#[derive(Args)]
pub struct InspectArgs {
    /// Template file (`-` reads stdin)
    pub file: PathBuf,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,

    /// Write the JSON to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: InspectArgs) -> CliResult<()> {
    let config = super::config(args.config.as_ref())?;
    let engine = config.engine()?;
    let source = super::read_source(&args.file)?;
    let tree = engine.parse_fragments(&source.fragments())?;
    tracing::debug!(nodes = tree.nodes.len(), slots = tree.slots.len(), "parsed");

    let tree = serde_json::to_value(&tree).map_err(CliError::Output)?;
    let report = json!({
        "placeholders": source.placeholders,
        "tree": tree,
    });
    let output = if args.compact {
        serde_json::to_string(&report)
    } else {
        serde_json::to_string_pretty(&report)
    }
    .map_err(CliError::Output)?;

    super::write_output(args.output.as_ref(), &output)
}
