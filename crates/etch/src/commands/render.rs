//! Render command - Render a template file to HTML

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use etch::{CliError, CliResult};
use serde_json::Value as Json;

#[derive(Args)]
pub struct RenderArgs {
    /// Template file (`-` reads stdin)
    pub file: PathBuf,

    /// Values as JSON: an array binds by position, an object by placeholder text
    #[arg(long)]
    pub values: Option<String>,

    /// Read the values JSON from a file
    #[arg(long, conflicts_with = "values")]
    pub values_file: Option<PathBuf>,

    /// Plain HTML, without the root marker or text separators
    #[arg(long)]
    pub static_markup: bool,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the HTML to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: RenderArgs) -> CliResult<()> {
    let mut config = super::config(args.config.as_ref())?;
    config.options.render.static_markup |= args.static_markup;
    let engine = config.engine()?;

    let source = super::read_source(&args.file)?;
    let values = source.bind(read_values(&args)?)?;

    let start = Instant::now();
    let html = engine.render_fragments(&source.fragments(), values)?;
    tracing::debug!(
        file = %args.file.display(),
        bytes = html.len(),
        elapsed = ?start.elapsed(),
        "rendered"
    );

    super::write_output(args.output.as_ref(), &html)
}

fn read_values(args: &RenderArgs) -> CliResult<Option<Json>> {
    let text = match (&args.values, &args.values_file) {
        (Some(values), _) => values.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?,
        (None, None) => return Ok(None),
    };
    serde_json::from_str(&text).map(Some).map_err(CliError::Values)
}
