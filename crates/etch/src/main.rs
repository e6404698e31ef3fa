//! # etch
//!
//! Etch - Tagged template markup compiler and server renderer in Rust.
//!
//! ## Name Origin
//!
//! **Etch** is the printmaker's craft: a design is bitten into a plate once and
//! printed as many times as needed. Templates work the same way here. Each one
//! is compiled a single time into static strings and helper calls, then
//! printed to HTML with fresh values on every render. This binary renders and
//! inspects template files from the command line.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "etch")]
#[command(about = "Tagged template markup compiler and server renderer", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    version: (),

    /// Log cache and compile activity to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template file to HTML
    Render(commands::render::RenderArgs),

    /// Print the parsed tree of a template file as JSON
    #[command(visible_alias = "armature")]
    Inspect(commands::inspect::InspectArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
    };

    if let Err(err) = result {
        eprintln!("\x1b[31mError:\x1b[0m {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();
}
