use std::path::PathBuf;

use clap::Parser;
use livid::config::BackendKind;

/// livid - edit a C program over a delimited file and watch the grid update on save
#[derive(Parser, Debug)]
#[command(name = "livid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file; standard input when omitted
    pub file: Option<PathBuf>,

    /// Field delimiter, a single character [default: ,]
    #[arg(short = 't', long)]
    pub delimiter: Option<String>,

    /// Existing directory to use as the workspace (default: a fresh temp dir)
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// Run a single cycle and print the output; no editor, no watching
    #[arg(long)]
    pub once: bool,

    /// Keep reloading on save without starting an editor
    #[arg(long, conflicts_with = "once")]
    pub no_editor: bool,

    /// Execution backend (native or builtin)
    #[arg(long)]
    pub backend: Option<BackendKind>,

    /// Maximum grid rows per cycle
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Emit reload events as NDJSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
