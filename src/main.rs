//! livid CLI - live reload of a C program over a delimited file
//!
//! Usage: livid [OPTIONS] [FILE]
//!
//! The header of FILE (or standard input) becomes the column declaration of
//! a generated `script.c`. Every save recompiles and reruns it, and the
//! rendered grid lands in the workspace `output` file shown next to the
//! source in vim.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    commands::session::cmd_session(cli)
}
