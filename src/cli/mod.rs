//! CLI argument parsing for trains
//!
//! Mirrors the config file keys; any flag given here wins over the file.

pub mod parse;

use clap::Parser;
use std::path::PathBuf;

use parse::parse_output_format;
use trains_core::config::Overrides;
use trains_core::format::OutputFormat;

/// Trains - shortest distance, route count and stop count queries over a
/// route table
#[derive(Parser, Debug)]
#[command(name = "trains")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run with no input file and type 'help' for the query language.")]
pub struct Cli {
    /// Route table file (e.g. `AB5, BC4, CD8`)
    #[arg(value_name = "ROUTES")]
    pub routes: Option<PathBuf>,

    /// Read commands from FILE instead of stdin ('-' for stdin)
    #[arg(long, short, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write results to FILE instead of stdout ('-' for stdout)
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Echo the routes table, each command and the routes it examined
    #[arg(long, short)]
    pub verbose: bool,

    /// Config file (default: ~/.config/trains/config.toml)
    #[arg(long, value_name = "FILE", env = "TRAINS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: human or json
    #[arg(long, value_parser = parse_output_format)]
    pub format: Option<OutputFormat>,

    /// Log level (error, warn, info, debug, trace) or a full filter directive
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Command-line values to apply over the config file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            routes_file: self.routes.clone(),
            input_file: self.input.clone(),
            output_file: self.output.clone(),
            verbose: self.verbose,
            format: self.format,
        }
    }
}
