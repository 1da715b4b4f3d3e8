//! Command dispatch logic for trains

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::cli::Cli;
use crate::commands::session::Session;
use trains_core::config::AppConfig;
use trains_core::error::Result;
use trains_core::graph::load_routes;

mod io;

/// Resolve configuration, load the route table and run the query session
pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = resolve_config(cli)?;
    debug!(elapsed = ?start.elapsed(), "resolve_config");

    let graph = load_routes(config.routes_path()?)?;
    debug!(elapsed = ?start.elapsed(), edges = graph.edge_count(), "load_routes");

    let output = io::open_output(config.output_path())?;
    let mut session = Session::new(&graph, output, config.output_format(), config.verbose)
        .with_interrupt(interrupt_flag());

    if config.verbose {
        session.dump_routes()?;
    }

    let input = io::open_input(config.input_path())?;
    let summary = session.run(input)?;

    debug!(
        elapsed = ?start.elapsed(),
        processed = summary.processed,
        failed = summary.failed,
        "execute_session"
    );
    Ok(())
}

/// Config file values with command-line overrides applied
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_default()?,
    };
    Ok(config.merge(cli.overrides()))
}

/// Flag set by Ctrl-C; the session stops before its next line
fn interrupt_flag() -> Arc<AtomicBool> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);

    if let Err(e) = ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
    }) {
        debug!(error = %e, "ctrlc handler not installed");
    }

    interrupted
}
