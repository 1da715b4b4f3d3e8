//! Query session: reads command lines, writes one result per query
//!
//! Lines are processed in order. `#` starts a comment, blank lines are
//! skipped, and a failed line is reported without ending the session.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use trains_core::command::{Command, CommandKind, Outcome};
use trains_core::error::{Result, TrainsError};
use trains_core::format::OutputFormat;
use trains_core::graph::{format_route_table, RouteGraph};

/// Counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines that held a command
    pub processed: usize,
    /// Lines that failed to parse or execute
    pub failed: usize,
    /// `exit` was read
    pub terminated: bool,
    /// Stopped by Ctrl-C
    pub interrupted: bool,
}

pub struct Session<'g, W: Write> {
    graph: &'g RouteGraph,
    out: W,
    format: OutputFormat,
    verbose: bool,
    interrupted: Option<Arc<AtomicBool>>,
}

impl<'g, W: Write> Session<'g, W> {
    pub fn new(graph: &'g RouteGraph, out: W, format: OutputFormat, verbose: bool) -> Self {
        Self {
            graph,
            out,
            format,
            verbose,
            interrupted: None,
        }
    }

    /// Stop before the next line once `flag` is set
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = Some(flag);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write the route table as trace lines
    pub fn dump_routes(&mut self) -> Result<()> {
        let mut lines = vec![String::new(), "Routes table".to_string(), String::new()];
        lines.extend(format_route_table(self.graph));
        for line in &lines {
            writeln!(self.out, "{}", self.format.trace(line))?;
        }
        self.end_block()
    }

    /// Process every line of `input`
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();

        for (idx, line) in input.lines().enumerate() {
            if self.is_interrupted() {
                info!(line = idx + 1, "interrupted");
                summary.interrupted = true;
                break;
            }

            let line = line?;
            let text = strip_comment(&line).trim();
            if text.is_empty() {
                continue;
            }

            summary.processed += 1;
            let outcome = self.process(idx + 1, text);
            if self.verbose {
                self.end_block()?;
            }

            match outcome? {
                Some(Outcome::Terminate) => {
                    summary.terminated = true;
                    break;
                }
                Some(_) => {}
                None => summary.failed += 1,
            }
        }

        self.out.flush()?;
        debug!(
            processed = summary.processed,
            failed = summary.failed,
            terminated = summary.terminated,
            interrupted = summary.interrupted,
            "session"
        );
        Ok(summary)
    }

    /// Run one command line. `Ok(None)` means the line failed and was
    /// reported; `Err` is an output failure.
    fn process(&mut self, line_no: usize, text: &str) -> Result<Option<Outcome>> {
        let mut traces = Vec::new();
        let result = text.parse::<Command>().and_then(|command| {
            let traced = self.verbose || command.kind() == CommandKind::Help;
            let mut sink = |line: &str| traces.push(line.to_string());
            let outcome = if traced {
                command.execute(self.graph, Some(&mut sink))?
            } else {
                command.execute(self.graph, None)?
            };
            Ok((command, outcome))
        });

        for line in &traces {
            writeln!(self.out, "{}", self.format.trace(line))?;
        }

        match result {
            Ok((command, Outcome::Answer(answer))) => {
                writeln!(self.out, "{}", self.format.answer(&command, answer))?;
                Ok(Some(Outcome::Answer(answer)))
            }
            Ok((_, Outcome::Terminate)) => {
                if self.verbose {
                    writeln!(self.out, "{}", self.format.trace("EXIT"))?;
                }
                Ok(Some(Outcome::Terminate))
            }
            Ok((_, outcome)) => Ok(Some(outcome)),
            Err(err) => {
                self.report(line_no, text, &err)?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, line_no: usize, text: &str, err: &TrainsError) -> Result<()> {
        warn!(line = line_no, input = text, error = %err, "command failed");
        if self.verbose {
            for line in self.format.error(line_no, text, err) {
                writeln!(self.out, "{line}")?;
            }
        }
        Ok(())
    }

    /// Blank separator line after each verbose block (human format only)
    fn end_block(&mut self) -> Result<()> {
        if self.format == OutputFormat::Human {
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}
