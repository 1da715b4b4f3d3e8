//! Query commands: `<name> <path> [<limit>]`
//!
//! ```text
//! dist A-B-C
//! routes C..C [stops <= 3]
//! help
//! exit
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::criteria::CriteriaSet;
use crate::error::{Result, TrainsError};
use crate::grammar;
use crate::graph::RouteGraph;
use crate::query::{QueryKind, TraceSink};
use crate::router::PathPattern;

static COMMAND_RE: OnceLock<Regex> = OnceLock::new();

/// Supported command names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Dist,
    Routes,
    Stops,
    Help,
    Exit,
}

const COMMANDS: &[(&str, CommandKind)] = &[
    ("dist", CommandKind::Dist),
    ("routes", CommandKind::Routes),
    ("stops", CommandKind::Stops),
    ("help", CommandKind::Help),
    ("exit", CommandKind::Exit),
];

impl CommandKind {
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Dist => "dist",
            CommandKind::Routes => "routes",
            CommandKind::Stops => "stops",
            CommandKind::Help => "help",
            CommandKind::Exit => "exit",
        }
    }

    /// Case-insensitive lookup
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        COMMANDS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, kind)| *kind)
    }

    /// The query this command runs, if any
    pub fn query(self) -> Option<QueryKind> {
        match self {
            CommandKind::Dist => Some(QueryKind::Distance),
            CommandKind::Routes => Some(QueryKind::RouteCount),
            CommandKind::Stops => Some(QueryKind::MinStops),
            CommandKind::Help | CommandKind::Exit => None,
        }
    }
}

/// Result of executing one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Query answer; `None` means no such route
    Answer(Option<u64>),
    /// Help text was written to the trace sink
    Help,
    /// Stop reading further commands
    Terminate,
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    path: Option<String>,
    limit: Option<String>,
}

impl Command {
    pub fn new(kind: CommandKind, path: Option<String>, limit: Option<String>) -> Self {
        Self { kind, path, limit }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn limit(&self) -> Option<&str> {
        self.limit.as_deref()
    }

    /// Run the command against `graph`.
    ///
    /// Query commands trace their own description first and then each route
    /// they examine. Help is written to the sink in full.
    pub fn execute(&self, graph: &RouteGraph, mut trace: TraceSink<'_>) -> Result<Outcome> {
        let Some(query) = self.kind.query() else {
            return Ok(match self.kind {
                CommandKind::Help => {
                    if let Some(sink) = trace.as_deref_mut() {
                        for line in help_lines() {
                            sink(line);
                        }
                    }
                    Outcome::Help
                }
                _ => Outcome::Terminate,
            });
        };

        if let Some(sink) = trace.as_deref_mut() {
            sink(&self.to_string());
        }

        let pattern: PathPattern = self.path.as_deref().unwrap_or_default().parse()?;
        let criteria = CriteriaSet::parse(self.limit())?;
        debug!(command = %self, "execute");

        Ok(Outcome::Answer(query.run(graph, &pattern, &criteria, trace)))
    }
}

impl FromStr for Command {
    type Err = TrainsError;

    fn from_str(s: &str) -> Result<Self> {
        let re = grammar::cached(&COMMAND_RE, grammar::COMMAND)?;
        let caps = re
            .captures(s)
            .ok_or_else(|| TrainsError::InvalidCommandFormat(s.trim().to_string()))?;

        let name = &caps["cmd"];
        let kind =
            CommandKind::lookup(name).ok_or_else(|| TrainsError::UnknownCommand(name.to_string()))?;

        let path = caps.name("path").map(|m| m.as_str().to_string());
        let limit = caps.name("limit").map(|m| m.as_str().to_string());

        Ok(Command { kind, path, limit })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        if let Some(path) = self.path() {
            write!(f, " \"{path}\"")?;
            if let Some(limit) = self.limit() {
                write!(f, " [{limit}]")?;
            }
        }
        Ok(())
    }
}

/// Help text for the command language
pub fn help_lines() -> &'static [&'static str] {
    &[
        "Commands format:",
        "",
        "  <name> <path> [<limit>]",
        "",
        "Where:",
        "",
        "  name    - Name of the command (case insensitive).",
        "",
        "            Supported commands:",
        "",
        "              'dist'    - Calculates shortest distance",
        "              'routes'  - Calculates number of possible routes",
        "              'stops'   - Calculates minimal number of stops",
        "              'help'    - Outputs list of supported commands",
        "              'exit'    - Terminates further processing",
        "",
        "  path    - Graph path to travel/calculate.",
        "",
        "            Route is described as following:",
        "              'A-B'     - Direct travel between A and B",
        "              'A..B'    - Any possible route between A and B",
        "",
        "  limit   - (optional) Limits to apply during search/calculation.",
        "",
        "            Limits apply to 'dist' or 'stops' and are written as",
        "            '<term> <operator> <value>' with operator '==', '<' or '<='.",
        "            For example: 'stops == 5', or 'dist <= 20'.",
        "",
        "Notes:",
        "          - Empty lines are ignored",
        "          - Comments start with '#' character",
        "",
        "Commands examples:",
        "",
        "  dist A-B-C",
        "  dist A..C",
        "  routes C..C [stops <= 3]",
        "  stops A-B..E",
        "  exit",
        "",
    ]
}
