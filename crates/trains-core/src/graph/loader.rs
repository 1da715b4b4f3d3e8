//! Route table loading
//!
//! The route table is plain text: comma-separated `<from><to><distance>`
//! entries, `#` comments to end of line, blank lines ignored.
//!
//! ```text
//! # Town graph
//! AB5, BC4, CD8
//! DC8, DE6     # return legs
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, TrainsError};
use crate::grammar;
use crate::graph::types::{Distance, Node, RouteGraph};

static ROUTE_ENTRY_RE: OnceLock<Regex> = OnceLock::new();

/// Parse a route table from any buffered reader
pub fn parse_routes<R: BufRead>(reader: R) -> Result<RouteGraph> {
    let entry_re = grammar::cached(&ROUTE_ENTRY_RE, grammar::ROUTE_ENTRY)?;
    let mut edges = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };

        for entry in content.split(',').filter(|e| !e.trim().is_empty()) {
            let invalid = || TrainsError::InvalidRouteEntry {
                line: line_no,
                entry: entry.trim().to_string(),
            };

            let caps = entry_re.captures(entry).ok_or_else(invalid)?;
            let (Some(start), Some(end)) = (letter_node(&caps["start"]), letter_node(&caps["end"]))
            else {
                return Err(invalid());
            };
            let distance: Distance = caps["dist"].parse().map_err(|_| invalid())?;
            if distance == 0 {
                return Err(invalid());
            }

            if start == end {
                skipped += 1;
                continue;
            }
            edges.push((start, end, distance));
        }
    }

    let graph = RouteGraph::from_edges(edges);
    debug!(
        edges = graph.edge_count(),
        skipped_self_loops = skipped,
        "parse_routes"
    );
    Ok(graph)
}

/// Load a route table file
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_routes(path: &Path) -> Result<RouteGraph> {
    let file = File::open(path).map_err(|e| {
        TrainsError::route_table(path, TrainsError::io_operation("open", path.display(), e))
    })?;

    parse_routes(BufReader::new(file)).map_err(|e| match e {
        TrainsError::Io(io) => {
            TrainsError::route_table(path, TrainsError::io_operation("read", path.display(), io))
        }
        other => TrainsError::route_table(path, other),
    })
}

/// Render the graph as route table lines, one per source node.
///
/// Nodes without outgoing edges are omitted.
pub fn format_route_table(graph: &RouteGraph) -> Vec<String> {
    Node::all()
        .filter_map(|from| {
            let entries: Vec<String> = graph
                .neighbors(from)
                .map(|(to, distance)| format!("{from}{to}{distance}"))
                .collect();
            (!entries.is_empty()).then(|| entries.join(", "))
        })
        .collect()
}

fn letter_node(s: &str) -> Option<Node> {
    s.chars().next().and_then(Node::from_letter)
}
