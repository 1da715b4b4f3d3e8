use std::fmt;

use tracing::debug;

use crate::criteria::{CriteriaSet, RouteCriterion};
use crate::graph::{Node, RouteDistance, RouteGraph};
use crate::router::pattern::{HopMode, PathPattern};

/// Hard cap on nodes in a single path (runaway recursion guard)
pub const ROUTE_DEPTH_LIMIT: usize = 200;

/// A candidate route: visited nodes from the trip origin plus total distance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: Vec<Node>,
    distance: RouteDistance,
}

impl Route {
    pub fn new(path: Vec<Node>, distance: RouteDistance) -> Self {
        Self { path, distance }
    }

    pub fn path(&self) -> &[Node] {
        &self.path
    }

    pub fn distance(&self) -> RouteDistance {
        self.distance
    }

    /// Number of edges travelled
    pub fn stops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn origin(&self) -> Option<Node> {
        self.path.first().copied()
    }

    pub fn destination(&self) -> Option<Node> {
        self.path.last().copied()
    }

    /// A single-node "route" that never moved
    pub fn is_degenerate(&self) -> bool {
        self.path.len() <= 1
    }

    /// Hyphen-joined letters, e.g. `A-B-C`
    pub fn letters(&self) -> String {
        self.path
            .iter()
            .map(|n| n.letter().to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (dist: {}; stops: {})",
            self.letters(),
            self.distance,
            self.stops()
        )
    }
}

/// Outcome of visiting one node during the search.
///
/// Two independent bits: record the route, and extend it further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Reject,
    Continue,
    Accept,
    AcceptAndContinue,
}

impl Decision {
    pub fn new(record: bool, extend: bool) -> Self {
        match (record, extend) {
            (false, false) => Decision::Reject,
            (false, true) => Decision::Continue,
            (true, false) => Decision::Accept,
            (true, true) => Decision::AcceptAndContinue,
        }
    }

    pub fn should_record(self) -> bool {
        matches!(self, Decision::Accept | Decision::AcceptAndContinue)
    }

    pub fn may_continue(self) -> bool {
        matches!(self, Decision::Continue | Decision::AcceptAndContinue)
    }
}

/// Counters collected over one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub visited: u64,
    pub pruned: u64,
    pub recorded: u64,
    pub depth_capped: u64,
}

/// Node-visit policy for one pattern segment
#[derive(Debug, Clone, Copy)]
pub struct VisitPolicy<'a> {
    /// First node of the whole trip
    pub origin: Node,
    /// Destination of the current segment
    pub dest: Node,
    pub criteria: &'a CriteriaSet,
}

impl VisitPolicy<'_> {
    /// Decide what to do with the node on top of `path`.
    ///
    /// Without criteria a node may appear once, the trip origin twice. With
    /// criteria that loop guard is replaced by the criteria eligibility check.
    pub fn eval(&self, path: &[Node], distance: RouteDistance) -> Decision {
        let Some(&current) = path.last() else {
            return Decision::Reject;
        };

        let reject = if self.criteria.is_empty() {
            let allowed = 1 + usize::from(current == self.origin);
            path.iter().filter(|&&n| n == current).count() > allowed
        } else {
            !self.criteria.is_eligible(path, distance)
        };

        if reject {
            Decision::Reject
        } else {
            Decision::new(current == self.dest, true)
        }
    }
}

/// Depth-first search from the end of `start`, driven by `eval`.
///
/// Every node on the way is passed to `eval` together with the full path
/// (starting with `start`'s nodes) and the cumulative distance. Accepted
/// paths are returned in visit order.
pub fn search<F>(graph: &RouteGraph, start: &Route, eval: F) -> Vec<Route>
where
    F: Fn(&[Node], RouteDistance) -> Decision,
{
    let mut stats = TraversalStats::default();
    search_with_stats(graph, start, &eval, &mut stats)
}

fn search_with_stats<F>(
    graph: &RouteGraph,
    start: &Route,
    eval: &F,
    stats: &mut TraversalStats,
) -> Vec<Route>
where
    F: Fn(&[Node], RouteDistance) -> Decision,
{
    let mut path = start.path.clone();
    let mut found = Vec::new();
    dfs(graph, &mut path, start.distance, eval, &mut found, stats);
    found
}

fn dfs<F>(
    graph: &RouteGraph,
    path: &mut Vec<Node>,
    distance: RouteDistance,
    eval: &F,
    found: &mut Vec<Route>,
    stats: &mut TraversalStats,
) where
    F: Fn(&[Node], RouteDistance) -> Decision,
{
    if path.len() > ROUTE_DEPTH_LIMIT {
        stats.depth_capped += 1;
        return;
    }
    let Some(&current) = path.last() else {
        return;
    };

    stats.visited += 1;
    let decision = eval(path, distance);
    if decision.should_record() {
        stats.recorded += 1;
        found.push(Route::new(path.clone(), distance));
    }
    if !decision.may_continue() {
        if decision == Decision::Reject {
            stats.pruned += 1;
        }
        return;
    }

    for (next, weight) in graph.neighbors(current) {
        path.push(next);
        dfs(
            graph,
            path,
            distance + RouteDistance::from(weight),
            eval,
            found,
            stats,
        );
        path.pop();
    }
}

/// Enumerate every route matching `pattern` and `criteria`.
///
/// Segments are resolved left to right; each active route is extended to the
/// segment destination and the extensions become the next active set. The
/// result is filtered by the criteria final test and may include the
/// degenerate origin-only route.
#[tracing::instrument(skip(graph, pattern, criteria), fields(pattern = %pattern, criteria = criteria.len()))]
pub fn traverse(graph: &RouteGraph, pattern: &PathPattern, criteria: &CriteriaSet) -> Vec<Route> {
    let mut stats = TraversalStats::default();
    let mut active = vec![Route::new(vec![pattern.origin()], 0)];

    for hop in pattern.hops() {
        if active.is_empty() {
            break;
        }

        let policy = VisitPolicy {
            origin: pattern.origin(),
            dest: hop.dest,
            criteria,
        };

        let mut next = Vec::new();
        for route in &active {
            let found = match hop.mode {
                HopMode::Direct => {
                    let max_len = route.path.len() + 1;
                    let direct = |path: &[Node], distance: RouteDistance| {
                        if path.len() > max_len {
                            Decision::Reject
                        } else {
                            policy.eval(path, distance)
                        }
                    };
                    search_with_stats(graph, route, &direct, &mut stats)
                }
                HopMode::AnyRoute => {
                    let any = |path: &[Node], distance: RouteDistance| policy.eval(path, distance);
                    search_with_stats(graph, route, &any, &mut stats)
                }
            };
            next.extend(found);
        }
        active = next;
    }

    let candidates = active.len();
    active.retain(|route| criteria.test(&route.path, route.distance));

    debug!(
        visited = stats.visited,
        pruned = stats.pruned,
        recorded = stats.recorded,
        depth_capped = stats.depth_capped,
        filtered = candidates - active.len(),
        routes = active.len(),
        "traverse"
    );

    active
}
