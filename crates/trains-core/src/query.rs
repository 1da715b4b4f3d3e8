//! Query operations over traversal results
//!
//! Each query runs [`traverse`], drops the degenerate origin-only route and
//! reduces what is left to a single number. `None` means no route qualifies;
//! it is a normal answer, not an error.
//!
//! Diagnostics go through an optional trace sink, one line per route
//! examined, e.g. `A-B-C (dist: 9; stops: 2)`.

use std::time::Instant;

use crate::criteria::CriteriaSet;
use crate::graph::{RouteDistance, RouteGraph};
use crate::router::{traverse, PathPattern, Route};
use crate::trace_time;

/// Optional sink receiving human-readable trace lines
pub type TraceSink<'a> = Option<&'a mut dyn FnMut(&str)>;

/// The three travel questions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Shortest total distance
    Distance,
    /// Number of distinct routes
    RouteCount,
    /// Fewest edges travelled
    MinStops,
}

impl QueryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::Distance => "dist",
            QueryKind::RouteCount => "routes",
            QueryKind::MinStops => "stops",
        }
    }

    pub fn run(
        self,
        graph: &RouteGraph,
        pattern: &PathPattern,
        criteria: &CriteriaSet,
        trace: TraceSink<'_>,
    ) -> Option<u64> {
        let start = Instant::now();
        let answer = match self {
            QueryKind::Distance => {
                shortest_distance(graph, pattern, criteria, trace)
            }
            QueryKind::RouteCount => {
                count_routes(graph, pattern, criteria, trace).map(|c| c as u64)
            }
            QueryKind::MinStops => min_stops(graph, pattern, criteria, trace).map(|s| s as u64),
        };
        trace_time!(start, "query", kind = self.as_str());
        answer
    }
}

/// Routes for `pattern`, minus the origin-only route
fn candidates(graph: &RouteGraph, pattern: &PathPattern, criteria: &CriteriaSet) -> Vec<Route> {
    let mut routes = traverse(graph, pattern, criteria);
    routes.retain(|route| !route.is_degenerate());
    routes
}

fn emit(trace: &mut TraceSink<'_>, route: &Route) {
    if let Some(sink) = trace.as_deref_mut() {
        sink(&route.to_string());
    }
}

/// Minimum total distance over all matching routes.
///
/// Ties go to the first route found.
pub fn shortest_distance(
    graph: &RouteGraph,
    pattern: &PathPattern,
    criteria: &CriteriaSet,
    mut trace: TraceSink<'_>,
) -> Option<RouteDistance> {
    let routes = candidates(graph, pattern, criteria);
    let best = routes.iter().min_by_key(|route| route.distance())?;
    emit(&mut trace, best);
    Some(best.distance())
}

/// Number of matching routes; zero is reported as `None`.
///
/// Routes are traced ordered by distance, then length.
pub fn count_routes(
    graph: &RouteGraph,
    pattern: &PathPattern,
    criteria: &CriteriaSet,
    mut trace: TraceSink<'_>,
) -> Option<usize> {
    let mut routes = candidates(graph, pattern, criteria);
    routes.sort_by_key(|route| (route.distance(), route.path().len()));
    for route in &routes {
        emit(&mut trace, route);
    }
    (!routes.is_empty()).then_some(routes.len())
}

/// Fewest edges over all matching routes.
pub fn min_stops(
    graph: &RouteGraph,
    pattern: &PathPattern,
    criteria: &CriteriaSet,
    mut trace: TraceSink<'_>,
) -> Option<usize> {
    let routes = candidates(graph, pattern, criteria);
    let best = routes.iter().min_by_key(|route| route.path().len())?;
    emit(&mut trace, best);
    Some(best.stops())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::parse_routes;
    use std::io::Cursor;

    fn towns() -> RouteGraph {
        parse_routes(Cursor::new("AB5, BC4, CD8, DC8, DE6, AD5, CE2, EB3, AE7")).unwrap()
    }

    fn ask(kind: QueryKind, path: &str, limit: Option<&str>) -> Option<u64> {
        let pattern: PathPattern = path.parse().unwrap();
        let criteria = CriteriaSet::parse(limit).unwrap();
        kind.run(&towns(), &pattern, &criteria, None)
    }

    fn traced(kind: QueryKind, path: &str, limit: Option<&str>) -> Vec<String> {
        let pattern: PathPattern = path.parse().unwrap();
        let criteria = CriteriaSet::parse(limit).unwrap();
        let mut lines = Vec::new();
        let mut sink = |line: &str| lines.push(line.to_string());
        kind.run(&towns(), &pattern, &criteria, Some(&mut sink));
        lines
    }

    #[test]
    fn test_distance_direct() {
        assert_eq!(ask(QueryKind::Distance, "A-B-C", None), Some(9));
        assert_eq!(ask(QueryKind::Distance, "A-D", None), Some(5));
        assert_eq!(ask(QueryKind::Distance, "A-D-C", None), Some(13));
        assert_eq!(ask(QueryKind::Distance, "A-E-B-C-D", None), Some(22));
        assert_eq!(ask(QueryKind::Distance, "A-E-D", None), None);
    }

    #[test]
    fn test_distance_any_route() {
        assert_eq!(ask(QueryKind::Distance, "A..C", None), Some(9));
        assert_eq!(ask(QueryKind::Distance, "B..B", None), Some(9));
    }

    #[test]
    fn test_distance_excludes_degenerate_route() {
        // The origin-only route has distance 0 and must never win
        assert_eq!(ask(QueryKind::Distance, "C..C", None), Some(9));
    }

    #[test]
    fn test_route_count() {
        assert_eq!(
            ask(QueryKind::RouteCount, "C..C", Some("stops <= 3")),
            Some(2)
        );
        assert_eq!(
            ask(QueryKind::RouteCount, "A..C", Some("stops == 4")),
            Some(3)
        );
        assert_eq!(
            ask(QueryKind::RouteCount, "C..C", Some("dist < 30")),
            Some(7)
        );
        assert_eq!(ask(QueryKind::RouteCount, "C..C", None), Some(3));
    }

    #[test]
    fn test_route_count_zero_is_none() {
        assert_eq!(ask(QueryKind::RouteCount, "A..C", Some("stops < 2")), None);
        assert_eq!(ask(QueryKind::RouteCount, "A-C", None), None);
    }

    #[test]
    fn test_min_stops() {
        assert_eq!(ask(QueryKind::MinStops, "A..C", None), Some(2));
        assert_eq!(ask(QueryKind::MinStops, "C..C", None), Some(2));
        assert_eq!(ask(QueryKind::MinStops, "A..C", Some("stops == 4")), Some(4));
        assert_eq!(ask(QueryKind::MinStops, "A-E-D", None), None);
    }

    #[test]
    fn test_large_distances_are_not_clamped() {
        let graph = parse_routes(Cursor::new("AB4000000000, BC4000000000")).unwrap();
        let pattern: PathPattern = "A-B-C".parse().unwrap();
        let criteria = CriteriaSet::default();
        assert_eq!(
            QueryKind::Distance.run(&graph, &pattern, &criteria, None),
            Some(8_000_000_000)
        );

        let pattern: PathPattern = "A..C".parse().unwrap();
        let criteria = CriteriaSet::parse(Some("dist <= 4294967295")).unwrap();
        assert_eq!(
            QueryKind::RouteCount.run(&graph, &pattern, &criteria, None),
            None
        );
    }

    #[test]
    fn test_distance_trace_shows_winner() {
        assert_eq!(
            traced(QueryKind::Distance, "A..C", None),
            vec!["A-B-C (dist: 9; stops: 2)"]
        );
    }

    #[test]
    fn test_min_stops_trace_takes_first_shortest() {
        assert_eq!(
            traced(QueryKind::MinStops, "A..C", None),
            vec!["A-B-C (dist: 9; stops: 2)"]
        );
    }

    #[test]
    fn test_route_count_trace_is_sorted() {
        assert_eq!(
            traced(QueryKind::RouteCount, "C..C", Some("stops <= 3")),
            vec!["C-E-B-C (dist: 9; stops: 3)", "C-D-C (dist: 16; stops: 2)"]
        );
    }

    #[test]
    fn test_no_route_emits_no_trace() {
        assert!(traced(QueryKind::Distance, "A-E-D", None).is_empty());
    }
}
