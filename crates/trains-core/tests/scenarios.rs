//! End-to-end query scenarios against the reference town graph

use std::io::Cursor;

use trains_core::command::{Command, Outcome};
use trains_core::error::TrainsError;
use trains_core::graph::{parse_routes, RouteGraph};

const TOWNS: &str = "AB5, BC4, CD8, DC8, DE6, AD5, CE2, EB3, AE7";

fn towns() -> RouteGraph {
    parse_routes(Cursor::new(TOWNS)).unwrap()
}

fn answer(graph: &RouteGraph, line: &str) -> Option<u64> {
    let command: Command = line.parse().unwrap();
    match command.execute(graph, None).unwrap() {
        Outcome::Answer(answer) => answer,
        other => panic!("{line}: unexpected outcome {other:?}"),
    }
}

#[test]
fn test_reference_scenarios() {
    let graph = towns();
    let cases = [
        ("dist A-B-C", Some(9)),
        ("dist A-D", Some(5)),
        ("dist A-D-C", Some(13)),
        ("dist A-E-B-C-D", Some(22)),
        ("dist A-E-D", None),
        ("routes C..C [stops <= 3]", Some(2)),
        ("routes A..C [stops == 4]", Some(3)),
        ("dist A..C", Some(9)),
        ("stops A..C", Some(2)),
        ("dist B..B", Some(9)),
        ("dist C..C", Some(9)),
        ("routes C..C [dist < 30]", Some(7)),
    ];

    for (line, expected) in cases {
        assert_eq!(answer(&graph, line), expected, "{line}");
    }
}

#[test]
fn test_mixed_pattern() {
    let graph = towns();
    assert_eq!(answer(&graph, "dist A-B..E"), Some(11));
    assert_eq!(answer(&graph, "routes A-B..E"), Some(2));
    assert_eq!(answer(&graph, "stops A-B..E"), Some(3));
}

#[test]
fn test_limits_narrow_results() {
    let graph = towns();
    assert_eq!(answer(&graph, "dist C..C [dist == 16]"), Some(16));
    assert_eq!(answer(&graph, "routes C..C [stops == 1]"), None);
    assert_eq!(answer(&graph, "stops A..C [stops == 4]"), Some(4));
}

#[test]
fn test_repeated_runs_are_stable() {
    let graph = towns();
    let first = answer(&graph, "routes C..C [dist < 30]");
    for _ in 0..3 {
        assert_eq!(answer(&graph, "routes C..C [dist < 30]"), first);
    }
}

#[test]
fn test_query_errors_are_reported() {
    let graph = towns();
    let err = "dist A-".parse::<Command>().unwrap().execute(&graph, None);
    assert!(matches!(err, Err(TrainsError::InvalidPathFormat(_))));

    let err = "routes C..C [stops != 3]"
        .parse::<Command>()
        .unwrap()
        .execute(&graph, None);
    assert!(matches!(err, Err(TrainsError::UnsupportedOperator { .. })));

    assert!(matches!(
        "teleport A-B".parse::<Command>(),
        Err(TrainsError::UnknownCommand(_))
    ));
}

#[test]
fn test_trace_lines_for_route_count() {
    let graph = towns();
    let command: Command = "routes A..C [stops == 4]".parse().unwrap();
    let mut lines = Vec::new();
    let mut sink = |line: &str| lines.push(line.to_string());
    let outcome = command.execute(&graph, Some(&mut sink)).unwrap();

    assert_eq!(outcome, Outcome::Answer(Some(3)));
    assert_eq!(lines[0], "routes \"A..C\" [stops == 4]");
    assert_eq!(lines.len(), 4);
    assert!(lines[1..].iter().all(|l| l.ends_with("stops: 4)")));
}
