//! Compiled text grammars shared by the parsers

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, TrainsError};

/// Single route table entry: `AB5`, tolerating surrounding non-word characters
pub(crate) const ROUTE_ENTRY: &str = r"^\W*(?P<start>[A-Z])(?P<end>[A-Z])(?P<dist>[0-9]+)\W*$";

/// Whole trip path: `A-B..C`
pub(crate) const TRIP_PATH: &str = r"^\s*(?P<src>[A-Z])(?:(?:-|\.\.)[A-Z])+\s*$";

/// One hop of a trip path: `-B` or `..C`
pub(crate) const TRIP_HOP: &str = r"(?P<mode>-|\.\.)(?P<dest>[A-Z])";

/// Limit expression: `<term> <operator> <value>`
pub(crate) const CRITERIA: &str = r"^\s*(?P<term>\S+)\s+(?P<comp>\S+)\s+(?P<val>\S+)\s*$";

/// Command line: `<name> [<path> [[<limit>]]]`
pub(crate) const COMMAND: &str =
    r"^\s*(?P<cmd>\S+)(?:\s+(?P<path>\S+)(?:\s+\[(?P<limit>[^\]]+)\])?)?\s*$";

/// Compile `pattern` once and cache it in `cell`
pub(crate) fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let re = Regex::new(pattern)
        .map_err(|e| TrainsError::Other(format!("failed to compile pattern {pattern}: {e}")))?;
    Ok(cell.get_or_init(|| re))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for pattern in [ROUTE_ENTRY, TRIP_PATH, TRIP_HOP, CRITERIA, COMMAND] {
            assert!(Regex::new(pattern).is_ok(), "{pattern}");
        }
    }

    #[test]
    fn test_cached_returns_same_instance() {
        static CELL: OnceLock<Regex> = OnceLock::new();
        let first = cached(&CELL, TRIP_HOP).unwrap();
        let second = cached(&CELL, TRIP_HOP).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
