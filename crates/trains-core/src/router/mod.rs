//! Route traversal engine
//!
//! - `pattern`: trip path patterns (`A-B..C`)
//! - `traverse`: depth-first enumeration of routes under a pattern and a
//!   pluggable visit policy

pub mod pattern;
pub mod traverse;

pub use pattern::{Hop, HopMode, PathPattern};
pub use traverse::{
    search, traverse, Decision, Route, TraversalStats, VisitPolicy, ROUTE_DEPTH_LIMIT,
};
