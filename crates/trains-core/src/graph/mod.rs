//! Route graph model and loading
//!
//! - `types`: node ordinals and the fixed-size adjacency matrix
//! - `loader`: route table text format (`AB5, BC4 # comment`)

pub mod loader;
pub mod types;

pub use loader::{format_route_table, load_routes, parse_routes};
pub use types::{Distance, Node, RouteDistance, RouteGraph, NODE_COUNT};
