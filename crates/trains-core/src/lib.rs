//! Trains Core Library
//!
//! Route graph model, traversal engine and the travel query language used by
//! the `trains` command-line tool.

pub mod command;
pub mod config;
pub mod criteria;
pub mod error;
pub mod format;
mod grammar;
pub mod graph;
pub mod logging;
pub mod query;
pub mod router;
