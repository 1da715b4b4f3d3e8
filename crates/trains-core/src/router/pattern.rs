use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, TrainsError};
use crate::grammar;
use crate::graph::Node;

static TRIP_PATH_RE: OnceLock<Regex> = OnceLock::new();
static TRIP_HOP_RE: OnceLock<Regex> = OnceLock::new();

/// How a pattern segment reaches its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopMode {
    /// `-`: exactly one more edge
    Direct,
    /// `..`: any route
    AnyRoute,
}

impl HopMode {
    pub fn symbol(self) -> &'static str {
        match self {
            HopMode::Direct => "-",
            HopMode::AnyRoute => "..",
        }
    }
}

impl FromStr for HopMode {
    type Err = TrainsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" => Ok(HopMode::Direct),
            ".." => Ok(HopMode::AnyRoute),
            other => Err(TrainsError::UnsupportedHopMode(other.to_string())),
        }
    }
}

/// One pattern segment: travel by `mode` to `dest`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub mode: HopMode,
    pub dest: Node,
}

/// Query shape such as `A-B..C`: an origin and at least one hop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    origin: Node,
    hops: Vec<Hop>,
}

impl PathPattern {
    pub fn new(origin: Node, hops: Vec<Hop>) -> Self {
        Self { origin, hops }
    }

    pub fn origin(&self) -> Node {
        self.origin
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Final destination of the trip
    pub fn destination(&self) -> Node {
        self.hops.last().map_or(self.origin, |hop| hop.dest)
    }
}

impl FromStr for PathPattern {
    type Err = TrainsError;

    fn from_str(s: &str) -> Result<Self> {
        let path_re = grammar::cached(&TRIP_PATH_RE, grammar::TRIP_PATH)?;
        let hop_re = grammar::cached(&TRIP_HOP_RE, grammar::TRIP_HOP)?;

        let invalid = || TrainsError::InvalidPathFormat(s.trim().to_string());
        let caps = path_re.captures(s).ok_or_else(invalid)?;
        let src = caps.name("src").ok_or_else(invalid)?;
        let origin = src
            .as_str()
            .chars()
            .next()
            .and_then(Node::from_letter)
            .ok_or_else(invalid)?;

        let hops = hop_re
            .captures_iter(&s[src.end()..])
            .map(|hop| {
                let mode = hop["mode"].parse()?;
                let dest = hop["dest"]
                    .chars()
                    .next()
                    .and_then(Node::from_letter)
                    .ok_or_else(invalid)?;
                Ok(Hop { mode, dest })
            })
            .collect::<Result<Vec<_>>>()?;

        if hops.is_empty() {
            return Err(invalid());
        }

        Ok(PathPattern { origin, hops })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)?;
        for hop in &self.hops {
            write!(f, "{}{}", hop.mode.symbol(), hop.dest)?;
        }
        Ok(())
    }
}
