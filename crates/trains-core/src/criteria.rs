//! Search criteria: limit expressions such as `stops <= 3` or `dist < 30`
//!
//! A criterion answers two questions about a route:
//! - `is_eligible`: may the search keep extending this partial route?
//! - `test`: does a completed route satisfy the limit?
//!
//! Pruning only ever checks the upper bound; a route below the minimum may
//! still grow into range.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, TrainsError};
use crate::grammar;
use crate::graph::{Node, RouteDistance};

static CRITERIA_RE: OnceLock<Regex> = OnceLock::new();

/// Predicate pair evaluated during and after traversal
pub trait RouteCriterion {
    /// May the search continue past `route` (with cumulative `distance`)?
    fn is_eligible(&self, route: &[Node], distance: RouteDistance) -> bool;

    /// Does the completed `route` satisfy this criterion?
    fn test(&self, route: &[Node], distance: RouteDistance) -> bool;
}

/// Quantity a criterion limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaTerm {
    /// Total route distance
    Distance,
    /// Number of edges travelled
    Stops,
}

/// Supported limit terms
const TERMS: &[(&str, CriteriaTerm)] = &[
    ("stops", CriteriaTerm::Stops),
    ("dist", CriteriaTerm::Distance),
];

impl CriteriaTerm {
    pub fn as_str(self) -> &'static str {
        match self {
            CriteriaTerm::Distance => "dist",
            CriteriaTerm::Stops => "stops",
        }
    }

    /// Case-insensitive lookup
    pub fn lookup(term: &str) -> Option<Self> {
        let term = term.to_lowercase();
        TERMS
            .iter()
            .find(|(name, _)| *name == term)
            .map(|(_, t)| *t)
    }

    fn measure(self, route: &[Node], distance: RouteDistance) -> i64 {
        match self {
            CriteriaTerm::Distance => i64::try_from(distance).unwrap_or(i64::MAX),
            CriteriaTerm::Stops => route.len() as i64 - 1,
        }
    }
}

/// Comparison operator of a limit expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `==`
    Eq,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Lt => "<",
            Operator::Le => "<=",
        }
    }

    fn parse(op: &str, term: CriteriaTerm) -> Result<Self> {
        match op {
            "==" => Ok(Operator::Eq),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            other => Err(TrainsError::UnsupportedOperator {
                operator: other.to_string(),
                term: term.as_str().to_string(),
            }),
        }
    }
}

/// Inclusive bounds derived from an operator and a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Bounds {
    pub fn new(operator: Operator, value: u64) -> Self {
        let value = i64::try_from(value).unwrap_or(i64::MAX);
        match operator {
            Operator::Eq => Bounds {
                min: Some(value),
                max: Some(value),
            },
            Operator::Lt => Bounds {
                min: None,
                max: Some(value - 1),
            },
            Operator::Le => Bounds {
                min: None,
                max: Some(value),
            },
        }
    }

    fn within_max(&self, measure: i64) -> bool {
        self.max.map_or(true, |max| measure <= max)
    }

    fn contains(&self, measure: i64) -> bool {
        self.min.map_or(true, |min| measure >= min) && self.within_max(measure)
    }
}

/// A single parsed limit, e.g. `stops <= 3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    term: CriteriaTerm,
    operator: Operator,
    value: u64,
    bounds: Bounds,
}

impl Criterion {
    pub fn new(term: CriteriaTerm, operator: Operator, value: u64) -> Self {
        Self {
            term,
            operator,
            value,
            bounds: Bounds::new(operator, value),
        }
    }

    pub fn term(&self) -> CriteriaTerm {
        self.term
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl RouteCriterion for Criterion {
    fn is_eligible(&self, route: &[Node], distance: RouteDistance) -> bool {
        self.bounds
            .within_max(self.term.measure(route, distance))
    }

    fn test(&self, route: &[Node], distance: RouteDistance) -> bool {
        self.bounds.contains(self.term.measure(route, distance))
    }
}

impl FromStr for Criterion {
    type Err = TrainsError;

    fn from_str(s: &str) -> Result<Self> {
        let re = grammar::cached(&CRITERIA_RE, grammar::CRITERIA)?;
        let caps = re
            .captures(s)
            .ok_or_else(|| TrainsError::InvalidCriteriaFormat(s.trim().to_string()))?;

        let term_str = &caps["term"];
        let term = CriteriaTerm::lookup(term_str)
            .ok_or_else(|| TrainsError::UnsupportedCriteriaTerm(term_str.to_string()))?;
        let operator = Operator::parse(&caps["comp"], term)?;
        let value = caps["val"]
            .parse::<u64>()
            .map_err(|_| TrainsError::InvalidCriteriaValue {
                term: term.as_str().to_string(),
                value: caps["val"].to_string(),
            })?;

        Ok(Criterion::new(term, operator, value))
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.term.as_str(),
            self.operator.as_str(),
            self.value
        )
    }
}

/// All criteria of one query. Empty means "no constraint".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CriteriaSet {
    criteria: Vec<Criterion>,
}

impl CriteriaSet {
    /// Parse an optional limit expression.
    ///
    /// An absent, empty or whitespace-only expression yields an empty set.
    pub fn parse(expr: Option<&str>) -> Result<Self> {
        match expr.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(expr) => Ok(Self {
                criteria: vec![expr.parse()?],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }
}

impl From<Vec<Criterion>> for CriteriaSet {
    fn from(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }
}

impl RouteCriterion for CriteriaSet {
    fn is_eligible(&self, route: &[Node], distance: RouteDistance) -> bool {
        self.criteria.iter().all(|c| c.is_eligible(route, distance))
    }

    fn test(&self, route: &[Node], distance: RouteDistance) -> bool {
        self.criteria.iter().all(|c| c.test(route, distance))
    }
}
