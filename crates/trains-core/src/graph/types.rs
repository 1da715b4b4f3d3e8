use std::fmt;

/// Number of nodes in the alphabet (`A`..=`Z`)
pub const NODE_COUNT: usize = 26;

/// Edge weight
pub type Distance = u32;

/// Cumulative distance of a route; wide enough for any path under the depth limit
pub type RouteDistance = u64;

/// A letter-labelled vertex, stored as its ordinal in `[0, NODE_COUNT)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node(u8);

impl Node {
    /// Build a node from its ordinal.
    ///
    /// # Panics
    /// Panics if `index >= NODE_COUNT`. Ordinals come from validated input,
    /// so an out-of-range value is a programming error.
    pub fn new(index: usize) -> Self {
        assert!(
            index < NODE_COUNT,
            "node ordinal {index} out of range 0..{NODE_COUNT}"
        );
        Node(index as u8)
    }

    /// Parse an upper-case letter
    pub fn from_letter(letter: char) -> Option<Self> {
        letter
            .is_ascii_uppercase()
            .then(|| Node(letter as u8 - b'A'))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    /// All nodes in ordinal order
    pub fn all() -> impl Iterator<Item = Node> {
        (0..NODE_COUNT).map(Node::new)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Directed weighted graph over the letter alphabet.
///
/// `edges[from][to]` holds the distance of the direct edge, `None` when there
/// is no edge. The diagonal is always `None`. The graph is read-only once
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGraph {
    edges: [[Option<Distance>; NODE_COUNT]; NODE_COUNT],
}

impl Default for RouteGraph {
    fn default() -> Self {
        Self {
            edges: [[None; NODE_COUNT]; NODE_COUNT],
        }
    }
}

impl RouteGraph {
    /// Build a graph from `(from, to, distance)` triples.
    ///
    /// Self-loops are dropped. A repeated pair keeps the last distance.
    pub fn from_edges(edges: impl IntoIterator<Item = (Node, Node, Distance)>) -> Self {
        let mut graph = Self::default();
        for (from, to, distance) in edges {
            if from == to {
                continue;
            }
            graph.edges[from.index()][to.index()] = Some(distance);
        }
        graph
    }

    pub fn has_edge(&self, from: Node, to: Node) -> bool {
        self.edges[from.index()][to.index()].is_some()
    }

    /// Distance of the direct edge `from -> to`, if any
    pub fn weight(&self, from: Node, to: Node) -> Option<Distance> {
        self.edges[from.index()][to.index()]
    }

    /// Outgoing edges of `node` in ascending node order
    pub fn neighbors(&self, node: Node) -> impl Iterator<Item = (Node, Distance)> + '_ {
        self.edges[node.index()]
            .iter()
            .enumerate()
            .filter_map(|(to, weight)| weight.map(|w| (Node::new(to), w)))
    }

    /// Every edge in row-major order
    pub fn edges(&self) -> impl Iterator<Item = (Node, Node, Distance)> + '_ {
        Node::all().flat_map(move |from| {
            self.neighbors(from)
                .map(move |(to, distance)| (from, to, distance))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }
}
