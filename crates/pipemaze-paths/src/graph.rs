//! Node graph built from a [`Board`].
//!
//! Nodes live in a flat arena indexed like the board (`row * width + col`);
//! bricks leave an empty slot. Neighbor links are arena indices, one slot
//! per [`Direction`]. The graph is never mutated by a search; consumed
//! edges are tracked separately in an [`EdgeSet`].

use pipemaze_core::{Board, DirMask, Direction, Point, Range, Tile};

use crate::error::SolveError;

/// One non-brick board cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub pos: Point,
    pub tile: Tile,
    neighbors: [Option<usize>; 4],
}

impl Node {
    fn new(pos: Point, tile: Tile) -> Self {
        Self {
            pos,
            tile,
            neighbors: [None; 4],
        }
    }

    /// Arena index of the adjacent node in direction `d`.
    #[inline]
    pub fn neighbor(&self, d: Direction) -> Option<usize> {
        self.neighbors[d.index()]
    }

    /// Directions that have an adjacent node.
    pub fn links(&self) -> DirMask {
        Direction::ALL
            .into_iter()
            .filter(|d| self.neighbor(*d).is_some())
            .fold(DirMask::NONE, |m, d| m | d.bit())
    }
}

/// Adjacency graph of the non-brick cells of a board.
#[derive(Debug, Clone)]
pub struct Graph {
    range: Range,
    nodes: Vec<Option<Node>>,
    start: usize,
    node_count: usize,
}

impl Graph {
    /// Build the graph for `board`.
    ///
    /// Cells are scanned row-major. Each node is linked to the node on its
    /// West and to the most recent node in its column (the one directly
    /// North, unless a brick intervened); links are set in both directions.
    ///
    /// The board must contain exactly one Start cell.
    pub fn build(board: &Board) -> Result<Self, SolveError> {
        let range = board.range();
        let width = range.width().max(0) as usize;
        let mut nodes: Vec<Option<Node>> = Vec::with_capacity(range.len());
        let mut above: Vec<Option<usize>> = vec![None; width];
        let mut start: Option<usize> = None;
        let mut node_count = 0;

        for (p, tile) in board.iter() {
            let col = p.x as usize;
            if tile.is_brick() {
                nodes.push(None);
                above[col] = None;
                continue;
            }
            let idx = nodes.len();
            nodes.push(Some(Node::new(p, tile)));
            node_count += 1;

            if col > 0 && nodes[idx - 1].is_some() {
                link(&mut nodes, idx, Direction::West, idx - 1);
            }
            if let Some(n) = above[col] {
                link(&mut nodes, idx, Direction::North, n);
            }
            if tile == Tile::Start {
                if let Some(first) = start {
                    return Err(SolveError::MultipleStarts {
                        first: range.point_at(first),
                        second: p,
                    });
                }
                start = Some(idx);
            }
            above[col] = Some(idx);
        }

        let start = start.ok_or(SolveError::MissingStart)?;
        log::debug!(
            "graph: {} nodes on a {}x{} board, start at {}",
            node_count,
            range.width(),
            range.height(),
            range.point_at(start)
        );
        Ok(Self {
            range,
            nodes,
            start,
            node_count,
        })
    }

    /// Arena index of the Start node.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// The board rectangle.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Number of arena slots (board cells, bricks included).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes (non-brick cells).
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Largest total rotation count any path can have: three turns per node.
    #[inline]
    pub fn max_cost(&self) -> u32 {
        3 * self.node_count as u32
    }

    /// The node in arena slot `idx`.
    #[inline]
    pub fn node(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    /// Arena index of the node at `p`.
    pub fn index_of(&self, p: Point) -> Option<usize> {
        let i = self.range.index_of(p)?;
        self.nodes[i].as_ref().map(|_| i)
    }

    /// Board position of arena slot `idx`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.range.point_at(idx)
    }

    /// Iterate over `(index, node)` pairs in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (i, n)))
    }
}

fn link(nodes: &mut [Option<Node>], a: usize, d: Direction, b: usize) {
    if let Some(n) = nodes[a].as_mut() {
        n.neighbors[d.index()] = Some(b);
    }
    if let Some(n) = nodes[b].as_mut() {
        n.neighbors[d.opposite().index()] = Some(a);
    }
}

// ---------------------------------------------------------------------------
// EdgeSet
// ---------------------------------------------------------------------------

/// Set of directed edges, keyed by `(source node, direction)`.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    bits: Vec<DirMask>,
    len: usize,
}

impl EdgeSet {
    /// An empty set sized for `graph`.
    pub fn new(graph: &Graph) -> Self {
        Self {
            bits: vec![DirMask::NONE; graph.len()],
            len: 0,
        }
    }

    /// Whether the edge leaving `node` towards `d` is in the set.
    #[inline]
    pub fn contains(&self, node: usize, d: Direction) -> bool {
        self.bits.get(node).is_some_and(|m| m.has(d))
    }

    /// Add an edge. Returns `false` if it was already present.
    pub fn insert(&mut self, node: usize, d: Direction) -> bool {
        let Some(m) = self.bits.get_mut(node) else {
            return false;
        };
        if m.has(d) {
            return false;
        }
        *m = *m | d.bit();
        self.len += 1;
        true
    }

    /// Number of edges in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every edge, resizing for `graph`.
    pub fn reset(&mut self, graph: &Graph) {
        self.bits.clear();
        self.bits.resize(graph.len(), DirMask::NONE);
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(s: &str) -> Graph {
        Graph::build(&s.parse().unwrap()).unwrap()
    }

    #[test]
    fn links_are_symmetric() {
        let g = graph("S═╗\n╔╬╝\n╚═E");
        for (i, n) in g.nodes() {
            for d in Direction::ALL {
                if let Some(j) = n.neighbor(d) {
                    assert_eq!(g.node(j).unwrap().neighbor(d.opposite()), Some(i));
                    assert_eq!(g.point(j), n.pos + d.delta());
                }
            }
        }
        let center = g.node(g.index_of(Point::new(1, 1)).unwrap()).unwrap();
        assert_eq!(center.links(), DirMask::ALL);
        let corner = g.node(g.start()).unwrap();
        assert_eq!(corner.links(), DirMask::EAST | DirMask::SOUTH);
    }

    #[test]
    fn bricks_break_adjacency() {
        let g = graph("S E\n═ ║\n╬╬╬");
        assert_eq!(g.node_count(), 7);
        assert_eq!(g.max_cost(), 21);
        let s = g.node(g.start()).unwrap();
        assert_eq!(s.neighbor(Direction::East), None);
        assert_eq!(s.neighbor(Direction::South), g.index_of(Point::new(0, 1)));
        assert_eq!(g.index_of(Point::new(1, 0)), None);
        // the bottom middle cross has no North link: a brick sits above it
        let mid = g.node(g.index_of(Point::new(1, 2)).unwrap()).unwrap();
        assert_eq!(mid.links(), DirMask::EAST | DirMask::WEST);
    }

    #[test]
    fn brick_resets_column_buffer() {
        // column 0: S, brick, pipe — the pipe must not link to S
        let g = graph("S\n \n║");
        let bottom = g.node(g.index_of(Point::new(0, 2)).unwrap()).unwrap();
        assert_eq!(bottom.neighbor(Direction::North), None);
    }

    #[test]
    fn missing_start_rejected() {
        let err = Graph::build(&"═E".parse().unwrap()).unwrap_err();
        assert_eq!(err, SolveError::MissingStart);
    }

    #[test]
    fn multiple_starts_rejected() {
        let err = Graph::build(&"S═\nSE".parse().unwrap()).unwrap_err();
        assert_eq!(
            err,
            SolveError::MultipleStarts {
                first: Point::new(0, 0),
                second: Point::new(0, 1)
            }
        );
    }

    #[test]
    fn edge_set_insert_once() {
        let g = graph("SE");
        let mut edges = EdgeSet::new(&g);
        assert!(edges.insert(0, Direction::East));
        assert!(!edges.insert(0, Direction::East));
        assert!(edges.contains(0, Direction::East));
        assert!(!edges.contains(1, Direction::West));
        assert_eq!(edges.len(), 1);
        edges.reset(&g);
        assert!(edges.is_empty());
        assert!(!edges.contains(0, Direction::East));
    }
}
