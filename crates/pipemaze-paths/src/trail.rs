//! Append-only storage for search paths.
//!
//! Every path state is a link to its parent, so extending a path is O(1)
//! and never disturbs the paths it was extended from.

use pipemaze_core::Direction;

/// Handle to a path stored in a [`Trails`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrailId(u32);

#[derive(Debug, Clone, Copy)]
struct Link {
    node: usize,
    parent: Option<TrailId>,
    /// Direction travelled from the parent's head into `node`.
    heading: Option<Direction>,
    len: u32,
}

/// Arena of paths sharing common prefixes.
#[derive(Debug, Clone, Default)]
pub struct Trails {
    links: Vec<Link>,
}

impl Trails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every stored path.
    pub fn clear(&mut self) {
        self.links.clear();
    }

    /// Number of stored paths.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Store the one-node path `[node]`.
    pub fn root(&mut self, node: usize) -> TrailId {
        self.push(Link {
            node,
            parent: None,
            heading: None,
            len: 1,
        })
    }

    /// Store `parent` followed by `node`, reached by moving towards `heading`.
    pub fn extend(&mut self, parent: TrailId, node: usize, heading: Direction) -> TrailId {
        let len = self.link(parent).len + 1;
        self.push(Link {
            node,
            parent: Some(parent),
            heading: Some(heading),
            len,
        })
    }

    /// Last node of the path.
    #[inline]
    pub fn head(&self, id: TrailId) -> usize {
        self.link(id).node
    }

    /// Number of nodes on the path.
    #[inline]
    pub fn path_len(&self, id: TrailId) -> usize {
        self.link(id).len as usize
    }

    /// Direction of the last move, `None` for a one-node path.
    #[inline]
    pub fn heading(&self, id: TrailId) -> Option<Direction> {
        self.link(id).heading
    }

    /// The directed edge `(second-to-last node, heading)` that ends the path.
    pub fn last_edge(&self, id: TrailId) -> Option<(usize, Direction)> {
        let link = self.link(id);
        let parent = link.parent?;
        Some((self.head(parent), link.heading?))
    }

    /// Whether `node` appears anywhere on the path.
    pub fn contains(&self, id: TrailId, node: usize) -> bool {
        self.walk(id).any(|n| n == node)
    }

    /// Nodes of the path from its first node to its head.
    pub fn nodes(&self, id: TrailId) -> Vec<usize> {
        let mut out: Vec<usize> = self.walk(id).collect();
        out.reverse();
        out
    }

    /// Nodes from the head back to the first node.
    fn walk(&self, id: TrailId) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(id), |&i| self.link(i).parent).map(|i| self.link(i).node)
    }

    #[inline]
    fn link(&self, id: TrailId) -> &Link {
        &self.links[id.0 as usize]
    }

    fn push(&mut self, link: Link) -> TrailId {
        let id = TrailId(self.links.len() as u32);
        self.links.push(link);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_shares_prefix() {
        let mut t = Trails::new();
        let a = t.root(0);
        let b = t.extend(a, 1, Direction::East);
        let c1 = t.extend(b, 2, Direction::East);
        let c2 = t.extend(b, 5, Direction::South);
        assert_eq!(t.nodes(c1), vec![0, 1, 2]);
        assert_eq!(t.nodes(c2), vec![0, 1, 5]);
        assert_eq!(t.path_len(c2), 3);
        assert_eq!(t.len(), 4);
        assert!(t.contains(c2, 1));
        assert!(!t.contains(c2, 2));
    }

    #[test]
    fn last_edge_and_heading() {
        let mut t = Trails::new();
        let a = t.root(7);
        assert_eq!(t.last_edge(a), None);
        assert_eq!(t.heading(a), None);
        let b = t.extend(a, 3, Direction::North);
        assert_eq!(t.last_edge(b), Some((7, Direction::North)));
        assert_eq!(t.head(b), 3);
        t.clear();
        assert!(t.is_empty());
    }
}
