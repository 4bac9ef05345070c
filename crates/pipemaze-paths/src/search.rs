//! Minimum-rotation search driver.

use pipemaze_core::{Board, DirMask, Point, Tile};

use crate::buckets::BucketQueue;
use crate::error::SolveError;
use crate::expand::{Extension, expand};
use crate::graph::{EdgeSet, Graph};
use crate::trail::{TrailId, Trails};
use crate::traits::StepObserver;

/// A connecting path and its total rotation count.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub cost: u32,
    /// Cells from the Start to the End, inclusive.
    pub path: Vec<Point>,
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Solved(Solution),
    /// No rotation of the tiles connects the Start to an End.
    Unsolvable,
}

impl Outcome {
    /// The minimum rotation count, if solved.
    pub fn cost(&self) -> Option<u32> {
        match self {
            Self::Solved(s) => Some(s.cost),
            Self::Unsolvable => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(s) => Some(s),
            Self::Unsolvable => None,
        }
    }
}

/// What a single call to [`Search::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A path state was expanded; [`Search::current_path`] returns it.
    Visited { cost: u32 },
    /// A path state was dropped because its last edge was already used.
    Pruned,
    /// The search is over.
    Finished(Outcome),
}

/// Counters for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Path states that were expanded (including the winning one).
    pub visited: usize,
    /// Path states dropped by edge pruning.
    pub pruned: usize,
    /// Path states ever queued, the initial one included.
    pub queued: usize,
}

/// Bucketed shortest-path search over one [`Graph`].
///
/// Path states are processed in non-decreasing rotation cost; within one
/// cost in the order they were queued. Each directed edge is followed at
/// most once: the first (cheapest) path state that ends with it consumes
/// it, and later ones ending with the same edge are pruned. The graph
/// itself is left untouched, so it can be searched again.
pub struct Search<'g> {
    graph: &'g Graph,
    trails: Trails,
    queue: BucketQueue<TrailId>,
    consumed: EdgeSet,
    scratch: Vec<Extension>,
    current: Option<TrailId>,
    outcome: Option<Outcome>,
    stats: SearchStats,
}

impl<'g> Search<'g> {
    /// Prepare a search seeded with the one-node path at the Start.
    pub fn new(graph: &'g Graph) -> Result<Self, SolveError> {
        let mut search = Self {
            graph,
            trails: Trails::new(),
            queue: BucketQueue::new(graph.max_cost()),
            consumed: EdgeSet::new(graph),
            scratch: Vec::with_capacity(4),
            current: None,
            outcome: None,
            stats: SearchStats::default(),
        };
        search.restart()?;
        Ok(search)
    }

    /// Start over from the Start cell, keeping the allocated buffers.
    pub fn restart(&mut self) -> Result<(), SolveError> {
        self.trails.clear();
        self.queue.reset(self.graph.max_cost());
        self.consumed.reset(self.graph);
        self.current = None;
        self.outcome = None;
        let root = self.trails.root(self.graph.start());
        self.queue.push(0, root)?;
        self.stats = SearchStats {
            queued: 1,
            ..SearchStats::default()
        };
        log::debug!(
            "search: {} nodes, cost bound {}",
            self.graph.node_count(),
            self.graph.max_cost()
        );
        Ok(())
    }

    /// The graph being searched.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Counters so far.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The final outcome, once the search has finished.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Cells of the most recently processed path state.
    pub fn current_path(&self) -> Vec<Point> {
        match self.current {
            Some(id) => self.points(id),
            None => Vec::new(),
        }
    }

    /// Process the next queued path state.
    ///
    /// Once finished, every further call returns the same
    /// [`Step::Finished`].
    pub fn step(&mut self) -> Result<Step, SolveError> {
        if let Some(outcome) = &self.outcome {
            return Ok(Step::Finished(outcome.clone()));
        }
        let Some((cost, id)) = self.queue.pop() else {
            log::debug!("search: exhausted, no path ({:?})", self.stats);
            return Ok(self.finish(Outcome::Unsolvable));
        };

        if let Some((prev, heading)) = self.trails.last_edge(id) {
            if !self.consumed.insert(prev, heading) {
                self.stats.pruned += 1;
                return Ok(Step::Pruned);
            }
        }
        self.stats.visited += 1;
        self.current = Some(id);

        let head = self.trails.head(id);
        let node = self.graph.node(head).ok_or(SolveError::MissingNode(head))?;
        log::trace!(
            "search: cost {} at {} (path of {})",
            cost,
            node.pos,
            self.trails.path_len(id)
        );

        if node.tile == Tile::End {
            let solution = Solution {
                cost,
                path: self.points(id),
            };
            log::debug!("search: solved with cost {} ({:?})", cost, self.stats);
            return Ok(self.finish(Outcome::Solved(solution)));
        }

        // The entry side is opposite the last move. The Start was never
        // entered, so nothing constrains its exits.
        let entry = match self.trails.heading(id) {
            Some(h) => h.opposite().bit(),
            None => DirMask::NONE,
        };
        self.scratch.clear();
        expand(
            self.graph,
            &self.consumed,
            head,
            entry,
            |n| self.trails.contains(id, n),
            &mut self.scratch,
        )?;
        for ext in self.scratch.drain(..) {
            let next = self.trails.extend(id, ext.node, ext.heading);
            self.queue.push(cost + ext.cost, next)?;
            self.stats.queued += 1;
        }
        Ok(Step::Visited { cost })
    }

    /// Drive the search to completion, reporting each processed path state
    /// to `observer`.
    pub fn run<O: StepObserver + ?Sized>(
        mut self,
        observer: &mut O,
    ) -> Result<Outcome, SolveError> {
        loop {
            match self.step()? {
                Step::Visited { cost } => {
                    let path = self.current_path();
                    observer.observe(&path, cost);
                }
                Step::Pruned => {}
                Step::Finished(outcome) => {
                    if let Outcome::Solved(s) = &outcome {
                        observer.observe(&s.path, s.cost);
                    }
                    return Ok(outcome);
                }
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        self.outcome = Some(outcome.clone());
        Step::Finished(outcome)
    }

    fn points(&self, id: TrailId) -> Vec<Point> {
        self.trails
            .nodes(id)
            .into_iter()
            .map(|n| self.graph.point(n))
            .collect()
    }
}

/// Build the graph for `board` and find the minimum number of rotations
/// connecting its Start to an End.
///
/// `observer` sees every processed path state; pass
/// [`NoObserver`](crate::NoObserver) when progress is not needed.
pub fn solve<O: StepObserver + ?Sized>(
    board: &Board,
    observer: &mut O,
) -> Result<Outcome, SolveError> {
    let graph = Graph::build(board)?;
    Search::new(&graph)?.run(observer)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn outcome_round_trip() {
        let outcome = Outcome::Solved(Solution {
            cost: 3,
            path: vec![Point::new(0, 0), Point::new(1, 0)],
        });
        let json = serde_json::to_string(&outcome).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
