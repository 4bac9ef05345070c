//! One-step extensions of a path state.

use pipemaze_core::{DirMask, Direction};

use crate::error::SolveError;
use crate::graph::{EdgeSet, Graph};

/// A move out of the current head node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extension {
    /// Quarter turns of the head tile needed to open both the entry side
    /// and `heading`.
    pub cost: u32,
    /// Direction of the move.
    pub heading: Direction,
    /// Arena index of the node moved into.
    pub node: usize,
}

/// Append to `out` every way to leave `node` when it was entered through
/// the sides in `entry` (empty for the Start, which was never entered).
///
/// Rotation states are tried cheapest first. A state is usable only if it
/// opens the entry side; each exit direction is claimed by the first
/// usable state that opens it, so later states only contribute directions
/// nobody has offered yet. A direction yields an extension when the graph
/// has a neighbor there, that directed edge is not in `consumed`, and
/// `on_path` does not report the neighbor as already visited.
///
/// Extensions come out in non-decreasing cost order.
pub fn expand(
    graph: &Graph,
    consumed: &EdgeSet,
    node: usize,
    entry: DirMask,
    on_path: impl Fn(usize) -> bool,
    out: &mut Vec<Extension>,
) -> Result<(), SolveError> {
    let n = graph.node(node).ok_or(SolveError::MissingNode(node))?;
    let mut remaining = DirMask::ALL;

    for (cost, &state) in n.tile.rotations().iter().enumerate() {
        if remaining.is_empty() {
            break;
        }
        if !state.contains(entry) {
            continue;
        }
        let exits = (state ^ entry) & remaining;
        remaining = remaining ^ exits;

        for heading in exits.iter() {
            let Some(next) = n.neighbor(heading) else {
                continue;
            };
            if consumed.contains(node, heading) || on_path(next) {
                continue;
            }
            out.push(Extension {
                cost: cost as u32,
                heading,
                node: next,
            });
        }
    }
    Ok(())
}
