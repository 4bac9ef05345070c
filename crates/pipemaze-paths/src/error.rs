use std::fmt;

use pipemaze_core::Point;

/// Errors raised while building a graph or running a search.
///
/// An unsolvable board is not an error; see
/// [`Outcome::Unsolvable`](crate::Outcome::Unsolvable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The board has no Start cell.
    MissingStart,
    /// The board has more than one Start cell.
    MultipleStarts { first: Point, second: Point },
    /// A path state was queued outside the bucket range. This is a logic
    /// defect, never a property of the board.
    CostOutOfRange { cost: u32, bound: u32 },
    /// A path referenced an arena slot with no node in it.
    MissingNode(usize),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => write!(f, "board has no start cell"),
            Self::MultipleStarts { first, second } => {
                write!(f, "board has more than one start cell: {first} and {second}")
            }
            Self::CostOutOfRange { cost, bound } => {
                write!(f, "internal error: cost {cost} outside bucket range 0..={bound}")
            }
            Self::MissingNode(idx) => write!(f, "internal error: no node at arena slot {idx}"),
        }
    }
}

impl std::error::Error for SolveError {}
