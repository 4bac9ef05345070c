//! Minimum-rotation path search over pipe-tile boards.
//!
//! Given a [`Board`](pipemaze_core::Board) of rotatable pipe tiles, find
//! the fewest quarter turns that open a continuous pipe from the Start
//! cell to an End cell:
//!
//! - [`Graph::build`] turns the board into an arena of linked nodes
//! - [`expand`] lists the moves out of a path's head, each tagged with the
//!   cheapest rotation of the head tile that allows it
//! - [`Search`] processes path states in increasing cost order from a
//!   [`BucketQueue`], consuming each directed edge the first time it is
//!   used
//! - [`solve`] ties the three together
//!
//! Costs are small integers (at most three turns per cell), which is what
//! makes a bucket queue sufficient.

mod buckets;
mod cost;
mod error;
mod expand;
mod graph;
mod search;
mod trail;
mod traits;

pub use buckets::BucketQueue;
pub use cost::path_rotations;
pub use error::SolveError;
pub use expand::{Extension, expand};
pub use graph::{EdgeSet, Graph, Node};
pub use search::{Outcome, Search, SearchStats, Solution, Step, solve};
pub use trail::{TrailId, Trails};
pub use traits::{NoObserver, StepObserver};
