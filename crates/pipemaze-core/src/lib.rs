//! **pipemaze-core** — core types for rotatable pipe-tile puzzles.
//!
//! This crate provides the value types shared across the *pipemaze*
//! crates: geometry primitives, compass directions and 4-bit direction
//! masks, tiles with their precomputed rotation states, and the validated
//! rectangular [`Board`].

pub mod board;
pub mod dir;
pub mod geom;
pub mod tiles;

pub use board::{Board, BoardError};
pub use dir::{DirMask, Direction};
pub use geom::{Point, Range};
pub use tiles::{GLYPHS, PIPES, Tile};
