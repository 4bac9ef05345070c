//! Compass directions: [`Direction`] and the 4-bit [`DirMask`].
//!
//! Bit `i` of a mask stands for `Direction::ALL[i]`: East, North, West,
//! South. The opposite of bit index `d` is `d ^ 2`.

use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::geom::Point;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four neighbor directions of a board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    East = 0,
    North = 1,
    West = 2,
    South = 3,
}

impl Direction {
    /// All directions in bit order.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    /// Bit position (0..4).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a bit position. Only the two low bits are used.
    #[inline]
    pub const fn from_index(i: usize) -> Self {
        Self::ALL[i & 3]
    }

    /// Single-bit mask for this direction.
    #[inline]
    pub const fn bit(self) -> DirMask {
        DirMask(1 << self as u8)
    }

    /// The reverse direction.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() ^ 2)
    }

    /// Offset to the neighbor cell in this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Direction::East => Point::new(1, 0),
            Direction::North => Point::new(0, -1),
            Direction::West => Point::new(-1, 0),
            Direction::South => Point::new(0, 1),
        }
    }

    /// Direction from `from` to an orthogonally adjacent `to`.
    pub fn between(from: Point, to: Point) -> Option<Self> {
        let d = to - from;
        Self::ALL.into_iter().find(|dir| dir.delta() == d)
    }
}

// ---------------------------------------------------------------------------
// DirMask
// ---------------------------------------------------------------------------

/// A set of open directions packed in the low 4 bits.
///
/// Only the low 4 bits can ever be set: outside this crate masks are built
/// with [`DirMask::new`], the constants or the bit operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8"))]
pub struct DirMask(pub(crate) u8);

impl DirMask {
    pub const NONE: Self = Self(0);
    pub const EAST: Self = Self(1);
    pub const NORTH: Self = Self(2);
    pub const WEST: Self = Self(4);
    pub const SOUTH: Self = Self(8);
    pub const ALL: Self = Self(0xF);

    /// Mask from raw bits; anything above bit 3 is dropped.
    #[inline]
    pub const fn new(bits: u8) -> Self {
        Self(bits & 0xF)
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether direction `d` is open.
    #[inline]
    pub const fn has(self, d: Direction) -> bool {
        self.0 & (1 << d as u8) != 0
    }

    /// Whether the mask is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of open directions.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Quarter turn: every opening moves to the next direction in bit
    /// order (East → North → West → South → East).
    #[inline]
    pub const fn rotate(self) -> Self {
        Self(((self.0 << 1) | (self.0 >= 8) as u8) & 0xF)
    }

    /// Open directions in bit order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.has(d))
    }
}

impl From<u8> for DirMask {
    fn from(bits: u8) -> Self {
        Self::new(bits)
    }
}

impl From<Direction> for DirMask {
    #[inline]
    fn from(d: Direction) -> Self {
        d.bit()
    }
}

impl BitOr for DirMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for DirMask {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitXor for DirMask {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for DirMask {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Self(!self.0 & 0xF)
    }
}
