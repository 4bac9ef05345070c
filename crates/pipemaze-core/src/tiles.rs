//! Pipe tiles and their rotation states.
//!
//! A [`Tile`] is identified by the mask of directions it currently opens.
//! [`GLYPHS`] maps each mask to its box-drawing character, with two of the
//! unused single-opening slots reused for the Start and End sentinels.
//! Every tile's reachable rotation states are tabulated at compile time.

use std::fmt;

use crate::dir::DirMask;

/// Glyph for each open-direction mask (index = mask bits).
///
/// Index 0 is a brick, 1 and 2 are Start and End, 4 and 8 have no glyph.
pub const GLYPHS: [char; 16] = [
    ' ', 'S', 'E', '╚', ' ', '═', '╝', '╩', ' ', '╔', '║', '╠', '╗', '╦', '╣', '╬',
];

/// Masks of every pipe shape that has a glyph.
pub const PIPES: [DirMask; 11] = [
    DirMask(3),
    DirMask(5),
    DirMask(6),
    DirMask(7),
    DirMask(9),
    DirMask(10),
    DirMask(11),
    DirMask(12),
    DirMask(13),
    DirMask(14),
    DirMask(15),
];

// ---------------------------------------------------------------------------
// Rotation table
// ---------------------------------------------------------------------------

/// Distinct states reachable by repeated quarter turns, in turn order.
#[derive(Copy, Clone, Debug)]
struct Rotations {
    states: [DirMask; 4],
    len: usize,
}

impl Rotations {
    const EMPTY: Self = Self {
        states: [DirMask::NONE; 4],
        len: 0,
    };

    const FULL_OPEN: Self = Self {
        states: [DirMask::ALL; 4],
        len: 1,
    };

    const fn of(mask: DirMask) -> Self {
        if mask.is_empty() {
            return Self::EMPTY;
        }
        if mask.0 == DirMask::ALL.0 {
            return Self::FULL_OPEN;
        }
        let mut states = [DirMask::NONE; 4];
        let mut len = 0;
        let mut m = mask;
        loop {
            states[len] = m;
            len += 1;
            m = m.rotate();
            if m.0 == mask.0 {
                break;
            }
        }
        Self { states, len }
    }

    fn as_slice(&self) -> &[DirMask] {
        &self.states[..self.len]
    }
}

const fn build_table() -> [Rotations; 16] {
    let mut table = [Rotations::EMPTY; 16];
    let mut bits = 1;
    while bits < 16 {
        table[bits] = Rotations::of(DirMask(bits as u8));
        bits += 1;
    }
    table
}

static PIPE_ROTATIONS: [Rotations; 16] = build_table();
static FULL_OPEN: Rotations = Rotations::FULL_OPEN;

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// The content of one board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    /// Blocks every direction; never part of a path.
    #[default]
    Brick,
    /// Where every path begins. Open on all sides, never rotated.
    Start,
    /// The target. Open on all sides, never rotated.
    End,
    /// A rotatable pipe opening the given directions.
    Pipe(DirMask),
}

impl Tile {
    /// The four-way cross.
    pub const CROSS: Self = Self::Pipe(DirMask::ALL);

    /// Parse a board glyph.
    pub fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(Self::Brick),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            _ => PIPES
                .iter()
                .find(|m| GLYPHS[m.bits() as usize] == ch)
                .map(|&m| Self::Pipe(m)),
        }
    }

    /// The glyph used when printing a board.
    pub fn glyph(self) -> char {
        match self {
            Self::Brick => ' ',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Pipe(m) => GLYPHS[m.bits() as usize],
        }
    }

    /// Directions currently open. Start and End count as fully open.
    pub fn openings(self) -> DirMask {
        match self {
            Self::Brick => DirMask::NONE,
            Self::Start | Self::End => DirMask::ALL,
            Self::Pipe(m) => m,
        }
    }

    /// Whether this cell can never be entered.
    #[inline]
    pub fn is_brick(self) -> bool {
        matches!(self, Self::Brick)
    }

    /// Whether this is a brick, a sentinel, or a pipe shape from [`PIPES`].
    ///
    /// Pipes opening fewer than two sides have no glyph and cannot appear
    /// on a board.
    pub fn is_valid(self) -> bool {
        match self {
            Self::Pipe(m) => PIPES.contains(&m),
            _ => true,
        }
    }

    /// The tile after one quarter turn. Only pipes turn.
    pub fn rotated(self) -> Self {
        match self {
            Self::Pipe(m) => Self::Pipe(m.rotate()),
            other => other,
        }
    }

    /// Rotation states in turn order; the index of a state is the number
    /// of quarter turns needed to reach it.
    ///
    /// Straight pipes have two states, corners and T-junctions four.
    /// Start, End and the cross have the single fully open state; bricks
    /// have none.
    pub fn rotations(self) -> &'static [DirMask] {
        match self {
            Self::Brick => &[],
            Self::Start | Self::End => FULL_OPEN.as_slice(),
            Self::Pipe(m) => PIPE_ROTATIONS[m.bits() as usize].as_slice(),
        }
    }

    /// Fewest quarter turns that open every direction in `needed`.
    pub fn rotation_cost(self, needed: DirMask) -> Option<u32> {
        self.rotations()
            .iter()
            .position(|s| s.contains(needed))
            .map(|i| i as u32)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
