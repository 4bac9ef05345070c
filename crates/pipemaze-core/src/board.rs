//! The [`Board`] type — a validated rectangular grid of [`Tile`]s.
//!
//! Boards are parsed from text, one row per line, using the glyphs in
//! [`GLYPHS`](crate::tiles::GLYPHS). Rows must all have the same width.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Point, Range};
use crate::tiles::Tile;

/// A rectangular grid of tiles stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
}

impl Board {
    /// A board of the given size filled with bricks.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            tiles: vec![Tile::Brick; w as usize * h as usize],
            width: w,
            height: h,
        }
    }

    /// Build a board from rows of tiles.
    ///
    /// Fails if there are no rows, the first row is empty, the rows do not
    /// all have the same length, or a pipe is not one of the drawable
    /// shapes.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, BoardError> {
        let Some(first) = rows.first() else {
            return Err(BoardError::Empty);
        };
        let width = first.len();
        if width == 0 {
            return Err(BoardError::Empty);
        }
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(BoardError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            if let Some(x) = row.iter().position(|t| !t.is_valid()) {
                return Err(BoardError::InvalidTile {
                    tile: row[x],
                    pos: Point::new(x as i32, y as i32),
                });
            }
            tiles.extend_from_slice(row);
        }
        Ok(Self {
            tiles,
            width: width as i32,
            height: rows.len() as i32,
        })
    }

    /// Parse a board from lines of glyphs.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, BoardError> {
        let mut rows = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            let mut row = Vec::new();
            for (x, ch) in line.as_ref().chars().enumerate() {
                let tile = Tile::from_glyph(ch).ok_or(BoardError::InvalidGlyph {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                row.push(tile);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The bounding range, anchored at the origin.
    #[inline]
    pub fn range(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Total number of cells, bricks included.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the board has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether `p` is on the board.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range().contains(p)
    }

    /// The tile at `p`, or `None` off the board.
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.range().index_of(p).map(|i| self.tiles[i])
    }

    /// Replace the tile at `p`. No-op if `p` is off the board or `tile`
    /// is not [valid](Tile::is_valid).
    pub fn set(&mut self, p: Point, tile: Tile) {
        if !tile.is_valid() {
            return;
        }
        if let Some(i) = self.range().index_of(p) {
            self.tiles[i] = tile;
        }
    }

    /// Give the tile at `p` a quarter turn.
    ///
    /// Returns `false` when nothing changes: off the board, or a brick,
    /// Start, End or cross.
    pub fn rotate(&mut self, p: Point) -> bool {
        let Some(i) = self.range().index_of(p) else {
            return false;
        };
        let turned = self.tiles[i].rotated();
        if turned == self.tiles[i] {
            return false;
        }
        self.tiles[i] = turned;
        true
    }

    /// Position of the first Start cell in row-major order.
    pub fn start(&self) -> Option<Point> {
        self.find(|t| t == Tile::Start).next()
    }

    /// Positions of every End cell in row-major order.
    pub fn ends(&self) -> Vec<Point> {
        self.find(|t| t == Tile::End).collect()
    }

    /// Number of cells that are not bricks.
    pub fn open_cells(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_brick()).count()
    }

    /// Row-major iterator over `(Point, Tile)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.range().iter().zip(self.tiles.iter().copied())
    }

    /// Tiles of row `y`.
    pub fn row(&self, y: i32) -> &[Tile] {
        if y < 0 || y >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = y as usize * w;
        &self.tiles[start..start + w]
    }

    fn find<'a, F>(&'a self, pred: F) -> impl Iterator<Item = Point> + 'a
    where
        F: Fn(Tile) -> bool + 'a,
    {
        self.iter().filter(move |&(_, t)| pred(t)).map(|(p, _)| p)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// One row per line. Trailing newlines are ignored; spaces are bricks,
    /// so lines are not otherwise trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.trim_end_matches(['\n', '\r']).lines().collect();
        Self::from_lines(&lines)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for t in self.row(y) {
                write!(f, "{t}")?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when building a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// No rows, or rows of zero width.
    Empty,
    /// A row's width differs from the first row.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is not a tile glyph.
    InvalidGlyph { ch: char, pos: Point },
    /// A pipe opening a set of sides no glyph draws.
    InvalidTile { tile: Tile, pos: Point },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "board: no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "board: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidGlyph { ch, pos } => write!(
                f,
                "board contains invalid glyph \u{201c}{ch}\u{201d} at ({}, {})",
                pos.x, pos.y
            ),
            Self::InvalidTile { tile, pos } => write!(
                f,
                "board contains invalid tile {tile:?} at ({}, {})",
                pos.x, pos.y
            ),
        }
    }
}

impl std::error::Error for BoardError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dir::DirMask;

    const SMALL: &str = "\
S═╗
 ╔╝
 ╚E";

    #[test]
    fn parse_and_size() {
        let b: Board = SMALL.parse().unwrap();
        assert_eq!((b.width(), b.height()), (3, 3));
        assert_eq!(b.len(), 9);
        assert_eq!(b.open_cells(), 7);
        assert_eq!(b.start(), Some(Point::new(0, 0)));
        assert_eq!(b.ends(), vec![Point::new(2, 2)]);
        assert_eq!(b.at(Point::new(1, 0)), Some(Tile::Pipe(DirMask(5))));
        assert_eq!(b.at(Point::new(0, 1)), Some(Tile::Brick));
        assert_eq!(b.at(Point::new(3, 0)), None);
    }

    #[test]
    fn display_round_trip() {
        let b: Board = SMALL.parse().unwrap();
        assert_eq!(b.to_string(), SMALL);
        let again: Board = b.to_string().parse().unwrap();
        assert_eq!(again, b);
    }

    #[test]
    fn trailing_newline_ignored() {
        let b: Board = "S E\n".parse().unwrap();
        assert_eq!((b.width(), b.height()), (3, 1));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = "S═\n═".parse::<Board>().unwrap_err();
        assert_eq!(
            err,
            BoardError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn invalid_glyph_rejected() {
        let err = "S.E".parse::<Board>().unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidGlyph {
                ch: '.',
                pos: Point::new(1, 0)
            }
        );
        assert!(err.to_string().contains("(1, 0)"));
    }

    #[test]
    fn empty_rejected() {
        assert_eq!("".parse::<Board>().unwrap_err(), BoardError::Empty);
        assert_eq!(Board::from_rows(vec![vec![]]).unwrap_err(), BoardError::Empty);
    }

    #[test]
    fn undrawable_pipes_rejected() {
        let err = Board::from_rows(vec![vec![
            Tile::Start,
            Tile::Pipe(DirMask(0x15)),
            Tile::End,
        ]])
        .unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidTile {
                tile: Tile::Pipe(DirMask(0x15)),
                pos: Point::new(1, 0)
            }
        );
        // single-opening pipes have no glyph and would print as bricks
        let err = Board::from_rows(vec![vec![Tile::Start], vec![Tile::Pipe(DirMask::SOUTH)]])
            .unwrap_err();
        assert!(matches!(err, BoardError::InvalidTile { pos, .. } if pos == Point::new(0, 1)));

        let mut b = Board::new(2, 1);
        b.set(Point::new(0, 0), Tile::Pipe(DirMask::WEST));
        assert_eq!(b.at(Point::new(0, 0)), Some(Tile::Brick));
    }

    #[test]
    fn sizes_clamped_at_zero() {
        let b = Board::new(-4, 3);
        assert_eq!((b.width(), b.height(), b.len()), (0, 3, 0));
        let b = Board::new(70_000, 0);
        assert!(b.is_empty());
    }

    #[test]
    fn rotate_turns_pipes_only() {
        let mut b: Board = "S═╬ E".parse().unwrap();
        assert!(b.rotate(Point::new(1, 0)));
        assert_eq!(b.at(Point::new(1, 0)), Some(Tile::Pipe(DirMask(10))));
        assert!(!b.rotate(Point::new(0, 0)));
        assert!(!b.rotate(Point::new(2, 0)));
        assert!(!b.rotate(Point::new(3, 0)));
        assert!(!b.rotate(Point::new(4, 0)));
        assert!(!b.rotate(Point::new(9, 0)));
    }

    #[test]
    fn set_and_row() {
        let mut b = Board::new(2, 2);
        b.set(Point::new(1, 1), Tile::End);
        b.set(Point::new(5, 5), Tile::End);
        assert_eq!(b.row(1), &[Tile::Brick, Tile::End]);
        assert!(b.row(2).is_empty());
        assert_eq!(b.ends(), vec![Point::new(1, 1)]);
    }
}
