//! Crossterm rendering for pipemaze boards.
//!
//! [`render_board`] prints a board with an optional path highlighted: each
//! path cell gets a background colour for the number of quarter turns its
//! tile needs (yellow, orange, red, purple for 0 to 3). [`TermObserver`]
//! redraws the board in place for every path state a search processes.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pipemaze_core::{Board, Point, Tile};
use pipemaze_paths::{Outcome, StepObserver, path_rotations};

/// Background colours for 0, 1, 2 and 3 quarter turns.
pub const ROTATION_COLORS: [CtColor; 4] = [
    CtColor::Rgb { r: 255, g: 255, b: 0 },
    CtColor::Rgb { r: 255, g: 165, b: 0 },
    CtColor::Rgb { r: 255, g: 0, b: 0 },
    CtColor::Rgb { r: 128, g: 0, b: 128 },
];

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermConfig {
    /// Emit colours and attributes. Plain glyphs otherwise.
    pub color: bool,
    /// Pause after each redraw in [`TermObserver`].
    pub delay: Duration,
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            color: true,
            delay: Duration::from_millis(10),
        }
    }
}

/// Background colour for a cell needing `turns` quarter turns.
pub fn rotation_color(turns: u32) -> CtColor {
    ROTATION_COLORS[turns.min(3) as usize]
}

/// Sum of the per-cell turns along `path`, if it is a valid pipe route.
pub fn path_cost(board: &Board, path: &[Point]) -> Option<u32> {
    path_rotations(board, path).map(|t| t.iter().sum())
}

/// One-line summary of a finished search.
pub fn summary(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Solved(s) => format!("Minimal number of rotations = {}", s.cost),
        Outcome::Unsolvable => "No path found".to_string(),
    }
}

/// Print `board` with `path` highlighted, one line per row.
pub fn render_board<W: Write>(
    out: &mut W,
    board: &Board,
    path: &[Point],
    cfg: &TermConfig,
) -> io::Result<()> {
    let turns = path_rotations(board, path);
    if turns.is_none() && !path.is_empty() {
        log::warn!("render: path of {} cells does not fit the board", path.len());
    }
    for y in 0..board.height() {
        for (x, &tile) in board.row(y).iter().enumerate() {
            let p = Point::new(x as i32, y);
            let highlight = path
                .iter()
                .position(|&q| q == p)
                .and_then(|i| turns.as_ref().map(|t| t[i]));
            render_cell(out, tile, highlight, cfg)?;
        }
        queue!(out, Print("\r\n"))?;
    }
    out.flush()
}

fn render_cell<W: Write>(
    out: &mut W,
    tile: Tile,
    highlight: Option<u32>,
    cfg: &TermConfig,
) -> io::Result<()> {
    if !cfg.color {
        return queue!(out, Print(tile.glyph()));
    }
    let marker = matches!(tile, Tile::Start | Tile::End);
    if marker {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    match highlight {
        Some(turns) => queue!(
            out,
            SetBackgroundColor(rotation_color(turns)),
            SetForegroundColor(CtColor::Black),
            Print(tile.glyph()),
            ResetColor
        )?,
        None => queue!(out, Print(tile.glyph()))?,
    }
    if marker {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// Lines to move up before redrawing: the board rows plus the status line.
fn redraw_lines(height: i32) -> u16 {
    u16::try_from(height.max(0))
        .unwrap_or(u16::MAX)
        .saturating_add(1)
}

/// Redraws the board for every processed path state.
///
/// Write errors do not interrupt the search; the first one is kept and
/// returned by [`finish`](Self::finish).
pub struct TermObserver<'b, W: Write> {
    out: W,
    board: &'b Board,
    cfg: TermConfig,
    drawn: bool,
    steps: usize,
    error: Option<io::Error>,
}

impl<'b, W: Write> TermObserver<'b, W> {
    pub fn new(out: W, board: &'b Board, cfg: TermConfig) -> Self {
        Self {
            out,
            board,
            cfg,
            drawn: false,
            steps: 0,
            error: None,
        }
    }

    /// Number of path states drawn.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Return the writer, or the first write error.
    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn draw(&mut self, path: &[Point], cost: u32) -> io::Result<()> {
        if self.drawn {
            let lines = redraw_lines(self.board.height());
            queue!(self.out, cursor::MoveUp(lines), cursor::MoveToColumn(0))?;
        }
        render_board(&mut self.out, self.board, path, &self.cfg)?;
        queue!(
            self.out,
            terminal::Clear(ClearType::CurrentLine),
            Print(format!("Used {cost} rotations...\r\n"))
        )?;
        self.out.flush()?;
        self.drawn = true;
        Ok(())
    }
}

impl<W: Write> StepObserver for TermObserver<'_, W> {
    fn observe(&mut self, path: &[Point], cost: u32) {
        if self.error.is_some() {
            return;
        }
        self.steps += 1;
        if let Err(e) = self.draw(path, cost) {
            log::warn!("render: {e}");
            self.error = Some(e);
            return;
        }
        if !self.cfg.delay.is_zero() {
            thread::sleep(self.cfg.delay);
        }
    }
}
