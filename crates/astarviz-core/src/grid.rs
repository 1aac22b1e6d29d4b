//! The screen [`Grid`]: a 2D buffer of styled [`Cell`]s, plus the
//! [`Frame`] diff that drivers flush.

use crate::cell::Cell;
use crate::geom::{Point, Range};
use crate::style::Style;

/// A 2D buffer of screen cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with default cells.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::sized(width.max(0), height.max(0));
        Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// Read the cell at `p`. Returns `Cell::default()` outside bounds.
    pub fn at(&self, p: Point) -> Cell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. No-op outside bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Fill every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write `text` starting at `p`, clipped to the grid. Returns the
    /// position just past the last written character.
    pub fn text(&mut self, p: Point, text: &str, style: Style) -> Point {
        let mut q = p;
        for ch in text.chars() {
            if q.x >= self.width() {
                break;
            }
            self.set(q, Cell::default().with_char(ch).with_style(style));
            q = q.shift(1, 0);
        }
        q
    }

    /// Resize in place, discarding the previous content.
    pub fn resize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// A set of cell changes.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the cells of `curr` that differ from `prev`.
///
/// When the sizes differ every cell of `curr` is reported.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let bounds = curr.bounds();
    let full = prev.bounds() != bounds;
    let cells = bounds
        .iter()
        .filter(|&p| full || prev.at(p) != curr.at(p))
        .map(|p| FrameCell {
            cell: curr.at(p),
            pos: p,
        })
        .collect();
    Frame {
        cells,
        width: bounds.width(),
        height: bounds.height(),
    }
}
