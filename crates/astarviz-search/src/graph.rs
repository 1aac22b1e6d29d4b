//! The editable grid graph: cells, wall flags, cached 8-way adjacency and
//! the start / goal designators.

use astarviz_core::{Point, Range};
use rand::{Rng, RngExt};

/// Smallest accepted side length.
pub const MIN_SIZE: i32 = 5;
/// Largest accepted side length.
pub const MAX_SIZE: i32 = 50;
/// Increment used by size controls.
pub const SIZE_STEP: i32 = 5;
/// Side length of a fresh grid.
pub const DEFAULT_SIZE: i32 = 10;
/// Wall probability used by [`GridGraph::randomize_walls`] callers by default.
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.3;

/// Neighbour offsets, orthogonal first, then diagonal. The order is part of
/// the search's deterministic tie-breaking.
const NEIGHBOR_OFFSETS: [Point; 8] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(0, -1),
    Point::new(-1, -1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(1, 1),
];

/// Whether `n` is an accepted side length.
#[inline]
pub fn is_valid_size(n: i32) -> bool {
    (MIN_SIZE..=MAX_SIZE).contains(&n)
}

/// One grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub pos: Point,
    pub wall: bool,
    neighbors: Vec<usize>,
}

impl Cell {
    /// Flat indices of the in-bounds neighbours, fixed for the grid's size.
    #[inline]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }
}

/// A `cols × rows` grid of [`Cell`]s with exactly one start and one goal.
///
/// The start and goal are always distinct and never walls: wall edits on
/// them are ignored and moves onto walls or onto the other designator are
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridGraph {
    range: Range,
    cells: Vec<Cell>,
    start: usize,
    goal: usize,
}

impl Default for GridGraph {
    fn default() -> Self {
        Self::build(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

impl GridGraph {
    /// Create a wall-free grid, or `None` if either side is outside
    /// [`MIN_SIZE`]..=[`MAX_SIZE`].
    pub fn new(cols: i32, rows: i32) -> Option<Self> {
        (is_valid_size(cols) && is_valid_size(rows)).then(|| Self::build(cols, rows))
    }

    fn build(cols: i32, rows: i32) -> Self {
        let range = Range::sized(cols, rows);
        let cells = range
            .iter()
            .map(|pos| Cell {
                pos,
                wall: false,
                neighbors: NEIGHBOR_OFFSETS
                    .iter()
                    .map(|&d| pos + d)
                    .filter(|&n| range.contains(n))
                    .map(|n| (n.y * cols + n.x) as usize)
                    .collect(),
            })
            .collect();
        log::debug!("grid rebuilt: {cols}x{rows}");
        Self {
            range,
            cells,
            start: 0,
            goal: range.len() - 1,
        }
    }

    /// Rebuild the grid at a new size: walls cleared, start at the top-left
    /// corner and goal at the bottom-right one. Out-of-range sizes are
    /// rejected and leave the grid untouched; returns whether it was rebuilt.
    pub fn resize(&mut self, cols: i32, rows: i32) -> bool {
        match Self::new(cols, rows) {
            Some(g) => {
                *self = g;
                true
            }
            None => {
                log::warn!("rejected grid size {cols}x{rows}");
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.range.width()
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.range.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range.contains(p)
    }

    /// Flat index of `p`, or `None` outside the grid.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        self.range
            .contains(p)
            .then(|| (p.y * self.range.width() + p.x) as usize)
    }

    /// Position of the cell at flat index `idx`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.cells[idx].pos
    }

    #[inline]
    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    pub fn cell_at(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Neighbours of the cell at `idx`.
    #[inline]
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        self.cells[idx].neighbors()
    }

    // -----------------------------------------------------------------------
    // Walls and designators
    // -----------------------------------------------------------------------

    #[inline]
    pub fn start(&self) -> Point {
        self.point(self.start)
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.point(self.goal)
    }

    #[inline]
    pub fn start_idx(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn goal_idx(&self) -> usize {
        self.goal
    }

    /// Whether `p` holds the start or the goal.
    #[inline]
    pub fn is_designator(&self, p: Point) -> bool {
        p == self.start() || p == self.goal()
    }

    /// Whether `p` is a wall. Points outside the grid are not walls.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.cell_at(p).is_some_and(|c| c.wall)
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.wall).count()
    }

    /// Set the wall flag of `p`. Ignored on designators and outside the grid.
    /// Returns whether the flag changed.
    pub fn set_wall(&mut self, p: Point, wall: bool) -> bool {
        let Some(i) = self.idx(p) else {
            return false;
        };
        if i == self.start || i == self.goal || self.cells[i].wall == wall {
            return false;
        }
        self.cells[i].wall = wall;
        true
    }

    /// Move the start to `p`. Rejected when `p` is a wall, the goal, or
    /// outside the grid. Returns whether the start moved.
    pub fn move_start(&mut self, p: Point) -> bool {
        match self.placeable(p, self.goal) {
            Some(i) if i != self.start => {
                self.start = i;
                true
            }
            _ => false,
        }
    }

    /// Move the goal to `p`. Same rules as [`move_start`](Self::move_start).
    pub fn move_goal(&mut self, p: Point) -> bool {
        match self.placeable(p, self.start) {
            Some(i) if i != self.goal => {
                self.goal = i;
                true
            }
            _ => false,
        }
    }

    fn placeable(&self, p: Point, other: usize) -> Option<usize> {
        let i = self.idx(p)?;
        (i != other && !self.cells[i].wall).then_some(i)
    }

    /// Free every cell.
    pub fn clear_walls(&mut self) {
        for c in &mut self.cells {
            c.wall = false;
        }
    }

    /// Make every non-designator cell a wall independently with
    /// `probability` (clamped to `[0, 1]`).
    pub fn randomize_walls(&mut self, probability: f64, rng: &mut impl Rng) {
        let p = probability.clamp(0.0, 1.0);
        for (i, c) in self.cells.iter_mut().enumerate() {
            c.wall = i != self.start && i != self.goal && rng.random::<f64>() < p;
        }
    }
}
