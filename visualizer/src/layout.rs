//! Screen placement of the grid, status and help lines.

use astarviz_core::Point;

/// Terminal columns per grid cell, so that cells look roughly square.
pub const CELL_WIDTH: i32 = 2;

/// Maps between screen cells and grid cells for a `cols × rows` grid drawn
/// below two header lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    cols: i32,
    rows: i32,
}

impl Layout {
    /// Screen row of the status bar.
    pub const STATUS_ROW: i32 = 0;
    /// Screen row of the outcome message.
    pub const MESSAGE_ROW: i32 = 1;
    /// Top-left screen cell of the grid.
    pub const ORIGIN: Point = Point::new(0, 2);

    pub fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    /// Screen row of the key help line, just below the grid.
    pub fn help_row(&self) -> i32 {
        Self::ORIGIN.y + self.rows + 1
    }

    /// Leftmost screen cell covering grid cell `p`.
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(
            Self::ORIGIN.x + p.x * CELL_WIDTH,
            Self::ORIGIN.y + p.y,
        )
    }

    /// Grid cell under screen cell `s`, or `None` outside the grid.
    pub fn to_grid(&self, s: Point) -> Option<Point> {
        let d = s - Self::ORIGIN;
        if d.x < 0 || d.y < 0 {
            return None;
        }
        let p = Point::new(d.x / CELL_WIDTH, d.y);
        (p.x < self.cols && p.y < self.rows).then_some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_columns_of_a_cell_map_back() {
        let l = Layout::new(10, 10);
        let p = Point::new(3, 7);
        let s = l.to_screen(p);
        assert_eq!(l.to_grid(s), Some(p));
        assert_eq!(l.to_grid(s.shift(1, 0)), Some(p));
        assert_eq!(l.to_grid(s.shift(2, 0)), Some(Point::new(4, 7)));
    }

    #[test]
    fn outside_is_none() {
        let l = Layout::new(5, 5);
        assert_eq!(l.to_grid(Point::new(0, 1)), None);
        assert_eq!(l.to_grid(Point::new(10, 2)), None);
        assert_eq!(l.to_grid(Point::new(9, 6)), Some(Point::new(4, 4)));
        assert_eq!(l.to_grid(Point::new(0, 7)), None);
        assert_eq!(l.help_row(), 8);
    }
}
