use std::f64::consts::SQRT_2;

use astarviz_core::Point;

/// Cost of an orthogonal step.
pub const D: f64 = 1.0;
/// Cost of a diagonal step.
pub const D2: f64 = SQRT_2;

/// Octile distance between two points: the exact cost of the shortest
/// obstacle-free 8-directional walk. Admissible for [`step_cost`].
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x).abs() as f64;
    let dy = (a.y - b.y).abs() as f64;
    D * dx.max(dy) + (D2 - D) * dx.min(dy)
}

/// Cost of moving between two adjacent cells: [`D2`] for a diagonal
/// neighbour, [`D`] for an orthogonal one, and zero otherwise.
#[inline]
pub fn step_cost(from: Point, to: Point) -> f64 {
    if from.is_diagonal_to(to) {
        return D2;
    }
    match ((from.x - to.x).abs(), (from.y - to.y).abs()) {
        (1, 0) | (0, 1) => D,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octile_matches_closed_form() {
        let o = Point::ZERO;
        assert_eq!(octile(o, o), 0.0);
        assert_eq!(octile(o, Point::new(3, 0)), 3.0);
        assert!((octile(o, Point::new(4, 4)) - 4.0 * SQRT_2).abs() < 1e-12);
        assert!((octile(Point::new(5, 1), Point::new(1, 3)) - (2.0 + 2.0 * SQRT_2)).abs() < 1e-12);
    }

    #[test]
    fn step_costs() {
        let p = Point::new(2, 2);
        assert_eq!(step_cost(p, Point::new(3, 2)), D);
        assert_eq!(step_cost(p, Point::new(2, 1)), D);
        assert_eq!(step_cost(p, Point::new(1, 1)), D2);
        assert_eq!(step_cost(p, Point::new(3, 3)), D2);
        assert_eq!(step_cost(p, Point::new(4, 4)), 0.0);
        assert_eq!(step_cost(p, Point::new(4, 2)), 0.0);
        assert_eq!(step_cost(p, p), 0.0);
    }
}
