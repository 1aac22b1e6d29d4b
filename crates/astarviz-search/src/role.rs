use astarviz_core::Point;

use crate::graph::GridGraph;
use crate::session::SearchSession;

/// What a renderer should show for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellRole {
    Start,
    Goal,
    Wall,
    Path,
    Open,
    Closed,
    Empty,
}

/// Role of `p`, by priority: start, goal, wall, path, open, closed, empty.
pub fn cell_role(graph: &GridGraph, session: &SearchSession, p: Point) -> CellRole {
    if p == graph.start() {
        CellRole::Start
    } else if p == graph.goal() {
        CellRole::Goal
    } else if graph.is_wall(p) {
        CellRole::Wall
    } else if session.is_on_path(p) {
        CellRole::Path
    } else if session.is_open(p) {
        CellRole::Open
    } else if session.is_closed(p) {
        CellRole::Closed
    } else {
        CellRole::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_follow_priority() {
        let mut g = GridGraph::new(5, 5).unwrap();
        g.set_wall(Point::new(0, 1), true);
        let mut s = SearchSession::new(&g);
        assert_eq!(cell_role(&g, &s, Point::new(0, 0)), CellRole::Start);
        assert_eq!(cell_role(&g, &s, Point::new(4, 4)), CellRole::Goal);
        assert_eq!(cell_role(&g, &s, Point::new(0, 1)), CellRole::Wall);
        assert_eq!(cell_role(&g, &s, Point::new(2, 2)), CellRole::Empty);

        assert!(s.step(&g).is_continue());
        assert!(s.step(&g).is_continue());
        // (1,1) is the current node, on the preview path and closed.
        assert_eq!(s.current(), Some(Point::new(1, 1)));
        assert_eq!(cell_role(&g, &s, Point::new(1, 1)), CellRole::Path);
        assert_eq!(cell_role(&g, &s, Point::new(2, 2)), CellRole::Open);
        assert_eq!(cell_role(&g, &s, Point::new(1, 0)), CellRole::Open);
    }
}
