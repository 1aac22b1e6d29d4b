//! Path reconstruction from predecessor links.

use astarviz_core::Point;

use crate::distance::step_cost;
use crate::session::Node;

/// Walk predecessor links from `from` back to a node without one.
///
/// Returns flat indices ordered `[from, pred(from), pred(pred(from)), ...]`.
/// Chains are acyclic by construction of the search; the walk is still
/// capped at one visit per node.
pub(crate) fn reconstruct(nodes: &[Node], from: usize) -> Vec<usize> {
    let mut path = vec![from];
    let mut ci = from;
    while let Some(prev) = nodes[ci].predecessor {
        if path.len() >= nodes.len() {
            log::warn!("predecessor chain from node {from} exceeds grid size");
            break;
        }
        path.push(prev);
        ci = prev;
    }
    path
}

/// Euclidean length of a path of adjacent points.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| step_cost(w[0], w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    fn chain(links: &[Option<usize>]) -> Vec<Node> {
        links
            .iter()
            .map(|&predecessor| Node {
                predecessor,
                ..Node::default()
            })
            .collect()
    }

    #[test]
    fn follows_links_to_root() {
        let nodes = chain(&[None, Some(0), Some(1), Some(1)]);
        assert_eq!(reconstruct(&nodes, 2), vec![2, 1, 0]);
        assert_eq!(reconstruct(&nodes, 3), vec![3, 1, 0]);
        assert_eq!(reconstruct(&nodes, 0), vec![0]);
    }

    #[test]
    fn cyclic_links_are_cut() {
        let nodes = chain(&[Some(1), Some(0)]);
        assert_eq!(reconstruct(&nodes, 0).len(), 2);
    }

    #[test]
    fn length_sums_step_costs() {
        let path = [Point::new(0, 0), Point::new(1, 1), Point::new(2, 1)];
        assert!((path_length(&path) - (SQRT_2 + 1.0)).abs() < 1e-12);
        assert_eq!(path_length(&path[..1]), 0.0);
        assert_eq!(path_length(&[]), 0.0);
    }
}
