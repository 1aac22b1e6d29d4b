//! The incremental A* search session.
//!
//! A [`SearchSession`] is seeded from a [`GridGraph`] and advanced one
//! expansion at a time with [`SearchSession::step`], so that a host can
//! animate the frontier. The open set is a plain insertion-ordered list
//! scanned linearly for the minimum `f`: ties go to the earliest inserted
//! node, which keeps runs reproducible for a given wall layout.

use std::ops::ControlFlow;

use astarviz_core::{Point, Range};

use crate::distance::{octile, step_cost};
use crate::graph::GridGraph;
use crate::path::{path_length, reconstruct};

/// Lifecycle of a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// Seeded, no step taken yet.
    #[default]
    Idle,
    /// At least one step taken, not finished.
    Running,
    /// The goal was reached; the current path is final.
    Succeeded,
    /// The open set ran dry: no path exists with the current walls.
    Failed,
}

impl SearchStatus {
    /// Whether the session reached a terminal state.
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum NodeState {
    #[default]
    Unseen,
    Open,
    Closed,
}

/// Per-cell search metadata.
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Cost from the start.
    pub g: f64,
    /// Heuristic estimate to the goal.
    pub h: f64,
    /// `g + h`.
    pub f: f64,
    /// Flat index of the cell this one was reached from.
    pub predecessor: Option<usize>,
    pub(crate) state: NodeState,
}

/// Open set, closed set and per-cell metadata of one A* run.
#[derive(Debug, Clone)]
pub struct SearchSession {
    range: Range,
    nodes: Vec<Node>,
    open: Vec<usize>,
    closed: usize,
    current: Option<usize>,
    path: Vec<usize>,
    on_path: Vec<bool>,
    status: SearchStatus,
    steps: usize,
}

impl SearchSession {
    /// Create a session seeded from `graph`.
    pub fn new(graph: &GridGraph) -> Self {
        let mut s = Self {
            range: Range::default(),
            nodes: Vec::new(),
            open: Vec::new(),
            closed: 0,
            current: None,
            path: Vec::new(),
            on_path: Vec::new(),
            status: SearchStatus::Idle,
            steps: 0,
        };
        s.reset(graph);
        s
    }

    /// Return to [`SearchStatus::Idle`] with the open set holding only the
    /// start, all costs zeroed and all predecessors cleared. Node storage is
    /// reused when the grid size did not change.
    pub fn reset(&mut self, graph: &GridGraph) {
        let len = graph.len();
        self.range = graph.range();
        self.nodes.clear();
        self.nodes.resize(len, Node::default());
        self.on_path.clear();
        self.on_path.resize(len, false);
        self.open.clear();
        self.path.clear();
        self.closed = 0;
        self.current = None;
        self.status = SearchStatus::Idle;
        self.steps = 0;

        let start = graph.start_idx();
        self.nodes[start].state = NodeState::Open;
        self.open.push(start);
        log::debug!(
            "search session reset: {} -> {} on {}x{}",
            graph.start(),
            graph.goal(),
            graph.cols(),
            graph.rows()
        );
    }

    /// Perform one A* expansion.
    ///
    /// Returns `Continue` while the search is unfinished and `Break` with the
    /// terminal status once the goal is reached or the open set is empty.
    /// Calling it again after that does no work.
    pub fn step(&mut self, graph: &GridGraph) -> ControlFlow<SearchStatus> {
        if self.status.is_finished() {
            return ControlFlow::Break(self.status);
        }
        if self.range != graph.range() {
            log::warn!("grid changed shape under a running search, reseeding");
            self.reset(graph);
        }
        self.status = SearchStatus::Running;
        self.steps += 1;

        let Some(best) = self.best_open() else {
            self.status = SearchStatus::Failed;
            log::info!("no path: open set exhausted after {} expansions", self.closed);
            return ControlFlow::Break(SearchStatus::Failed);
        };
        let ci = self.open[best];
        self.current = Some(ci);
        let path = reconstruct(&self.nodes, ci);
        self.set_path(path);

        if ci == graph.goal_idx() {
            self.status = SearchStatus::Succeeded;
            log::info!(
                "path found: {} cells, length {:.3}, {} expansions",
                self.path.len(),
                self.path_length(),
                self.closed
            );
            return ControlFlow::Break(SearchStatus::Succeeded);
        }

        self.open.remove(best);
        self.nodes[ci].state = NodeState::Closed;
        self.closed += 1;

        let cp = graph.point(ci);
        let cg = self.nodes[ci].g;
        let goal = graph.goal();
        for &ni in graph.neighbors(ci) {
            let cell = graph.cell(ni);
            let n = &mut self.nodes[ni];
            if n.state == NodeState::Closed || cell.wall {
                continue;
            }
            let tentative = cg + step_cost(cp, cell.pos);
            if n.state == NodeState::Open {
                if tentative >= n.g {
                    continue;
                }
            } else {
                n.state = NodeState::Open;
                self.open.push(ni);
            }
            n.g = tentative;
            n.h = octile(cell.pos, goal);
            n.f = n.g + n.h;
            n.predecessor = Some(ci);
        }
        log::trace!("expanded {cp}: open {}, closed {}", self.open.len(), self.closed);

        ControlFlow::Continue(())
    }

    /// Step until the session finishes and return the terminal status.
    pub fn run(&mut self, graph: &GridGraph) -> SearchStatus {
        loop {
            if let ControlFlow::Break(status) = self.step(graph) {
                return status;
            }
        }
    }

    /// Position in `open` of the member with minimum `f`, earliest first.
    fn best_open(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (pos, &i) in self.open.iter().enumerate() {
            let f = self.nodes[i].f;
            if best.is_none_or(|(_, bf)| f < bf) {
                best = Some((pos, f));
            }
        }
        best.map(|(pos, _)| pos)
    }

    fn set_path(&mut self, path: Vec<usize>) {
        for &i in &self.path {
            self.on_path[i] = false;
        }
        for &i in &path {
            self.on_path[i] = true;
        }
        self.path = path;
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        self.range
            .contains(p)
            .then(|| (p.y * self.range.width() + p.x) as usize)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let w = self.range.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Number of `step` calls that did work since the last reset.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub fn closed_len(&self) -> usize {
        self.closed
    }

    /// Open set members in insertion order.
    pub fn open_set(&self) -> impl Iterator<Item = Point> + '_ {
        self.open.iter().map(|&i| self.point(i))
    }

    pub fn is_open(&self, p: Point) -> bool {
        self.idx(p)
            .is_some_and(|i| self.nodes[i].state == NodeState::Open)
    }

    pub fn is_closed(&self, p: Point) -> bool {
        self.idx(p)
            .is_some_and(|i| self.nodes[i].state == NodeState::Closed)
    }

    pub fn is_on_path(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.on_path[i])
    }

    /// The node expanded by the latest step.
    pub fn current(&self) -> Option<Point> {
        self.current.map(|i| self.point(i))
    }

    /// The current best-guess path, most recent node first, ending at the
    /// start. Final once the status is [`SearchStatus::Succeeded`].
    pub fn path(&self) -> Vec<Point> {
        self.path.iter().map(|&i| self.point(i)).collect()
    }

    pub fn path_length(&self) -> f64 {
        path_length(&self.path())
    }

    /// Search metadata for `p`, or `None` outside the grid.
    pub fn node(&self, p: Point) -> Option<&Node> {
        self.idx(p).map(|i| &self.nodes[i])
    }

    /// Predecessor chain from `p`, empty outside the grid.
    pub fn reconstruct(&self, p: Point) -> Vec<Point> {
        match self.idx(p) {
            Some(i) => reconstruct(&self.nodes, i)
                .into_iter()
                .map(|j| self.point(j))
                .collect(),
            None => Vec::new(),
        }
    }
}
