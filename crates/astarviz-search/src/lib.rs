//! Incremental A* search over an editable grid graph.
//!
//! - [`GridGraph`] owns the cells, their cached 8-way adjacency, the wall
//!   flags and the start / goal designators.
//! - [`SearchSession`] owns the open set, closed set and per-cell costs of
//!   one run and advances it one expansion per [`SearchSession::step`].
//! - [`cell_role`] tells a renderer what each cell currently is.
//!
//! Moves cost [`D`] orthogonally and [`D2`] diagonally; the [`octile`]
//! heuristic matches that model exactly, so finished searches are optimal.

mod distance;
mod graph;
mod path;
mod role;
mod session;

pub use distance::{octile, step_cost, D, D2};
pub use graph::{
    is_valid_size, Cell, GridGraph, DEFAULT_SIZE, DEFAULT_WALL_PROBABILITY, MAX_SIZE, MIN_SIZE,
    SIZE_STEP,
};
pub use path::path_length;
pub use role::{cell_role, CellRole};
pub use session::{Node, SearchSession, SearchStatus};
