//! Visual filter-graph construction for the compositor.

pub mod compose;
pub mod graph;
