//! Run orchestration: stage ordering, the explicit per-run workspace, and artifact emission.

pub mod run;
pub mod workspace;
