//! Native depth-first search backend

pub mod order;
pub mod solver;

pub use order::SearchPlan;
pub use solver::{SearchSolver, SearchStatistics};
