//! CaDiCaL backend: CNF encoding and blocking-clause enumeration

pub mod constraints;
pub mod encoder;
pub mod solver;
pub mod variables;

pub use constraints::{Clause, ConstraintGenerator};
pub use encoder::{EncodingStatistics, SatEncoder};
pub use solver::{SatSolver, SolveStatus, SolverStatistics};
pub use variables::VariableManager;
