//! Fullerene magic labeling enumerator
//!
//! Enumerates every assignment of distinct integer labels to the vertices of
//! a fullerene-like graph such that each face sums to its target, using
//! either CaDiCaL or a native depth-first search.

pub mod config;
pub mod error;
pub mod graph;
pub mod labeling;
pub mod sat;
pub mod search;
pub mod utils;

pub use config::Settings;
pub use error::{InvalidSpecError, LabelingError, LabelingResult};
pub use labeling::{build_model, enumerate_all, EnumerationSummary, LabelingModel, LabelingProblem};

use anyhow::Result;
use rayon::prelude::*;

/// Enumerate all labelings for the configured graph
pub fn enumerate_labelings(settings: Settings) -> Result<EnumerationSummary> {
    let problem = LabelingProblem::new(settings)?;
    problem.solve()
}

/// Run independent enumerations in parallel, one per settings value.
///
/// Results are returned in input order.
pub fn enumerate_many(jobs: Vec<Settings>) -> Vec<Result<EnumerationSummary>> {
    jobs.into_par_iter().map(enumerate_labelings).collect()
}
