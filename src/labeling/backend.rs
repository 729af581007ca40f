//! Backend selection for the enumerator

use super::model::LabelingModel;
use crate::config::{Settings, SolverBackend};
use crate::error::LabelingResult;
use crate::sat::{EncodingStatistics, SatEncoder};
use crate::search::{SearchSolver, SearchStatistics};

/// Unified enumeration interface over the available backends
pub enum UnifiedBackend {
    Cadical(SatEncoder),
    Search(SearchSolver),
}

/// Statistics reported by whichever backend ran
#[derive(Debug, Clone)]
pub enum BackendStatistics {
    Cadical(EncodingStatistics),
    Search(SearchStatistics),
}

impl UnifiedBackend {
    /// Create a backend of the given kind for `model`
    pub fn new(kind: SolverBackend, model: &LabelingModel, settings: &Settings) -> LabelingResult<Self> {
        match kind {
            SolverBackend::Cadical => Ok(UnifiedBackend::Cadical(SatEncoder::new(model, settings)?)),
            SolverBackend::Search => Ok(UnifiedBackend::Search(SearchSolver::new(model))),
        }
    }

    /// Create the backend named in `settings.solver.backend`
    pub fn from_settings(model: &LabelingModel, settings: &Settings) -> LabelingResult<Self> {
        Self::new(settings.solver.backend, model, settings)
    }

    /// Enumerate every labeling, passing the values in vertex order
    pub fn enumerate<F>(&mut self, on_solution: F) -> LabelingResult<u64>
    where
        F: FnMut(&[u32]) -> LabelingResult<()>,
    {
        match self {
            UnifiedBackend::Cadical(encoder) => encoder.enumerate(on_solution),
            UnifiedBackend::Search(solver) => solver.enumerate(on_solution),
        }
    }

    /// Get the backend type being used
    pub fn kind(&self) -> SolverBackend {
        match self {
            UnifiedBackend::Cadical(_) => SolverBackend::Cadical,
            UnifiedBackend::Search(_) => SolverBackend::Search,
        }
    }

    pub fn statistics(&self) -> BackendStatistics {
        match self {
            UnifiedBackend::Cadical(encoder) => BackendStatistics::Cadical(encoder.statistics()),
            UnifiedBackend::Search(solver) => BackendStatistics::Search(solver.statistics()),
        }
    }
}

impl std::fmt::Display for BackendStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendStatistics::Cadical(stats) => write!(f, "{}", stats),
            BackendStatistics::Search(stats) => write!(f, "{}", stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Face;
    use crate::labeling::model::build_model;
    use std::collections::HashSet;

    fn solutions(backend: &mut UnifiedBackend) -> HashSet<Vec<u32>> {
        let mut found = HashSet::new();
        backend
            .enumerate(|values| {
                found.insert(values.to_vec());
                Ok(())
            })
            .unwrap();
        found
    }

    #[test]
    fn test_backend_creation() {
        let model = build_model(3, &[Face::new(vec![1, 2, 3], 6)]).unwrap();
        let settings = Settings::default();

        let cadical = UnifiedBackend::new(SolverBackend::Cadical, &model, &settings).unwrap();
        assert_eq!(cadical.kind(), SolverBackend::Cadical);
        let search = UnifiedBackend::new(SolverBackend::Search, &model, &settings).unwrap();
        assert_eq!(search.kind(), SolverBackend::Search);
    }

    #[test]
    fn test_from_settings() {
        let model = build_model(3, &[]).unwrap();
        let mut settings = Settings::default();
        settings.solver.backend = SolverBackend::Search;

        let backend = UnifiedBackend::from_settings(&model, &settings).unwrap();
        assert_eq!(backend.kind(), SolverBackend::Search);
    }

    #[test]
    fn test_backends_agree() {
        let faces = [Face::new(vec![1, 2, 3], 7), Face::new(vec![3, 4, 5], 12)];
        let model = build_model(5, &faces).unwrap();
        let settings = Settings::default();

        let mut cadical = UnifiedBackend::new(SolverBackend::Cadical, &model, &settings).unwrap();
        let mut search = UnifiedBackend::new(SolverBackend::Search, &model, &settings).unwrap();

        let from_cadical = solutions(&mut cadical);
        assert!(!from_cadical.is_empty());
        assert_eq!(from_cadical, solutions(&mut search));
    }

    #[test]
    fn test_statistics_display() {
        let model = build_model(3, &[Face::new(vec![1, 2, 3], 6)]).unwrap();
        let settings = Settings::default();

        let cadical = UnifiedBackend::new(SolverBackend::Cadical, &model, &settings).unwrap();
        assert!(cadical.statistics().to_string().contains("SAT Encoding Statistics"));

        let mut search = UnifiedBackend::new(SolverBackend::Search, &model, &settings).unwrap();
        solutions(&mut search);
        assert!(search.statistics().to_string().contains("Solutions: 6"));
    }

    #[test]
    fn test_bad_cadical_preset() {
        let model = build_model(3, &[]).unwrap();
        let mut settings = Settings::default();
        settings.solver.cadical_config = Some("turbo".to_string());

        assert!(UnifiedBackend::new(SolverBackend::Cadical, &model, &settings).is_err());
        assert!(UnifiedBackend::new(SolverBackend::Search, &model, &settings).is_ok());
    }
}
