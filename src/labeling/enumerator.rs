//! Exhaustive enumeration driver

use super::backend::{BackendStatistics, UnifiedBackend};
use super::model::LabelingModel;
use crate::config::{Settings, SolverBackend};
use crate::error::{LabelingError, LabelingResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Lifecycle of a [`SolutionEnumerator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationState {
    Idle,
    Running,
    /// The backend proved there are no further solutions
    Exhausted,
    /// No solution exists
    Infeasible,
    Failed,
}

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumerationOutcome {
    Exhausted,
    Infeasible,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct EnumerationReport {
    pub outcome: EnumerationOutcome,
    /// Solutions passed to the callback
    pub total: u64,
    /// Backend solutions dropped because they were already emitted
    pub duplicates_skipped: u64,
    pub elapsed: Duration,
}

/// Guards applied to every backend solution before it is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumeratorOptions {
    pub deduplicate: bool,
    pub verify: bool,
}

impl EnumeratorOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            deduplicate: settings.solver.deduplicate,
            verify: settings.solver.verify_solutions,
        }
    }
}

impl Default for EnumeratorOptions {
    fn default() -> Self {
        Self {
            deduplicate: false,
            verify: true,
        }
    }
}

/// Filters backend labelings before they reach the caller.
///
/// Only keeps emitted tuples when de-duplication is on; otherwise nothing
/// outlives the check except the duplicate counter.
struct SolutionGuard<'m> {
    model: &'m LabelingModel,
    verify: bool,
    seen: Option<HashSet<Vec<u32>>>,
    duplicates: u64,
}

impl<'m> SolutionGuard<'m> {
    fn new(model: &'m LabelingModel, options: EnumeratorOptions) -> Self {
        Self {
            model,
            verify: options.verify,
            seen: options.deduplicate.then(HashSet::new),
            duplicates: 0,
        }
    }

    /// Whether `values` should be emitted. A labeling that breaks the model
    /// is a backend error.
    fn admit(&mut self, values: &[u32]) -> LabelingResult<bool> {
        if self.verify {
            self.model.check(values).map_err(|violation| {
                LabelingError::Backend(format!("backend produced an invalid labeling: {}", violation))
            })?;
        }
        if let Some(seen) = self.seen.as_mut() {
            if !seen.insert(values.to_vec()) {
                self.duplicates += 1;
                warn!("Skipping repeated labeling {:?}", values);
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Drives one backend through a full enumeration of one model
pub struct SolutionEnumerator<'m> {
    model: &'m LabelingModel,
    backend: UnifiedBackend,
    options: EnumeratorOptions,
    state: EnumerationState,
}

impl<'m> SolutionEnumerator<'m> {
    /// Create an enumerator using the backend and guards from `settings`
    pub fn new(model: &'m LabelingModel, settings: &Settings) -> LabelingResult<Self> {
        let backend = UnifiedBackend::from_settings(model, settings)?;
        Ok(Self::with_backend(model, backend, EnumeratorOptions::from_settings(settings)))
    }

    pub fn with_backend(model: &'m LabelingModel, backend: UnifiedBackend, options: EnumeratorOptions) -> Self {
        Self {
            model,
            backend,
            options,
            state: EnumerationState::Idle,
        }
    }

    pub fn state(&self) -> EnumerationState {
        self.state
    }

    pub fn backend_kind(&self) -> SolverBackend {
        self.backend.kind()
    }

    pub fn statistics(&self) -> BackendStatistics {
        self.backend.statistics()
    }

    /// Run the backend to exhaustion, calling `on_solution` once per distinct
    /// labeling with the values in vertex order.
    ///
    /// An enumerator runs once; calling this again is an error. An error from
    /// `on_solution` stops the run and is returned unchanged.
    pub fn enumerate_all<F>(&mut self, mut on_solution: F) -> LabelingResult<EnumerationReport>
    where
        F: FnMut(&[u32]) -> LabelingResult<()>,
    {
        if self.state != EnumerationState::Idle {
            return Err(LabelingError::Backend(format!(
                "enumerator already used (state {:?})",
                self.state
            )));
        }
        self.state = EnumerationState::Running;

        let start_time = Instant::now();
        let mut guard = SolutionGuard::new(self.model, self.options);
        let mut emitted = 0u64;

        let result = self.backend.enumerate(|values| {
            if !guard.admit(values)? {
                return Ok(());
            }
            emitted += 1;
            on_solution(values)
        });

        match result {
            Ok(reported) => {
                debug!("Backend reported {} solutions, {} emitted", reported, emitted);
                let outcome = if emitted == 0 {
                    self.state = EnumerationState::Infeasible;
                    EnumerationOutcome::Infeasible
                } else {
                    self.state = EnumerationState::Exhausted;
                    EnumerationOutcome::Exhausted
                };
                Ok(EnumerationReport {
                    outcome,
                    total: emitted,
                    duplicates_skipped: guard.duplicates,
                    elapsed: start_time.elapsed(),
                })
            }
            Err(LabelingError::PartialEnumeration { .. }) => {
                self.state = EnumerationState::Failed;
                Err(LabelingError::PartialEnumeration { found: emitted })
            }
            Err(e) => {
                self.state = EnumerationState::Failed;
                Err(e)
            }
        }
    }
}

/// Enumerate every labeling of `model` with the default backend and guards.
///
/// Returns the number of labelings passed to `on_solution`.
pub fn enumerate_all<F>(model: &LabelingModel, on_solution: F) -> LabelingResult<u64>
where
    F: FnMut(&[u32]) -> LabelingResult<()>,
{
    let mut enumerator = SolutionEnumerator::new(model, &Settings::default())?;
    enumerator.enumerate_all(on_solution).map(|report| report.total)
}
