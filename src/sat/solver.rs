//! SAT solver integration using CaDiCaL

use super::constraints::Clause;
use crate::error::{LabelingError, LabelingResult};
use cadical::Solver;
use std::time::{Duration, Instant};

/// SAT solver wrapper for CaDiCaL
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
    blocking_clause_count: usize,
    solve_time: Duration,
}

/// Outcome of a single `solve` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Satisfiable,
    Unsatisfiable,
    /// CaDiCaL returned without a verdict
    Unknown,
}

/// Statistics about the solving process
#[derive(Debug, Clone)]
pub struct SolverStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
    pub blocking_clause_count: usize,
    pub solve_time: Duration,
}

impl SatSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self::from_solver(Solver::new())
    }

    /// Create a solver from a named CaDiCaL preset (`default`, `plain`, `sat`, `unsat`)
    pub fn with_config(config: &str) -> LabelingResult<Self> {
        let solver: Solver = Solver::with_config(config).map_err(|e| {
            LabelingError::Backend(format!("CaDiCaL rejected configuration '{}': {}", config, e))
        })?;
        Ok(Self::from_solver(solver))
    }

    fn from_solver(solver: Solver) -> Self {
        Self {
            solver,
            variable_count: 0,
            clause_count: 0,
            blocking_clause_count: 0,
            solve_time: Duration::ZERO,
        }
    }

    /// Add clauses to the solver
    pub fn add_clauses(&mut self, clauses: &[Clause]) -> LabelingResult<()> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }

    /// Add a single clause to the solver
    pub fn add_clause(&mut self, clause: &Clause) -> LabelingResult<()> {
        if clause.is_empty() {
            return Err(LabelingError::Backend(
                "cannot add empty clause (unsatisfiable)".to_string(),
            ));
        }

        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(clause.literals.iter().copied());
        self.clause_count += 1;
        Ok(())
    }

    /// Run the solver once
    pub fn solve(&mut self) -> SolveStatus {
        let start_time = Instant::now();
        let result = self.solver.solve();
        self.solve_time += start_time.elapsed();

        match result {
            Some(true) => SolveStatus::Satisfiable,
            Some(false) => SolveStatus::Unsatisfiable,
            None => SolveStatus::Unknown,
        }
    }

    /// Value of a variable in the last model
    pub fn value(&self, var: i32) -> Option<bool> {
        self.solver.value(var)
    }

    /// Enumerate every model, distinguishing models only by the variables in
    /// `projection`.
    ///
    /// `on_model` receives the projection variables that are true. After each
    /// model a clause forbidding exactly that set of true variables is added,
    /// so every projected model is reported once. Returns the number of
    /// models; zero means the formula is unsatisfiable.
    pub fn enumerate_projected<F>(&mut self, projection: &[i32], mut on_model: F) -> LabelingResult<u64>
    where
        F: FnMut(&[i32]) -> LabelingResult<()>,
    {
        let mut models = 0u64;

        loop {
            match self.solve() {
                SolveStatus::Satisfiable => {}
                SolveStatus::Unsatisfiable => return Ok(models),
                SolveStatus::Unknown => {
                    return Err(LabelingError::PartialEnumeration { found: models })
                }
            }

            let true_vars: Vec<i32> = projection
                .iter()
                .copied()
                .filter(|&var| self.value(var) == Some(true))
                .collect();

            models += 1;
            on_model(&true_vars)?;

            if true_vars.is_empty() {
                // Nothing to block on: the projection has a single model
                return Ok(models);
            }
            self.add_blocking_clause(&true_vars)?;
        }
    }

    /// Add a clause that rules out the given set of true variables
    fn add_blocking_clause(&mut self, true_vars: &[i32]) -> LabelingResult<()> {
        let blocking_clause = Clause::new(true_vars.iter().map(|&var| -var).collect());
        self.add_clause(&blocking_clause)?;
        self.blocking_clause_count += 1;
        Ok(())
    }

    /// Get solver statistics
    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            variable_count: self.variable_count,
            clause_count: self.clause_count,
            blocking_clause_count: self.blocking_clause_count,
            solve_time: self.solve_time,
        }
    }

    /// Get the number of variables
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Get the number of clauses
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solver Statistics:")?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        writeln!(f, "  Blocking clauses: {}", self.blocking_clause_count)?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_creation() {
        let solver = SatSolver::new();
        assert_eq!(solver.variable_count(), 0);
        assert_eq!(solver.clause_count(), 0);
    }

    #[test]
    fn test_simple_satisfiable() {
        let mut solver = SatSolver::new();

        // (x1 ∨ x2) ∧ (¬x1 ∨ x2)
        solver.add_clause(&Clause::new(vec![1, 2])).unwrap();
        solver.add_clause(&Clause::new(vec![-1, 2])).unwrap();

        assert_eq!(solver.solve(), SolveStatus::Satisfiable);
        assert_eq!(solver.value(2), Some(true));
    }

    #[test]
    fn test_unsatisfiable() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::unit(1)).unwrap();
        solver.add_clause(&Clause::unit(-1)).unwrap();

        assert_eq!(solver.solve(), SolveStatus::Unsatisfiable);
        assert_eq!(solver.enumerate_projected(&[1], |_| Ok(())).unwrap(), 0);
    }

    #[test]
    fn test_enumerate_projected_counts_each_model_once() {
        let mut solver = SatSolver::new();
        // Exactly one of x1, x2, x3; x4 unconstrained and outside the projection
        solver.add_clause(&Clause::new(vec![1, 2, 3])).unwrap();
        solver.add_clause(&Clause::binary(-1, -2)).unwrap();
        solver.add_clause(&Clause::binary(-1, -3)).unwrap();
        solver.add_clause(&Clause::binary(-2, -3)).unwrap();
        solver.add_clause(&Clause::binary(4, -4)).unwrap();

        let mut seen = Vec::new();
        let count = solver
            .enumerate_projected(&[1, 2, 3], |true_vars| {
                seen.push(true_vars.to_vec());
                Ok(())
            })
            .unwrap();

        assert_eq!(count, 3);
        seen.sort();
        assert_eq!(seen, vec![vec![1], vec![2], vec![3]]);
        assert_eq!(solver.statistics().blocking_clause_count, 3);
    }

    #[test]
    fn test_callback_error_stops_enumeration() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::new(vec![1, 2])).unwrap();

        let mut calls = 0;
        let result = solver.enumerate_projected(&[1, 2], |_| {
            calls += 1;
            Err(LabelingError::Recorder("disk full".to_string()))
        });

        assert!(matches!(result, Err(LabelingError::Recorder(_))));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_empty_clause_error() {
        let mut solver = SatSolver::new();
        assert!(solver.add_clause(&Clause::new(vec![])).is_err());
    }

    #[test]
    fn test_unknown_configuration() {
        assert!(matches!(
            SatSolver::with_config("no-such-preset"),
            Err(LabelingError::Backend(_))
        ));
        assert!(SatSolver::with_config("plain").is_ok());
    }

    #[test]
    fn test_variable_count_tracking() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::new(vec![1, -5, 3])).unwrap();
        assert_eq!(solver.variable_count(), 5);

        solver.add_clause(&Clause::new(vec![2, -7])).unwrap();
        assert_eq!(solver.variable_count(), 7);
    }
}
