//! CNF encoder and enumeration driver for labeling models

use super::{ConstraintGenerator, SatSolver};
use crate::config::Settings;
use crate::error::{LabelingError, LabelingResult};
use crate::labeling::model::LabelingModel;
use log::debug;

/// Encodes a labeling model into CNF and enumerates its labelings with CaDiCaL
pub struct SatEncoder {
    constraint_generator: ConstraintGenerator,
    solver: SatSolver,
    /// Label variable IDs; blocking clauses are built over these only
    projection: Vec<i32>,
    vertex_count: usize,
    max_label: u32,
    face_count: usize,
}

impl SatEncoder {
    /// Generate the encoding and load it into a fresh solver
    pub fn new(model: &LabelingModel, settings: &Settings) -> LabelingResult<Self> {
        let mut constraint_generator = ConstraintGenerator::new(
            model.vertex_count(),
            model.max_label(),
            settings.encoding.at_most_one,
        );

        let clauses = constraint_generator
            .generate_all_constraints(model)
            .map_err(|e| LabelingError::Backend(format!("failed to encode model: {:#}", e)))?;

        let mut solver = match &settings.solver.cadical_config {
            Some(config) => SatSolver::with_config(config)?,
            None => SatSolver::new(),
        };
        solver.add_clauses(&clauses)?;

        debug!(
            "Generated {} clauses with {} variables",
            clauses.len(),
            constraint_generator.variable_manager().variable_count()
        );

        let projection = constraint_generator.variable_manager().label_ids();

        Ok(Self {
            constraint_generator,
            solver,
            projection,
            vertex_count: model.vertex_count(),
            max_label: model.max_label(),
            face_count: model.faces().len(),
        })
    }

    /// Enumerate every labeling, passing the values in vertex order
    pub fn enumerate<F>(&mut self, mut on_solution: F) -> LabelingResult<u64>
    where
        F: FnMut(&[u32]) -> LabelingResult<()>,
    {
        let vertex_count = self.vertex_count;
        let variables = self.constraint_generator.variable_manager();
        let mut values = vec![0u32; vertex_count];

        self.solver.enumerate_projected(&self.projection, |true_vars| {
            values.iter_mut().for_each(|value| *value = 0);
            for &var in true_vars {
                let (vertex, value) = variables.decode_label(var).ok_or_else(|| {
                    LabelingError::Backend(format!("variable {} is not a label", var))
                })?;
                values[vertex] = value;
            }
            if let Some(vertex) = values.iter().position(|&value| value == 0) {
                return Err(LabelingError::Backend(format!(
                    "model leaves vertex v{} unlabeled",
                    vertex + 1
                )));
            }
            on_solution(&values)
        })
    }

    /// Get encoding statistics
    pub fn statistics(&self) -> EncodingStatistics {
        let variable_stats = self.constraint_generator.variable_manager().statistics();
        let solver_stats = self.solver.statistics();

        EncodingStatistics {
            vertex_count: self.vertex_count,
            max_label: self.max_label,
            face_count: self.face_count,
            total_variables: variable_stats.total_variables,
            label_variables: variable_stats.label_variables,
            partial_sum_variables: variable_stats.partial_sum_variables,
            auxiliary_variables: variable_stats.auxiliary_variables,
            total_clauses: solver_stats.clause_count,
            blocking_clauses: solver_stats.blocking_clause_count,
        }
    }
}

/// Statistics about the SAT encoding
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub vertex_count: usize,
    pub max_label: u32,
    pub face_count: usize,
    pub total_variables: usize,
    pub label_variables: usize,
    pub partial_sum_variables: usize,
    pub auxiliary_variables: usize,
    pub total_clauses: usize,
    pub blocking_clauses: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(f, "  Vertices: {} (labels 1..={})", self.vertex_count, self.max_label)?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "    label: {}", self.label_variables)?;
        writeln!(f, "    partial sum: {}", self.partial_sum_variables)?;
        writeln!(f, "    auxiliary: {}", self.auxiliary_variables)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        if self.blocking_clauses > 0 {
            writeln!(f, "  Blocking clauses: {}", self.blocking_clauses)?;
        }
        Ok(())
    }
}
