//! Constraint generation for the labeling CNF encoding

use super::VariableManager;
use crate::config::AmoEncoding;
use crate::labeling::model::{FaceConstraint, LabelingModel};
use anyhow::Result;
use itertools::Itertools;
use std::ops::RangeInclusive;

/// Below this size the sequential counter costs more clauses than pairwise
const SEQUENTIAL_THRESHOLD: usize = 5;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

/// Generates the CNF encoding of a [`LabelingModel`]
pub struct ConstraintGenerator {
    variable_manager: VariableManager,
    vertex_count: usize,
    max_label: u32,
    at_most_one: AmoEncoding,
}

impl ConstraintGenerator {
    pub fn new(vertex_count: usize, max_label: u32, at_most_one: AmoEncoding) -> Self {
        Self {
            variable_manager: VariableManager::new(vertex_count, max_label),
            vertex_count,
            max_label,
            at_most_one,
        }
    }

    /// Generate all constraints for the model
    pub fn generate_all_constraints(&mut self, model: &LabelingModel) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        // Label variables first, so they occupy the lowest IDs
        for vertex in 0..self.vertex_count {
            clauses.extend(self.generate_vertex_constraints(vertex)?);
        }

        clauses.extend(self.generate_distinctness_constraints(model.is_permutation())?);

        for (index, face) in model.faces().iter().enumerate() {
            clauses.extend(self.generate_face_sum_constraints(index, face)?);
        }

        Ok(clauses)
    }

    /// Each vertex takes exactly one label
    fn generate_vertex_constraints(&mut self, vertex: usize) -> Result<Vec<Clause>> {
        let literals = self.variable_manager.label_variables_for_vertex(vertex)?;
        let mut clauses = vec![Clause::new(literals.clone())];
        clauses.extend(self.at_most_one(&literals)?);
        Ok(clauses)
    }

    /// No label is used twice; with a permutation domain every label is used
    fn generate_distinctness_constraints(&mut self, permutation: bool) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        for value in 1..=self.max_label {
            let literals = self.variable_manager.label_variables_for_value(value)?;
            if permutation {
                clauses.push(Clause::new(literals.clone()));
            }
            clauses.extend(self.at_most_one(&literals)?);
        }

        Ok(clauses)
    }

    /// Feasible partial sums after `prefix` of the face's labels are known
    fn prefix_window(&self, face: &FaceConstraint, prefix: usize) -> RangeInclusive<u64> {
        let remaining = (face.vertices.len() - prefix) as u64;
        let max_label = u64::from(self.max_label);
        let target = face.target_sum;

        if target < remaining {
            // Even all-ones in the remaining slots overshoot: nothing is feasible
            return 1..=0;
        }
        let low = (prefix as u64).max(target.saturating_sub(remaining * max_label));
        let high = (prefix as u64 * max_label).min(target - remaining);
        low..=high
    }

    /// Layered partial-sum encoding of `sum(face) == target`.
    ///
    /// Layer `j` holds one variable per reachable sum of the first `j` labels.
    /// Each label choice either moves the true partial sum into the next
    /// layer's window or is ruled out. The last layer only admits the target.
    fn generate_face_sum_constraints(
        &mut self,
        face_index: usize,
        face: &FaceConstraint,
    ) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        let length = face.vertices.len();

        for prefix in 1..=length {
            let vertex = face.vertices[prefix - 1];
            let window = self.prefix_window(face, prefix);
            let last = prefix == length;

            if prefix == 1 {
                for value in 1..=self.max_label {
                    let label = self.variable_manager.label_variable(vertex, value)?;
                    let sum = u64::from(value);
                    if !window.contains(&sum) {
                        clauses.push(Clause::unit(-label));
                    } else if !last {
                        let next = self.variable_manager.partial_sum_variable(face_index, 1, sum)?;
                        clauses.push(Clause::binary(-label, next));
                    }
                }
                continue;
            }

            let previous_window = self.prefix_window(face, prefix - 1);
            for partial in previous_window {
                let reached = self.variable_manager.partial_sum_variable(face_index, prefix - 1, partial)?;
                for value in 1..=self.max_label {
                    let label = self.variable_manager.label_variable(vertex, value)?;
                    let sum = partial + u64::from(value);
                    if !window.contains(&sum) {
                        clauses.push(Clause::binary(-reached, -label));
                    } else if !last {
                        let next = self.variable_manager.partial_sum_variable(face_index, prefix, sum)?;
                        clauses.push(Clause::new(vec![-reached, -label, next]));
                    }
                }
            }
        }

        Ok(clauses)
    }

    /// At most one of `literals` is true
    fn at_most_one(&mut self, literals: &[i32]) -> Result<Vec<Clause>> {
        match self.at_most_one {
            AmoEncoding::Sequential if literals.len() >= SEQUENTIAL_THRESHOLD => {
                self.sequential_at_most_one(literals)
            }
            _ => Ok(Self::pairwise_at_most_one(literals)),
        }
    }

    fn pairwise_at_most_one(literals: &[i32]) -> Vec<Clause> {
        literals
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| Clause::binary(-a, -b))
            .collect()
    }

    /// Sinz's sequential counter: register `s_i` is true once any of the first
    /// `i + 1` literals is true
    fn sequential_at_most_one(&mut self, literals: &[i32]) -> Result<Vec<Clause>> {
        let n = literals.len();
        let registers = (0..n - 1)
            .map(|_| self.variable_manager.auxiliary_variable())
            .collect::<Result<Vec<_>>>()?;

        let mut clauses = vec![Clause::binary(-literals[0], registers[0])];
        for i in 1..n - 1 {
            clauses.push(Clause::binary(-literals[i], registers[i]));
            clauses.push(Clause::binary(-registers[i - 1], registers[i]));
            clauses.push(Clause::binary(-literals[i], -registers[i - 1]));
        }
        clauses.push(Clause::binary(-literals[n - 1], -registers[n - 2]));

        Ok(clauses)
    }

    /// Get the variable manager (for external access)
    pub fn variable_manager(&self) -> &VariableManager {
        &self.variable_manager
    }
}
