//! Variable management for the CNF encoding

use anyhow::Result;
use std::collections::HashMap;

/// Types of variables used in the SAT encoding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// Vertex (0-based) carries `value`
    Label { vertex: usize, value: u32 },
    /// The first `prefix` labels of `face` add up to `sum`
    PartialSum { face: usize, prefix: usize, sum: u64 },
    /// Register bit of a sequential at-most-one counter
    Auxiliary { id: usize },
}

/// Manages SAT variables and their mapping to integers
#[derive(Debug)]
pub struct VariableManager {
    /// Map from variable type to SAT variable ID (positive integer)
    variable_map: HashMap<VariableType, i32>,
    /// Reverse lookup for label variables
    labels_by_id: HashMap<i32, (usize, u32)>,
    /// Next available variable ID
    next_id: i32,
    next_auxiliary: usize,
    vertex_count: usize,
    max_label: u32,
}

impl VariableManager {
    pub fn new(vertex_count: usize, max_label: u32) -> Self {
        Self {
            variable_map: HashMap::new(),
            labels_by_id: HashMap::new(),
            next_id: 1, // SAT variables start from 1
            next_auxiliary: 0,
            vertex_count,
            max_label,
        }
    }

    /// Get or create a variable ID for the given variable type
    pub fn get_variable(&mut self, var_type: VariableType) -> Result<i32> {
        if let Some(&id) = self.variable_map.get(&var_type) {
            return Ok(id);
        }

        self.validate_variable(&var_type)?;

        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| anyhow::anyhow!("SAT variable ids exhausted at {}", id))?;
        if let VariableType::Label { vertex, value } = var_type {
            self.labels_by_id.insert(id, (vertex, value));
        }
        self.variable_map.insert(var_type, id);
        Ok(id)
    }

    pub fn label_variable(&mut self, vertex: usize, value: u32) -> Result<i32> {
        self.get_variable(VariableType::Label { vertex, value })
    }

    pub fn partial_sum_variable(&mut self, face: usize, prefix: usize, sum: u64) -> Result<i32> {
        self.get_variable(VariableType::PartialSum { face, prefix, sum })
    }

    /// Allocate a fresh auxiliary variable
    pub fn auxiliary_variable(&mut self) -> Result<i32> {
        let id = self.next_auxiliary;
        self.next_auxiliary += 1;
        self.get_variable(VariableType::Auxiliary { id })
    }

    /// Label variables of one vertex, ordered by value
    pub fn label_variables_for_vertex(&mut self, vertex: usize) -> Result<Vec<i32>> {
        (1..=self.max_label)
            .map(|value| self.label_variable(vertex, value))
            .collect()
    }

    /// Label variables carrying `value`, ordered by vertex
    pub fn label_variables_for_value(&mut self, value: u32) -> Result<Vec<i32>> {
        (0..self.vertex_count)
            .map(|vertex| self.label_variable(vertex, value))
            .collect()
    }

    /// Decode a label variable ID back into `(vertex, value)`
    pub fn decode_label(&self, id: i32) -> Option<(usize, u32)> {
        self.labels_by_id.get(&id).copied()
    }

    /// IDs of all label variables created so far, ascending
    pub fn label_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.labels_by_id.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Get the total number of variables created
    pub fn variable_count(&self) -> usize {
        (self.next_id - 1) as usize
    }

    fn validate_variable(&self, var_type: &VariableType) -> Result<()> {
        if let VariableType::Label { vertex, value } = var_type {
            if *vertex >= self.vertex_count {
                anyhow::bail!("Vertex {} out of bounds (vertex count: {})", vertex, self.vertex_count);
            }
            if *value == 0 || *value > self.max_label {
                anyhow::bail!("Label {} outside 1..={}", value, self.max_label);
            }
        }
        Ok(())
    }

    /// Get statistics about variable usage
    pub fn statistics(&self) -> VariableStatistics {
        let mut label_vars = 0;
        let mut partial_sum_vars = 0;
        let mut auxiliary_vars = 0;

        for var_type in self.variable_map.keys() {
            match var_type {
                VariableType::Label { .. } => label_vars += 1,
                VariableType::PartialSum { .. } => partial_sum_vars += 1,
                VariableType::Auxiliary { .. } => auxiliary_vars += 1,
            }
        }

        VariableStatistics {
            total_variables: self.variable_count(),
            label_variables: label_vars,
            partial_sum_variables: partial_sum_vars,
            auxiliary_variables: auxiliary_vars,
        }
    }
}

/// Statistics about variable usage
#[derive(Debug, Clone)]
pub struct VariableStatistics {
    pub total_variables: usize,
    pub label_variables: usize,
    pub partial_sum_variables: usize,
    pub auxiliary_variables: usize,
}

impl std::fmt::Display for VariableStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Variable Statistics:")?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Label variables: {}", self.label_variables)?;
        writeln!(f, "  Partial-sum variables: {}", self.partial_sum_variables)?;
        writeln!(f, "  Auxiliary variables: {}", self.auxiliary_variables)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_creation() {
        let mut vm = VariableManager::new(3, 3);

        let var1 = vm.label_variable(0, 1).unwrap();
        let var2 = vm.label_variable(2, 3).unwrap();
        assert_eq!(var1, 1);
        assert_eq!(var2, 2);

        // Same variable returns same ID
        assert_eq!(vm.label_variable(0, 1).unwrap(), var1);
        assert_eq!(vm.decode_label(var2), Some((2, 3)));
    }

    #[test]
    fn test_variable_bounds() {
        let mut vm = VariableManager::new(2, 2);

        assert!(vm.label_variable(1, 2).is_ok());
        assert!(vm.label_variable(2, 1).is_err());
        assert!(vm.label_variable(0, 0).is_err());
        assert!(vm.label_variable(0, 3).is_err());
    }

    #[test]
    fn test_auxiliary_variables_are_fresh() {
        let mut vm = VariableManager::new(2, 2);
        let a = vm.auxiliary_variable().unwrap();
        let b = vm.auxiliary_variable().unwrap();
        assert_ne!(a, b);
        assert_eq!(vm.decode_label(a), None);
    }

    #[test]
    fn test_vertex_and_value_groups() {
        let mut vm = VariableManager::new(3, 3);
        let by_vertex = vm.label_variables_for_vertex(1).unwrap();
        let by_value = vm.label_variables_for_value(2).unwrap();

        assert_eq!(by_vertex.len(), 3);
        assert_eq!(by_value.len(), 3);
        // v2 = 2 belongs to both groups
        assert_eq!(by_vertex[1], by_value[1]);
        assert_eq!(vm.label_ids().len(), 5);
    }

    #[test]
    fn test_statistics() {
        let mut vm = VariableManager::new(2, 2);
        vm.label_variable(0, 1).unwrap();
        vm.partial_sum_variable(0, 1, 1).unwrap();
        vm.auxiliary_variable().unwrap();

        let stats = vm.statistics();
        assert_eq!(stats.total_variables, 3);
        assert_eq!(stats.label_variables, 1);
        assert_eq!(stats.partial_sum_variables, 1);
        assert_eq!(stats.auxiliary_variables, 1);
    }
}
