//! Labeling model: label domain, distinctness and face-sum constraints

use crate::error::InvalidSpecError;
use crate::graph::{Face, FaceKind, GraphSpec};
use std::collections::{HashMap, HashSet};

/// A face-sum constraint over 0-based vertex positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceConstraint {
    pub vertices: Vec<usize>,
    pub target_sum: u64,
    pub kind: FaceKind,
}

/// Variables `v1..vN` over `1..=max_label`, pairwise distinct, with one linear
/// equality per face
#[derive(Debug, Clone)]
pub struct LabelingModel {
    vertex_count: usize,
    max_label: u32,
    faces: Vec<FaceConstraint>,
}

/// First constraint a candidate labeling breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    WrongLength { expected: usize, actual: usize },
    OutOfDomain { vertex: usize, value: u32 },
    Repeated { value: u32, first: usize, second: usize },
    FaceSum { face: usize, expected: u64, actual: u64 },
}

/// Largest accepted label ceiling.
///
/// Keeps `vertex_count * max_label` label variables and every face window
/// well inside the SAT variable range.
pub const MAX_LABEL_LIMIT: u32 = 1 << 16;

/// Build a model whose label domain is `1..=vertex_count`
pub fn build_model(vertex_count: usize, faces: &[Face]) -> Result<LabelingModel, InvalidSpecError> {
    let max_label = u32::try_from(vertex_count).unwrap_or(u32::MAX);
    LabelingModel::new(vertex_count, max_label, faces)
}

impl LabelingModel {
    /// Validate the faces and build the model. Face vertices are 1-based.
    pub fn new(vertex_count: usize, max_label: u32, faces: &[Face]) -> Result<Self, InvalidSpecError> {
        if vertex_count == 0 {
            return Err(InvalidSpecError::EmptyGraph);
        }
        if max_label == 0 {
            return Err(InvalidSpecError::EmptyDomain);
        }
        let label_variables = u64::from(max_label).saturating_mul(vertex_count as u64);
        if max_label > MAX_LABEL_LIMIT || label_variables > i32::MAX as u64 / 2 {
            return Err(InvalidSpecError::DomainTooLarge {
                max_label,
                vertex_count,
                limit: MAX_LABEL_LIMIT,
            });
        }

        let mut constraints = Vec::with_capacity(faces.len());
        for (position, face) in faces.iter().enumerate() {
            let face_number = position + 1;
            if face.is_empty() {
                return Err(InvalidSpecError::EmptyFace { face: face_number });
            }

            let mut seen = HashSet::new();
            let mut vertices = Vec::with_capacity(face.len());
            for &vertex in &face.vertices {
                if vertex == 0 || vertex > vertex_count {
                    return Err(InvalidSpecError::VertexOutOfRange {
                        face: face_number,
                        vertex,
                        vertex_count,
                    });
                }
                if !seen.insert(vertex) {
                    return Err(InvalidSpecError::DuplicateVertex { face: face_number, vertex });
                }
                vertices.push(vertex - 1);
            }

            constraints.push(FaceConstraint {
                vertices,
                target_sum: face.target_sum,
                kind: face.kind(),
            });
        }

        Ok(Self {
            vertex_count,
            max_label,
            faces: constraints,
        })
    }

    pub fn from_spec(spec: &GraphSpec) -> Result<Self, InvalidSpecError> {
        Self::new(spec.vertex_count, spec.max_label, &spec.faces)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn max_label(&self) -> u32 {
        self.max_label
    }

    pub fn faces(&self) -> &[FaceConstraint] {
        &self.faces
    }

    /// Distinct labels over a domain exactly as large as the vertex set
    pub fn is_permutation(&self) -> bool {
        u32::try_from(self.vertex_count).map_or(false, |n| n == self.max_label)
    }

    /// Check a full labeling (values in vertex order) against every constraint
    pub fn check(&self, values: &[u32]) -> Result<(), Violation> {
        if values.len() != self.vertex_count {
            return Err(Violation::WrongLength {
                expected: self.vertex_count,
                actual: values.len(),
            });
        }

        let mut owner: HashMap<u32, usize> = HashMap::with_capacity(values.len());
        for (index, &value) in values.iter().enumerate() {
            let vertex = index + 1;
            if value == 0 || value > self.max_label {
                return Err(Violation::OutOfDomain { vertex, value });
            }
            if let Some(&first) = owner.get(&value) {
                return Err(Violation::Repeated {
                    value,
                    first,
                    second: vertex,
                });
            }
            owner.insert(value, vertex);
        }

        for (position, face) in self.faces.iter().enumerate() {
            let actual: u64 = face.vertices.iter().map(|&v| u64::from(values[v])).sum();
            if actual != face.target_sum {
                return Err(Violation::FaceSum {
                    face: position + 1,
                    expected: face.target_sum,
                    actual,
                });
            }
        }

        Ok(())
    }

    pub fn statistics(&self) -> ModelStatistics {
        let count = |kind: FaceKind| self.faces.iter().filter(|face| face.kind == kind).count();
        ModelStatistics {
            variables: self.vertex_count,
            domain_size: self.max_label,
            pentagon_constraints: count(FaceKind::Pentagon),
            hexagon_constraints: count(FaceKind::Hexagon),
            other_constraints: count(FaceKind::Other),
            permutation: self.is_permutation(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::WrongLength { expected, actual } => {
                write!(f, "expected {} values, got {}", expected, actual)
            }
            Violation::OutOfDomain { vertex, value } => {
                write!(f, "v{} = {} is outside the label domain", vertex, value)
            }
            Violation::Repeated { value, first, second } => {
                write!(f, "value {} used by both v{} and v{}", value, first, second)
            }
            Violation::FaceSum { face, expected, actual } => {
                write!(f, "face {} sums to {}, expected {}", face, actual, expected)
            }
        }
    }
}

/// Size of the constraint model
#[derive(Debug, Clone)]
pub struct ModelStatistics {
    pub variables: usize,
    pub domain_size: u32,
    pub pentagon_constraints: usize,
    pub hexagon_constraints: usize,
    pub other_constraints: usize,
    pub permutation: bool,
}

impl std::fmt::Display for ModelStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Model Statistics:")?;
        writeln!(f, "  Variables: {} (domain 1..={})", self.variables, self.domain_size)?;
        writeln!(
            f,
            "  Distinctness: all-different{}",
            if self.permutation { " (permutation)" } else { "" }
        )?;
        writeln!(f, "  Pentagon sums: {}", self.pentagon_constraints)?;
        writeln!(f, "  Hexagon sums: {}", self.hexagon_constraints)?;
        if self.other_constraints > 0 {
            writeln!(f, "  Other sums: {}", self.other_constraints)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builtin_record;

    #[test]
    fn test_build_from_builtin() {
        let spec = builtin_record("C24").unwrap().resolve().unwrap();
        let model = LabelingModel::from_spec(&spec).unwrap();

        assert_eq!(model.vertex_count(), 24);
        assert_eq!(model.max_label(), 24);
        assert!(model.is_permutation());
        assert_eq!(model.faces().len(), 14);
        // Stored 0-based
        assert_eq!(model.faces()[0].vertices, vec![18, 19, 20, 21, 22, 23]);

        let stats = model.statistics();
        assert_eq!(stats.pentagon_constraints, 12);
        assert_eq!(stats.hexagon_constraints, 2);
    }

    #[test]
    fn test_rejects_out_of_range_vertices() {
        let zero = [Face::new(vec![1, 0, 2], 6)];
        assert_eq!(
            build_model(4, &zero).unwrap_err(),
            InvalidSpecError::VertexOutOfRange { face: 1, vertex: 0, vertex_count: 4 }
        );

        let too_big = [Face::new(vec![1, 2], 3), Face::new(vec![3, 5], 7)];
        assert_eq!(
            build_model(4, &too_big).unwrap_err(),
            InvalidSpecError::VertexOutOfRange { face: 2, vertex: 5, vertex_count: 4 }
        );
    }

    #[test]
    fn test_rejects_degenerate_input() {
        assert_eq!(build_model(0, &[]).unwrap_err(), InvalidSpecError::EmptyGraph);
        assert_eq!(
            build_model(3, &[Face::new(vec![], 0)]).unwrap_err(),
            InvalidSpecError::EmptyFace { face: 1 }
        );
        assert_eq!(
            build_model(3, &[Face::new(vec![1, 2, 1], 6)]).unwrap_err(),
            InvalidSpecError::DuplicateVertex { face: 1, vertex: 1 }
        );
        assert_eq!(
            LabelingModel::new(3, 0, &[]).unwrap_err(),
            InvalidSpecError::EmptyDomain
        );
    }

    #[test]
    fn test_check() {
        let model = build_model(4, &[Face::new(vec![1, 2], 3), Face::new(vec![3, 4], 7)]).unwrap();

        assert_eq!(model.check(&[1, 2, 3, 4]), Ok(()));
        assert_eq!(model.check(&[2, 1, 4, 3]), Ok(()));
        assert_eq!(
            model.check(&[1, 2, 3]),
            Err(Violation::WrongLength { expected: 4, actual: 3 })
        );
        assert_eq!(
            model.check(&[1, 2, 5, 2]),
            Err(Violation::OutOfDomain { vertex: 3, value: 5 })
        );
        assert_eq!(
            model.check(&[1, 2, 2, 4]),
            Err(Violation::Repeated { value: 2, first: 2, second: 3 })
        );
        assert_eq!(
            model.check(&[1, 3, 2, 4]),
            Err(Violation::FaceSum { face: 1, expected: 3, actual: 4 })
        );
    }

    #[test]
    fn test_rejects_oversized_domain() {
        assert_eq!(
            LabelingModel::new(3, u32::MAX, &[Face::new(vec![1, 2, 3], 6)]).unwrap_err(),
            InvalidSpecError::DomainTooLarge {
                max_label: u32::MAX,
                vertex_count: 3,
                limit: MAX_LABEL_LIMIT,
            }
        );
        assert!(matches!(
            LabelingModel::new(1 << 16, MAX_LABEL_LIMIT, &[]),
            Err(InvalidSpecError::DomainTooLarge { .. })
        ));

        let widest = LabelingModel::new(3, MAX_LABEL_LIMIT, &[Face::new(vec![1, 2, 3], 6)]).unwrap();
        assert_eq!(widest.check(&[1, 2, 3]), Ok(()));
        assert_eq!(
            widest.check(&[1, 2, MAX_LABEL_LIMIT + 1]),
            Err(Violation::OutOfDomain { vertex: 3, value: MAX_LABEL_LIMIT + 1 })
        );
    }

    #[test]
    fn test_distinct_subset_domain() {
        let model = LabelingModel::new(3, 5, &[Face::new(vec![1, 2, 3], 12)]).unwrap();
        assert!(!model.is_permutation());
        assert_eq!(model.check(&[5, 4, 3]), Ok(()));
    }
}
