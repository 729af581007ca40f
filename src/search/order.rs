//! Static vertex ordering for the depth-first search

use crate::labeling::model::FaceConstraint;
use std::cmp::Reverse;

/// Order in which vertices are labeled, and the face each step completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    /// Vertices (0-based) in labeling order
    pub order: Vec<usize>,
    /// `closing[depth]` is a face whose last open vertex is `order[depth]`
    pub closing: Vec<Option<usize>>,
    /// Faces containing each vertex
    pub vertex_faces: Vec<Vec<usize>>,
}

impl SearchPlan {
    /// Greedy order that completes faces as early as possible.
    ///
    /// At each step the next vertex is the one closing the most faces, then
    /// the one touching the most already-labeled face positions, then the
    /// one on the most faces. Remaining ties go to the lowest index.
    pub fn new(vertex_count: usize, faces: &[FaceConstraint]) -> Self {
        let mut vertex_faces = vec![Vec::new(); vertex_count];
        for (index, face) in faces.iter().enumerate() {
            for &vertex in &face.vertices {
                vertex_faces[vertex].push(index);
            }
        }

        let mut open: Vec<usize> = faces.iter().map(|face| face.vertices.len()).collect();
        let mut placed = vec![false; vertex_count];
        let mut order = Vec::with_capacity(vertex_count);
        let mut closing = Vec::with_capacity(vertex_count);

        while order.len() < vertex_count {
            let next = (0..vertex_count).filter(|&v| !placed[v]).max_by_key(|&v| {
                let closes = vertex_faces[v].iter().filter(|&&f| open[f] == 1).count();
                let progress: usize = vertex_faces[v]
                    .iter()
                    .map(|&f| faces[f].vertices.len() - open[f])
                    .sum();
                (closes, progress, vertex_faces[v].len(), Reverse(v))
            });
            let Some(vertex) = next else { break };

            placed[vertex] = true;
            order.push(vertex);

            let mut closed = None;
            for &face in &vertex_faces[vertex] {
                open[face] -= 1;
                if open[face] == 0 && closed.is_none() {
                    closed = Some(face);
                }
            }
            closing.push(closed);
        }

        Self {
            order,
            closing,
            vertex_faces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builtin_record;
    use crate::labeling::model::LabelingModel;

    fn plan_for(name: &str) -> SearchPlan {
        let spec = builtin_record(name).unwrap().resolve().unwrap();
        let model = LabelingModel::from_spec(&spec).unwrap();
        SearchPlan::new(model.vertex_count(), model.faces())
    }

    #[test]
    fn test_order_is_a_permutation() {
        let plan = plan_for("C26");
        let mut sorted = plan.order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..26).collect::<Vec<_>>());
        assert_eq!(plan.closing.len(), 26);
    }

    #[test]
    fn test_closing_faces_are_complete() {
        let spec = builtin_record("C24").unwrap().resolve().unwrap();
        let model = LabelingModel::from_spec(&spec).unwrap();
        let plan = SearchPlan::new(model.vertex_count(), model.faces());

        for (depth, closed) in plan.closing.iter().enumerate() {
            if let Some(face) = closed {
                let placed = &plan.order[..=depth];
                assert!(model.faces()[*face].vertices.iter().all(|v| placed.contains(v)));
                assert!(model.faces()[*face].vertices.contains(&plan.order[depth]));
            }
        }
        // The final vertex always completes something on a closed surface
        assert!(plan.closing.last().unwrap().is_some());
    }

    #[test]
    fn test_first_face_closes_early() {
        let plan = plan_for("C24");
        // The first face is finished as soon as its own vertices are placed
        let first_close = plan.closing.iter().position(Option::is_some).unwrap();
        assert!(first_close <= 5);
    }

    #[test]
    fn test_vertices_outside_faces_come_last() {
        let faces = [FaceConstraint {
            vertices: vec![2, 3],
            target_sum: 5,
            kind: crate::graph::FaceKind::Other,
        }];
        let plan = SearchPlan::new(4, &faces);
        assert_eq!(plan.order, vec![2, 3, 0, 1]);
        assert_eq!(plan.closing, vec![None, Some(0), None, None]);
    }
}
