//! Depth-first enumeration with face-sum bounds

use super::SearchPlan;
use crate::error::LabelingResult;
use crate::labeling::model::LabelingModel;
use log::debug;
use std::time::{Duration, Instant};

/// Enumerates labelings by assigning vertices in a fixed order.
///
/// A vertex that completes a face gets the one label that makes the sum
/// exact. Any other vertex tries every unused label in ascending order.
/// After each assignment the faces around the vertex must still be able
/// to reach their target with the labels that are left.
pub struct SearchSolver {
    plan: SearchPlan,
    targets: Vec<u64>,
    face_sizes: Vec<usize>,
    vertex_count: usize,
    max_label: u32,
    statistics: SearchStatistics,
}

/// Counters for one enumeration run
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Assignments tried
    pub nodes: u64,
    /// Assignments rejected by a face bound
    pub pruned: u64,
    pub solutions: u64,
    pub search_time: Duration,
}

/// Mutable search state, undone on backtrack
struct Frontier {
    values: Vec<u32>,
    used: Vec<bool>,
    face_sums: Vec<u64>,
    face_open: Vec<usize>,
}

impl SearchSolver {
    pub fn new(model: &LabelingModel) -> Self {
        let plan = SearchPlan::new(model.vertex_count(), model.faces());
        Self {
            plan,
            targets: model.faces().iter().map(|face| face.target_sum).collect(),
            face_sizes: model.faces().iter().map(|face| face.vertices.len()).collect(),
            vertex_count: model.vertex_count(),
            max_label: model.max_label(),
            statistics: SearchStatistics::default(),
        }
    }

    /// Enumerate every labeling, passing the values in vertex order.
    ///
    /// Returns the number of labelings found. An error from `on_solution`
    /// stops the search and is returned unchanged.
    pub fn enumerate<F>(&mut self, mut on_solution: F) -> LabelingResult<u64>
    where
        F: FnMut(&[u32]) -> LabelingResult<()>,
    {
        self.statistics = SearchStatistics::default();
        let start_time = Instant::now();

        let mut frontier = Frontier {
            values: vec![0; self.vertex_count],
            used: vec![false; self.max_label as usize + 1],
            face_sums: vec![0; self.targets.len()],
            face_open: self.face_sizes.clone(),
        };

        let feasible = (0..self.targets.len()).all(|face| self.reachable(&frontier, face));
        let result = if feasible {
            self.descend(&mut frontier, 0, &mut on_solution)
        } else {
            debug!("A face target is out of reach before labeling starts");
            Ok(())
        };

        self.statistics.search_time = start_time.elapsed();
        debug!(
            "Search visited {} nodes, pruned {}",
            self.statistics.nodes, self.statistics.pruned
        );
        result.map(|()| self.statistics.solutions)
    }

    fn descend<F>(&mut self, frontier: &mut Frontier, depth: usize, on_solution: &mut F) -> LabelingResult<()>
    where
        F: FnMut(&[u32]) -> LabelingResult<()>,
    {
        if depth == self.vertex_count {
            self.statistics.solutions += 1;
            return on_solution(&frontier.values);
        }

        let vertex = self.plan.order[depth];
        let (first, last) = match self.plan.closing[depth] {
            Some(face) => match self.forced_label(frontier, face) {
                Some(label) => (label, label),
                None => {
                    self.statistics.pruned += 1;
                    return Ok(());
                }
            },
            None => (1, self.max_label),
        };

        for label in first..=last {
            if frontier.used[label as usize] {
                continue;
            }
            self.statistics.nodes += 1;

            self.assign(frontier, vertex, label);
            let feasible = self.plan.vertex_faces[vertex]
                .iter()
                .all(|&face| self.reachable(frontier, face));
            let result = if feasible {
                self.descend(frontier, depth + 1, on_solution)
            } else {
                self.statistics.pruned += 1;
                Ok(())
            };
            self.unassign(frontier, vertex, label);
            result?;
        }

        Ok(())
    }

    /// The label that brings `face` exactly to its target, if it is in range
    fn forced_label(&self, frontier: &Frontier, face: usize) -> Option<u32> {
        let missing = self.targets[face].checked_sub(frontier.face_sums[face])?;
        let label = u32::try_from(missing).ok()?;
        (1..=self.max_label).contains(&label).then_some(label)
    }

    fn assign(&self, frontier: &mut Frontier, vertex: usize, label: u32) {
        frontier.values[vertex] = label;
        frontier.used[label as usize] = true;
        for &face in &self.plan.vertex_faces[vertex] {
            frontier.face_sums[face] += u64::from(label);
            frontier.face_open[face] -= 1;
        }
    }

    fn unassign(&self, frontier: &mut Frontier, vertex: usize, label: u32) {
        frontier.values[vertex] = 0;
        frontier.used[label as usize] = false;
        for &face in &self.plan.vertex_faces[vertex] {
            frontier.face_sums[face] -= u64::from(label);
            frontier.face_open[face] += 1;
        }
    }

    /// Whether the open positions of `face` can still be filled with
    /// distinct unused labels so that the face hits its target
    fn reachable(&self, frontier: &Frontier, face: usize) -> bool {
        let Some(slack) = self.targets[face].checked_sub(frontier.face_sums[face]) else {
            return false;
        };
        let open = frontier.face_open[face];
        if open == 0 {
            return slack == 0;
        }

        let unused = |label: &u32| !frontier.used[*label as usize];
        let smallest: Vec<u32> = (1..=self.max_label).filter(unused).take(open).collect();
        if smallest.len() < open {
            return false;
        }
        let largest: u64 = (1..=self.max_label).rev().filter(unused).take(open).map(u64::from).sum();
        let least: u64 = smallest.into_iter().map(u64::from).sum();

        least <= slack && slack <= largest
    }

    /// Get statistics for the last run
    pub fn statistics(&self) -> SearchStatistics {
        self.statistics.clone()
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes: {}", self.nodes)?;
        writeln!(f, "  Pruned: {}", self.pruned)?;
        writeln!(f, "  Solutions: {}", self.solutions)?;
        writeln!(f, "  Search time: {:.3}s", self.search_time.as_secs_f64())?;
        Ok(())
    }
}
