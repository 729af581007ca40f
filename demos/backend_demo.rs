//! Runs both backends on the same graphs and compares their solution sets

use fullerene_labeling::config::{Settings, SolverBackend};
use fullerene_labeling::graph::{Face, FaceRecord, SpecRecord};
use fullerene_labeling::labeling::{build_model, LabelingModel, SolutionEnumerator};
use std::collections::HashSet;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Labeling Backend Demonstration ===\n");

    let square = build_model(4, &[Face::new(vec![1, 2, 3, 4], 10)])?;
    compare("square (sum 10)", &square)?;

    let pair = SpecRecord {
        name: "pair".to_string(),
        vertex_count: 8,
        max_label: None,
        pentagon_sum: Some(20),
        hexagon_sum: None,
        faces: vec![
            FaceRecord::Cycle(vec![1, 2, 3, 4, 5]),
            FaceRecord::Cycle(vec![4, 5, 6, 7, 8]),
        ],
    }
    .resolve()?;
    compare("pentagon pair (sum 20)", &LabelingModel::from_spec(&pair)?)?;

    println!("✅ Both backends agree");
    Ok(())
}

fn compare(label: &str, model: &LabelingModel) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}:", label);

    let mut sets = Vec::new();
    for backend in [SolverBackend::Cadical, SolverBackend::Search] {
        let mut settings = Settings::default();
        settings.solver.backend = backend;

        let start = Instant::now();
        let mut enumerator = SolutionEnumerator::new(model, &settings)?;
        let mut found = HashSet::new();
        let report = enumerator.enumerate_all(|values| {
            found.insert(values.to_vec());
            Ok(())
        })?;

        println!(
            "  {:?}: {} solutions in {:.3}ms",
            backend,
            report.total,
            start.elapsed().as_secs_f64() * 1000.0
        );
        sets.push(found);
    }

    if sets[0] != sets[1] {
        return Err(format!("backends disagree on {}", label).into());
    }
    println!();
    Ok(())
}
