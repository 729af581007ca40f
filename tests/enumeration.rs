use fullerene_labeling::config::{Settings, SolverBackend};
use fullerene_labeling::enumerate_many;
use fullerene_labeling::graph::{save_spec_to_file, Face, FaceRecord, GraphSpec, SpecRecord};
use fullerene_labeling::labeling::{
    build_model, EnumerationOutcome, LabelingModel, LabelingProblem, MemoryRecorder, SolutionEnumerator,
};
use fullerene_labeling::InvalidSpecError;
use itertools::Itertools;
use std::collections::HashSet;
use std::path::Path;
use tempfile::tempdir;

const BACKENDS: [SolverBackend; 2] = [SolverBackend::Cadical, SolverBackend::Search];

fn settings_for(backend: SolverBackend) -> Settings {
    let mut settings = Settings::default();
    settings.solver.backend = backend;
    settings.output.echo_solutions = false;
    settings
}

/// Every emitted labeling, in discovery order
fn run(model: &LabelingModel, backend: SolverBackend) -> Vec<Vec<u32>> {
    let settings = settings_for(backend);
    let mut enumerator = SolutionEnumerator::new(model, &settings).unwrap();
    let mut found = Vec::new();
    let report = enumerator
        .enumerate_all(|values| {
            found.push(values.to_vec());
            Ok(())
        })
        .unwrap();
    assert_eq!(report.total as usize, found.len());
    found
}

fn brute_force(model: &LabelingModel) -> HashSet<Vec<u32>> {
    (1..=model.max_label())
        .permutations(model.vertex_count())
        .filter(|values| model.check(values).is_ok())
        .collect()
}

/// Two pentagons sharing the edge v4-v5
fn pentagon_pair(sum: u64) -> GraphSpec {
    SpecRecord {
        name: "pair".to_string(),
        vertex_count: 8,
        max_label: None,
        pentagon_sum: Some(sum),
        hexagon_sum: None,
        faces: vec![
            FaceRecord::Cycle(vec![1, 2, 3, 4, 5]),
            FaceRecord::Cycle(vec![4, 5, 6, 7, 8]),
        ],
    }
    .resolve()
    .unwrap()
}

fn small_models() -> Vec<LabelingModel> {
    vec![
        LabelingModel::from_spec(&pentagon_pair(20)).unwrap(),
        build_model(
            7,
            &[
                Face::new(vec![1, 2, 3], 12),
                Face::new(vec![3, 4, 5], 10),
                Face::new(vec![5, 6, 1], 11),
            ],
        )
        .unwrap(),
        LabelingModel::new(5, 7, &[Face::new(vec![1, 2, 3, 4, 5], 25)]).unwrap(),
    ]
}

#[test]
fn enumeration_matches_brute_force() {
    for model in small_models() {
        let expected = brute_force(&model);
        assert!(!expected.is_empty());

        for backend in BACKENDS {
            let found: HashSet<Vec<u32>> = run(&model, backend).into_iter().collect();
            assert_eq!(found, expected, "{:?} disagrees with brute force", backend);
        }
    }
}

#[test]
fn every_solution_satisfies_the_model() {
    for model in small_models() {
        for backend in BACKENDS {
            for values in run(&model, backend) {
                assert_eq!(model.check(&values), Ok(()));
                let distinct: HashSet<u32> = values.iter().copied().collect();
                assert_eq!(distinct.len(), model.vertex_count());
            }
        }
    }
}

#[test]
fn no_solution_is_emitted_twice() {
    for model in small_models() {
        for backend in BACKENDS {
            let found = run(&model, backend);
            let unique: HashSet<&Vec<u32>> = found.iter().collect();
            assert_eq!(unique.len(), found.len());
        }
    }
}

#[test]
fn infeasible_spec_yields_no_callbacks() {
    // The two faces together need 2 * 30 - (v4 + v5) = 36, so v4 + v5 = 24: impossible
    let model = LabelingModel::from_spec(&pentagon_pair(30)).unwrap();

    for backend in BACKENDS {
        let settings = settings_for(backend);
        let mut enumerator = SolutionEnumerator::new(&model, &settings).unwrap();
        let mut calls = 0;
        let report = enumerator
            .enumerate_all(|_| {
                calls += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(report.total, 0);
        assert_eq!(report.outcome, EnumerationOutcome::Infeasible);
        assert_eq!(calls, 0);
    }
}

#[test]
fn single_square_face_gives_all_permutations() {
    let model = build_model(4, &[Face::new(vec![1, 2, 3, 4], 10)]).unwrap();
    let expected: HashSet<Vec<u32>> = (1..=4).permutations(4).collect();

    for backend in BACKENDS {
        let found = run(&model, backend);
        assert_eq!(found.len(), 24);
        assert_eq!(found.into_iter().collect::<HashSet<_>>(), expected);
    }
}

#[test]
fn out_of_range_indices_are_rejected() {
    assert!(matches!(
        build_model(4, &[Face::new(vec![0, 1, 2], 6)]),
        Err(InvalidSpecError::VertexOutOfRange { vertex: 0, .. })
    ));
    assert!(matches!(
        build_model(4, &[Face::new(vec![1, 2, 5], 8)]),
        Err(InvalidSpecError::VertexOutOfRange { vertex: 5, .. })
    ));

    let dir = tempdir().unwrap();
    let mut settings = settings_for(SolverBackend::Cadical);
    settings.output.output_directory = dir.path().to_path_buf();
    let mut spec = pentagon_pair(20);
    spec.faces.push(Face::new(vec![7, 8, 9], 10));

    assert!(LabelingProblem::with_spec(settings, spec).is_err());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}

#[test]
fn csv_rows_follow_emission_order() {
    for backend in BACKENDS {
        let dir = tempdir().unwrap();
        let mut settings = settings_for(backend);
        settings.output.output_directory = dir.path().to_path_buf();

        let problem = LabelingProblem::with_spec(settings, pentagon_pair(20)).unwrap();
        let mut memory = MemoryRecorder::new();
        let summary = problem.solve_with(&mut memory).unwrap();

        let rows = read_rows(&summary.output_file);
        assert_eq!(summary.output_file, dir.path().join("pair_solutions_20.csv"));
        assert_eq!(rows[0].join(","), "Solution #,Timestamp,v1,v2,v3,v4,v5,v6,v7,v8");
        assert_eq!(rows.len() as u64, summary.total_solutions + 1);
        assert_eq!(memory.solutions().len() as u64, summary.total_solutions);

        for (position, (row, solution)) in rows[1..].iter().zip(memory.solutions()).enumerate() {
            assert_eq!(row[0], (position + 1).to_string());
            assert_eq!(row[1], solution.timestamp);
            let values: Vec<u32> = row[2..].iter().map(|v| v.parse().unwrap()).collect();
            assert_eq!(values, solution.values);
        }
    }
}

#[test]
fn batch_runs_are_independent() {
    let dir = tempdir().unwrap();
    let pair_path = dir.path().join("pair.yaml");
    save_spec_to_file(&pentagon_pair(20).to_record(), &pair_path).unwrap();
    let square_path = dir.path().join("square.json");
    let square = SpecRecord {
        name: "square".to_string(),
        vertex_count: 4,
        max_label: None,
        pentagon_sum: None,
        hexagon_sum: None,
        faces: vec![FaceRecord::Weighted {
            vertices: vec![1, 2, 3, 4],
            target_sum: 10,
        }],
    };
    save_spec_to_file(&square, &square_path).unwrap();

    let jobs: Vec<Settings> = [(&pair_path, SolverBackend::Search), (&square_path, SolverBackend::Cadical)]
        .into_iter()
        .map(|(path, backend)| {
            let mut settings = settings_for(backend);
            settings.instance.isomer = None;
            settings.instance.spec_file = Some(path.clone());
            settings.output.output_directory = dir.path().join("out");
            settings
        })
        .collect();

    let results = enumerate_many(jobs);
    assert_eq!(results.len(), 2);

    let pair = results[0].as_ref().unwrap();
    let square = results[1].as_ref().unwrap();
    assert_eq!(pair.name, "pair");
    assert_eq!(square.total_solutions, 24);
    assert!(dir.path().join("out/pair_solutions_20.csv").exists());
    assert!(dir.path().join("out/square_solutions_10.csv").exists());
}
