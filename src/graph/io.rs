//! File I/O for graph specification records
//!
//! Records are YAML by default; files ending in `.json` are read and written
//! as JSON.

use super::isomers::{builtin_record, BUILTIN_ISOMERS};
use super::spec::{FaceRecord, SpecRecord};
use anyhow::{Context, Result};
use std::path::Path;

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a specification record from a YAML or JSON file
pub fn load_spec_from_file<P: AsRef<Path>>(path: P) -> Result<SpecRecord> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read spec file: {}", path.display()))?;

    parse_spec(&content, is_json(path))
        .with_context(|| format!("Failed to parse spec file: {}", path.display()))
}

/// Parse a specification record from its textual form
pub fn parse_spec(content: &str, json: bool) -> Result<SpecRecord> {
    let record = if json {
        serde_json::from_str(content)?
    } else {
        serde_yaml::from_str(content)?
    };
    Ok(record)
}

/// Save a specification record, creating parent directories as needed
pub fn save_spec_to_file<P: AsRef<Path>>(record: &SpecRecord, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = if is_json(path) {
        serde_json::to_string_pretty(record).context("Failed to serialize spec")?
    } else {
        serde_yaml::to_string(record).context("Failed to serialize spec")?
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write spec file: {}", path.display()))?;

    Ok(())
}

/// Write the built-in isomers plus a four-vertex toy graph into `output_dir`
pub fn create_example_specs<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for name in BUILTIN_ISOMERS {
        let record = builtin_record(name)?;
        save_spec_to_file(&record, dir.join(format!("{}.yaml", name)))?;
    }

    // Every permutation of 1..=4 is a solution: 24 in total
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
    save_spec_to_file(&square, dir.join("square.yaml"))?;

    Ok(())
}
