//! Built-in isomer face tables

use super::spec::{FaceRecord, SpecRecord};
use crate::error::InvalidSpecError;

/// Names accepted by [`builtin_record`]
pub const BUILTIN_ISOMERS: &[&str] = &["C24", "C26"];

const C24_FACES: &[&[usize]] = &[
    &[19, 20, 21, 22, 23, 24],
    &[1, 2, 3, 4, 5, 6],
    &[5, 8, 15, 9, 4],
    &[4, 9, 16, 10, 3],
    &[3, 10, 17, 11, 2],
    &[2, 11, 18, 12, 1],
    &[1, 12, 13, 7, 6],
    &[6, 7, 14, 8, 5],
    &[14, 8, 15, 22, 21],
    &[15, 9, 16, 23, 22],
    &[16, 10, 17, 24, 23],
    &[17, 11, 18, 19, 24],
    &[18, 12, 13, 20, 19],
    &[13, 7, 14, 21, 20],
];

const C26_FACES: &[&[usize]] = &[
    &[5, 6, 7, 16, 17, 18],
    &[8, 9, 10, 11, 20, 21],
    &[12, 13, 14, 15, 23, 24],
    &[1, 2, 4, 5, 6],
    &[1, 2, 3, 10, 9],
    &[1, 6, 7, 8, 9],
    &[17, 18, 19, 25, 26],
    &[7, 8, 18, 19, 20],
    &[19, 20, 21, 22, 26],
    &[11, 12, 21, 22, 23],
    &[3, 10, 11, 12, 13],
    &[2, 3, 4, 13, 14],
    &[4, 5, 14, 15, 16],
    &[15, 16, 17, 24, 25],
    &[22, 23, 24, 25, 26],
];

fn record(name: &str, vertex_count: usize, sums: (u64, u64), faces: &[&[usize]]) -> SpecRecord {
    SpecRecord {
        name: name.to_string(),
        vertex_count,
        max_label: None,
        pentagon_sum: Some(sums.0),
        hexagon_sum: Some(sums.1),
        faces: faces.iter().map(|face| FaceRecord::Cycle(face.to_vec())).collect(),
    }
}

/// Look up a built-in isomer by name (case-insensitive)
pub fn builtin_record(name: &str) -> Result<SpecRecord, InvalidSpecError> {
    match name.to_ascii_uppercase().as_str() {
        "C24" => Ok(record("C24", 24, (64, 66), C24_FACES)),
        "C26" => Ok(record("C26", 26, (66, 87), C26_FACES)),
        _ => Err(InvalidSpecError::UnknownIsomer(name.to_string())),
    }
}
