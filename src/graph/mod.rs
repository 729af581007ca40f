//! Fullerene graph specifications

pub mod io;
pub mod isomers;
pub mod spec;

pub use io::{create_example_specs, load_spec_from_file, save_spec_to_file};
pub use isomers::{builtin_record, BUILTIN_ISOMERS};
pub use spec::{Face, FaceKind, FaceRecord, GraphSpec, SpecRecord, SpecStatistics};
