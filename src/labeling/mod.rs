//! Labeling model, enumeration and solution recording

pub mod backend;
pub mod enumerator;
pub mod model;
pub mod problem;
pub mod recorder;
pub mod solution;
pub mod validator;

pub use backend::{BackendStatistics, UnifiedBackend};
pub use enumerator::{
    enumerate_all, EnumerationOutcome, EnumerationReport, EnumerationState, EnumeratorOptions,
    SolutionEnumerator,
};
pub use model::{build_model, FaceConstraint, MAX_LABEL_LIMIT, LabelingModel, ModelStatistics, Violation};
pub use problem::LabelingProblem;
pub use recorder::{
    csv_header, ConsoleReporter, CsvRecorder, MemoryRecorder, SolutionAccumulator, SolutionSink,
};
pub use solution::{timestamp_now, EnumerationSummary, LabeledSolution, TIMESTAMP_FORMAT};
pub use validator::{SolutionValidator, TableIssue, ValidationResult};
