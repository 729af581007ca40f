//! Error types for model construction and enumeration

use thiserror::Error;

/// A graph specification that cannot be turned into a labeling model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSpecError {
    #[error("vertex count must be positive")]
    EmptyGraph,

    #[error("face {face} references vertex {vertex}, outside 1..={vertex_count}")]
    VertexOutOfRange {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },

    #[error("face {face} has no vertices")]
    EmptyFace { face: usize },

    #[error("face {face} lists vertex {vertex} more than once")]
    DuplicateVertex { face: usize, vertex: usize },

    #[error("label domain is empty (max_label = 0)")]
    EmptyDomain,

    #[error("max_label {max_label} exceeds the limit of {limit} for {vertex_count} vertices")]
    DomainTooLarge {
        max_label: u32,
        vertex_count: usize,
        limit: u32,
    },

    #[error("face {face} has {size} vertices and no target sum")]
    MissingTargetSum { face: usize, size: usize },

    #[error("unknown isomer '{0}'")]
    UnknownIsomer(String),
}

/// Failures while enumerating labelings
#[derive(Debug, Error)]
pub enum LabelingError {
    #[error("invalid graph specification: {0}")]
    InvalidSpec(#[from] InvalidSpecError),

    #[error("solver backend failed: {0}")]
    Backend(String),

    /// The backend stopped without proving that no further solutions exist
    #[error("enumeration aborted after {found} solution(s); the solution set is incomplete")]
    PartialEnumeration { found: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("recorder failed: {0}")]
    Recorder(String),
}

pub type LabelingResult<T> = std::result::Result<T, LabelingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_spec_messages() {
        let err = InvalidSpecError::VertexOutOfRange {
            face: 2,
            vertex: 25,
            vertex_count: 24,
        };
        assert_eq!(err.to_string(), "face 2 references vertex 25, outside 1..=24");

        let wrapped: LabelingError = err.into();
        assert!(matches!(wrapped, LabelingError::InvalidSpec(_)));
        assert!(wrapped.to_string().starts_with("invalid graph specification"));
    }

    #[test]
    fn test_partial_enumeration_message() {
        let err = LabelingError::PartialEnumeration { found: 7 };
        assert!(err.to_string().contains("after 7 solution(s)"));
    }
}
