//! Graph specification records and their resolution into concrete faces

use crate::error::InvalidSpecError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Shape of a face, derived from its vertex count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceKind {
    Pentagon,
    Hexagon,
    Other,
}

impl FaceKind {
    pub fn from_size(size: usize) -> Self {
        match size {
            5 => FaceKind::Pentagon,
            6 => FaceKind::Hexagon,
            _ => FaceKind::Other,
        }
    }
}

/// A face with its resolved target sum. Vertex indices are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub vertices: Vec<usize>,
    pub target_sum: u64,
}

impl Face {
    pub fn new(vertices: Vec<usize>, target_sum: u64) -> Self {
        Self { vertices, target_sum }
    }

    pub fn kind(&self) -> FaceKind {
        FaceKind::from_size(self.vertices.len())
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// A face entry as written in a specification file.
///
/// A bare index list takes its target from the pentagon or hexagon sum of the
/// record; the explicit form carries its own target and may have any length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaceRecord {
    Cycle(Vec<usize>),
    Weighted { vertices: Vec<usize>, target_sum: u64 },
}

/// Loadable description of one isomer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRecord {
    pub name: String,
    pub vertex_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_label: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pentagon_sum: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hexagon_sum: Option<u64>,
    pub faces: Vec<FaceRecord>,
}

impl SpecRecord {
    /// Replace the pentagon and/or hexagon targets
    pub fn with_sums(mut self, pentagon_sum: Option<u64>, hexagon_sum: Option<u64>) -> Self {
        if pentagon_sum.is_some() {
            self.pentagon_sum = pentagon_sum;
        }
        if hexagon_sum.is_some() {
            self.hexagon_sum = hexagon_sum;
        }
        self
    }

    /// Attach a target sum to every face.
    ///
    /// Index ranges are not checked here; that happens when the model is built.
    pub fn resolve(&self) -> Result<GraphSpec, InvalidSpecError> {
        let mut faces = Vec::with_capacity(self.faces.len());

        for (position, record) in self.faces.iter().enumerate() {
            let face_number = position + 1;
            let face = match record {
                FaceRecord::Weighted { vertices, target_sum } => {
                    Face::new(vertices.clone(), *target_sum)
                }
                FaceRecord::Cycle(vertices) => {
                    let target = match FaceKind::from_size(vertices.len()) {
                        FaceKind::Pentagon => self.pentagon_sum,
                        FaceKind::Hexagon => self.hexagon_sum,
                        FaceKind::Other => None,
                    };
                    let target_sum = target.ok_or(InvalidSpecError::MissingTargetSum {
                        face: face_number,
                        size: vertices.len(),
                    })?;
                    Face::new(vertices.clone(), target_sum)
                }
            };
            faces.push(face);
        }

        let max_label = self
            .max_label
            .unwrap_or_else(|| u32::try_from(self.vertex_count).unwrap_or(u32::MAX));

        Ok(GraphSpec {
            name: self.name.clone(),
            vertex_count: self.vertex_count,
            max_label,
            pentagon_sum: self.pentagon_sum,
            hexagon_sum: self.hexagon_sum,
            faces,
        })
    }
}

/// A specification with every face target resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSpec {
    pub name: String,
    pub vertex_count: usize,
    pub max_label: u32,
    pub pentagon_sum: Option<u64>,
    pub hexagon_sum: Option<u64>,
    pub faces: Vec<Face>,
}

impl GraphSpec {
    /// Tag used in file names and console lines, e.g. `64_66`
    pub fn sum_suffix(&self) -> String {
        match (self.pentagon_sum, self.hexagon_sum) {
            (Some(pentagon), Some(hexagon)) => format!("{}_{}", pentagon, hexagon),
            _ => self.faces.iter().map(|face| face.target_sum).unique().join("_"),
        }
    }

    /// Default CSV file name for this specification
    pub fn default_output_name(&self) -> String {
        format!("{}_solutions_{}.csv", self.name, self.sum_suffix())
    }

    pub fn summary_name(&self) -> String {
        format!("{}_summary_{}.json", self.name, self.sum_suffix())
    }

    pub fn count_faces(&self, kind: FaceKind) -> usize {
        self.faces.iter().filter(|face| face.kind() == kind).count()
    }

    /// Convert back into a record, keeping bare lists where the type sum applies
    pub fn to_record(&self) -> SpecRecord {
        let faces = self
            .faces
            .iter()
            .map(|face| {
                let type_sum = match face.kind() {
                    FaceKind::Pentagon => self.pentagon_sum,
                    FaceKind::Hexagon => self.hexagon_sum,
                    FaceKind::Other => None,
                };
                if type_sum == Some(face.target_sum) {
                    FaceRecord::Cycle(face.vertices.clone())
                } else {
                    FaceRecord::Weighted {
                        vertices: face.vertices.clone(),
                        target_sum: face.target_sum,
                    }
                }
            })
            .collect();

        let default_label = u32::try_from(self.vertex_count).unwrap_or(u32::MAX);
        SpecRecord {
            name: self.name.clone(),
            vertex_count: self.vertex_count,
            max_label: (self.max_label != default_label).then_some(self.max_label),
            pentagon_sum: self.pentagon_sum,
            hexagon_sum: self.hexagon_sum,
            faces,
        }
    }

    pub fn statistics(&self) -> SpecStatistics {
        SpecStatistics {
            name: self.name.clone(),
            vertex_count: self.vertex_count,
            max_label: self.max_label,
            pentagons: self.count_faces(FaceKind::Pentagon),
            hexagons: self.count_faces(FaceKind::Hexagon),
            other_faces: self.count_faces(FaceKind::Other),
            pentagon_sum: self.pentagon_sum,
            hexagon_sum: self.hexagon_sum,
        }
    }
}

/// Summary of a specification for display
#[derive(Debug, Clone)]
pub struct SpecStatistics {
    pub name: String,
    pub vertex_count: usize,
    pub max_label: u32,
    pub pentagons: usize,
    pub hexagons: usize,
    pub other_faces: usize,
    pub pentagon_sum: Option<u64>,
    pub hexagon_sum: Option<u64>,
}

impl std::fmt::Display for SpecStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn show(sum: Option<u64>) -> String {
            sum.map_or_else(|| "-".to_string(), |s| s.to_string())
        }

        writeln!(f, "Specification {}:", self.name)?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Label domain: 1..={}", self.max_label)?;
        writeln!(f, "  Pentagons: {} (sum {})", self.pentagons, show(self.pentagon_sum))?;
        writeln!(f, "  Hexagons: {} (sum {})", self.hexagons, show(self.hexagon_sum))?;
        if self.other_faces > 0 {
            writeln!(f, "  Other faces: {}", self.other_faces)?;
        }
        Ok(())
    }
}
