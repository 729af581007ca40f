//! Configuration management for the labeling enumerator

pub mod settings;

pub use settings::{
    AmoEncoding, CliOverrides, EncodingConfig, InstanceConfig, OutputConfig, Settings,
    SolverBackend, SolverConfig,
};
