//! Configuration settings for the labeling enumerator

use crate::graph::{builtin_record, load_spec_from_file, GraphSpec};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub instance: InstanceConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
    pub encoding: EncodingConfig,
}

/// Which graph to label, and optional target overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceConfig {
    pub isomer: Option<String>,
    pub spec_file: Option<PathBuf>,
    pub pentagon_sum: Option<u64>,
    pub hexagon_sum: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    pub deduplicate: bool,
    pub verify_solutions: bool,
    /// CaDiCaL preset (`default`, `plain`, `sat`, `unsat`)
    pub cadical_config: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    Cadical,
    Search,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_directory: PathBuf,
    pub file_name: Option<String>,
    pub echo_solutions: bool,
    pub write_summary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    pub at_most_one: AmoEncoding,
}

/// CNF encoding for at-most-one constraints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AmoEncoding {
    Pairwise,
    Sequential,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instance: InstanceConfig {
                isomer: Some("C24".to_string()),
                spec_file: None,
                pentagon_sum: None,
                hexagon_sum: None,
            },
            solver: SolverConfig {
                backend: SolverBackend::Cadical,
                deduplicate: false,
                verify_solutions: true,
                cadical_config: None,
            },
            output: OutputConfig {
                output_directory: PathBuf::from("."),
                file_name: None,
                echo_solutions: true,
                write_summary: false,
            },
            encoding: EncodingConfig {
                at_most_one: AmoEncoding::Sequential,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        match (&self.instance.isomer, &self.instance.spec_file) {
            (Some(_), Some(_)) => {
                anyhow::bail!("Specify either an isomer or a spec file, not both");
            }
            (None, None) => {
                anyhow::bail!("No graph selected: set instance.isomer or instance.spec_file");
            }
            (None, Some(spec_file)) if !spec_file.exists() => {
                anyhow::bail!("Spec file does not exist: {}", spec_file.display());
            }
            _ => {}
        }

        if let Some(name) = &self.output.file_name {
            if name.trim().is_empty() {
                anyhow::bail!("Output file name must not be empty");
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref isomer) = cli_overrides.isomer {
            self.instance.isomer = Some(isomer.clone());
            self.instance.spec_file = None;
        }
        if let Some(ref spec_file) = cli_overrides.spec_file {
            self.instance.spec_file = Some(spec_file.clone());
            self.instance.isomer = None;
        }
        if let Some(pentagon_sum) = cli_overrides.pentagon_sum {
            self.instance.pentagon_sum = Some(pentagon_sum);
        }
        if let Some(hexagon_sum) = cli_overrides.hexagon_sum {
            self.instance.hexagon_sum = Some(hexagon_sum);
        }
        if let Some(backend) = cli_overrides.backend {
            self.solver.backend = backend;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if cli_overrides.quiet {
            self.output.echo_solutions = false;
        }
    }

    /// Resolve the configured instance into a graph specification
    pub fn load_spec(&self) -> Result<GraphSpec> {
        let record = match (&self.instance.isomer, &self.instance.spec_file) {
            (_, Some(spec_file)) => load_spec_from_file(spec_file)?,
            (Some(isomer), None) => builtin_record(isomer)?,
            (None, None) => anyhow::bail!("No graph selected"),
        };

        let spec = record
            .with_sums(self.instance.pentagon_sum, self.instance.hexagon_sum)
            .resolve()
            .context("Failed to resolve face targets")?;
        Ok(spec)
    }

    /// Path of the CSV file for `spec`
    pub fn output_path(&self, spec: &GraphSpec) -> PathBuf {
        let name = self
            .output
            .file_name
            .clone()
            .unwrap_or_else(|| spec.default_output_name());
        self.output.output_directory.join(name)
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub isomer: Option<String>,
    pub spec_file: Option<PathBuf>,
    pub pentagon_sum: Option<u64>,
    pub hexagon_sum: Option<u64>,
    pub backend: Option<SolverBackend>,
    pub output_dir: Option<PathBuf>,
    pub quiet: bool,
}
