//! One labeling run: specification, model, backend and recorders

use super::backend::{BackendStatistics, UnifiedBackend};
use super::enumerator::SolutionEnumerator;
use super::model::{LabelingModel, ModelStatistics};
use super::recorder::{ConsoleReporter, CsvRecorder, SolutionAccumulator, SolutionSink};
use super::solution::{timestamp_now, EnumerationSummary};
use crate::config::Settings;
use crate::graph::GraphSpec;
use anyhow::{Context, Result};
use log::info;

/// A configured labeling problem for one graph specification
pub struct LabelingProblem {
    settings: Settings,
    spec: GraphSpec,
    model: LabelingModel,
}

impl LabelingProblem {
    /// Resolve the configured graph and build its model
    pub fn new(settings: Settings) -> Result<Self> {
        let spec = settings.load_spec().context("Failed to load graph specification")?;
        Self::with_spec(settings, spec)
    }

    /// Create a problem for an explicit specification
    pub fn with_spec(settings: Settings, spec: GraphSpec) -> Result<Self> {
        let model = LabelingModel::from_spec(&spec)
            .with_context(|| format!("Invalid specification '{}'", spec.name))?;
        Ok(Self { settings, spec, model })
    }

    /// Enumerate every labeling, writing the CSV table and console lines.
    ///
    /// The CSV file is opened before solving starts, replacing any table from
    /// an earlier run; if the run fails no table is left behind.
    pub fn solve(&self) -> Result<EnumerationSummary> {
        let mut console = ConsoleReporter::stdout(self.spec.sum_suffix(), self.settings.output.echo_solutions);
        self.solve_with(&mut console)
    }

    /// Like [`solve`](Self::solve), reporting progress to `console`
    pub fn solve_with(&self, console: &mut dyn SolutionSink) -> Result<EnumerationSummary> {
        let output_path = self.settings.output_path(&self.spec);
        let started_at = timestamp_now();

        let mut csv = CsvRecorder::create(&output_path, self.spec.vertex_count)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        let mut enumerator = SolutionEnumerator::new(&self.model, &self.settings)
            .context("Failed to initialize solver backend")?;

        info!(
            "Enumerating {} ({}) with {:?}",
            self.spec.name,
            self.spec.sum_suffix(),
            enumerator.backend_kind()
        );

        let mut accumulator = SolutionAccumulator::new()
            .with_sink(&mut *console)
            .with_sink(&mut csv);
        accumulator.begin()?;
        let report = enumerator
            .enumerate_all(|values| accumulator.accept(values))
            .with_context(|| format!("Enumeration of {} failed", self.spec.name))?;
        accumulator.finish()?;
        console.written(csv.path())?;
        info!("{}", enumerator.statistics());

        let summary = EnumerationSummary {
            name: self.spec.name.clone(),
            sum_suffix: self.spec.sum_suffix(),
            pentagon_sum: self.spec.pentagon_sum,
            hexagon_sum: self.spec.hexagon_sum,
            vertex_count: self.spec.vertex_count,
            backend: enumerator.backend_kind(),
            outcome: report.outcome,
            total_solutions: report.total,
            duplicates_skipped: report.duplicates_skipped,
            started_at,
            elapsed_seconds: report.elapsed.as_secs_f64(),
            output_file: output_path,
        };

        if self.settings.output.write_summary {
            let summary_path = self
                .settings
                .output
                .output_directory
                .join(self.spec.summary_name());
            summary.save_to_file(&summary_path)?;
            info!("Summary written to {}", summary_path.display());
        }

        Ok(summary)
    }

    pub fn spec(&self) -> &GraphSpec {
        &self.spec
    }

    pub fn model(&self) -> &LabelingModel {
        &self.model
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn model_statistics(&self) -> ModelStatistics {
        self.model.statistics()
    }

    /// Build the configured backend without running it
    pub fn backend_statistics(&self) -> Result<BackendStatistics> {
        let backend = UnifiedBackend::from_settings(&self.model, &self.settings)
            .context("Failed to initialize solver backend")?;
        Ok(backend.statistics())
    }
}
