//! Solution recorders: CSV file, console lines and in-memory collection

use super::solution::LabeledSolution;
use crate::error::{LabelingError, LabelingResult};
use crate::utils::{ColorOutput, SolutionFormatter};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Stdout, Write};
use std::path::{Path, PathBuf};

/// Destination for emitted solutions
pub trait SolutionSink {
    /// Called once before the first solution
    fn begin(&mut self) -> LabelingResult<()> {
        Ok(())
    }

    fn record(&mut self, solution: &LabeledSolution) -> LabelingResult<()>;

    /// Called once after the backend is exhausted
    fn finish(&mut self, _total: u64) -> LabelingResult<()> {
        Ok(())
    }

    /// Called once the solution table is in place at `path`
    fn written(&mut self, _path: &Path) -> LabelingResult<()> {
        Ok(())
    }
}

/// Numbers and timestamps solutions, then hands them to every sink.
///
/// Sinks are borrowed for the lifetime of one run; `finish` consumes the
/// accumulator so a run cannot be finished twice.
pub struct SolutionAccumulator<'s> {
    count: u64,
    sinks: Vec<&'s mut dyn SolutionSink>,
}

impl<'s> SolutionAccumulator<'s> {
    pub fn new() -> Self {
        Self {
            count: 0,
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: &'s mut dyn SolutionSink) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn begin(&mut self) -> LabelingResult<()> {
        for sink in self.sinks.iter_mut() {
            sink.begin()?;
        }
        Ok(())
    }

    /// Record the next solution; values are in vertex order
    pub fn accept(&mut self, values: &[u32]) -> LabelingResult<()> {
        self.count += 1;
        let solution = LabeledSolution::new(self.count, values.to_vec());
        for sink in self.sinks.iter_mut() {
            sink.record(&solution)?;
        }
        Ok(())
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Finish every sink and return the number of solutions recorded
    pub fn finish(mut self) -> LabelingResult<u64> {
        for sink in self.sinks.iter_mut() {
            sink.finish(self.count)?;
        }
        Ok(self.count)
    }
}

impl Default for SolutionAccumulator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Header row for `vertex_count` vertices
pub fn csv_header(vertex_count: usize) -> String {
    let mut columns = vec!["Solution #".to_string(), "Timestamp".to_string()];
    columns.extend((1..=vertex_count).map(|v| format!("v{}", v)));
    columns.join(",")
}

/// CSV table of solutions.
///
/// Rows go to `<target>.partial`, which is renamed onto the target when the
/// run finishes. Any existing target is removed on creation, and dropping an
/// unfinished recorder deletes the partial file, so a failed run leaves no
/// table behind.
pub struct CsvRecorder {
    target: PathBuf,
    partial: PathBuf,
    writer: Option<BufWriter<File>>,
    vertex_count: usize,
    rows: u64,
}

impl CsvRecorder {
    /// Create the partial file and write the header
    pub fn create<P: AsRef<Path>>(path: P, vertex_count: usize) -> LabelingResult<Self> {
        let target = path.as_ref().to_path_buf();
        let mut partial = target.clone().into_os_string();
        partial.push(".partial");
        let partial = PathBuf::from(partial);

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&partial)?);
        match std::fs::remove_file(&target) {
            Ok(()) => debug!("Removed previous table {}", target.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                drop(writer);
                std::fs::remove_file(&partial).ok();
                return Err(e.into());
            }
        }
        writeln!(writer, "{}", csv_header(vertex_count))?;
        debug!("Writing solutions to {}", partial.display());

        Ok(Self {
            target,
            partial,
            writer: Some(writer),
            vertex_count,
            rows: 0,
        })
    }

    /// Final location of the table
    pub fn path(&self) -> &Path {
        &self.target
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }
}

impl SolutionSink for CsvRecorder {
    fn record(&mut self, solution: &LabeledSolution) -> LabelingResult<()> {
        if solution.values.len() != self.vertex_count {
            return Err(LabelingError::Recorder(format!(
                "solution {} has {} values, table has {} columns",
                solution.index,
                solution.values.len(),
                self.vertex_count
            )));
        }
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LabelingError::Recorder("CSV recorder already finished".to_string()))?;

        write!(writer, "{},{}", solution.index, solution.timestamp)?;
        for value in &solution.values {
            write!(writer, ",{}", value)?;
        }
        writeln!(writer)?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self, _total: u64) -> LabelingResult<()> {
        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| LabelingError::Recorder("CSV recorder already finished".to_string()))?;
        writer.flush()?;
        drop(writer);

        if let Err(e) = std::fs::rename(&self.partial, &self.target) {
            std::fs::remove_file(&self.partial).ok();
            return Err(e.into());
        }
        debug!("Wrote {} rows to {}", self.rows, self.target.display());
        Ok(())
    }
}

impl Drop for CsvRecorder {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.take() {
            drop(writer);
            if let Err(e) = std::fs::remove_file(&self.partial) {
                warn!("Failed to remove {}: {}", self.partial.display(), e);
            }
        }
    }
}

/// Prints progress and, optionally, one line per solution
pub struct ConsoleReporter<W: Write = Stdout> {
    out: W,
    suffix: String,
    echo_solutions: bool,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout(suffix: impl Into<String>, echo_solutions: bool) -> Self {
        Self::new(std::io::stdout(), suffix, echo_solutions)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, suffix: impl Into<String>, echo_solutions: bool) -> Self {
        Self {
            out,
            suffix: suffix.into(),
            echo_solutions,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SolutionSink for ConsoleReporter<W> {
    fn begin(&mut self) -> LabelingResult<()> {
        let line = SolutionFormatter::format_working_line(&self.suffix);
        writeln!(self.out, "\n{}", ColorOutput::info(&line))?;
        Ok(())
    }

    fn record(&mut self, solution: &LabeledSolution) -> LabelingResult<()> {
        if self.echo_solutions {
            writeln!(
                self.out,
                "{}",
                SolutionFormatter::format_solution_line(&self.suffix, solution)
            )?;
        }
        Ok(())
    }

    fn finish(&mut self, total: u64) -> LabelingResult<()> {
        let line = SolutionFormatter::format_total_line(total);
        writeln!(self.out, "\n{}", ColorOutput::success(&line))?;
        self.out.flush()?;
        Ok(())
    }

    fn written(&mut self, path: &Path) -> LabelingResult<()> {
        let line = SolutionFormatter::format_written_line(path);
        writeln!(self.out, "{}", ColorOutput::success(&line))?;
        Ok(())
    }
}

/// Keeps every solution in memory
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    solutions: Vec<LabeledSolution>,
    total: Option<u64>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solutions(&self) -> &[LabeledSolution] {
        &self.solutions
    }

    /// Total reported at finish, `None` while the run is open
    pub fn total(&self) -> Option<u64> {
        self.total
    }
}

impl SolutionSink for MemoryRecorder {
    fn record(&mut self, solution: &LabeledSolution) -> LabelingResult<()> {
        self.solutions.push(solution.clone());
        Ok(())
    }

    fn finish(&mut self, total: u64) -> LabelingResult<()> {
        self.total = Some(total);
        Ok(())
    }
}
