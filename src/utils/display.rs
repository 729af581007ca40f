//! Display and output formatting utilities

use crate::labeling::{EnumerationOutcome, EnumerationSummary, LabeledSolution};
use std::path::Path;

/// Format solutions and run summaries for the console
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// `[64_66_2024-05-01 12:00:00] ✅ Solution 3: (1, 2, ...)`
    pub fn format_solution_line(suffix: &str, solution: &LabeledSolution) -> String {
        format!(
            "[{}_{}] ✅ Solution {}: {}",
            suffix,
            solution.timestamp,
            solution.index,
            solution.tuple_string()
        )
    }

    pub fn format_working_line(suffix: &str) -> String {
        format!("🔄 [{}] Solver is working... Please wait for solutions.", suffix)
    }

    pub fn format_total_line(total: u64) -> String {
        format!("✅ Total Solutions Found: {}", total)
    }

    pub fn format_written_line(path: &Path) -> String {
        format!("✅ Solutions have been written to '{}'", path.display())
    }

    /// Multi-line summary of a finished run
    pub fn format_summary(summary: &EnumerationSummary) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== {} ({}) ===\n", summary.name, summary.sum_suffix));
        output.push_str(&format!("Backend: {:?}\n", summary.backend));
        let outcome = match summary.outcome {
            EnumerationOutcome::Exhausted => "exhausted",
            EnumerationOutcome::Infeasible => "infeasible",
        };
        output.push_str(&format!("Outcome: {}\n", outcome));
        output.push_str(&format!("Solutions: {}\n", summary.total_solutions));
        if summary.duplicates_skipped > 0 {
            output.push_str(&format!("Duplicates skipped: {}\n", summary.duplicates_skipped));
        }
        output.push_str(&format!("Elapsed: {:.3}s\n", summary.elapsed_seconds));
        output.push_str(&format!("Output: {}\n", summary.output_file.display()));

        output
    }

    /// One row per run, for batch results
    pub fn format_batch_table(summaries: &[EnumerationSummary]) -> String {
        let mut output = String::new();

        output.push_str("Batch Summary:\n");
        output.push_str("Name     | Sums     | Solutions | Time(s)\n");
        output.push_str("---------|----------|-----------|--------\n");

        for summary in summaries {
            output.push_str(&format!(
                "{:8} | {:8} | {:9} | {:7.3}\n",
                summary.name, summary.sum_suffix, summary.total_solutions, summary.elapsed_seconds
            ));
        }

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverBackend;
    use std::path::PathBuf;

    #[test]
    fn test_solution_line() {
        let solution = LabeledSolution {
            index: 7,
            timestamp: "2024-05-01 12:00:00".to_string(),
            values: vec![2, 1, 3],
        };
        assert_eq!(
            SolutionFormatter::format_solution_line("64_66", &solution),
            "[64_66_2024-05-01 12:00:00] ✅ Solution 7: (2, 1, 3)"
        );
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(
            SolutionFormatter::format_working_line("66_87"),
            "🔄 [66_87] Solver is working... Please wait for solutions."
        );
        assert_eq!(SolutionFormatter::format_total_line(0), "✅ Total Solutions Found: 0");
        assert_eq!(
            SolutionFormatter::format_written_line(Path::new("C24_solutions_64_66.csv")),
            "✅ Solutions have been written to 'C24_solutions_64_66.csv'"
        );
    }

    #[test]
    fn test_summary_formatting() {
        let summary = EnumerationSummary {
            name: "square".to_string(),
            sum_suffix: "10".to_string(),
            pentagon_sum: None,
            hexagon_sum: None,
            vertex_count: 4,
            backend: SolverBackend::Cadical,
            outcome: EnumerationOutcome::Exhausted,
            total_solutions: 24,
            duplicates_skipped: 0,
            started_at: "2024-05-01 12:00:00".to_string(),
            elapsed_seconds: 0.01,
            output_file: PathBuf::from("square_solutions_10.csv"),
        };

        let text = SolutionFormatter::format_summary(&summary);
        assert!(text.contains("Solutions: 24"));
        assert!(text.contains("Outcome: exhausted"));
        assert!(!text.contains("Duplicates"));

        let table = SolutionFormatter::format_batch_table(&[summary]);
        assert!(table.contains("square"));
        assert!(table.lines().count() == 4);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
