//! Re-checks a persisted solution table against a model

use super::model::LabelingModel;
use super::recorder::csv_header;
use super::solution::TIMESTAMP_FORMAT;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::path::Path;

/// Validates CSV solution tables
pub struct SolutionValidator<'m> {
    model: &'m LabelingModel,
}

/// Result of validating one table
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub rows_checked: usize,
    pub issues: Vec<TableIssue>,
}

/// A problem found on one line of the table (1-based line numbers)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIssue {
    pub line: usize,
    pub description: String,
}

impl<'m> SolutionValidator<'m> {
    pub fn new(model: &'m LabelingModel) -> Self {
        Self { model }
    }

    /// Read and validate the table at `path`
    pub fn validate_file<P: AsRef<Path>>(&self, path: P) -> Result<ValidationResult> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read solutions file: {}", path.display()))?;
        Ok(self.validate_table(&content))
    }

    /// Check the header, consecutive numbering from 1, timestamp format,
    /// every constraint of the model, and that no labeling repeats
    pub fn validate_table(&self, content: &str) -> ValidationResult {
        let mut issues = Vec::new();
        let mut lines = content.lines().enumerate().map(|(i, line)| (i + 1, line));

        let expected_header = csv_header(self.model.vertex_count());
        match lines.next() {
            Some((_, header)) if header.trim_end() == expected_header => {}
            Some((line, header)) => issues.push(TableIssue {
                line,
                description: format!("header '{}' does not match '{}'", header, expected_header),
            }),
            None => issues.push(TableIssue {
                line: 1,
                description: "file is empty".to_string(),
            }),
        }

        let mut first_seen: HashMap<Vec<u32>, usize> = HashMap::new();
        let mut rows_checked = 0;

        for (line, row) in lines {
            if row.trim().is_empty() {
                continue;
            }
            rows_checked += 1;
            let expected_index = rows_checked as u64;

            let mut issue = |description: String| issues.push(TableIssue { line, description });
            let fields: Vec<&str> = row.split(',').map(str::trim).collect();
            if fields.len() != self.model.vertex_count() + 2 {
                issue(format!(
                    "expected {} fields, found {}",
                    self.model.vertex_count() + 2,
                    fields.len()
                ));
                continue;
            }

            match fields[0].parse::<u64>() {
                Ok(index) if index == expected_index => {}
                Ok(index) => issue(format!("solution number {} should be {}", index, expected_index)),
                Err(_) => issue(format!("invalid solution number '{}'", fields[0])),
            }

            if NaiveDateTime::parse_from_str(fields[1], TIMESTAMP_FORMAT).is_err() {
                issue(format!("invalid timestamp '{}'", fields[1]));
            }

            let values: Result<Vec<u32>, _> = fields[2..].iter().map(|field| field.parse::<u32>()).collect();
            let Ok(values) = values else {
                issue("labels must be positive integers".to_string());
                continue;
            };

            if let Err(violation) = self.model.check(&values) {
                issue(violation.to_string());
            }
            if let Some(&earlier) = first_seen.get(&values) {
                issue(format!("repeats the labeling on line {}", earlier));
            } else {
                first_seen.insert(values, line);
            }
        }

        ValidationResult {
            is_valid: issues.is_empty(),
            rows_checked,
            issues,
        }
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Validation Result:")?;
        writeln!(f, "  Valid: {}", self.is_valid)?;
        writeln!(f, "  Rows checked: {}", self.rows_checked)?;
        if !self.issues.is_empty() {
            writeln!(f, "  Issues ({}):", self.issues.len())?;
            for issue in self.issues.iter().take(20) {
                writeln!(f, "    line {}: {}", issue.line, issue.description)?;
            }
            if self.issues.len() > 20 {
                writeln!(f, "    ... {} more", self.issues.len() - 20)?;
            }
        }
        Ok(())
    }
}
