//! Human- and machine-readable summary of a run.

use std::fmt;

use serde::Serialize;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::dedup::DedupOutcome;
use crate::loader::LoadReport;
use crate::pipeline::PipelineSummary;

/// Load and dedup figures for one input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSummary {
    /// Role of the input (`evidence_dbpepvar`, `missense`, ...)
    pub role: String,
    /// Loader diagnostics
    pub load: LoadReport,
    /// Duplicate rows found and removed
    pub dedup: DedupOutcome,
    /// Rows remaining after dedup
    pub rows: usize,
}

/// Complete report for one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// RFC 3339 timestamp of report creation
    pub generated_at: String,
    /// One entry per loaded input
    pub inputs: Vec<InputSummary>,
    /// Pipeline figures, absent if the run stopped before joining
    pub pipeline: Option<PipelineSummary>,
    /// Where the result was written
    pub output: Option<String>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReport {
    /// Create an empty report stamped with the current time
    pub fn new() -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            inputs: Vec::new(),
            pipeline: None,
            output: None,
        }
    }

    /// Record an input summary
    pub fn add_input(&mut self, input: InputSummary) {
        self.inputs.push(input);
    }

    /// Whether any input needed the lenient parse pass
    pub fn has_skipped_rows(&self) -> bool {
        self.inputs.iter().any(|i| i.load.skipped_rows > 0)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!("{}\n", style("pepvar Run Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("=================").cyan()));

            for input in &self.inputs {
                output.push_str(&format!(
                    "{} {}: {} rows, {} columns",
                    style("*").cyan(),
                    style(&input.role).bold(),
                    input.rows,
                    input.load.columns.len()
                ));
                if input.dedup.removed > 0 {
                    output.push_str(&format!(
                        ", {}",
                        style(format!("{} duplicates removed", input.dedup.removed)).yellow()
                    ));
                }
                if input.load.skipped_rows > 0 {
                    output.push_str(&format!(
                        ", {}",
                        style(format!("{} malformed rows skipped", input.load.skipped_rows))
                            .yellow()
                            .bold()
                    ));
                }
                output.push('\n');
            }

            if let Some(pipeline) = &self.pipeline {
                output.push('\n');
                output.push_str(&format!(
                    "{}: {} translated",
                    style("Accessions").bold(),
                    pipeline.translation.translated
                ));
                if !pipeline.translation.unresolved.is_empty() {
                    output.push_str(&format!(
                        ", {}",
                        style(format!("{} unresolved", pipeline.translation.unresolved.len())).red()
                    ));
                }
                output.push('\n');
                output.push_str(&format!(
                    "{}: {}\n",
                    style("Scan pairs").bold(),
                    pipeline.scan_pairs
                ));
                output.push_str(&format!(
                    "{}: {}\n",
                    style("Evidence join").bold(),
                    pipeline.evidence_rows
                ));
                let rows = if pipeline.output_rows > 0 {
                    style(pipeline.output_rows).green().bold()
                } else {
                    style(pipeline.output_rows).red().bold()
                };
                output.push_str(&format!("{}: {}\n", style("Output rows").bold(), rows));
            }

            if let Some(path) = &self.output {
                output.push_str(&format!("{}: {}\n", style("Written to").bold(), path));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pepvar Run Report")?;
        writeln!(f, "=================")?;

        for input in &self.inputs {
            write!(
                f,
                "* {}: {} rows, {} columns",
                input.role,
                input.rows,
                input.load.columns.len()
            )?;
            if input.dedup.removed > 0 {
                write!(f, ", {} duplicates removed", input.dedup.removed)?;
            }
            if input.load.skipped_rows > 0 {
                write!(f, ", {} malformed rows skipped", input.load.skipped_rows)?;
            }
            writeln!(f)?;
        }

        if let Some(pipeline) = &self.pipeline {
            writeln!(f)?;
            write!(f, "Accessions: {} translated", pipeline.translation.translated)?;
            if !pipeline.translation.unresolved.is_empty() {
                write!(f, ", {} unresolved", pipeline.translation.unresolved.len())?;
            }
            writeln!(f)?;
            writeln!(f, "Scan pairs: {}", pipeline.scan_pairs)?;
            writeln!(f, "Evidence join: {}", pipeline.evidence_rows)?;
            writeln!(f, "Output rows: {}", pipeline.output_rows)?;
        }

        if let Some(path) = &self.output {
            writeln!(f, "Written to: {}", path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(role: &str, skipped: usize, removed: usize) -> InputSummary {
        InputSummary {
            role: role.to_string(),
            load: LoadReport {
                source: format!("{}.csv", role),
                rows: 10,
                columns: vec!["a".to_string(), "b".to_string()],
                skipped_rows: skipped,
                lenient: skipped > 0,
            },
            dedup: DedupOutcome {
                duplicates: removed,
                removed,
            },
            rows: 10 - removed,
        }
    }

    #[test]
    fn test_display_lists_inputs_and_figures() {
        let mut report = RunReport::new();
        report.add_input(input("missense", 0, 2));
        report.pipeline = Some(PipelineSummary {
            scan_pairs: 4,
            evidence_rows: 3,
            output_rows: 1,
            ..Default::default()
        });
        report.output = Some("output.csv".to_string());

        let text = report.to_string();
        assert!(text.contains("* missense: 8 rows, 2 columns, 2 duplicates removed"));
        assert!(text.contains("Scan pairs: 4"));
        assert!(text.contains("Output rows: 1"));
        assert!(text.contains("Written to: output.csv"));
        assert!(!report.has_skipped_rows());
    }

    #[test]
    fn test_skipped_rows_flagged() {
        let mut report = RunReport::new();
        report.add_input(input("evidence_refseq", 3, 0));
        assert!(report.has_skipped_rows());
        assert!(report.to_string().contains("3 malformed rows skipped"));
    }

    #[test]
    fn test_json_round_trips_through_serde_json() {
        let mut report = RunReport::new();
        report.add_input(input("tabela_np_gi", 0, 0));

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["inputs"][0]["role"], "tabela_np_gi");
        assert_eq!(value["inputs"][0]["load"]["rows"], 10);
        assert!(value["pipeline"].is_null());
        assert!(chrono::DateTime::parse_from_rfc3339(value["generated_at"].as_str().unwrap()).is_ok());
    }
}
