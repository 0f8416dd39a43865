//! Batch summary written next to the outputs.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pipeline::{ImageError, ImageOutcome, Stage};

/// One successfully converted card.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedImage {
    pub index: u32,
    pub origin: String,
    pub bin_path: PathBuf,
    pub c_path: PathBuf,
    pub dark_pixels: usize,
}

/// One card that could not be converted.
#[derive(Debug, Clone, Serialize)]
pub struct ImageFailure {
    pub index: u32,
    pub stage: Stage,
    pub message: String,
}

/// Outcome of a whole batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub processed: Vec<ProcessedImage>,
    pub failures: Vec<ImageFailure>,
}

impl BatchReport {
    /// Build a report from per-index results, ordered by index.
    pub fn from_results(
        started_at: DateTime<Utc>,
        mut results: Vec<(u32, Result<ImageOutcome, ImageError>)>,
    ) -> Self {
        results.sort_by_key(|(index, _)| *index);

        let mut processed = Vec::new();
        let mut failures = Vec::new();
        for (index, result) in results {
            match result {
                Ok(outcome) => processed.push(ProcessedImage {
                    index,
                    origin: outcome.origin,
                    bin_path: outcome.bin_path,
                    c_path: outcome.c_path,
                    dark_pixels: outcome.dark_pixels,
                }),
                Err(e) => failures.push(ImageFailure {
                    index,
                    stage: e.stage(),
                    message: e.to_string(),
                }),
            }
        }

        Self {
            started_at,
            finished_at: Utc::now(),
            processed,
            failures,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.processed.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Indices that were attempted and produced no output.
    pub fn failed_indices(&self) -> Vec<u32> {
        self.failures.iter().map(|f| f.index).collect()
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), anyhow::Error> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_fetch::FetchError;

    fn outcome(index: u32) -> ImageOutcome {
        ImageOutcome {
            index,
            origin: format!("https://example.com/ar{index:02}.jpg"),
            bin_path: PathBuf::from(format!("out/ar{index:02}.bin")),
            c_path: PathBuf::from(format!("out/ar{index:02}.c")),
            dark_pixels: 10,
        }
    }

    fn missing(index: u32) -> ImageError {
        ImageError::Retrieve(FetchError::Status {
            url: format!("https://example.com/ar{index:02}.jpg"),
            status: 404,
        })
    }

    #[test]
    fn test_report_sorts_and_splits_results() {
        let report = BatchReport::from_results(
            Utc::now(),
            vec![(2, Ok(outcome(2))), (1, Err(missing(1))), (0, Ok(outcome(0)))],
        );

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.processed[0].index, 0);
        assert_eq!(report.processed[1].index, 2);
        assert_eq!(report.failed_indices(), vec![1]);
        assert_eq!(report.failures[0].stage, Stage::Retrieve);
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn test_report_json_shape() {
        let report = BatchReport::from_results(Utc::now(), vec![(1, Err(missing(1)))]);
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("report.json");
        report.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["failures"][0]["index"], 1);
        assert_eq!(value["failures"][0]["stage"], "retrieve");
        assert!(value["processed"].as_array().unwrap().is_empty());
        assert!(value["started_at"].is_string());
    }
}
