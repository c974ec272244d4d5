// 🚨 Pipeline Errors - conditions that abort a run
//
// Everything else (bad lines, invalid records, catalog outages, failed
// exports) is absorbed by the stage that meets it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file not found: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("no data found in {}", .0.display())]
    InputEmpty(PathBuf),

    #[error("no valid data left after processing")]
    NoValidData,
}

/// A write that failed after the analysis already succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFailure {
    pub artifact: String,
    pub message: String,
}

impl OutputFailure {
    pub fn new(artifact: &str, error: &anyhow::Error) -> Self {
        OutputFailure {
            artifact: artifact.to_string(),
            message: format!("{:#}", error),
        }
    }
}
