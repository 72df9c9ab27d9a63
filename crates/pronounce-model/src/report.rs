use crate::error::{FailureKind, PronounceError};
use serde::{Deserialize, Serialize};

/// Result of processing one source URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRecord {
    pub url: String,
    pub outcome: Outcome,
    pub finished_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Saved { filename: String },
    Failed { kind: FailureKind, message: String },
}

impl FetchRecord {
    pub fn saved(url: &str, filename: String) -> Self {
        Self {
            url: url.to_string(),
            outcome: Outcome::Saved { filename },
            finished_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn failed(url: &str, error: &PronounceError) -> Self {
        Self {
            url: url.to_string(),
            outcome: Outcome::Failed {
                kind: error.kind(),
                message: error.to_string(),
            },
            finished_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn filename(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Saved { filename } => Some(filename.as_str()),
            Outcome::Failed { .. } => None,
        }
    }
}

/// All records of one run, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: String,
    pub records: Vec<FetchRecord>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self {
            started_at: chrono::Utc::now().to_rfc3339(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: FetchRecord) {
        self.records.push(record);
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn successful(&self) -> usize {
        self.records.iter().filter(|r| r.filename().is_some()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.successful()
    }

    /// Filenames of successful records, in input order.
    pub fn saved_files(&self) -> Vec<&str> {
        self.records.iter().filter_map(|r| r.filename()).collect()
    }

    /// Human-readable end-of-run summary.
    pub fn summary(&self) -> String {
        let rule = "=".repeat(60);
        let mut out = format!(
            "{rule}\nSUMMARY\n{rule}\nTotal: {}\nSuccessful: {}\nFailed: {}\n",
            self.total(),
            self.successful(),
            self.failed(),
        );
        let files = self.saved_files();
        if !files.is_empty() {
            out.push_str("\nDownloaded files:\n");
            for name in files {
                out.push_str(&format!("  - {name}\n"));
            }
        }
        out
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}
