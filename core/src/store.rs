pub mod fs;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Name prefixes of a problem's test-case blobs.
pub const INPUT_BLOB_PREFIX: &str = "input";
pub const OUTPUT_BLOB_PREFIX: &str = "output";

/// Lifecycle of an Evaluation as observed through the record store.
/// Persisted exactly twice per run: entering `Evaluating` and `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum EvaluationStatus {
    Pending,
    Evaluating,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: String,
    pub problem_id: String,
    pub status: EvaluationStatus,
    /// Free text: the stringified score, or the compile-failure sentinel.
    #[serde(default)]
    pub verdict: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub id: String,
    /// Base name of the well-known per-test files the submitted program
    /// reads and writes (`<file_prefix>.in` / `<file_prefix>.out`).
    pub file_prefix: String,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get_evaluation(&self, id: &str) -> anyhow::Result<Option<EvaluationRecord>>;

    /// Overwrites any existing record with the same id.
    async fn put_evaluation(&self, record: &EvaluationRecord) -> anyhow::Result<()>;

    async fn get_problem(&self, id: &str) -> anyhow::Result<Option<ProblemRecord>>;
}

/// Supplies the raw bytes of the single source file of a submission.
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    async fn fetch_source(&self, evaluation_id: &str) -> anyhow::Result<Vec<u8>>;
}

/// Lists and fetches a problem's test-case blobs. Listing returns bare blob
/// names in unspecified order; sorting and pairing are the consumer's job.
#[async_trait]
pub trait TestcaseProvider: Send + Sync {
    async fn list_input_names(&self, problem_id: &str) -> anyhow::Result<Vec<String>>;
    async fn list_output_names(&self, problem_id: &str) -> anyhow::Result<Vec<String>>;
    async fn fetch_blob(&self, problem_id: &str, name: &str) -> anyhow::Result<Vec<u8>>;
}
