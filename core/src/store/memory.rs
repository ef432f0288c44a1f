use std::collections::HashMap;

use anyhow::bail;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    EvaluationRecord, ProblemRecord, RecordStore, SubmissionSource, TestcaseProvider,
    INPUT_BLOB_PREFIX, OUTPUT_BLOB_PREFIX,
};

/// In-memory record store, for tests and embedders.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    evaluations: Mutex<HashMap<String, EvaluationRecord>>,
    problems: Mutex<HashMap<String, ProblemRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_problem(&self, record: ProblemRecord) {
        self.problems.lock().await.insert(record.id.clone(), record);
    }

    pub async fn evaluation_count(&self) -> usize {
        self.evaluations.lock().await.len()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get_evaluation(&self, id: &str) -> anyhow::Result<Option<EvaluationRecord>> {
        Ok(self.evaluations.lock().await.get(id).cloned())
    }

    async fn put_evaluation(&self, record: &EvaluationRecord) -> anyhow::Result<()> {
        self.evaluations
            .lock()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get_problem(&self, id: &str) -> anyhow::Result<Option<ProblemRecord>> {
        Ok(self.problems.lock().await.get(id).cloned())
    }
}

/// In-memory submission source keyed by evaluation id.
#[derive(Debug, Default)]
pub struct MemorySubmissionSource {
    sources: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySubmissionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_source(&self, evaluation_id: impl Into<String>, source: impl Into<Vec<u8>>) {
        self.sources
            .lock()
            .await
            .insert(evaluation_id.into(), source.into());
    }
}

#[async_trait]
impl SubmissionSource for MemorySubmissionSource {
    async fn fetch_source(&self, evaluation_id: &str) -> anyhow::Result<Vec<u8>> {
        match self.sources.lock().await.get(evaluation_id) {
            Some(bytes) => Ok(bytes.clone()),
            None => bail!("No submission source for evaluation '{}'", evaluation_id),
        }
    }
}

/// In-memory test-case provider: problem id -> blob name -> bytes.
#[derive(Debug, Default)]
pub struct MemoryTestcaseProvider {
    blobs: Mutex<HashMap<String, HashMap<String, Vec<u8>>>>,
}

impl MemoryTestcaseProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_blob(
        &self,
        problem_id: impl Into<String>,
        name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) {
        self.blobs
            .lock()
            .await
            .entry(problem_id.into())
            .or_default()
            .insert(name.into(), bytes.into());
    }

    async fn list_names(&self, problem_id: &str, prefix: &str) -> Vec<String> {
        self.blobs
            .lock()
            .await
            .get(problem_id)
            .map(|blobs| {
                blobs
                    .keys()
                    .filter(|name| name.starts_with(prefix))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl TestcaseProvider for MemoryTestcaseProvider {
    async fn list_input_names(&self, problem_id: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.list_names(problem_id, INPUT_BLOB_PREFIX).await)
    }

    async fn list_output_names(&self, problem_id: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.list_names(problem_id, OUTPUT_BLOB_PREFIX).await)
    }

    async fn fetch_blob(&self, problem_id: &str, name: &str) -> anyhow::Result<Vec<u8>> {
        match self
            .blobs
            .lock()
            .await
            .get(problem_id)
            .and_then(|blobs| blobs.get(name))
        {
            Some(bytes) => Ok(bytes.clone()),
            None => bail!("No testcase blob '{}/{}'", problem_id, name),
        }
    }
}
