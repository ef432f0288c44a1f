use std::path::{Path, PathBuf};

use anyhow::Context as _;
use async_trait::async_trait;

use super::{
    EvaluationRecord, ProblemRecord, RecordStore, SubmissionSource, TestcaseProvider,
    INPUT_BLOB_PREFIX, OUTPUT_BLOB_PREFIX,
};
use crate::judging::compiler::SOURCE_EXT;

/// Record store backed by one JSON file per record:
/// `<root>/evaluations/<id>.json` and `<root>/problems/<id>.json`.
#[derive(Debug, Clone)]
pub struct FsRecordStore {
    root: PathBuf,
}

impl FsRecordStore {
    const EVALUATION_DIR_NAME: &str = "evaluations";
    const PROBLEM_DIR_NAME: &str = "problems";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn evaluation_file(&self, id: &str) -> PathBuf {
        self.root
            .join(Self::EVALUATION_DIR_NAME)
            .join(format!("{}.json", id))
    }

    pub fn problem_file(&self, id: &str) -> PathBuf {
        self.root
            .join(Self::PROBLEM_DIR_NAME)
            .join(format!("{}.json", id))
    }

    pub fn put_problem(&self, record: &ProblemRecord) -> fsutil::Result<()> {
        fsutil::write_json_with_mkdir(self.problem_file(&record.id), record)
    }
}

fn read_record_opt<T>(filepath: &Path) -> anyhow::Result<Option<T>>
where
    T: serde::de::DeserializeOwned,
{
    match fsutil::read_json_with_deserialize(filepath) {
        Ok(rec) => Ok(Some(rec)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl RecordStore for FsRecordStore {
    async fn get_evaluation(&self, id: &str) -> anyhow::Result<Option<EvaluationRecord>> {
        read_record_opt(&self.evaluation_file(id))
    }

    async fn put_evaluation(&self, record: &EvaluationRecord) -> anyhow::Result<()> {
        fsutil::write_json_with_mkdir(self.evaluation_file(&record.id), record)?;
        Ok(())
    }

    async fn get_problem(&self, id: &str) -> anyhow::Result<Option<ProblemRecord>> {
        read_record_opt(&self.problem_file(id))
    }
}

/// Submission source reading `<dir>/<evaluation_id>.cpp`.
#[derive(Debug, Clone)]
pub struct FsSubmissionSource {
    dir: PathBuf,
}

impl FsSubmissionSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn source_file(&self, evaluation_id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", evaluation_id, SOURCE_EXT))
    }
}

#[async_trait]
impl SubmissionSource for FsSubmissionSource {
    async fn fetch_source(&self, evaluation_id: &str) -> anyhow::Result<Vec<u8>> {
        let filepath = self.source_file(evaluation_id);
        fsutil::read(&filepath)
            .with_context(|| format!("No submission source for evaluation '{}'", evaluation_id))
    }
}

/// Test-case provider reading blobs from `<root>/<problem_id>/`, with blob
/// names carrying the `input` / `output` prefixes.
#[derive(Debug, Clone)]
pub struct FsTestcaseProvider {
    root: PathBuf,
}

impl FsTestcaseProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn problem_dir(&self, problem_id: &str) -> PathBuf {
        self.root.join(problem_id)
    }

    fn list_names(&self, problem_id: &str, prefix: &str) -> anyhow::Result<Vec<String>> {
        fsutil::list_filenames_with_prefix(self.problem_dir(problem_id), prefix)
            .with_context(|| format!("Failed to list testcases of problem '{}'", problem_id))
    }
}

#[async_trait]
impl TestcaseProvider for FsTestcaseProvider {
    async fn list_input_names(&self, problem_id: &str) -> anyhow::Result<Vec<String>> {
        self.list_names(problem_id, INPUT_BLOB_PREFIX)
    }

    async fn list_output_names(&self, problem_id: &str) -> anyhow::Result<Vec<String>> {
        self.list_names(problem_id, OUTPUT_BLOB_PREFIX)
    }

    async fn fetch_blob(&self, problem_id: &str, name: &str) -> anyhow::Result<Vec<u8>> {
        let filepath = self.problem_dir(problem_id).join(name);
        fsutil::read(&filepath)
            .with_context(|| format!("No testcase blob '{}/{}'", problem_id, name))
    }
}
