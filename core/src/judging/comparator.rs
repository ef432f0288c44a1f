use std::path::Path;

use anyhow::Context as _;

use super::verdict::Verdict;

/// Byte-for-byte comparison of the produced output against the groundtruth.
/// No normalization of whitespace, trailing newlines, or encoding.
///
/// A missing produced-output file is a verdict (`OutputMissing`), not an
/// error. A missing groundtruth file is an internal error: the orchestrator
/// materialized it just before the run.
pub async fn compare(expected: &Path, actual: &Path) -> anyhow::Result<Verdict> {
    let produced = match tokio::fs::read(actual).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Verdict::OutputMissing);
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to read produced output '{}'", actual.to_string_lossy())
            });
        }
    };

    let groundtruth = tokio::fs::read(expected).await.with_context(|| {
        format!(
            "Failed to read expected output '{}'",
            expected.to_string_lossy(),
        )
    })?;

    if produced == groundtruth {
        Ok(Verdict::Correct)
    } else {
        Ok(Verdict::WrongAnswer)
    }
}
