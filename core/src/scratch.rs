use std::path::{Path, PathBuf};

use crate::judging::compiler::SOURCE_EXT;

/// Root of the judge's working storage. One subdirectory per evaluation, so
/// concurrent runs never touch each other's files.
#[derive(Debug, Clone)]
pub struct ScratchHome {
    root: PathBuf,
}

/// Run-scoped working area of a single evaluation: the fetched source file,
/// the compiled artifact, and one subdirectory per test case. Created at run
/// start; `cleanup()` is called on every exit path, including failure.
#[derive(Debug, Clone)]
pub struct RunArea {
    dir: PathBuf,
    evaluation_id: String,
}

/// Paths of the well-known files of one test case. The submitted program
/// runs with `dir` as its working directory, reads `<prefix>.in` and writes
/// `<prefix>.out` there; the groundtruth is materialized as `<prefix>.ok`.
#[derive(Debug, Clone)]
pub struct TestSlot {
    pub dir: PathBuf,
    pub input: PathBuf,
    pub expected: PathBuf,
    pub actual: PathBuf,
}

impl ScratchHome {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn run_dir(&self, evaluation_id: &str) -> PathBuf {
        self.root.join(evaluation_id)
    }

    #[must_use]
    pub fn create_run_area(&self, evaluation_id: &str) -> fsutil::Result<RunArea> {
        let dir = self.run_dir(evaluation_id);
        fsutil::mkdir_all(&dir)?;
        Ok(RunArea {
            dir,
            evaluation_id: evaluation_id.to_owned(),
        })
    }
}

impl RunArea {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn evaluation_id(&self) -> &str {
        &self.evaluation_id
    }

    pub fn source_file(&self) -> PathBuf {
        self.dir
            .join(format!("{}.{}", self.evaluation_id, SOURCE_EXT))
    }

    pub fn executable_file(&self) -> PathBuf {
        self.dir.join(format!("{}.exe", self.evaluation_id))
    }

    /// Each test case gets its own subdirectory, so the three well-known file
    /// names never alias across iterations within a run.
    pub fn test_slot(&self, ord: usize, file_prefix: &str) -> TestSlot {
        let dir = self.dir.join(format!("case{}", ord));
        TestSlot {
            input: dir.join(format!("{}.in", file_prefix)),
            expected: dir.join(format!("{}.ok", file_prefix)),
            actual: dir.join(format!("{}.out", file_prefix)),
            dir,
        }
    }

    #[must_use]
    pub fn cleanup(self) -> fsutil::Result<()> {
        fsutil::remove_dir_all(&self.dir)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tmproot(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gavel-scratch-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn area_paths_are_scoped_by_evaluation_id() {
        let root = tmproot("paths");
        let home = ScratchHome::new(&root);
        let area = home.create_run_area("17").unwrap();

        assert_eq!(area.dir(), root.join("17"));
        assert_eq!(area.source_file(), root.join("17/17.cpp"));
        assert_eq!(area.executable_file(), root.join("17/17.exe"));

        let slot = area.test_slot(2, "sum");
        assert_eq!(slot.dir, root.join("17/case2"));
        assert_eq!(slot.input, root.join("17/case2/sum.in"));
        assert_eq!(slot.expected, root.join("17/case2/sum.ok"));
        assert_eq!(slot.actual, root.join("17/case2/sum.out"));

        area.cleanup().unwrap();
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn cleanup_removes_the_whole_area() {
        let root = tmproot("cleanup");
        let home = ScratchHome::new(&root);
        let area = home.create_run_area("9").unwrap();

        let slot = area.test_slot(1, "t");
        fsutil::write_with_mkdir(&slot.input, "data").unwrap();
        assert!(slot.input.exists());

        area.cleanup().unwrap();
        assert!(!root.join("9").exists());
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn create_run_area_is_reentrant() {
        let root = tmproot("reentrant");
        let home = ScratchHome::new(&root);
        home.create_run_area("5").unwrap();
        home.create_run_area("5").unwrap();
        std::fs::remove_dir_all(&root).unwrap();
    }
}
