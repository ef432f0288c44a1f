use std::{
    path::Path,
    process::{ExitStatus, Stdio},
    time::Duration,
};

use anyhow::Context as _;
use tokio::{
    process::Command,
    time::{timeout, Instant},
};

/// Result of one supervised run of the submitted executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// Exited on its own before the deadline. The exit status is informative
    /// only; it does not decide the verdict.
    Completed {
        exit_status: ExitStatus,
        elapsed: Duration,
    },
    /// Still running at the deadline; forcibly terminated.
    TimedOut,
}

/// Runs the compiled executable with a wall-clock deadline. No memory, CPU,
/// or syscall confinement is applied.
#[derive(Debug, Clone)]
pub struct Supervisor {
    time_limit: Duration,
}

impl Supervisor {
    pub fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Launches `executable` with no arguments and no stdin, with `workdir`
    /// as its working directory, and waits until it exits or the deadline
    /// passes, whichever comes first. A child still running at the deadline
    /// is killed. No child outlives this call on any return path.
    pub async fn run(&self, executable: &Path, workdir: &Path) -> anyhow::Result<Execution> {
        let mut child = Command::new(executable)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn '{}'", executable.to_string_lossy()))?;

        let started = Instant::now();
        match timeout(self.time_limit, child.wait()).await {
            Ok(Ok(exit_status)) => Ok(Execution::Completed {
                exit_status,
                elapsed: started.elapsed(),
            }),
            Ok(Err(e)) => {
                child
                    .kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill submission process: {:#}", e));
                Err(e).context("Failed to wait for submission process")
            }
            Err(_) => {
                child
                    .kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill TLE process: {:#}", e));
                Ok(Execution::TimedOut)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    fn workdir(tag: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("gavel-supervisor-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[cfg(unix)]
    fn executable_script(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("prog.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perm = std::fs::metadata(&path).unwrap().permissions();
        perm.set_mode(0o755);
        std::fs::set_permissions(&path, perm).unwrap();
        path
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn returns_as_soon_as_the_process_exits() {
        let dir = workdir("fast");
        let exe = executable_script(&dir, "exit 0");

        let sup = Supervisor::new(Duration::from_secs(10));
        let started = Instant::now();
        let res = sup.run(&exe, &dir).await.unwrap();

        match res {
            Execution::Completed { exit_status, .. } => assert!(exit_status.success()),
            Execution::TimedOut => panic!("should not time out"),
        }
        assert!(started.elapsed() < Duration::from_secs(5));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn nonzero_exit_is_still_completed() {
        let dir = workdir("exitcode");
        let exe = executable_script(&dir, "exit 3");

        let sup = Supervisor::new(Duration::from_secs(10));
        let res = sup.run(&exe, &dir).await.unwrap();

        match res {
            Execution::Completed { exit_status, .. } => assert_eq!(exit_status.code(), Some(3)),
            Execution::TimedOut => panic!("should not time out"),
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn kills_the_process_at_the_deadline() {
        let dir = workdir("tle");
        let exe = executable_script(&dir, "sleep 30");

        let sup = Supervisor::new(Duration::from_millis(200));
        let started = Instant::now();
        let res = sup.run(&exe, &dir).await.unwrap();

        assert_eq!(res, Execution::TimedOut);
        // Deadline plus scheduling overhead, nowhere near the sleep duration.
        assert!(started.elapsed() < Duration::from_secs(5));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn child_runs_inside_the_given_workdir() {
        let dir = workdir("cwd");
        let exe = executable_script(&dir, "printf hello > res.out");

        let sup = Supervisor::new(Duration::from_secs(10));
        sup.run(&exe, &dir).await.unwrap();

        assert_eq!(std::fs::read(dir.join("res.out")).unwrap(), b"hello");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
