use std::path::Path;

use anyhow::Context as _;
use tokio::process::Command;

use crate::config::ToolchainConfig;

/// Extension of the single supported source dialect.
pub const SOURCE_EXT: &str = "cpp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileStatus {
    Built,
    /// Nonzero toolchain exit. Terminal for the whole evaluation; not retried.
    Failed { exit_code: Option<i32> },
}

/// Invokes the external toolchain to build one source file into a native
/// executable. The flag set is fixed by configuration; the `-o <dest>` pair
/// is part of the invocation contract.
#[derive(Debug, Clone)]
pub struct Compiler {
    toolchain: ToolchainConfig,
}

impl Compiler {
    pub fn new(toolchain: ToolchainConfig) -> Self {
        Self { toolchain }
    }

    pub async fn compile(&self, source: &Path, executable: &Path) -> anyhow::Result<CompileStatus> {
        let status = Command::new(&self.toolchain.command)
            .args(&self.toolchain.flags)
            .arg("-o")
            .arg(executable)
            .arg(source)
            .status()
            .await
            .with_context(|| {
                format!(
                    "Failed to spawn toolchain '{}' for '{}'",
                    self.toolchain.command,
                    source.to_string_lossy(),
                )
            })?;

        if status.success() {
            Ok(CompileStatus::Built)
        } else {
            log::info!(
                "Toolchain rejected '{}': exit={:?}",
                source.to_string_lossy(),
                status.code(),
            );
            Ok(CompileStatus::Failed {
                exit_code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn toolchain(command: &str, flags: &[&str]) -> ToolchainConfig {
        ToolchainConfig {
            command: command.to_owned(),
            flags: flags.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn zero_exit_is_built() {
        let c = Compiler::new(toolchain("sh", &["-c", "exit 0"]));
        let status = c.compile(Path::new("a.cpp"), Path::new("a.exe")).await.unwrap();
        assert_eq!(status, CompileStatus::Built);
    }

    #[tokio::test]
    async fn nonzero_exit_is_failed_with_code() {
        let c = Compiler::new(toolchain("sh", &["-c", "exit 7"]));
        let status = c.compile(Path::new("a.cpp"), Path::new("a.exe")).await.unwrap();
        assert_eq!(status, CompileStatus::Failed { exit_code: Some(7) });
    }

    #[tokio::test]
    async fn unspawnable_toolchain_is_an_error() {
        let c = Compiler::new(toolchain("/nonexistent/toolchain", &[]));
        assert!(c.compile(Path::new("a.cpp"), Path::new("a.exe")).await.is_err());
    }
}
