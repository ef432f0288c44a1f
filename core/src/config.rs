use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use rust_embed::RustEmbed;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub storage: StorageConfig,
    pub toolchain: ToolchainConfig,
    pub judge: JudgeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    pub record_dir: PathBuf,
    pub submission_dir: PathBuf,
    pub testcase_dir: PathBuf,
    pub scratch_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolchainConfig {
    pub command: String,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JudgeConfig {
    /// Per-test wall-clock limit. Applied independently to each test case.
    pub time_limit_ms: u64,
}

impl JudgeConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

fn strip_prefix_dot(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

impl Config {
    pub const FILENAME: &str = "gavel.toml";

    pub fn example_toml() -> String {
        let file = Asset::get(Self::FILENAME).unwrap();
        std::str::from_utf8(file.data.as_ref()).unwrap().to_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        if let Some(dir) = filepath.parent() {
            cfg.storage.resolve_against(dir);
        }
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file in ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let cur_dir = cur_dir.as_ref();
        cur_dir
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
            .with_context(|| {
                format!("Not in a judge root dir: Cannot find '{}'", Self::FILENAME)
            })
    }

    pub fn from_file_finding_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_filepath = Config::find_file_in_ancestors(cur_dir)?;
        Self::from_toml_file(config_filepath)
    }
}

impl StorageConfig {
    /// Resolves relative dirs against the config file's directory, so that
    /// commands behave the same from anywhere inside the judge root.
    fn resolve_against(&mut self, root: &Path) {
        let with_root = |path: &mut PathBuf| {
            if !path.is_absolute() {
                *path = root.join(strip_prefix_dot(path));
            }
        };
        with_root(&mut self.record_dir);
        with_root(&mut self.submission_dir);
        with_root(&mut self.testcase_dir);
        with_root(&mut self.scratch_dir);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn example_toml_should_be_parsable() {
        let toml = Config::example_toml();
        let cfg = dbg!(Config::from_toml(&toml)).unwrap();

        let Config {
            source_config_file,
            storage,
            toolchain,
            judge,
        } = cfg;

        assert_eq!(source_config_file, None);
        assert_eq!(storage.record_dir, Path::new("./records"));
        assert_eq!(storage.submission_dir, Path::new("./submissions"));
        assert_eq!(storage.testcase_dir, Path::new("./testcases"));
        assert_eq!(storage.scratch_dir, Path::new("./scratch"));

        assert_eq!(toolchain.command, "g++");
        assert_eq!(toolchain.flags, vec!["-std=c++1y"]);

        assert_eq!(judge.time_limit_ms, 1000);
        assert_eq!(judge.time_limit(), Duration::from_secs(1));
    }

    #[test]
    fn relative_storage_dirs_resolve_against_config_dir() {
        let mut cfg = Config::from_toml(&Config::example_toml()).unwrap();
        cfg.storage.resolve_against(Path::new("/srv/judge"));

        assert_eq!(cfg.storage.record_dir, Path::new("/srv/judge/records"));
        assert_eq!(cfg.storage.scratch_dir, Path::new("/srv/judge/scratch"));
    }
}
