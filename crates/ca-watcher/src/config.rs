//! Settings resolution
//!
//! Values come from, in order of precedence: command-line flags or their
//! environment variables, the optional TOML config file, then defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Interval used when neither flag, environment nor file sets one.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Contents of the config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub watcher: WatcherSection,
}

/// The `[watcher]` table
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatcherSection {
    pub source_dir: Option<PathBuf>,
    pub dest_dir: Option<PathBuf>,
    pub interval_secs: Option<u64>,
    pub always_sync: Option<bool>,
    pub fsync: Option<bool>,
}

impl FileConfig {
    /// Load and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Fully resolved settings for one watcher process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub interval: Duration,
    pub always_sync: bool,
    pub fsync: bool,
}

impl Settings {
    /// Resolve settings from parsed arguments, loading the config file if one was given.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::debug!(?path, "Loading config file");
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Merge parsed arguments over a config file.
    pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self> {
        let section = file.watcher;

        let source_dir = cli.source_dir.clone().or(section.source_dir).ok_or_else(|| {
            CliError::user("No source directory: set --source-dir or TRUSTEDCASRCDIR")
        })?;
        let dest_dir = cli.dest_dir.clone().or(section.dest_dir).ok_or_else(|| {
            CliError::user("No destination directory: set --dest-dir or TRUSTEDCADESTDIR")
        })?;

        let interval_secs = cli
            .interval_secs
            .or(section.interval_secs)
            .unwrap_or(DEFAULT_INTERVAL_SECS);
        if interval_secs == 0 {
            return Err(CliError::user("Interval must be at least one second"));
        }

        Ok(Self {
            source_dir,
            dest_dir,
            interval: Duration::from_secs(interval_secs),
            always_sync: cli.always_sync || section.always_sync.unwrap_or(false),
            fsync: cli.fsync || section.fsync.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["ca-watcher"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    fn file(toml_text: &str) -> FileConfig {
        toml::from_str(toml_text).unwrap()
    }

    #[test]
    fn flags_alone_are_enough() {
        let settings = Settings::merge(
            &cli(&["--source-dir", "/src", "--dest-dir", "/dst"]),
            FileConfig::default(),
        )
        .unwrap();

        assert_eq!(
            settings,
            Settings {
                source_dir: PathBuf::from("/src"),
                dest_dir: PathBuf::from("/dst"),
                interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
                always_sync: false,
                fsync: false,
            }
        );
    }

    #[test]
    fn flags_override_file() {
        let settings = Settings::merge(
            &cli(&["--source-dir", "/flag-src", "--interval-secs", "60"]),
            file(
                r#"
                [watcher]
                source_dir = "/file-src"
                dest_dir = "/file-dst"
                interval_secs = 300
                fsync = true
                "#,
            ),
        )
        .unwrap();

        assert_eq!(settings.source_dir, PathBuf::from("/flag-src"));
        assert_eq!(settings.dest_dir, PathBuf::from("/file-dst"));
        assert_eq!(settings.interval, Duration::from_secs(60));
        assert!(settings.fsync);
        assert!(!settings.always_sync);
    }

    #[rstest]
    #[case(&["--dest-dir", "/dst"], "source")]
    #[case(&["--source-dir", "/src"], "destination")]
    #[case(&["--source-dir", "/src", "--dest-dir", "/dst", "--interval-secs", "0"], "Interval")]
    fn incomplete_settings_are_user_errors(#[case] args: &[&str], #[case] mentions: &str) {
        let err = Settings::merge(&cli(args), FileConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
        assert!(
            err.to_string().contains(mentions),
            "expected {:?} in {:?}",
            mentions,
            err.to_string()
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: std::result::Result<FileConfig, _> = toml::from_str("[watcher]\nsrc = \"/x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_reports_path_of_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watcher.toml");
        std::fs::write(&path, "[watcher\n").unwrap();

        let err = FileConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("watcher.toml"));
    }
}
