//! Configuration for the taskstate tool

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::FilterType;

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Filter applied by `show` when no `--filter` is given. Unset keeps the
    /// snapshot's own filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterType>,
}

impl ViewConfig {
    /// Pick the filter to show: command line, then config, then snapshot
    pub fn resolve_filter(&self, flag: Option<FilterType>, snapshot: FilterType) -> FilterType {
        flag.or(self.filter).unwrap_or(snapshot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Path to the snapshot JSON file
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("state.json")
}

fn default_pretty() -> bool {
    true
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl Config {
    /// Default config path
    pub fn default_path() -> Result<PathBuf> {
        // Check environment variable first
        if let Ok(env_path) = std::env::var("TASKSTATE_CONFIG") {
            return Ok(PathBuf::from(env_path));
        }

        // Check for config in current directory
        let local = PathBuf::from("taskstate.toml");
        if local.exists() {
            return Ok(local);
        }

        // Then check XDG config
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("taskstate");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load config from specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        let with_comments = format!(
            "# taskstate configuration\n\
             # snapshot.path: task-list snapshot read by `taskstate show`\n\
             # view.filter: ANY, ACTIVE or COMPLETE (unset keeps the snapshot's filter)\n\n\
             {}",
            content
        );

        std::fs::write(path, with_comments).context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            view: ViewConfig {
                filter: Some(FilterType::Complete),
            },
            snapshot: SnapshotConfig {
                path: PathBuf::from("/tmp/tasks.json"),
            },
            output: OutputConfig { pretty: false },
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.snapshot.path, PathBuf::from("state.json"));
        assert!(cfg.output.pretty);

        let cfg: Config = toml::from_str("[output]\npretty = false\n").unwrap();
        assert!(!cfg.output.pretty);
        assert_eq!(cfg.snapshot.path, PathBuf::from("state.json"));
    }

    #[test]
    fn view_filter_section() {
        let cfg: Config = toml::from_str("[view]\nfilter = \"ACTIVE\"\n").unwrap();
        assert_eq!(cfg.view.filter, Some(FilterType::Active));

        let cfg: Config = toml::from_str("[view]\n").unwrap();
        assert_eq!(cfg.view.filter, None);

        assert!(toml::from_str::<Config>("[view]\nfilter = \"DONE\"\n").is_err());
    }

    #[test]
    fn filter_precedence() {
        let unset = ViewConfig::default();
        let active = ViewConfig {
            filter: Some(FilterType::Active),
        };

        assert_eq!(unset.resolve_filter(None, FilterType::Complete), FilterType::Complete);
        assert_eq!(active.resolve_filter(None, FilterType::Complete), FilterType::Active);
        assert_eq!(
            active.resolve_filter(Some(FilterType::Any), FilterType::Complete),
            FilterType::Any
        );
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[snapshot\npath = 1").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse config file");
    }
}
