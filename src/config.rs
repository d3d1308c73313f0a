use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::quote::DEFAULT_QUOTE_URL;

pub(crate) const DEFAULT_RECENT_LIMIT: usize = 10;

const DATA_DIR_VAR: &str = "EXPENSETUI_DATA_DIR";
const EXPORT_DIR_VAR: &str = "EXPENSETUI_EXPORT_DIR";
const QUOTE_URL_VAR: &str = "EXPENSETUI_QUOTE_URL";
const RECENT_LIMIT_VAR: &str = "EXPENSETUI_RECENT_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub quote_url: String,
    pub recent_limit: usize,
}

impl Config {
    /// Platform directories, overridden by `EXPENSETUI_*` environment variables.
    pub(crate) fn load() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let home = directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_lookup(proj_dirs.data_dir(), &home, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(default_data: &Path, default_export: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let recent_limit = match non_empty(RECENT_LIMIT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("{RECENT_LIMIT_VAR} must be a positive integer, got '{raw}'"))?,
            None => DEFAULT_RECENT_LIMIT,
        };

        Ok(Self {
            data_dir: non_empty(DATA_DIR_VAR)
                .map(|v| PathBuf::from(crate::run::shellexpand(&v)))
                .unwrap_or_else(|| default_data.to_path_buf()),
            export_dir: non_empty(EXPORT_DIR_VAR)
                .map(|v| PathBuf::from(crate::run::shellexpand(&v)))
                .unwrap_or_else(|| default_export.to_path_buf()),
            quote_url: non_empty(QUOTE_URL_VAR).unwrap_or_else(|| DEFAULT_QUOTE_URL.to_string()),
            recent_limit,
        })
    }

    pub(crate) fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("Failed to create data directory: {}", self.data_dir.display())
        })
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join("expensetui.db")
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("expensetui.log")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(Path::new("/data"), Path::new("/home/me"), |key| {
            env.get(key).cloned()
        })
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.export_dir, PathBuf::from("/home/me"));
        assert_eq!(config.quote_url, DEFAULT_QUOTE_URL);
        assert_eq!(config.recent_limit, 10);
        assert_eq!(config.db_path(), PathBuf::from("/data/expensetui.db"));
        assert_eq!(config.log_path(), PathBuf::from("/data/expensetui.log"));
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("EXPENSETUI_DATA_DIR", "/tmp/et"),
            ("EXPENSETUI_EXPORT_DIR", "/tmp/out"),
            ("EXPENSETUI_QUOTE_URL", "http://localhost:9/q"),
            ("EXPENSETUI_RECENT_LIMIT", "25"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/et"));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.quote_url, "http://localhost:9/q");
        assert_eq!(config.recent_limit, 25);
    }

    #[test]
    fn test_blank_override_falls_back() {
        let config = config_with(&[("EXPENSETUI_DATA_DIR", "  ")]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/data"));
    }

    #[test]
    fn test_invalid_recent_limit() {
        assert!(config_with(&[("EXPENSETUI_RECENT_LIMIT", "ten")]).is_err());
        assert!(config_with(&[("EXPENSETUI_RECENT_LIMIT", "0")]).is_err());
    }
}
