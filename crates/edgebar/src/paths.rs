use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use edgebar_config::normalize::AMENDED_FILE_NAME;

/// Stores references to all the paths relevant to edgebar, and abstracts
/// access to these files and directories.
#[derive(Debug, Clone)]
pub struct PanelPaths {
    pub config_dir: PathBuf,
}

impl PanelPaths {
    pub fn from_config_dir<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        if config_dir.is_file() {
            bail!("Please provide the path to the config directory, not a file within it")
        }

        if !config_dir.exists() {
            bail!("Configuration directory {} does not exist", config_dir.display());
        }

        Ok(PanelPaths { config_dir: config_dir.canonicalize()? })
    }

    pub fn default() -> Result<Self> {
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(std::env::var("HOME").unwrap_or_default()).join(".config"))
            .join("edgebar");

        Self::from_config_dir(config_dir)
    }

    pub fn get_config_dir(&self) -> &Path {
        self.config_dir.as_path()
    }

    pub fn get_config_file(&self) -> PathBuf {
        self.config_dir.join("config")
    }

    /// Sibling of the config file the normalized document is persisted to
    /// whenever any default had to be filled in.
    pub fn get_amended_config_file(&self) -> PathBuf {
        self.config_dir.join(AMENDED_FILE_NAME)
    }

    pub fn get_css_file(&self) -> PathBuf {
        self.config_dir.join("style.css")
    }

    /// PID marker file, written once at startup. Fixed name in the system
    /// temp dir so external tooling can find the running instance.
    pub fn get_pid_file(&self) -> PathBuf {
        std::env::temp_dir().join("edgebar.pid")
    }
}

impl std::fmt::Display for PanelPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "config-dir: {}, pid-file: {}", self.config_dir.display(), self.get_pid_file().display())
    }
}
