use crate::error::{CliError, Result};
use directories::ProjectDirs;
use fitit::engine::config::WritePolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    #[serde(rename = "write-policy")]
    pub write_policy: Option<WritePolicy>,
    #[serde(rename = "file-name")]
    pub file_name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub template: Option<PathBuf>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    /// Reads a config file. A relative `template` path is taken relative to the file itself.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if let Some(template) = config.template.take() {
            config.template = Some(match path.parent() {
                Some(base) if template.is_relative() => base.join(template),
                _ => template,
            });
        }
        Ok(config)
    }

    /// The explicit path if given, otherwise the per-user config file when it exists.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let path = ProjectDirs::from("org", "fitit", "fitit")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))?;
        if path.is_file() {
            debug!("Found user configuration at {:?}", path);
            Some(path)
        } else {
            None
        }
    }
}
