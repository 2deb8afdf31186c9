use crate::core::models::parameters::ProjectParameters;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use crate::core::io::output::WritePolicy;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid output file name '{0}': must be a plain file name")]
    InvalidFileName(String),
}

/// How the rendered project file is named inside the project folder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputNaming {
    /// `<project_folder>/<project_name>.py`.
    #[default]
    ProjectName,
    /// `<project_folder>/<name>`, e.g. the legacy `project.py`.
    Fixed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub write_policy: WritePolicy,
    pub naming: OutputNaming,
    /// Explicit destination, bypassing the project folder and naming.
    pub destination: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_policy: WritePolicy::CreateNew,
            naming: OutputNaming::ProjectName,
            destination: None,
        }
    }
}

impl OutputConfig {
    pub fn resolve_path(&self, parameters: &ProjectParameters) -> PathBuf {
        if let Some(destination) = &self.destination {
            return destination.clone();
        }
        let folder = Path::new(parameters.project_folder.trim());
        match &self.naming {
            OutputNaming::ProjectName => {
                folder.join(format!("{}.py", parameters.project_name.trim()))
            }
            OutputNaming::Fixed(name) => folder.join(name),
        }
    }
}

#[derive(Default)]
pub struct OutputConfigBuilder {
    write_policy: Option<WritePolicy>,
    naming: Option<OutputNaming>,
    destination: Option<PathBuf>,
}

impl OutputConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = Some(policy);
        self
    }
    pub fn naming(mut self, naming: OutputNaming) -> Self {
        self.naming = Some(naming);
        self
    }
    pub fn destination(mut self, path: PathBuf) -> Self {
        self.destination = Some(path);
        self
    }

    pub fn build(self) -> Result<OutputConfig, ConfigError> {
        let naming = self
            .naming
            .ok_or(ConfigError::MissingParameter("naming"))?;
        if let OutputNaming::Fixed(name) = &naming {
            let is_plain = !name.trim().is_empty()
                && Path::new(name).file_name().is_some_and(|f| f == name.as_str());
            if !is_plain {
                return Err(ConfigError::InvalidFileName(name.clone()));
            }
        }
        Ok(OutputConfig {
            write_policy: self
                .write_policy
                .ok_or(ConfigError::MissingParameter("write_policy"))?,
            naming,
            destination: self.destination,
        })
    }
}
