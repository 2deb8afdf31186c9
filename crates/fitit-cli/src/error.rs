use fitit::core::io::description::DescriptionError;
use fitit::core::models::registry::RegistryError;
use fitit::core::template::TemplateError;
use fitit::engine::error::ProjectError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Project is invalid: {0} issue(s) found")]
    InvalidProject(usize),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
