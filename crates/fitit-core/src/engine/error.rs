use crate::core::codegen::GenerateError;
use crate::core::io::output::WriteError;
use crate::core::template::TemplateError;
use crate::core::validation::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot generate project: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl RenderError {
    /// The collected field issues, if this is a validation failure.
    pub fn issues(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Template(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
