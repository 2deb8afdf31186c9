use fitit::core::template::{BUNDLED_TEMPLATE, Template, TemplateError};
use fitit::engine::config::OutputConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Bundled,
    File(PathBuf),
}

impl TemplateSource {
    pub fn load(&self) -> Result<Template, TemplateError> {
        match self {
            Self::Bundled => Template::parse(BUNDLED_TEMPLATE),
            Self::File(path) => Template::load(path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub template: TemplateSource,
    pub output: OutputConfig,
}
