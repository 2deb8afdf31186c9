use fitit::engine::config::WritePolicy;

/// `output.file-name` value that names the script after the project.
pub const PROJECT_NAME_FILE: &str = "project-name";

pub struct DefaultsConfig {
    pub write_policy: WritePolicy,
    pub file_name: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            write_policy: WritePolicy::CreateNew,
            file_name: PROJECT_NAME_FILE.to_string(),
        }
    }
}
