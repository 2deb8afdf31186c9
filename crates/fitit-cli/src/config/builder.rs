use super::defaults::{DefaultsConfig, PROJECT_NAME_FILE};
use super::file::{FileConfig, FileOutputConfig};
use super::models::{AppConfig, TemplateSource};
use crate::cli::{GenerateArgs, RenderArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use fitit::engine::config::{OutputConfigBuilder, OutputNaming, WritePolicy};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output-related flags that only `generate` exposes.
#[derive(Debug, Clone, Default)]
pub struct OutputOverrides {
    pub overwrite: bool,
    pub output: Option<PathBuf>,
    pub file_name: Option<String>,
}

impl From<&GenerateArgs> for OutputOverrides {
    fn from(args: &GenerateArgs) -> Self {
        Self {
            overwrite: args.overwrite,
            output: args.output.clone(),
            file_name: args.file_name.clone(),
        }
    }
}

pub fn build_config(
    config_path: Option<&Path>,
    render: &RenderArgs,
    overrides: &OutputOverrides,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match FileConfig::locate(config_path) {
        Some(path) => FileConfig::from_file(&path)?,
        None => FileConfig::default(),
    };
    let mut file_config = apply_set_values(file_config, &render.set_values)?;
    let output_file = file_config.output.take().unwrap_or_default();

    let template = match render.template.as_ref().or(file_config.template.as_ref()) {
        Some(path) => TemplateSource::File(path.clone()),
        None => TemplateSource::Bundled,
    };

    let write_policy = if overrides.overwrite {
        WritePolicy::Overwrite
    } else {
        output_file.write_policy.unwrap_or(defaults.write_policy)
    };

    let file_name = overrides
        .file_name
        .clone()
        .or(output_file.file_name)
        .unwrap_or(defaults.file_name);
    let naming = if file_name == PROJECT_NAME_FILE {
        OutputNaming::ProjectName
    } else {
        OutputNaming::Fixed(file_name)
    };

    let mut builder = OutputConfigBuilder::new()
        .write_policy(write_policy)
        .naming(naming);
    if let Some(output) = &overrides.output {
        builder = builder.destination(output.clone());
    }
    let output = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    debug!("Resolved template {:?} and output {:?}", template, output);
    Ok(AppConfig { template, output })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "template" => {
                config.template = Some(PathBuf::from(value));
            }
            "output.write-policy" => {
                let policy = match value.trim() {
                    "create-new" => WritePolicy::CreateNew,
                    "overwrite" => WritePolicy::Overwrite,
                    other => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: '{}'. Expected 'create-new' or 'overwrite'.",
                            key, other
                        )));
                    }
                };
                config
                    .output
                    .get_or_insert_with(FileOutputConfig::default)
                    .write_policy = Some(policy);
            }
            "output.file-name" => {
                config
                    .output
                    .get_or_insert_with(FileOutputConfig::default)
                    .file_name = Some(value.trim().to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unknown configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_apply_without_config_file() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "");

        let app = build_config(Some(&path), &RenderArgs::default(), &OutputOverrides::default())
            .expect("build ok");

        assert_eq!(app.template, TemplateSource::Bundled);
        assert_eq!(app.output.write_policy, WritePolicy::CreateNew);
        assert_eq!(app.output.naming, OutputNaming::ProjectName);
        assert!(app.output.destination.is_none());
    }

    #[test]
    fn loads_values_from_file() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            template = "custom.template"
            [output]
            write-policy = "overwrite"
            file-name = "project.py"
            "#,
        );

        let app = build_config(Some(&path), &RenderArgs::default(), &OutputOverrides::default())
            .expect("build ok");

        assert_eq!(
            app.template,
            TemplateSource::File(dir.path().join("custom.template"))
        );
        assert_eq!(app.output.write_policy, WritePolicy::Overwrite);
        assert_eq!(
            app.output.naming,
            OutputNaming::Fixed("project.py".to_string())
        );
    }

    #[test]
    fn cli_flags_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            template = "from-file.template"
            [output]
            file-name = "project.py"
            "#,
        );
        let render = RenderArgs {
            template: Some(PathBuf::from("/abs/cli.template")),
            ..Default::default()
        };
        let overrides = OutputOverrides {
            overwrite: true,
            output: Some(PathBuf::from("/tmp/out.py")),
            file_name: Some(PROJECT_NAME_FILE.to_string()),
        };

        let app = build_config(Some(&path), &render, &overrides).expect("build ok");

        assert_eq!(
            app.template,
            TemplateSource::File(PathBuf::from("/abs/cli.template"))
        );
        assert_eq!(app.output.write_policy, WritePolicy::Overwrite);
        assert_eq!(app.output.naming, OutputNaming::ProjectName);
        assert_eq!(app.output.destination, Some(PathBuf::from("/tmp/out.py")));
    }

    #[test]
    fn set_values_override_file() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[output]\nwrite-policy = \"create-new\"\n");
        let render = RenderArgs {
            set_values: vec![
                "output.write-policy=overwrite".to_string(),
                "output.file-name=legacy.py".to_string(),
            ],
            ..Default::default()
        };

        let app = build_config(Some(&path), &render, &OutputOverrides::default())
            .expect("build ok");

        assert_eq!(app.output.write_policy, WritePolicy::Overwrite);
        assert_eq!(
            app.output.naming,
            OutputNaming::Fixed("legacy.py".to_string())
        );
    }

    #[test]
    fn invalid_set_values_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "");
        for bad in ["output.write-policy=sometimes", "unknown.key=1", "no-separator"] {
            let render = RenderArgs {
                set_values: vec![bad.to_string()],
                ..Default::default()
            };
            let result = build_config(Some(&path), &render, &OutputOverrides::default());
            assert!(
                matches!(result, Err(CliError::Config(_))),
                "expected config error for {bad}"
            );
        }
    }

    #[test]
    fn file_name_with_directory_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let overrides = OutputOverrides {
            file_name: Some("nested/project.py".to_string()),
            ..Default::default()
        };

        let result = build_config(Some(&path), &RenderArgs::default(), &overrides);

        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
