use crate::cli::CheckArgs;
use crate::commands::{apply_params, load_session};
use crate::config::builder::{OutputOverrides, build_config};
use crate::error::{CliError, Result};
use fitit::core::validation::ValidationErrors;
use fitit::engine::error::ProjectError;
use fitit::workflows::save::render_session;
use std::path::Path;
use tracing::info;

pub fn run(args: CheckArgs, config_path: Option<&Path>) -> Result<()> {
    let mut session = load_session(&args.project.project)?;
    apply_params(&mut session, &args.render.params)?;

    let config = build_config(config_path, &args.render, &OutputOverrides::default())?;
    let template = config.template.load()?;

    match render_session(&session, &template) {
        Ok(rendered) => {
            info!("Rendered project is {} bytes.", rendered.len());
            println!(
                "✓ Project is valid ({} deformation(s)).",
                session.deformations().len()
            );
            Ok(())
        }
        Err(e) => match issues_of(&e) {
            Some(issues) => {
                print!("{}", format_issues(issues));
                Err(CliError::InvalidProject(issues.len()))
            }
            None => Err(e.into()),
        },
    }
}

fn issues_of(error: &ProjectError) -> Option<&ValidationErrors> {
    match error {
        ProjectError::Render(render) => render.issues(),
        ProjectError::Generate(_) | ProjectError::Write(_) => None,
    }
}

fn format_issues(issues: &ValidationErrors) -> String {
    issues.iter().map(|issue| format!("  - {}\n", issue)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ProjectArgs, RenderArgs};
    use fitit::core::io::description::ProjectDescription;
    use fitit::core::validation::IssueKind;
    use std::fs;
    use tempfile::tempdir;

    const VALID_PROJECT: &str = r#"
[parameters]
molecule-file = "/data/fe/molecule.xyz"
parts = "0-5,6-12,"
project-folder = "/data/fe"
project-name = "fe_complex"
spectrum-file = "/data/fe/exp.txt"
left-interval = 7100
right-interval = 7200
energy-range = "7080 7300"
radius = 5
gamma-hole = 1.5
ecent = 20
elarg = 15
gmax = 10
efermi = -5
shift = 7112
norm = 0.05
green = true

[[deformations]]
name = "d1"
part = 1
atom-1 = 0
atom-2 = 1
kind = "shift"
"#;

    fn args_for(project: &Path, render: RenderArgs) -> CheckArgs {
        CheckArgs {
            project: ProjectArgs {
                project: project.to_path_buf(),
            },
            render,
        }
    }

    #[test]
    fn valid_project_passes() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("project.toml");
        fs::write(&project, VALID_PROJECT).unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, "").unwrap();

        run(args_for(&project, RenderArgs::default()), Some(&config)).unwrap();
    }

    #[test]
    fn param_override_can_invalidate_the_range() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("project.toml");
        fs::write(&project, VALID_PROJECT).unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, "").unwrap();

        let render = RenderArgs {
            params: vec!["left_interval=7300".to_string()],
            ..Default::default()
        };
        let result = run(args_for(&project, render), Some(&config));

        assert!(matches!(result, Err(CliError::InvalidProject(1))));
    }

    #[test]
    fn issues_are_listed_once_and_summarized_in_the_error() {
        let mut issues = ValidationErrors::new();
        issues.push("norm", IssueKind::NotANumber("abc".to_string()));
        issues.push("Radius", IssueKind::Missing);

        let listed = format_issues(&issues);
        assert_eq!(listed.lines().count(), 2);
        assert!(listed.lines().all(|line| line.starts_with("  - ")));

        let summary = CliError::InvalidProject(issues.len()).to_string();
        assert!(!summary.contains("abc"));
        assert!(summary.contains('2'));
    }

    #[test]
    fn empty_project_fails_before_rendering() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("project.toml");
        ProjectDescription::default().save(&project).unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, "").unwrap();

        let result = run(args_for(&project, RenderArgs::default()), Some(&config));

        assert!(matches!(
            result,
            Err(CliError::Project(ProjectError::Generate(_)))
        ));
    }
}
