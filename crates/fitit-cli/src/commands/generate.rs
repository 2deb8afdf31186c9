use crate::cli::GenerateArgs;
use crate::commands::{apply_params, load_session};
use crate::config::builder::{OutputOverrides, build_config};
use crate::error::Result;
use fitit::workflows::save::{self, render_session};
use std::path::Path;
use tracing::info;

pub fn run(args: GenerateArgs, config_path: Option<&Path>) -> Result<()> {
    let mut session = load_session(&args.project.project)?;
    apply_params(&mut session, &args.render.params)?;

    let config = build_config(config_path, &args.render, &OutputOverrides::from(&args))?;
    let template = config.template.load()?;
    info!("Using template: {:?}", config.template);

    if args.stdout {
        print!("{}", render_session(&session, &template)?);
        return Ok(());
    }

    let saved = save::run(&session, &template, &config.output)?;
    println!(
        "✓ Project saved to {} ({} bytes).",
        saved.path.display(),
        saved.bytes_written
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ProjectArgs, RenderArgs};
    use crate::error::CliError;
    use fitit::core::io::output::WriteError;
    use fitit::engine::error::ProjectError;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn project_in(dir: &Path) -> PathBuf {
        let folder = dir.display().to_string();
        let project = dir.join("project.toml");
        fs::write(
            &project,
            format!(
                r#"
[parameters]
molecule-file = "molecule.xyz"
parts = "0-5,6-12,"
project-folder = "{folder}"
project-name = "fe_complex"
spectrum-file = "exp.txt"
left-interval = "7100"
right-interval = "7200"
energy-range = "-15 0.02 8 0.1 18"
radius = "5"
gamma-hole = "1.6"
ecent = "50"
elarg = "50"
gmax = "15"
efermi = "0"
shift = "136"
norm = "0.0448"

[[deformations]]
name = "d1"
part = 1
atom-1 = 0
atom-2 = 1
kind = "shift"

[[deformations]]
name = "rot"
part = 2
atom-1 = 6
atom-2 = 7
kind = "rotation"
"#
            ),
        )
        .unwrap();
        project
    }

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let dir = tempdir().unwrap();
        let project = project_in(dir.path());
        let config = dir.path().join("config.toml");
        fs::write(&config, "").unwrap();
        (dir, project, config)
    }

    fn args(project: &Path) -> GenerateArgs {
        GenerateArgs {
            project: ProjectArgs {
                project: project.to_path_buf(),
            },
            render: RenderArgs::default(),
            overwrite: false,
            output: None,
            file_name: None,
            stdout: false,
        }
    }

    #[test]
    fn writes_script_named_after_project() {
        let (dir, project, config) = setup();

        run(args(&project), Some(&config)).unwrap();

        let written = fs::read_to_string(dir.path().join("fe_complex.py")).unwrap();
        assert!(written.contains("    deformation = \"d1\"\n"));
        assert!(written.contains("    deformation = \"rot\"\n"));
        assert!(written.contains("project.name = 'fe_complex'"));
        assert!(!written.contains("${"));
    }

    #[test]
    fn second_generation_requires_overwrite() {
        let (dir, project, config) = setup();
        run(args(&project), Some(&config)).unwrap();

        let result = run(args(&project), Some(&config));
        assert!(matches!(
            result,
            Err(CliError::Project(ProjectError::Write(WriteError::AlreadyExists(_))))
        ));

        let mut again = args(&project);
        again.overwrite = true;
        again.render.params = vec!["Radius=6".to_string()];
        run(again, Some(&config)).unwrap();

        let written = fs::read_to_string(dir.path().join("fe_complex.py")).unwrap();
        assert!(written.contains("'radius': 6,"));
    }

    #[test]
    fn fixed_file_name_from_flag() {
        let (dir, project, config) = setup();
        let mut generate = args(&project);
        generate.file_name = Some("project.py".to_string());

        run(generate, Some(&config)).unwrap();

        assert!(dir.path().join("project.py").is_file());
        assert!(!dir.path().join("fe_complex.py").exists());
    }

    #[test]
    fn invalid_parameters_write_nothing() {
        let (dir, project, config) = setup();
        let mut generate = args(&project);
        generate.render.params = vec!["norm=abc".to_string()];

        let result = run(generate, Some(&config));

        assert!(matches!(
            result,
            Err(CliError::Project(ProjectError::Render(_)))
        ));
        assert!(!dir.path().join("fe_complex.py").exists());
    }
}
