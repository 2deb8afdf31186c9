use crate::cli::InitArgs;
use crate::error::{CliError, Result};
use fitit::core::io::description::ProjectDescription;
use tracing::info;

pub fn run(args: InitArgs) -> Result<()> {
    let path = &args.project.project;
    if path.exists() && !args.force {
        return Err(CliError::Argument(format!(
            "Project description {:?} already exists. Use --force to replace it.",
            path
        )));
    }

    info!("Creating empty project description at {:?}", path);
    ProjectDescription::default().save(path)?;
    println!("✓ Created project description: {}", path.display());
    Ok(())
}
