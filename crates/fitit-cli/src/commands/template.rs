use crate::cli::TemplateArgs;
use crate::error::{CliError, Result};
use fitit::core::io::output::{WritePolicy, write_output};
use fitit::core::template::BUNDLED_TEMPLATE;
use fitit::engine::error::ProjectError;
use tracing::info;

pub fn run(args: TemplateArgs) -> Result<()> {
    match args.output {
        Some(path) => {
            let policy = if args.force {
                WritePolicy::Overwrite
            } else {
                WritePolicy::CreateNew
            };
            info!("Exporting bundled template to {:?}", path);
            write_output(&path, BUNDLED_TEMPLATE, policy)
                .map_err(|e| CliError::Project(ProjectError::Write(e)))?;
            println!("✓ Template written to: {}", path.display());
        }
        None => print!("{}", BUNDLED_TEMPLATE),
    }
    Ok(())
}
