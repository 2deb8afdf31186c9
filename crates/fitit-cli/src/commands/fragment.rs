use crate::cli::ProjectArgs;
use crate::commands::load_session;
use crate::error::Result;
use fitit::engine::error::ProjectError;

pub fn run(args: ProjectArgs) -> Result<()> {
    let session = load_session(&args.project)?;
    let fragment = session.generate().map_err(ProjectError::from)?;
    print!("{}", fragment);
    Ok(())
}
