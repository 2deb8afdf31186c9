pub mod check;
pub mod deformation;
pub mod fragment;
pub mod generate;
pub mod init;
pub mod template;

use crate::error::{CliError, Result};
use crate::utils::parser;
use fitit::core::io::description::ProjectDescription;
use fitit::engine::session::EditingSession;
use std::path::Path;
use tracing::{debug, info};

/// Loads a project description and replays it into a fresh editing session.
pub(crate) fn load_session(path: &Path) -> Result<EditingSession> {
    info!("Loading project description from {:?}", path);
    let description = ProjectDescription::load(path)?;
    Ok(EditingSession::from_description(&description)?)
}

pub(crate) fn save_session(session: &EditingSession, path: &Path) -> Result<()> {
    debug!("Writing project description to {:?}", path);
    session.to_description().save(path)?;
    Ok(())
}

/// Applies `-P KEY=VALUE` overrides to the session parameters, by template key.
pub(crate) fn apply_params(session: &mut EditingSession, params: &[String]) -> Result<()> {
    for pair in params {
        let (key, value) =
            parser::parse_key_value(pair).map_err(|e| CliError::Argument(e.to_string()))?;
        if !session.parameters_mut().set(key, value) {
            return Err(CliError::Argument(format!(
                "Cannot set parameter '{}' to '{}': unknown key or invalid value.",
                key, value
            )));
        }
        debug!("Parameter '{}' overridden from the command line.", key);
    }
    Ok(())
}
