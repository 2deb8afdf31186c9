use crate::core::io::output::write_output;
use crate::core::template::Template;
use crate::engine::config::OutputConfig;
use crate::engine::error::ProjectError;
use crate::engine::session::EditingSession;
use crate::workflows::render::render;
use std::path::PathBuf;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedProject {
    pub path: PathBuf,
    pub bytes_written: usize,
}

/// Generates the deformation code and renders the full project text, without writing anything.
pub fn render_session(
    session: &EditingSession,
    template: &Template,
) -> Result<String, ProjectError> {
    let fragment = session.generate()?;
    Ok(render(session.parameters(), &fragment, template)?)
}

/// Renders the session and writes it to the path chosen by `config`.
///
/// Nothing is written unless generation and every validation step succeed.
#[instrument(skip_all, name = "save_workflow")]
pub fn run(
    session: &EditingSession,
    template: &Template,
    config: &OutputConfig,
) -> Result<SavedProject, ProjectError> {
    info!(
        "Saving project with {} deformation(s).",
        session.deformations().len()
    );

    let rendered = render_session(session, template)?;

    let path = config.resolve_path(session.parameters());
    info!(
        "Writing project to {:?} ({:?}).",
        &path, config.write_policy
    );
    let bytes_written = write_output(&path, &rendered, config.write_policy)?;

    Ok(SavedProject {
        path,
        bytes_written,
    })
}
