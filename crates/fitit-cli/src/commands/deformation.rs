use crate::cli::{DeformationArgs, DeformationCommands, EditDeformationFields, NewDeformationFields};
use crate::commands::{load_session, save_session};
use crate::error::{CliError, Result};
use fitit::core::models::deformation::DeformationDraft;
use fitit::core::models::registry::RegistryError;
use fitit::engine::session::EditingSession;
use tracing::info;

pub fn run(args: DeformationArgs) -> Result<()> {
    match args.command {
        DeformationCommands::Add { project, fields } => {
            let mut session = load_session(&project.project)?;
            let name = add(&mut session, fields)?;
            save_session(&session, &project.project)?;
            println!(
                "✓ Added deformation '{}' (#{}).",
                name,
                session.deformations().len() - 1
            );
        }
        DeformationCommands::Edit {
            project,
            index,
            fields,
        } => {
            let mut session = load_session(&project.project)?;
            edit(&mut session, index, fields)?;
            save_session(&session, &project.project)?;
            println!("✓ Updated deformation #{}.", index);
        }
        DeformationCommands::Remove { project, index } => {
            let mut session = load_session(&project.project)?;
            let removed = session.remove_deformation(index)?;
            save_session(&session, &project.project)?;
            println!("✓ Removed deformation '{}'.", removed.name());
        }
        DeformationCommands::List { project } => {
            let session = load_session(&project.project)?;
            print!("{}", format_list(&session));
        }
    }
    Ok(())
}

fn add(session: &mut EditingSession, fields: NewDeformationFields) -> Result<String> {
    let draft = DeformationDraft::new(
        fields.part,
        fields.atom_1,
        fields.atom_2,
        fields.kind,
        fields.name,
    );
    session.add_deformation(&draft)?;
    info!("Deformation '{}' appended.", draft.name.trim());
    Ok(draft.name.trim().to_string())
}

fn edit(session: &mut EditingSession, index: usize, fields: EditDeformationFields) -> Result<()> {
    let current = session
        .registry()
        .get(index)
        .ok_or(RegistryError::IndexOutOfBounds {
            index,
            len: session.deformations().len(),
        })?;

    let mut draft = DeformationDraft::from(current);
    if let Some(part) = fields.part {
        draft.part = part;
    }
    if let Some(atom_1) = fields.atom_1 {
        draft.atom_1 = atom_1;
    }
    if let Some(atom_2) = fields.atom_2 {
        draft.atom_2 = atom_2;
    }
    if let Some(kind) = fields.kind {
        draft.kind = kind;
    }
    if let Some(name) = fields.name {
        draft.name = name;
    }

    if draft == DeformationDraft::from(current) {
        return Err(CliError::Argument(
            "Nothing to change: pass at least one field to edit.".to_string(),
        ));
    }

    session.edit_deformation(index, &draft)?;
    info!("Deformation #{} replaced.", index);
    Ok(())
}

fn format_list(session: &EditingSession) -> String {
    if session.deformations().is_empty() {
        return "No deformations defined.\n".to_string();
    }

    let width = session
        .registry()
        .names()
        .map(str::len)
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!(
        "{:>3}  {:<width$}  {:<8}  {:>4}  AXIS\n",
        "#", "NAME", "KIND", "PART"
    );
    for (i, d) in session.deformations().iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:<width$}  {:<8}  {:>4}  {} -> {}\n",
            i,
            d.name(),
            d.kind().as_str(),
            d.part(),
            d.atom_2(),
            d.atom_1()
        ));
    }
    out
}
