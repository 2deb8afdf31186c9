//! Translates deformation records into the body of a PyFitIt `moleculeConstructor`.

use crate::core::models::deformation::{Deformation, DeformationKind};
use std::fmt::{self, Write};
use thiserror::Error;

const INDENT: &str = "    ";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    #[error("No deformations defined, unable to generate project")]
    EmptyRegistry,

    #[error("Failed to format deformation code: {0}")]
    Format(#[from] fmt::Error),
}

/// Renders every record as a three-line block followed by a blank line, in input order.
///
/// ```text
///     deformation = "<name>"
///     axis = normalize(m.atom[<atom_1>]-m.atom[<atom_2>])
///     m.part[<part>].shift(axis*params[deformation])
/// ```
///
/// A rotation pivots on the first axis atom:
/// `m.part[<part>].rotate(axis, m.atom[<atom_1>], params[deformation])`.
pub fn generate(records: &[Deformation]) -> Result<String, GenerateError> {
    if records.is_empty() {
        return Err(GenerateError::EmptyRegistry);
    }

    let mut out = String::with_capacity(records.len() * 160);
    for record in records {
        write_block(&mut out, record)?;
    }
    Ok(out)
}

fn write_block(out: &mut impl Write, d: &Deformation) -> fmt::Result {
    writeln!(out, "{INDENT}deformation = \"{}\"", d.name())?;
    writeln!(
        out,
        "{INDENT}axis = normalize(m.atom[{}]-m.atom[{}])",
        d.atom_1(),
        d.atom_2()
    )?;
    match d.kind() {
        DeformationKind::Shift => writeln!(
            out,
            "{INDENT}m.part[{}].shift(axis*params[deformation])",
            d.part()
        )?,
        DeformationKind::Rotation => writeln!(
            out,
            "{INDENT}m.part[{}].rotate(axis, m.atom[{}], params[deformation])",
            d.part(),
            d.atom_1()
        )?,
    }
    writeln!(out)
}
