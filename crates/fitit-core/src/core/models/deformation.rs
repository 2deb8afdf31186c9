use crate::core::validation::{IssueKind, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The geometric transform a deformation applies to its molecule part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeformationKind {
    /// Translation of the part along the axis.
    Shift,
    /// Rotation of the part around the axis, pivoting on the first axis atom.
    Rotation,
}

impl DeformationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shift => "shift",
            Self::Rotation => "rotation",
        }
    }
}

impl fmt::Display for DeformationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown deformation type: '{0}'")]
pub struct ParseDeformationKindError(pub String);

impl FromStr for DeformationKind {
    type Err = ParseDeformationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shift" => Ok(Self::Shift),
            "rotation" | "rotate" => Ok(Self::Rotation),
            _ => Err(ParseDeformationKindError(s.to_string())),
        }
    }
}

/// One structural change applied to a molecule part.
///
/// The axis of the deformation is `normalize(atom[atom_1] - atom[atom_2])`. Instances can only be
/// obtained through [`Deformation::new`] or [`DeformationDraft::validate`], so a record in hand
/// always has two distinct axis atoms and a usable name. Name uniqueness is a property of the
/// [`DeformationRegistry`](super::registry::DeformationRegistry) holding it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Deformation {
    part: u32,
    atom_1: u32,
    atom_2: u32,
    kind: DeformationKind,
    name: String,
}

impl Deformation {
    /// Builds a record from already-typed values.
    ///
    /// # Errors
    ///
    /// Returns every issue found: a blank name, a name that cannot be embedded in a quoted
    /// script string, or identical axis atoms.
    pub fn new(
        part: u32,
        atom_1: u32,
        atom_2: u32,
        kind: DeformationKind,
        name: impl Into<String>,
    ) -> Result<Self, ValidationErrors> {
        let name = name.into();
        let mut errors = ValidationErrors::new();

        check_name(&name, &mut errors);
        if atom_1 == atom_2 {
            errors.push("atom-2", IssueKind::IdenticalAtoms(atom_1));
        }
        errors.into_result()?;

        Ok(Self {
            part,
            atom_1,
            atom_2,
            kind,
            name,
        })
    }

    pub fn part(&self) -> u32 {
        self.part
    }

    pub fn atom_1(&self) -> u32 {
        self.atom_1
    }

    pub fn atom_2(&self) -> u32 {
        self.atom_2
    }

    pub fn kind(&self) -> DeformationKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn check_name(name: &str, errors: &mut ValidationErrors) {
    if name.trim().is_empty() {
        errors.push("name", IssueKind::Missing);
    } else if name.trim() != name {
        errors.push(
            "name",
            IssueKind::Malformed("must not start or end with whitespace".to_string()),
        );
    } else if name.contains(['"', '\\', '\n', '\r']) {
        errors.push(
            "name",
            IssueKind::Malformed(
                "must not contain quotes, backslashes or line breaks".to_string(),
            ),
        );
    }
}

/// Raw text of a deformation form, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeformationDraft {
    pub part: String,
    pub atom_1: String,
    pub atom_2: String,
    pub kind: String,
    pub name: String,
}

impl DeformationDraft {
    pub fn new(
        part: impl Into<String>,
        atom_1: impl Into<String>,
        atom_2: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            part: part.into(),
            atom_1: atom_1.into(),
            atom_2: atom_2.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Normalizes the text fields into a typed [`Deformation`].
    ///
    /// All fields are checked in one pass so a form can highlight every problem at once.
    pub fn validate(&self) -> Result<Deformation, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let part = parse_index("part", &self.part, &mut errors);
        let atom_1 = parse_index("atom-1", &self.atom_1, &mut errors);
        let atom_2 = parse_index("atom-2", &self.atom_2, &mut errors);

        let kind = if self.kind.trim().is_empty() {
            errors.push("kind", IssueKind::Missing);
            None
        } else {
            match self.kind.parse::<DeformationKind>() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    errors.push("kind", IssueKind::UnknownKind(e.0));
                    None
                }
            }
        };

        let name = self.name.trim();
        match (part, atom_1, atom_2, kind) {
            (Some(part), Some(atom_1), Some(atom_2), Some(kind)) if errors.is_empty() => {
                Deformation::new(part, atom_1, atom_2, kind, name)
            }
            _ => {
                check_name(name, &mut errors);
                if let (Some(a), Some(b)) = (atom_1, atom_2) {
                    if a == b {
                        errors.push("atom-2", IssueKind::IdenticalAtoms(a));
                    }
                }
                Err(errors)
            }
        }
    }
}

impl From<&Deformation> for DeformationDraft {
    fn from(d: &Deformation) -> Self {
        Self {
            part: d.part.to_string(),
            atom_1: d.atom_1.to_string(),
            atom_2: d.atom_2.to_string(),
            kind: d.kind.as_str().to_string(),
            name: d.name.clone(),
        }
    }
}

fn parse_index(field: &'static str, raw: &str, errors: &mut ValidationErrors) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(field, IssueKind::Missing);
        return None;
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        errors.push(field, IssueKind::NotAnInteger(raw.to_string()));
        return None;
    }
    match trimmed.parse::<u32>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(
                field,
                IssueKind::Malformed(format!("index '{trimmed}' is out of range")),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Shift".parse(), Ok(DeformationKind::Shift));
        assert_eq!(" rotation ".parse(), Ok(DeformationKind::Rotation));
        assert!("twist".parse::<DeformationKind>().is_err());
    }

    #[test]
    fn kind_display_matches_form_values() {
        assert_eq!(DeformationKind::Shift.to_string(), "shift");
        assert_eq!(DeformationKind::Rotation.to_string(), "rotation");
    }

    #[test]
    fn new_rejects_identical_axis_atoms() {
        let err = Deformation::new(0, 3, 3, DeformationKind::Shift, "d1").unwrap_err();
        assert!(
            err.iter()
                .any(|i| i.kind == IssueKind::IdenticalAtoms(3))
        );
    }

    #[test]
    fn new_rejects_blank_and_unquotable_names() {
        assert!(Deformation::new(0, 1, 2, DeformationKind::Shift, "  ").is_err());
        assert!(Deformation::new(0, 1, 2, DeformationKind::Shift, "a\"b").is_err());
        assert!(Deformation::new(0, 1, 2, DeformationKind::Shift, "a\nb").is_err());
        assert!(Deformation::new(0, 1, 2, DeformationKind::Shift, " d1").is_err());
    }

    #[test]
    fn draft_normalizes_string_indices() {
        let d = DeformationDraft::new("2", " 0", "1 ", "shift", "d1")
            .validate()
            .unwrap();
        assert_eq!(d.part(), 2);
        assert_eq!(d.atom_1(), 0);
        assert_eq!(d.atom_2(), 1);
        assert_eq!(d.kind(), DeformationKind::Shift);
        assert_eq!(d.name(), "d1");
    }

    #[test]
    fn draft_reports_every_missing_field() {
        let err = DeformationDraft::default().validate().unwrap_err();
        for field in ["part", "atom-1", "atom-2", "kind", "name"] {
            assert!(err.has_field(field), "expected an issue for {field}");
        }
    }

    #[test]
    fn draft_rejects_non_numeric_atom_indices() {
        let err = DeformationDraft::new("0", "a", "-1", "shift", "d1")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err.iter().find(|i| i.field == "atom-1").map(|i| &i.kind),
            Some(IssueKind::NotAnInteger(_))
        ));
        assert!(err.has_field("atom-2"));
    }

    #[test]
    fn draft_rejects_equal_atoms_regardless_of_other_fields() {
        let err = DeformationDraft::new("", "4", "4", "bogus", "")
            .validate()
            .unwrap_err();
        assert!(err.iter().any(|i| i.kind == IssueKind::IdenticalAtoms(4)));

        let err = DeformationDraft::new("1", "4", "4", "rotation", "r")
            .validate()
            .unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn draft_round_trips_through_record() {
        let d = Deformation::new(5, 7, 9, DeformationKind::Rotation, "twist").unwrap();
        let draft = DeformationDraft::from(&d);
        assert_eq!(draft.kind, "rotation");
        assert_eq!(draft.validate().unwrap(), d);
    }
}
