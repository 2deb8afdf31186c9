use super::deformation::{Deformation, DeformationDraft};
use crate::core::validation::{IssueKind, ValidationErrors};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Invalid deformation: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Deformation index {index} is out of bounds (registry holds {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Ordered collection of deformations with unique names.
///
/// Insertion order is display order and the order the generated script applies the
/// deformations in. Every mutating operation either succeeds completely or leaves the registry
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeformationRegistry {
    deformations: Vec<Deformation>,
}

impl DeformationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry by appending `records` in order.
    ///
    /// # Errors
    ///
    /// Fails on the first record that would break name uniqueness; the returned index is the
    /// position of that record in the input.
    pub fn try_from_records(
        records: impl IntoIterator<Item = Deformation>,
    ) -> Result<Self, (usize, RegistryError)> {
        let mut registry = Self::new();
        for (i, record) in records.into_iter().enumerate() {
            registry.append(record).map_err(|e| (i, e))?;
        }
        Ok(registry)
    }

    pub fn append(&mut self, record: Deformation) -> Result<(), RegistryError> {
        self.check_unique(record.name(), None)?;
        self.deformations.push(record);
        Ok(())
    }

    /// Validates raw form text and appends the resulting record.
    ///
    /// Field issues and a name clash are reported together.
    pub fn append_draft(&mut self, draft: &DeformationDraft) -> Result<(), RegistryError> {
        let record = self.validate_draft(draft, None)?;
        self.deformations.push(record);
        Ok(())
    }

    /// Replaces the record at `index`.
    ///
    /// The new record may reuse the name of the slot it replaces, but not the name of any other
    /// slot.
    pub fn edit(&mut self, index: usize, record: Deformation) -> Result<(), RegistryError> {
        self.check_index(index)?;
        self.check_unique(record.name(), Some(index))?;
        self.deformations[index] = record;
        Ok(())
    }

    pub fn edit_draft(
        &mut self,
        index: usize,
        draft: &DeformationDraft,
    ) -> Result<(), RegistryError> {
        self.check_index(index)?;
        let record = self.validate_draft(draft, Some(index))?;
        self.deformations[index] = record;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Deformation, RegistryError> {
        self.check_index(index)?;
        Ok(self.deformations.remove(index))
    }

    pub fn list(&self) -> &[Deformation] {
        &self.deformations
    }

    pub fn get(&self, index: usize) -> Option<&Deformation> {
        self.deformations.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Deformation> {
        self.deformations.iter()
    }

    pub fn len(&self) -> usize {
        self.deformations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deformations.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.deformations.iter().map(Deformation::name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.deformations.iter().position(|d| d.name() == name)
    }

    fn check_index(&self, index: usize) -> Result<(), RegistryError> {
        if index < self.deformations.len() {
            Ok(())
        } else {
            Err(RegistryError::IndexOutOfBounds {
                index,
                len: self.deformations.len(),
            })
        }
    }

    fn validate_draft(
        &self,
        draft: &DeformationDraft,
        skip: Option<usize>,
    ) -> Result<Deformation, RegistryError> {
        let mut errors = match draft.validate() {
            Ok(record) => {
                self.check_unique(record.name(), skip)?;
                return Ok(record);
            }
            Err(errors) => errors,
        };
        let name = draft.name.trim();
        if !errors.has_field("name") && self.name_taken(name, skip) {
            errors.push("name", IssueKind::DuplicateName(name.to_string()));
        }
        Err(errors.into())
    }

    fn name_taken(&self, name: &str, skip: Option<usize>) -> bool {
        self.deformations
            .iter()
            .enumerate()
            .any(|(i, d)| Some(i) != skip && d.name() == name)
    }

    fn check_unique(&self, name: &str, skip: Option<usize>) -> Result<(), RegistryError> {
        if self.name_taken(name, skip) {
            let mut errors = ValidationErrors::new();
            errors.push("name", IssueKind::DuplicateName(name.to_string()));
            return Err(errors.into());
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DeformationRegistry {
    type Item = &'a Deformation;
    type IntoIter = std::slice::Iter<'a, Deformation>;

    fn into_iter(self) -> Self::IntoIter {
        self.deformations.iter()
    }
}
