use crate::core::codegen::{self, GenerateError};
use crate::core::io::description::{DescriptionError, ProjectDescription};
use crate::core::models::deformation::{Deformation, DeformationDraft};
use crate::core::models::parameters::ProjectParameters;
use crate::core::models::registry::{DeformationRegistry, RegistryError};
use tracing::debug;

/// Everything one editing run owns: the deformation registry and the project parameters.
///
/// Rendering and saving only borrow the session, so a failed or abandoned save never changes
/// what the user has entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditingSession {
    registry: DeformationRegistry,
    parameters: ProjectParameters,
}

impl EditingSession {
    pub fn new(parameters: ProjectParameters) -> Self {
        Self {
            registry: DeformationRegistry::new(),
            parameters,
        }
    }

    pub fn from_description(description: &ProjectDescription) -> Result<Self, DescriptionError> {
        let registry = description.to_registry()?;
        debug!(
            "Session restored with {} deformation(s).",
            registry.len()
        );
        Ok(Self {
            registry,
            parameters: description.parameters.clone(),
        })
    }

    pub fn to_description(&self) -> ProjectDescription {
        ProjectDescription::new(self.parameters.clone(), &self.registry)
    }

    pub fn registry(&self) -> &DeformationRegistry {
        &self.registry
    }

    pub fn deformations(&self) -> &[Deformation] {
        self.registry.list()
    }

    pub fn parameters(&self) -> &ProjectParameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ProjectParameters {
        &mut self.parameters
    }

    pub fn add_deformation(&mut self, draft: &DeformationDraft) -> Result<(), RegistryError> {
        self.registry.append_draft(draft)?;
        debug!("Added deformation '{}'.", draft.name.trim());
        Ok(())
    }

    pub fn edit_deformation(
        &mut self,
        index: usize,
        draft: &DeformationDraft,
    ) -> Result<(), RegistryError> {
        self.registry.edit_draft(index, draft)?;
        debug!("Edited deformation #{}.", index);
        Ok(())
    }

    pub fn remove_deformation(&mut self, index: usize) -> Result<Deformation, RegistryError> {
        let removed = self.registry.remove(index)?;
        debug!("Removed deformation '{}'.", removed.name());
        Ok(removed)
    }

    /// The deformation code for the current registry contents.
    pub fn generate(&self) -> Result<String, GenerateError> {
        codegen::generate(self.registry.list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, atom_1: &str, atom_2: &str) -> DeformationDraft {
        DeformationDraft::new("1", atom_1, atom_2, "shift", name)
    }

    #[test]
    fn edits_flow_through_to_generated_code() {
        let mut session = EditingSession::default();
        session.add_deformation(&draft("a", "0", "1")).unwrap();
        session.add_deformation(&draft("b", "2", "3")).unwrap();
        session
            .edit_deformation(0, &DeformationDraft::new("4", "5", "6", "rotation", "a"))
            .unwrap();
        session.remove_deformation(1).unwrap();

        let code = session.generate().unwrap();
        assert!(code.contains("m.part[4].rotate(axis, m.atom[5], params[deformation])"));
        assert!(!code.contains("\"b\""));
    }

    #[test]
    fn failed_add_does_not_change_session() {
        let mut session = EditingSession::default();
        session.add_deformation(&draft("a", "0", "1")).unwrap();
        let before = session.clone();

        assert!(session.add_deformation(&draft("a", "2", "3")).is_err());
        assert!(session.add_deformation(&draft("c", "2", "2")).is_err());
        assert!(session.remove_deformation(9).is_err());

        assert_eq!(session, before);
    }

    #[test]
    fn empty_session_cannot_generate() {
        assert_eq!(
            EditingSession::default().generate(),
            Err(GenerateError::EmptyRegistry)
        );
    }

    #[test]
    fn description_round_trip_keeps_order_and_parameters() {
        let mut session = EditingSession::default();
        session.parameters_mut().project_name = "fe".to_string();
        session.add_deformation(&draft("z", "0", "1")).unwrap();
        session.add_deformation(&draft("a", "1", "2")).unwrap();

        let restored = EditingSession::from_description(&session.to_description()).unwrap();

        assert_eq!(restored, session);
        assert_eq!(restored.registry().names().collect::<Vec<_>>(), vec!["z", "a"]);
    }
}
