use crate::core::models::deformation::{Deformation, DeformationKind};
use crate::core::models::parameters::ProjectParameters;
use crate::core::models::registry::{DeformationRegistry, RegistryError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Deformation #{index} is invalid: {source}")]
    Deformation {
        index: usize,
        source: RegistryError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DeformationEntry {
    pub name: String,
    pub part: u32,
    #[serde(rename = "atom-1")]
    pub atom_1: u32,
    #[serde(rename = "atom-2")]
    pub atom_2: u32,
    pub kind: DeformationKind,
}

impl From<&Deformation> for DeformationEntry {
    fn from(d: &Deformation) -> Self {
        Self {
            name: d.name().to_string(),
            part: d.part(),
            atom_1: d.atom_1(),
            atom_2: d.atom_2(),
            kind: d.kind(),
        }
    }
}

/// The state of a project form, as stored on disk between command-line invocations.
///
/// ```toml
/// [parameters]
/// molecule-file = "molecule.xyz"
/// left-interval = "7100"
///
/// [[deformations]]
/// name = "d1"
/// part = 1
/// atom-1 = 0
/// atom-2 = 4
/// kind = "shift"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectDescription {
    pub parameters: ProjectParameters,
    pub deformations: Vec<DeformationEntry>,
}

impl ProjectDescription {
    pub fn new(parameters: ProjectParameters, registry: &DeformationRegistry) -> Self {
        Self {
            parameters,
            deformations: registry.iter().map(DeformationEntry::from).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, DescriptionError> {
        let content = std::fs::read_to_string(path).map_err(|e| DescriptionError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| DescriptionError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), DescriptionError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| DescriptionError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, DescriptionError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Replays the stored deformations through the registry, so a hand-edited file gets the same
    /// checks as interactive edits.
    pub fn to_registry(&self) -> Result<DeformationRegistry, DescriptionError> {
        let mut registry = DeformationRegistry::new();
        for (index, entry) in self.deformations.iter().enumerate() {
            let record = Deformation::new(
                entry.part,
                entry.atom_1,
                entry.atom_2,
                entry.kind,
                entry.name.clone(),
            )
            .map_err(|e| DescriptionError::Deformation {
                index,
                source: e.into(),
            })?;
            registry
                .append(record)
                .map_err(|source| DescriptionError::Deformation { index, source })?;
        }
        Ok(registry)
    }
}
