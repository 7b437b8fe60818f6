use super::definition::TreeDefinition;
use super::loader::{DecisionTree, load_tree};
use crate::error::ArtifactError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use tracing::{debug, instrument};

/// Bumped whenever the binary layout of [`CompiledTree`] changes.
pub const ARTIFACT_VERSION: u32 = 1;

/// A validated tree in a compact binary form, for deployments that load the same
/// tree at every startup.
#[derive(Serialize, Deserialize)]
pub struct CompiledTree {
    pub version: u32,
    pub definition: TreeDefinition,
}

impl CompiledTree {
    pub fn new(tree: &DecisionTree) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            definition: tree.to_definition(),
        }
    }

    /// Saves the compiled tree to a file using the bincode format.
    #[instrument(level = "trace", skip(self))]
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| {
            ArtifactError::Generic(format!("Could not create file '{}': {}", path, e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            ArtifactError::Generic(format!("Could not write to file '{}': {}", path, e))
        })?;
        debug!(path, bytes = bytes.len(), "Compiled tree saved");
        Ok(())
    }

    /// Loads a compiled tree from a file.
    #[instrument(level = "trace")]
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path)
            .map_err(|e| ArtifactError::Generic(format!("Could not open file '{}': {}", path, e)))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            ArtifactError::Generic(format!("Could not read from file '{}': {}", path, e))
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        encode_to_vec(self, standard())
            .map_err(|e| ArtifactError::Generic(format!("Serialization failed: {}", e)))
    }

    /// Deserializes a compiled tree from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let compiled: Self = decode_from_slice(bytes, standard())
            .map(|(compiled, _)| compiled)
            .map_err(|e| ArtifactError::Generic(format!("Deserialization failed: {}", e)))?;
        if compiled.version != ARTIFACT_VERSION {
            return Err(ArtifactError::Generic(format!(
                "Unsupported artifact version {} (expected {})",
                compiled.version, ARTIFACT_VERSION
            )));
        }
        Ok(compiled)
    }

    /// Re-validates the stored definition and returns a ready-to-walk tree.
    pub fn into_tree(self) -> Result<DecisionTree, ArtifactError> {
        Ok(load_tree(self.definition)?)
    }
}
