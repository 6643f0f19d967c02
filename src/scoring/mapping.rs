use std::{collections::HashMap, path::Path};

use serde::Deserialize;
use tracing::warn;

use crate::{core::try_read_to_string, Result};

/// Weekly-file player name → stats provider identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PlayerIdMapping(HashMap<String, String>);

impl PlayerIdMapping {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self(entries)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the mapping file, falling back to an empty mapping (every score
    /// then resolves to 0) when it is missing or unreadable.
    pub fn load_or_empty(path: &Path) -> Self {
        let Some(content) = try_read_to_string(path) else {
            warn!("Mapping file not found: {}", path.display());
            return Self::default();
        };
        match Self::from_json(&content) {
            Ok(mapping) => mapping,
            Err(e) => {
                warn!("Ignoring unreadable mapping file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn id_for(&self, name: &str) -> Option<&str> {
        self.0.get(name.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
