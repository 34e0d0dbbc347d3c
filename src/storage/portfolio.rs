//! Persistence of the property list

use crate::{storage::property::Property, storage::seed::demo_properties, Error, Result};
use std::path::{Path, PathBuf};

/// Durable home of the property list: one JSON file, rewritten on every change
#[derive(Debug, Clone)]
pub struct PortfolioFile {
    path: PathBuf,
}

impl PortfolioFile {
    /// Create an adapter for the file at `path` (not touched until load/save)
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved list
    ///
    /// Problems are logged, never returned.
    ///
    /// # Returns
    /// The saved properties, or the demo seed when the file is missing,
    /// empty, unreadable or not a property list
    pub fn load(&self) -> Vec<Property> {
        match self.try_load() {
            Ok(Some(properties)) => {
                tracing::info!("Loaded {} properties from {}", properties.len(), self.path.display());
                properties
            }
            Ok(None) => {
                tracing::info!("No saved properties at {}, using demo seed", self.path.display());
                demo_properties()
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable property list {}: {}", self.path.display(), e);
                demo_properties()
            }
        }
    }

    /// Load the saved list, distinguishing "absent" from "corrupt"
    pub fn try_load(&self) -> Result<Option<Vec<Property>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::Storage(format!("Failed to read property list: {}", e)))?;

        if json.trim().is_empty() {
            return Ok(None);
        }

        let properties: Vec<Property> = serde_json::from_str(&json)?;
        Ok(Some(properties))
    }

    /// Serialize the full list to the backing file
    pub fn save(&self, properties: &[Property]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| Error::Storage(format!("Failed to create state directory: {}", e)))?;
            }
        }

        let json = serde_json::to_string_pretty(properties)?;
        std::fs::write(&self.path, json)
            .map_err(|e| Error::Storage(format!("Failed to write property list: {}", e)))?;
        Ok(())
    }
}
