//! Loading and integrity checks for metadata documents.
//!
//! The resolver only reads a [`Metadata`] value; this module is where the
//! document comes from and where broken references can be found up front.

use std::fs;
use std::path::Path;

use crate::config::MetanavConfig;
use crate::errors::{MetanavError, Result};
use crate::types::*;

/// Reads and parses a metadata document from a JSON file.
pub fn load_metadata(path: &Path) -> Result<Metadata> {
    let contents = fs::read_to_string(path).map_err(|e| MetanavError::Metadata {
        message: format!("failed to read metadata file: {}", e),
        path: path.display().to_string(),
    })?;

    let metadata = serde_json::from_str::<Metadata>(&contents).map_err(|e| {
        MetanavError::Metadata {
            message: format!("failed to parse metadata file: {}", e),
            path: path.display().to_string(),
        }
    })?;

    tracing::debug!(
        path = %path.display(),
        entities = metadata.entities.len(),
        functions = metadata.functions.len(),
        "loaded metadata document"
    );
    Ok(metadata)
}

impl Metadata {
    /// Parses a metadata document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Looks up an entity type by its full name.
    pub fn entity(&self, full_name: &str) -> Result<&EntityType> {
        self.entities
            .get(full_name)
            .ok_or_else(|| MetanavError::MissingEntity {
                name: full_name.to_string(),
            })
    }

    /// Looks up a function import by id.
    pub fn function(&self, id: FunctionId) -> Result<&FunctionImport> {
        self.functions
            .get(&id)
            .ok_or(MetanavError::MissingFunction { id })
    }

    /// Lists every reference in the document that does not resolve.
    ///
    /// Entities are visited in name order, then functions in id order.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();

        for entity in self.entities.values() {
            for id in &entity.function_ids {
                if !self.functions.contains_key(id) {
                    dangling.push(DanglingReference::BoundFunction {
                        entity: entity.full_name.clone(),
                        id: *id,
                    });
                }
            }
            for nav in &entity.navigation_properties {
                if !self.entities.contains_key(&nav.type_name) {
                    dangling.push(DanglingReference::NavigationTarget {
                        entity: entity.full_name.clone(),
                        property: nav.name.clone(),
                        type_name: nav.type_name.clone(),
                    });
                }
            }
        }

        for func in self.functions.values() {
            if !self.entities.contains_key(&func.return_type) {
                dangling.push(DanglingReference::ReturnType {
                    function: func.id,
                    type_name: func.return_type.clone(),
                });
            }
        }

        dangling
    }

    /// Summarises the document, classifying entity names with `config`.
    pub fn stats(&self, config: &MetanavConfig) -> MetadataStats {
        let mut stats = MetadataStats {
            function_count: self.functions.len(),
            root_function_count: self.functions.values().filter(|f| f.is_root).count(),
            ..MetadataStats::default()
        };

        for name in self.entities.keys() {
            if config.is_hidden(name) {
                stats.system_count += 1;
            } else if config.is_collection(name) {
                stats.collection_count += 1;
            } else {
                stats.entity_count += 1;
            }
        }

        stats
    }
}
