use std::collections::HashMap;

use icu_collator::Collator;

use crate::config::MetanavConfig;
use crate::errors::{MetanavError, Result};
use crate::types::*;

/// Resolves paths such as `Contacts/Orders/Total` against a metadata document.
///
/// The document is borrowed immutably for the resolver's lifetime. Every
/// value handed back to a caller is an owned copy, so mutating a result never
/// touches the document.
///
/// Root function imports are indexed by name once at construction time. When
/// several root functions share a name, the one with the lowest id wins.
/// Name listings are ordered with a root-locale collator.
pub struct PathResolver<'a> {
    pub(super) metadata: &'a Metadata,
    pub(super) config: MetanavConfig,
    /// Root function imports keyed by name.
    root_cache: HashMap<&'a str, &'a FunctionImport>,
    pub(super) collator: Collator,
}

impl<'a> PathResolver<'a> {
    /// Creates a resolver using the default configuration.
    pub fn new(metadata: &'a Metadata) -> Result<Self> {
        Self::with_config(metadata, MetanavConfig::default())
    }

    /// Creates a resolver with an explicit configuration.
    ///
    /// # Errors
    ///
    /// [`MetanavError::Collation`] if the name collator cannot be built.
    pub fn with_config(metadata: &'a Metadata, config: MetanavConfig) -> Result<Self> {
        let collator = super::search::name_collator()?;
        let mut root_cache: HashMap<&'a str, &'a FunctionImport> = HashMap::new();

        // `functions` iterates in ascending id order, so the first insert wins.
        for func in metadata.functions.values().filter(|f| f.is_root) {
            root_cache.entry(func.name.as_str()).or_insert(func);
        }

        tracing::debug!(
            roots = root_cache.len(),
            entities = metadata.entities.len(),
            "path resolver ready"
        );

        Ok(Self {
            metadata,
            config,
            root_cache,
            collator,
        })
    }

    /// The configuration this resolver classifies names with.
    pub fn config(&self) -> &MetanavConfig {
        &self.config
    }

    /// Resolves a path to the node named by its last segment.
    ///
    /// Returns `Ok(None)` when the first segment is not the name of a root
    /// function import, regardless of the remaining segments. A path of one
    /// segment yields the root function itself. When the path ends on an
    /// entity type, the result carries the function imports bound to it.
    ///
    /// # Errors
    ///
    /// - [`MetanavError::PropertyNotFound`] when a later segment matches
    ///   neither a navigation property nor a bound function.
    /// - [`MetanavError::MissingEntity`] / [`MetanavError::MissingFunction`]
    ///   when the walk dereferences a name or id absent from the document.
    pub fn resolve(&self, path: &str) -> Result<Option<Resolved>> {
        let mut segments = path.split('/');
        let Some(root) = segments.next().and_then(|name| self.find_root(name)) else {
            tracing::debug!(path, "no root function for path");
            return Ok(None);
        };

        let mut node = GraphNode::Function(root);
        for segment in segments {
            node = self.step(node, segment)?;
        }

        let resolved = match node {
            GraphNode::Function(func) => Resolved::Function(func.clone()),
            GraphNode::EntityType(entity_type) => Resolved::Entity(self.enrich(entity_type)?),
        };
        Ok(Some(resolved))
    }

    /// Maps function ids to their function imports, preserving order.
    pub fn get_functions(&self, ids: &[FunctionId]) -> Result<Vec<FunctionImport>> {
        ids.iter()
            .map(|id| self.metadata.function(*id).cloned())
            .collect()
    }

    /// Looks up an entity type by full name and attaches its bound functions.
    pub fn get_entity_by_name(&self, full_name: &str) -> Result<Entity> {
        let entity_type = self.metadata.entity(full_name)?;
        self.enrich(entity_type)
    }

    /// Finds a function import by name among the entity's resolved functions.
    pub fn lookup_function(&self, entity: &Entity, name: &str) -> Option<FunctionImport> {
        entity.functions.iter().find(|f| f.name == name).cloned()
    }

    /// Finds a property by name on the entity.
    pub fn lookup_property(&self, entity: &Entity, name: &str) -> Option<Property> {
        entity
            .entity_type
            .properties
            .iter()
            .find(|p| p.name == name)
            .cloned()
    }

    /// Returns every root function import, sorted by name like entity search.
    ///
    /// These are the only valid first segments of a path.
    pub fn root_functions(&self) -> Vec<FunctionImport> {
        let mut roots: Vec<FunctionImport> =
            self.root_cache.values().map(|f| (*f).clone()).collect();
        roots.sort_by(|a, b| {
            self.collator
                .compare(&a.name, &b.name)
                .then(a.id.cmp(&b.id))
        });
        roots
    }

    // ------------------------------------------------------------------
    // Traversal helpers shared with URI template construction
    // ------------------------------------------------------------------

    /// Finds the root function import named `name`.
    pub(super) fn find_root(&self, name: &str) -> Option<&'a FunctionImport> {
        self.root_cache.get(name).copied()
    }

    /// Resolves one segment against the current node.
    ///
    /// A function import is first replaced by the entity type it returns.
    /// Navigation properties are searched before bound functions, so a
    /// navigation property shadows a bound function with the same name.
    pub(super) fn step(&self, node: GraphNode<'a>, segment: &str) -> Result<GraphNode<'a>> {
        let metadata: &'a Metadata = self.metadata;
        let entity_type = match node {
            GraphNode::Function(func) => metadata.entity(&func.return_type)?,
            GraphNode::EntityType(entity_type) => entity_type,
        };

        if let Some(nav) = entity_type
            .navigation_properties
            .iter()
            .find(|nav| nav.name == segment)
        {
            tracing::trace!(
                from = %entity_type.full_name,
                segment,
                target = %nav.type_name,
                "navigation property"
            );
            return Ok(GraphNode::EntityType(metadata.entity(&nav.type_name)?));
        }

        for id in &entity_type.function_ids {
            let func = metadata.function(*id)?;
            if func.name == segment {
                tracing::trace!(from = %entity_type.full_name, segment, id, "bound function");
                return Ok(GraphNode::Function(func));
            }
        }

        tracing::debug!(
            node = node.kind().as_str(),
            entity = %entity_type.full_name,
            segment,
            "no navigation property or bound function"
        );
        Err(MetanavError::PropertyNotFound {
            name: segment.to_string(),
        })
    }

    /// Copies an entity type and resolves its bound function ids.
    fn enrich(&self, entity_type: &EntityType) -> Result<Entity> {
        Ok(Entity {
            functions: self.get_functions(&entity_type.function_ids)?,
            entity_type: entity_type.clone(),
        })
    }
}
