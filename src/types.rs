use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Numeric identifier of a function import.
pub type FunctionId = u32;

/// Kinds of nodes reachable in the metadata graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Function,
    Entity,
}

impl NodeKind {
    /// Returns the string representation of this node kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Function => "function",
            NodeKind::Entity => "entity",
        }
    }
}

/// A scalar or complex property of an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub type_name: String,
}

/// A named relation from one entity type to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationProperty {
    pub name: String,
    pub type_name: String,
}

/// A named parameter of a function import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub type_name: String,
}

/// A structural type in the remote schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    pub full_name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub navigation_properties: Vec<NavigationProperty>,
    #[serde(default)]
    pub function_ids: Vec<FunctionId>,
}

/// An invocable operation, either root-level or bound to an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionImport {
    pub id: FunctionId,
    pub name: String,
    #[serde(default)]
    pub is_root: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub return_type: String,
}

/// The root schema: every entity type and function import of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub entities: BTreeMap<String, EntityType>,
    #[serde(default)]
    pub functions: BTreeMap<FunctionId, FunctionImport>,
}

/// An entity type together with the function imports callable on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(flatten)]
    pub entity_type: EntityType,
    pub functions: Vec<FunctionImport>,
}

/// The node a path resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolved {
    Function(FunctionImport),
    Entity(Entity),
}

impl Resolved {
    pub fn kind(&self) -> NodeKind {
        match self {
            Resolved::Function(_) => NodeKind::Function,
            Resolved::Entity(_) => NodeKind::Entity,
        }
    }

    /// Name of the resolved node: the function name or the entity's full name.
    pub fn name(&self) -> &str {
        match self {
            Resolved::Function(func) => &func.name,
            Resolved::Entity(entity) => &entity.entity_type.full_name,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionImport> {
        match self {
            Resolved::Function(func) => Some(func),
            Resolved::Entity(_) => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Resolved::Function(_) => None,
            Resolved::Entity(entity) => Some(entity),
        }
    }
}

/// A borrowed node of the metadata graph, visited while walking a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphNode<'a> {
    Function(&'a FunctionImport),
    EntityType(&'a EntityType),
}

impl GraphNode<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            GraphNode::Function(_) => NodeKind::Function,
            GraphNode::EntityType(_) => NodeKind::Entity,
        }
    }
}

/// A reference inside the document that points at nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DanglingReference {
    /// An entity type lists a bound function id that does not exist.
    BoundFunction { entity: String, id: FunctionId },
    /// A function import returns an entity type that does not exist.
    ReturnType { function: FunctionId, type_name: String },
    /// A navigation property targets an entity type that does not exist.
    NavigationTarget {
        entity: String,
        property: String,
        type_name: String,
    },
}

/// Counts describing a metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataStats {
    pub entity_count: usize,
    pub collection_count: usize,
    pub system_count: usize,
    pub function_count: usize,
    pub root_function_count: usize,
}
