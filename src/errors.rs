use thiserror::Error;

use crate::types::FunctionId;

/// Errors that can occur while navigating a metadata document.
#[derive(Error, Debug)]
pub enum MetanavError {
    #[error("property or function not found with name \"{name}\"")]
    PropertyNotFound { name: String },

    #[error("entity type not found in metadata: {name}")]
    MissingEntity { name: String },

    #[error("function import not found in metadata: {id}")]
    MissingFunction { id: FunctionId },

    #[error("metadata error: {message} (path: {path})")]
    Metadata { message: String, path: String },

    #[error("collation error: {message}")]
    Collation { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `MetanavError`.
pub type Result<T> = std::result::Result<T, MetanavError>;
