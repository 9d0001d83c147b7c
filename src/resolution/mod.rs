/// Path resolution module.
///
/// Walks slash-delimited paths through a metadata document, starting at a
/// root function import and following navigation properties and bound
/// functions segment by segment.
mod resolver;
mod search;
mod uri;

pub use resolver::PathResolver;
