use crate::errors::Result;
use crate::types::*;

use super::PathResolver;

impl PathResolver<'_> {
    /// Builds the URI template a client would request for `path`.
    ///
    /// Function segments render as `name/`, or `name(...)/` when the function
    /// takes real parameters. Navigation segments render as the segment name
    /// followed by `/`.
    ///
    /// Returns `Ok(None)` under the same condition as [`PathResolver::resolve`]:
    /// the first segment names no root function. Failures on later segments
    /// are returned as errors.
    pub fn build_uri_template(&self, path: &str) -> Result<Option<String>> {
        let mut segments = path.split('/');
        let Some(root) = segments.next().and_then(|name| self.find_root(name)) else {
            tracing::debug!(path, "no root function for uri template");
            return Ok(None);
        };

        let mut template = self.function_template(root);
        let mut node = GraphNode::Function(root);
        for segment in segments {
            node = self.step(node, segment)?;
            match node {
                GraphNode::Function(func) => template.push_str(&self.function_template(func)),
                GraphNode::EntityType(_) => {
                    template.push_str(segment);
                    template.push('/');
                }
            }
        }

        Ok(Some(template))
    }

    /// Returns true if the function takes at least one real argument.
    ///
    /// A lone binding parameter (named `this` by default) does not count.
    pub fn has_parameters(&self, func: &FunctionImport) -> bool {
        match func.parameters.as_slice() {
            [] => false,
            [only] => only.name != self.config.bound_parameter,
            _ => true,
        }
    }

    fn function_template(&self, func: &FunctionImport) -> String {
        if self.has_parameters(func) {
            format!("{}(...)/", func.name)
        } else {
            format!("{}/", func.name)
        }
    }
}
