pub mod business;
pub mod explore;
pub mod knowledge;
pub mod learn;
pub mod registry;
pub mod schema;

pub use registry::{RegistryError, ToolError, ToolName, ToolRegistry, ToolRouter, Toolset};
pub use schema::{InputSchema, ParamSpec, ToolSpecification, ValidatedArguments, ValidationError};

use serde::Serialize;
use serde_json::Value;

pub(crate) fn to_result<T: Serialize>(value: T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::Execution(e.to_string()))
}

/// Lowercased whitespace-separated terms of a free-text query.
pub(crate) fn search_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_terms_skip_blank_runs() {
        assert_eq!(search_terms("  Clinical   DATA "), vec!["clinical", "data"]);
        assert!(search_terms("   ").is_empty());
    }
}
