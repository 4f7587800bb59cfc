//! Per-endpoint tool registries.
//!
//! Every chat surface declares its tools as a closed enum implementing
//! [`ToolName`]. A [`Toolset`] maps each variant to its specification and
//! handles it in an exhaustive `match`, so adding a variant without a handler
//! does not compile. [`ToolRegistry`] indexes the toolset by wire name and is
//! the only path from a model-chosen name to a handler: arguments are
//! validated against the variant's schema before the handler ever runs.

use crate::tools::schema::{ToolSpecification, ValidatedArguments, ValidationError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Closed set of tool names for one endpoint.
pub trait ToolName: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    /// The name the model uses to call this tool.
    fn as_str(self) -> &'static str;
}

#[async_trait]
pub trait Toolset: Send + Sync + 'static {
    type Tool: ToolName;

    fn specification(&self, tool: Self::Tool) -> ToolSpecification;

    async fn execute(&self, tool: Self::Tool, args: ValidatedArguments) -> Result<Value, ToolError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tool '{0}' is registered twice")]
    DuplicateTool(&'static str),

    #[error("Tool variant {variant} declares name '{declared}'")]
    NameMismatch {
        variant: &'static str,
        declared: &'static str,
    },
}

/// Why a tool call produced no result. Reported back to the model as a
/// structured payload; never aborts the turn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Tool '{0}' timed out")]
    Timeout(String),

    #[error("Tool execution failed: {0}")]
    Execution(String),
}

impl ToolError {
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::Validation(ValidationError::UnknownTool(_)) => "unknown_tool",
            ToolError::Validation(_) => "validation_error",
            ToolError::Timeout(_) => "timeout",
            ToolError::Execution(_) => "execution_error",
        }
    }

    /// Tool-role payload the model sees in place of a result.
    pub fn to_payload(&self) -> Value {
        json!({
            "error": self.kind(),
            "message": self.to_string(),
        })
    }
}

/// A tool call whose arguments satisfied the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInvocation<T> {
    pub tool: T,
    pub arguments: ValidatedArguments,
}

pub struct ToolRegistry<S: Toolset> {
    toolset: S,
    specifications: Vec<ToolSpecification>,
    by_name: HashMap<&'static str, S::Tool>,
}

impl<S: Toolset> ToolRegistry<S> {
    /// Register every variant of the toolset's tool enum.
    pub fn new(toolset: S) -> Result<Self, RegistryError> {
        let mut registry = Self {
            toolset,
            specifications: Vec::with_capacity(S::Tool::ALL.len()),
            by_name: HashMap::with_capacity(S::Tool::ALL.len()),
        };

        for &tool in S::Tool::ALL {
            let spec = registry.toolset.specification(tool);
            registry.register(tool, spec)?;
        }

        tracing::debug!(tools = registry.specifications.len(), "Tool registry built");
        Ok(registry)
    }

    /// Add one tool. Names are unique within a registry and must match the
    /// variant's wire name.
    pub fn register(
        &mut self,
        tool: S::Tool,
        spec: ToolSpecification,
    ) -> Result<&ToolSpecification, RegistryError> {
        if spec.name != tool.as_str() {
            return Err(RegistryError::NameMismatch {
                variant: tool.as_str(),
                declared: spec.name,
            });
        }
        if self.by_name.contains_key(spec.name) {
            return Err(RegistryError::DuplicateTool(spec.name));
        }

        self.by_name.insert(spec.name, tool);
        self.specifications.push(spec);
        Ok(&self.specifications[self.specifications.len() - 1])
    }

    pub fn specification(&self, name: &str) -> Option<&ToolSpecification> {
        self.specifications.iter().find(|s| s.name == name)
    }

    pub fn validate(
        &self,
        name: &str,
        raw: &Value,
    ) -> Result<ValidatedInvocation<S::Tool>, ValidationError> {
        let tool = *self
            .by_name
            .get(name)
            .ok_or_else(|| ValidationError::UnknownTool(name.to_string()))?;
        let spec = self
            .specification(name)
            .ok_or_else(|| ValidationError::UnknownTool(name.to_string()))?;

        Ok(ValidatedInvocation {
            tool,
            arguments: spec.validate(raw)?,
        })
    }

    pub async fn execute(&self, invocation: ValidatedInvocation<S::Tool>) -> Result<Value, ToolError> {
        self.toolset
            .execute(invocation.tool, invocation.arguments)
            .await
    }

    pub fn toolset(&self) -> &S {
        &self.toolset
    }
}

/// Object-safe face of a registry, used by the orchestrator.
#[async_trait]
pub trait ToolRouter: Send + Sync {
    fn specifications(&self) -> &[ToolSpecification];

    /// Tool definitions in the completion API's wire format.
    fn function_definitions(&self) -> Vec<Value> {
        self.specifications()
            .iter()
            .map(ToolSpecification::to_function_definition)
            .collect()
    }

    /// Validate, then execute. A call that fails validation never reaches
    /// its handler.
    async fn invoke(&self, name: &str, arguments: &Value) -> Result<Value, ToolError>;
}

#[async_trait]
impl<S: Toolset> ToolRouter for ToolRegistry<S> {
    fn specifications(&self) -> &[ToolSpecification] {
        &self.specifications
    }

    async fn invoke(&self, name: &str, arguments: &Value) -> Result<Value, ToolError> {
        let invocation = match self.validate(name, arguments) {
            Ok(invocation) => invocation,
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "Rejected tool call");
                metrics::counter!("tool_errors_total", "kind" => "validation").increment(1);
                return Err(e.into());
            }
        };

        let tool_name = invocation.tool.as_str();
        metrics::counter!("tool_invocations_total", "tool" => tool_name).increment(1);

        let result = self.execute(invocation).await;
        if let Err(e) = &result {
            tracing::warn!(tool = tool_name, error = %e, "Tool execution failed");
            metrics::counter!("tool_errors_total", "kind" => "execution").increment(1);
        }
        result
    }
}
