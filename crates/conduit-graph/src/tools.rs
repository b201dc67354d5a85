use crate::error::ToolError;
use async_trait::async_trait;
use conduit_llm::ToolSpec;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// External capability the model can request by name
#[async_trait]
pub trait Tool: Send + Sync {
    /// Definition offered to the model; `spec().name` is the dispatch key
    fn spec(&self) -> ToolSpec;

    async fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError>;
}

/// Tools available to a tool node, keyed by name
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, tool: impl Tool + 'static) -> Self {
        self.register(Arc::new(tool));
        self
    }

    /// Register a tool; a tool with the same name is replaced
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.spec().name;
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!("Tool '{}' registered twice, keeping the latest", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|tool| tool.spec()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Tool backed by a synchronous closure
pub struct FnTool<F> {
    spec: ToolSpec,
    f: F,
}

impl<F> FnTool<F>
where
    F: Fn(&Map<String, Value>) -> Result<String, ToolError> + Send + Sync,
{
    pub fn new(spec: ToolSpec, f: F) -> Self {
        Self { spec, f }
    }
}

#[async_trait]
impl<F> Tool for FnTool<F>
where
    F: Fn(&Map<String, Value>) -> Result<String, ToolError> + Send + Sync,
{
    fn spec(&self) -> ToolSpec {
        self.spec.clone()
    }

    async fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        (self.f)(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo_tool(
        name: &str,
    ) -> FnTool<impl Fn(&Map<String, Value>) -> Result<String, ToolError> + Send + Sync> {
        FnTool::new(
            ToolSpec::new(name, "Echo arguments", json!({"type": "object"})),
            |args: &Map<String, Value>| Ok(Value::Object(args.clone()).to_string()),
        )
    }

    #[tokio::test]
    async fn test_registry_lookup_and_call() {
        let registry = ToolRegistry::new().with_tool(echo_tool("echo"));

        assert!(registry.contains("echo"));
        assert_eq!(registry.names(), vec!["echo".to_string()]);
        assert_eq!(registry.specs()[0].description, "Echo arguments");

        let mut args = Map::new();
        args.insert("q".to_string(), json!("rust"));
        let out = registry.get("echo").unwrap().call(&args).await.unwrap();
        assert_eq!(out, r#"{"q":"rust"}"#);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(echo_tool("echo")));
        registry.register(Arc::new(echo_tool("echo")));
        assert_eq!(registry.len(), 1);
    }
}
