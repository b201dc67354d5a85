use crate::error::GraphError;
use crate::graph::{Edge, Graph};
use crate::node::Node;
use crate::router::{Route, Router};
use std::collections::HashMap;
use std::sync::Arc;

/// Builder for constructing a [`Graph`]
///
/// ```
/// use conduit_graph::{FnNode, GraphBuilder, State, END};
///
/// let graph = GraphBuilder::new()
///     .add_node("greet", FnNode::new(|_state: &State| Ok(State::new().with_field("greeted", true))))
///     .set_entry_point("greet")
///     .add_edge("greet", END)
///     .compile()
///     .unwrap();
/// assert_eq!(graph.entry(), "greet");
/// ```
pub struct GraphBuilder {
    nodes: HashMap<String, Arc<dyn Node>>,
    edges: HashMap<String, Edge>,
    entry: Option<String>,
    order: Vec<String>,
    problems: Vec<String>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            entry: None,
            order: Vec::new(),
            problems: Vec::new(),
        }
    }

    /// Register a node under a unique name
    pub fn add_node(self, name: impl Into<String>, node: impl Node + 'static) -> Self {
        self.add_shared_node(name, Arc::new(node))
    }

    pub fn add_shared_node(mut self, name: impl Into<String>, node: Arc<dyn Node>) -> Self {
        let name = name.into();
        if matches!(Route::node(name.as_str()), Route::End) {
            self.problems.push(format!("'{}' is reserved for the terminal sentinel", name));
        } else if self.nodes.insert(name.clone(), node).is_some() {
            self.problems.push(format!("Node '{}' is defined twice", name));
        } else {
            self.order.push(name);
        }
        self
    }

    pub fn set_entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry = Some(name.into());
        self
    }

    /// Unconditional edge; `to` may be [`END`](crate::router::END)
    pub fn add_edge(self, from: impl Into<String>, to: impl Into<Route>) -> Self {
        self.insert_edge(from.into(), Edge::Static(to.into()))
    }

    /// Edge whose target is decided by `router` after `from` runs
    pub fn add_conditional_edges(self, from: impl Into<String>, router: impl Router + 'static) -> Self {
        self.insert_edge(from.into(), Edge::Conditional(Arc::new(router)))
    }

    fn insert_edge(mut self, from: String, edge: Edge) -> Self {
        if self.edges.insert(from.clone(), edge).is_some() {
            self.problems.push(format!("Node '{}' has more than one outgoing edge", from));
        }
        self
    }

    /// Validate and build the graph
    pub fn compile(self) -> Result<Graph, GraphError> {
        if let Some(problem) = self.problems.into_iter().next() {
            return Err(GraphError::Invalid(problem));
        }

        let entry = self
            .entry
            .ok_or_else(|| GraphError::Invalid("Entry point is required".to_string()))?;
        if !self.nodes.contains_key(&entry) {
            return Err(GraphError::Invalid(format!("Entry point '{}' is not a node", entry)));
        }

        for name in &self.order {
            if !self.edges.contains_key(name) {
                return Err(GraphError::Invalid(format!("Node '{}' has no outgoing edge", name)));
            }
        }

        for (from, edge) in &self.edges {
            if !self.nodes.contains_key(from) {
                return Err(GraphError::Invalid(format!("Edge starts at unknown node '{}'", from)));
            }
            for target in edge.targets() {
                if let Route::Node(name) = &target {
                    if !self.nodes.contains_key(name) {
                        return Err(GraphError::Invalid(format!(
                            "Edge from '{}' points at unknown node '{}'",
                            from, name
                        )));
                    }
                }
            }
        }

        tracing::debug!(entry = %entry, nodes = self.order.len(), "Graph compiled");

        Ok(Graph {
            nodes: self.nodes,
            edges: self.edges,
            entry,
            order: self.order,
        })
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
