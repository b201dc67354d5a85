use crate::error::RoutingError;
use crate::node::Node;
use crate::router::{Route, Router, END};
use crate::state::State;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

/// Outgoing edge of a node
#[derive(Clone)]
pub enum Edge {
    Static(Route),
    Conditional(Arc<dyn Router>),
}

impl Edge {
    /// Every route this edge can take
    pub fn targets(&self) -> Vec<Route> {
        match self {
            Edge::Static(route) => vec![route.clone()],
            Edge::Conditional(router) => router.targets(),
        }
    }
}

/// Compiled, validated graph definition
///
/// Built through [`GraphBuilder`](crate::builder::GraphBuilder); every edge
/// target and the entry point are known to exist.
pub struct Graph {
    pub(crate) nodes: HashMap<String, Arc<dyn Node>>,
    pub(crate) edges: HashMap<String, Edge>,
    pub(crate) entry: String,
    /// Node names in registration order
    pub(crate) order: Vec<String>,
}

impl Graph {
    /// Create a builder for fluent construction
    pub fn builder() -> crate::builder::GraphBuilder {
        crate::builder::GraphBuilder::new()
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn node(&self, name: &str) -> Option<&Arc<dyn Node>> {
        self.nodes.get(name)
    }

    pub fn node_names(&self) -> &[String] {
        &self.order
    }

    pub fn edge(&self, from: &str) -> Option<&Edge> {
        self.edges.get(from)
    }

    /// Resolve the next route after `current` has run and its output was merged
    pub fn resolve_next(&self, current: &str, state: &State) -> Result<Route, RoutingError> {
        let edge = self
            .edges
            .get(current)
            .ok_or_else(|| RoutingError::Unresolved(format!("Node '{}' has no outgoing edge", current)))?;

        let route = match edge {
            Edge::Static(route) => route.clone(),
            Edge::Conditional(router) => router.route(state)?,
        };

        match &route {
            Route::Node(name) if !self.nodes.contains_key(name) => {
                Err(RoutingError::UnknownTarget(name.clone()))
            }
            _ => Ok(route),
        }
    }

    /// Render the topology as a Mermaid flowchart
    ///
    /// Conditional edges are drawn dotted.
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD;\n");
        let _ = writeln!(out, "    __start__ --> {};", self.entry);
        for name in &self.order {
            let Some(edge) = self.edges.get(name) else {
                continue;
            };
            let arrow = match edge {
                Edge::Static(_) => "-->",
                Edge::Conditional(_) => "-.->",
            };
            for target in edge.targets() {
                let target = match target {
                    Route::Node(node) => node,
                    Route::End => END.to_string(),
                };
                let _ = writeln!(out, "    {} {} {};", name, arrow, target);
            }
        }
        out
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("entry", &self.entry)
            .field("nodes", &self.order)
            .finish()
    }
}
