//! Graph execution for conversational agent workflows
//!
//! A [`Graph`] is a set of named [`Node`]s joined by static or conditional
//! edges. The [`Executor`] runs it against a [`State`], merging each node's
//! partial update, either to completion or as a stream of updates.

pub mod builder;
pub mod config;
pub mod error;
pub mod events;
pub mod executor;
pub mod graph;
pub mod node;
pub mod nodes;
pub mod router;
pub mod state;
pub mod tools;

pub use builder::GraphBuilder;
pub use config::GraphConfig;
pub use error::{GraphError, NodeError, RoutingError, ToolError};
pub use events::{NodeUpdate, StreamEvent};
pub use executor::Executor;
pub use graph::{Edge, Graph};
pub use node::{FnNode, Node, NodeKind};
pub use nodes::{ModelNode, ToolNode};
pub use router::{FnRouter, Route, Router, ToolsRouter, END};
pub use state::{keys, merge, State};
pub use tools::{FnTool, Tool, ToolRegistry};
