pub mod model_node;
pub mod tool_node;

pub use model_node::ModelNode;
pub use tool_node::ToolNode;
