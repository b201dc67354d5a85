use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Upper bound on node executions in one run
    pub max_steps: usize,
    /// Upper bound on model -> tools -> model round-trips in one run
    pub max_tool_rounds: u32,
    /// Capacity of the `spawn_run` event channel
    pub event_buffer: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_steps: 50,
            max_tool_rounds: 8,
            event_buffer: 1000,
        }
    }
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    pub fn with_max_tool_rounds(mut self, max: u32) -> Self {
        self.max_tool_rounds = max;
        self
    }

    pub fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity;
        self
    }
}
