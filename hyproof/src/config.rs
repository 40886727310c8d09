//! Per-scope configuration.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings applied when a [`Scope`](crate::scope::Scope) is created.
///
/// The defaults give every scope the whole `u32` id space starting at zero, which is what most
/// callers want. Narrowing the range is mostly useful to keep two scopes that will later be
/// compared from ever issuing the same variable id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ScopeConfig {
    /// First variable id handed out by the scope's allocator.
    pub first_variable: u32,
    /// Exclusive upper bound of the variable id range.
    pub variable_limit: u32,
    /// Initial number of node slots reserved in the arena.
    pub node_capacity: usize,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            first_variable: 0,
            variable_limit: u32::MAX,
            node_capacity: 64,
        }
    }
}

impl ScopeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_variable(mut self, first: u32) -> Self {
        self.first_variable = first;
        self
    }

    pub fn with_variable_limit(mut self, limit: u32) -> Self {
        self.variable_limit = limit;
        self
    }

    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }
}
