//! Hyproof: a scoped kernel for first-order sentences and their matching hooks.
//!
//! This crate builds well-formed first-order expression trees (terms and sentences), tracks
//! which variables are free or bound as each node is constructed, and derives canonical
//! signature strings ("hooks") under which a theorem store can recognise two formulas as the
//! same up to renaming of bound variables.
//!
//! Structure
//!  - [`scope::Scope`] owns the nodes of one logical scope in a generational arena, hands out
//!    variable ids, and decides which nodes survive [`scope::Scope::collect`].
//!  - [`node::Node`] is the immutable node itself; [`node::check`] holds the invariants every
//!    constructor enforces before a node exists.
//!  - The builders of [`dsl`] (`and`, `forall`, `member_of`, `apply`, ...) are methods on
//!    `Scope` and are the intended way of building formulas.
//!  - [`hook::HookCanonicalizer`] reads a finished tree and produces its set of hooks.
//!
//! Failure model
//!  - Every invariant violation is reported as a [`error::KernelError`] before any node is
//!    inserted; construction never leaves a partially-built node behind.
//!
//! Example
//! ```
//! use hyproof::prelude::*;
//!
//! let mut scope = Scope::new();
//! let f = SymbolId::fresh().unwrap();
//! let x = scope.variable().unwrap();
//!
//! // f(x) = f(x)
//! let lhs = scope.function(f, &[x]).unwrap();
//! let rhs = scope.function(f, &[x]).unwrap();
//! let eq = scope.equals(lhs, rhs).unwrap();
//!
//! let hooks = scope.get_hooks(eq).unwrap();
//! assert!(hooks.len() > 1);
//! ```

/// Per-scope configuration.
pub mod config;
/// Builder operations for sentences, terms and blocks.
pub mod dsl;
/// Error values reported by every fallible operation.
pub mod error;
/// Canonical matching signatures.
pub mod hook;
/// Node data model, tags and accessors.
pub mod node;
/// Scope-local arena and lifetime tracking.
pub mod scope;
/// Theorem store hand-off.
pub mod store;
/// Variable identifiers and allocation.
pub mod variable;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::config::ScopeConfig;
    pub use crate::error::{ErrorKind, KernelError, KernelResult};
    pub use crate::hook::HookCanonicalizer;
    pub use crate::node::{BuiltinSymbol, Connective, Node, NodeKind, QuantifierKind, SymbolId};
    pub use crate::scope::{NodeId, Scope};
    pub use crate::store::TheoremStore;
    pub use crate::variable::{VariableAllocator, VariableId};
}
