//! Scope-local arena: node storage, variable allocation and lifetime tracking.
//!
//! Role
//! - A [`Scope`] owns every node built through it, in a generational [`SlotMap`]. Handles are
//!   [`NodeId`]s, so a subtree can be referenced by many parents without shared pointers. Each
//!   handle also carries the id of the scope that issued it, and no other scope accepts it.
//! - Every new node starts in the *tracked* (collectible) generation. [`Scope::preserve`] moves a
//!   whole subtree into the *retained* generation; [`Scope::collect`] frees every node that is
//!   still tracked.
//! - The scope also owns the [`VariableAllocator`] issuing variable ids, so nothing here is
//!   ambient or global.
//!
//! Invariant
//! - The retained generation is closed downwards: if a node is retained, so are all of its
//!   descendants. This is what makes [`Scope::collect`] safe for preserved trees and lets
//!   `preserve` stop early on already-retained nodes.
//!
//! Example
//! ```
//! use hyproof::prelude::*;
//!
//! let mut scope = Scope::new();
//! let x = scope.variable().unwrap();
//! let y = scope.variable().unwrap();
//! let member = scope.member_of(x, y).unwrap();
//! let closed = scope.forall(x, member).unwrap();
//!
//! scope.preserve(closed).unwrap();
//! let _scratch = scope.not(member).unwrap();
//! assert_eq!(scope.collect(), 1);
//! assert!(scope.get(closed).unwrap().is_sentence());
//! ```
use std::{
    collections::HashSet,
    sync::atomic::{AtomicU64, Ordering},
};

use log::{debug, trace};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::{
    config::ScopeConfig,
    error::{KernelError, KernelResult},
    node::{Node, NodeKind, check},
    variable::VariableAllocator,
};

new_key_type! {
    struct NodeKey;
}

static SCOPE_POOL: AtomicU64 = AtomicU64::new(0);

/// Stable handle of a node inside its [`Scope`].
///
/// A handle is branded with the scope that issued it; any other scope rejects it with
/// [`KernelError::ForeignNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    scope: u64,
    key: NodeKey,
}

pub struct Scope {
    id: u64,
    allocator: VariableAllocator,
    nodes: SlotMap<NodeKey, Node>,
    tracked: HashSet<NodeKey>,
}

impl Scope {
    /// Create an empty scope with the default [`ScopeConfig`].
    pub fn new() -> Self {
        Self::with_config(ScopeConfig::default())
    }

    pub fn with_config(config: ScopeConfig) -> Self {
        Self {
            id: SCOPE_POOL.fetch_add(1, Ordering::Relaxed),
            allocator: VariableAllocator::with_range(config.first_variable, config.variable_limit),
            nodes: SlotMap::with_capacity_and_key(config.node_capacity),
            tracked: HashSet::with_capacity(config.node_capacity),
        }
    }

    /// Validate and insert a node.
    ///
    /// Semantics
    /// - `subtype` is interpreted according to `kind`. For [`NodeKind::Variable`] it is ignored
    ///   and a fresh id is drawn from the scope's allocator instead.
    /// - All invariants are checked before anything is allocated: on error no node exists and
    ///   no variable id has been consumed.
    /// - The new node starts out tracked, see [`Scope::preserve`].
    pub fn construct(
        &mut self,
        kind: NodeKind,
        subtype: u32,
        children: &[NodeId],
    ) -> KernelResult<NodeId> {
        let mut scoping = {
            let resolved: SmallVec<&Node, 4> = children
                .iter()
                .map(|&id| self.get(id))
                .collect::<KernelResult<_>>()?;

            check::validate(kind, subtype, &resolved).inspect_err(|err| {
                debug!("rejected {kind} node: {err}");
            })?
        };

        let subtype = if kind == NodeKind::Variable {
            let id = self.allocator.new_variable()?;
            scoping.free.insert(id);
            id.raw()
        } else {
            subtype
        };

        let key = self.nodes.insert(Node {
            kind,
            subtype,
            children: children.iter().copied().collect(),
            free: scoping.free,
            bound: scoping.bound,
        });
        self.tracked.insert(key);
        let id = NodeId {
            scope: self.id,
            key,
        };
        trace!("constructed {kind}/{subtype} as {id:?} with {} children", children.len());
        Ok(id)
    }

    /// Resolve a handle, failing if its node was collected or was issued by another scope.
    pub fn get(&self, id: NodeId) -> KernelResult<&Node> {
        if id.scope != self.id {
            return Err(KernelError::ForeignNode(id));
        }
        self.nodes.get(id.key).ok_or(KernelError::DanglingNode(id))
    }

    /// The i-th child of a node.
    pub fn child(&self, id: NodeId, index: usize) -> KernelResult<NodeId> {
        self.get(id)?.child(index)
    }

    /// Whether `id` still refers to a live node of this scope.
    pub fn contains(&self, id: NodeId) -> bool {
        id.scope == self.id && self.nodes.contains_key(id.key)
    }

    /// Number of live nodes, tracked and retained.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }

    pub fn retained_len(&self) -> usize {
        self.nodes.len() - self.tracked.len()
    }

    pub fn is_tracked(&self, id: NodeId) -> bool {
        id.scope == self.id && self.tracked.contains(&id.key)
    }

    pub fn allocator(&self) -> &VariableAllocator {
        &self.allocator
    }

    /// Move `id` and its whole subtree out of the collectible generation.
    ///
    /// Idempotent: preserving an already-retained node (or a node whose subtree was partially
    /// preserved before) only walks the part that is still tracked. Returns the number of nodes
    /// that changed generation.
    pub fn preserve(&mut self, id: NodeId) -> KernelResult<usize> {
        self.get(id)?;

        let mut moved = 0usize;
        let mut stack: SmallVec<NodeKey, 16> = SmallVec::new();
        stack.push(id.key);
        while let Some(current) = stack.pop() {
            // Retained nodes have retained descendants; nothing below them to do.
            if !self.tracked.remove(&current) {
                continue;
            }
            moved += 1;
            if let Some(node) = self.nodes.get(current) {
                stack.extend(node.children.iter().map(|child| child.key));
            }
        }

        debug!("preserved {moved} node(s) under {id:?}");
        Ok(moved)
    }

    /// Free every node that is still tracked and return how many were freed.
    ///
    /// Handles to freed nodes become dangling: resolving them yields
    /// [`KernelError::DanglingNode`]. Retained nodes, and therefore every preserved subtree,
    /// stay readable.
    pub fn collect(&mut self) -> usize {
        let freed = self.tracked.len();
        for key in self.tracked.drain() {
            self.nodes.remove(key);
        }
        debug!(
            "collected {freed} node(s), {} retained node(s) remain",
            self.nodes.len()
        );
        freed
    }

    /// Render a term as a structural string.
    ///
    /// Format
    /// - variable: `v<id>`
    /// - compound term: `f<subtype>(<child>,<child>,...)`
    ///
    /// The rendering depends on structure only and doubles as the shape key used by
    /// [`HookCanonicalizer`](crate::hook::HookCanonicalizer).
    pub fn term_to_string(&self, id: NodeId) -> KernelResult<String> {
        let mut out = String::new();
        self.write_term(id, &mut out)?;
        Ok(out)
    }

    fn write_term(&self, id: NodeId, out: &mut String) -> KernelResult<()> {
        let node = self.get(id)?;
        match node.kind {
            NodeKind::Variable => {
                out.push('v');
                out.push_str(&node.subtype.to_string());
            }
            NodeKind::Function => {
                out.push('f');
                out.push_str(&node.subtype.to_string());
                out.push('(');
                for (index, &child) in node.children.iter().enumerate() {
                    if index > 0 {
                        out.push(',');
                    }
                    self.write_term(child, out)?;
                }
                out.push(')');
            }
            kind => {
                return Err(KernelError::InvalidUsage {
                    operation: "term_to_string",
                    kind,
                });
            }
        }
        Ok(())
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
