//! Canonical matching signatures ("hooks") for sentences and terms.
//!
//! Role
//! - A hook is a string describing the shape of a formula with every variable and every free
//!   compound term replaced by a numeric marker. Two formulas match when their hook *sets*
//!   intersect; a theorem store keys its entries by these strings.
//! - Markers of quantifier-bound variables are fixed by the order in which their quantifiers
//!   are met, which makes hooks invariant under renaming of bound variables.
//! - Free occurrences are flexible: a free variable or free compound term whose shape was seen
//!   before on the same path may either reuse the marker last assigned to that shape or take a
//!   fresh one, which then replaces it. Both choices are kept, so the result is a set of
//!   signatures rather than a single one, at most doubling per repeated occurrence.
//!
//! Traversal
//! - The canonicalizer evolves a set of branches in lockstep through the tree: every branch
//!   goes through the same node before any branch moves on. Identical branches are merged.
//! - Recursion depth is bounded by the depth of the tree.
//!
//! Format
//! - `L<subtype>(` connective, `Q<subtype>/<marker>(` quantifier, `P<subtype>(` relation,
//!   `F<marker>(` free compound term, `f<subtype>(` compound term mentioning a bound variable,
//!   `V<marker>` variable occurrence.
//! - Each child is followed by `,`; the last child also closes the group with `)`.
//!
//! Example
//! ```
//! use hyproof::prelude::*;
//!
//! let mut scope = Scope::new();
//! let p = SymbolId::fresh().unwrap();
//! let x = scope.variable().unwrap();
//! let y = scope.variable().unwrap();
//! let px = scope.predicate(p, &[x]).unwrap();
//! let py = scope.predicate(p, &[y]).unwrap();
//!
//! let hx = scope.get_hooks(px).unwrap();
//! let hy = scope.get_hooks(py).unwrap();
//! assert!(!hx.is_disjoint(&hy));
//! ```
use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::trace;

use crate::{
    error::{KernelError, KernelResult},
    node::{Node, NodeKind},
    scope::{NodeId, Scope},
    variable::VariableId,
};

/// One candidate signature under construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Branch {
    prefix: String,
    next_marker: u32,
    /// Markers of variables bound by a quantifier on this path.
    fixed: BTreeMap<VariableId, u32>,
    /// Marker currently linked to each free shape on this path.
    flexible: BTreeMap<String, BTreeSet<u32>>,
}

impl Branch {
    fn root() -> Self {
        Self {
            prefix: String::new(),
            next_marker: 0,
            fixed: BTreeMap::new(),
            flexible: BTreeMap::new(),
        }
    }

    /// Give `shape` a brand-new marker, make it the only one later occurrences may link to,
    /// and return it.
    fn assign_fresh(&mut self, shape: &str) -> u32 {
        let marker = self.next_marker;
        self.next_marker += 1;
        self.flexible.insert(shape.to_owned(), BTreeSet::from([marker]));
        marker
    }
}

type Branches = BTreeSet<Branch>;

/// Read-only hook derivation over the nodes of one [`Scope`].
///
/// Term renderings used as shape keys are memoised for the lifetime of the canonicalizer, so
/// reusing one value across several formulas of the same scope avoids re-rendering shared
/// subterms.
pub struct HookCanonicalizer<'s> {
    scope: &'s Scope,
    shapes: HashMap<NodeId, String>,
}

impl<'s> HookCanonicalizer<'s> {
    pub fn new(scope: &'s Scope) -> Self {
        Self {
            scope,
            shapes: HashMap::new(),
        }
    }

    /// Every canonical signature of the sentence or term `id`.
    ///
    /// The result is never empty for a valid sentence or term. Blocks (`assume`, `let`, proofs)
    /// are rejected with [`KernelError::InvalidUsage`].
    pub fn hooks(&mut self, id: NodeId) -> KernelResult<BTreeSet<String>> {
        let node = self.scope.get(id)?;
        if !node.is_sentence() && !node.is_term() {
            return Err(KernelError::InvalidUsage {
                operation: "get_hooks",
                kind: node.kind(),
            });
        }

        let branches = self.extend(id, Branches::from([Branch::root()]))?;
        trace!("derived {} branch(es) for {id:?}", branches.len());
        Ok(branches.into_iter().map(|branch| branch.prefix).collect())
    }

    fn shape(&mut self, id: NodeId) -> KernelResult<String> {
        if let Some(shape) = self.shapes.get(&id) {
            return Ok(shape.clone());
        }
        let rendered = self.scope.term_to_string(id)?;
        self.shapes.insert(id, rendered.clone());
        Ok(rendered)
    }

    /// Push every branch through the subtree rooted at `id`.
    fn extend(&mut self, id: NodeId, branches: Branches) -> KernelResult<Branches> {
        let scope = self.scope;
        let node = scope.get(id)?;

        let branches = match node.kind() {
            NodeKind::Logical => tag_all(branches, &format!("L{}(", node.subtype())),
            NodeKind::Property => tag_all(branches, &format!("P{}(", node.subtype())),
            NodeKind::Quantifier => {
                let binder = scope.get(node.bound()?)?.variable_id()?;
                branches
                    .into_iter()
                    .map(|mut branch| {
                        let marker = branch.next_marker;
                        branch.prefix.push_str(&format!("Q{}/{marker}(", node.subtype()));
                        branch.fixed.insert(binder, marker);
                        branch.next_marker += 1;
                        branch
                    })
                    .collect()
            }
            NodeKind::Variable => {
                let variable = node.variable_id()?;
                let shape = self.shape(id)?;
                return Ok(fork_variable(branches, variable, &shape));
            }
            NodeKind::Function => {
                let shape = self.shape(id)?;
                fork_term(branches, node, &shape)
            }
            kind => {
                return Err(KernelError::InvalidUsage {
                    operation: "get_hooks",
                    kind,
                });
            }
        };

        self.fold_children(node, branches)
    }

    /// Thread the branch set through the children left to right, adding the punctuation.
    fn fold_children(&mut self, node: &Node, mut branches: Branches) -> KernelResult<Branches> {
        if node.arity() == 0 {
            return Ok(tag_all(branches, ")"));
        }
        let last = node.arity() - 1;
        for (index, &child) in node.children().iter().enumerate() {
            branches = self.extend(child, branches)?;
            let close = if index == last { ",)" } else { "," };
            branches = tag_all(branches, close);
        }
        Ok(branches)
    }
}

impl Scope {
    /// Canonical signatures of a sentence or term, see [`HookCanonicalizer`].
    pub fn get_hooks(&self, id: NodeId) -> KernelResult<BTreeSet<String>> {
        HookCanonicalizer::new(self).hooks(id)
    }
}

fn tag_all(branches: Branches, tag: &str) -> Branches {
    branches
        .into_iter()
        .map(|mut branch| {
            branch.prefix.push_str(tag);
            branch
        })
        .collect()
}

/// Variable occurrence: the fixed marker if bound on this path, otherwise the linked marker of
/// the same shape (if any) plus one fresh marker.
fn fork_variable(branches: Branches, variable: VariableId, shape: &str) -> Branches {
    let mut out = Branches::new();
    for branch in branches {
        if let Some(&marker) = branch.fixed.get(&variable) {
            let mut branch = branch;
            branch.prefix.push_str(&format!("V{marker}"));
            out.insert(branch);
            continue;
        }

        for &marker in branch.flexible.get(shape).into_iter().flatten() {
            let mut linked = branch.clone();
            linked.prefix.push_str(&format!("V{marker}"));
            out.insert(linked);
        }

        let mut fresh = branch;
        let marker = fresh.assign_fresh(shape);
        fresh.prefix.push_str(&format!("V{marker}"));
        out.insert(fresh);
    }
    out
}

/// Compound term head: a free term forks like a free variable; a term mentioning a variable
/// fixed on this path is spelled out structurally.
fn fork_term(branches: Branches, node: &Node, shape: &str) -> Branches {
    let mut out = Branches::new();
    for branch in branches {
        let is_free = node
            .free_variables()
            .iter()
            .all(|v| !branch.fixed.contains_key(v));

        if !is_free {
            let mut branch = branch;
            branch.prefix.push_str(&format!("f{}(", node.subtype()));
            out.insert(branch);
            continue;
        }

        for &marker in branch.flexible.get(shape).into_iter().flatten() {
            let mut linked = branch.clone();
            linked.prefix.push_str(&format!("F{marker}("));
            out.insert(linked);
        }

        let mut fresh = branch;
        let marker = fresh.assign_fresh(shape);
        fresh.prefix.push_str(&format!("F{marker}("));
        out.insert(fresh);
    }
    out
}
