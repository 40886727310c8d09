//! Builder operations for sentences, terms and proof blocks.
//!
//! Every builder is a thin, named wrapper around [`Scope::construct`], so each one enforces the
//! same construction invariants and fails the same way.
//!
//! Example
//! ```
//! use hyproof::prelude::*;
//!
//! let mut scope = Scope::new();
//! let x = scope.variable().unwrap();
//! let y = scope.variable().unwrap();
//!
//! // x ∈ y
//! let member = scope.member_of(x, y).unwrap();
//! let node = scope.get(member).unwrap();
//! assert_eq!(node.kind(), NodeKind::Property);
//! assert_eq!(node.free_variables().len(), 2);
//!
//! // ∀x. x ∈ y
//! let all = scope.forall(x, member).unwrap();
//! let node = scope.get(all).unwrap();
//! assert_eq!(node.free_variables().len(), 1);
//! assert_eq!(node.bound_variables().len(), 1);
//! ```
use crate::{
    error::{KernelError, KernelResult},
    node::{BuiltinSymbol, Connective, NodeKind, QuantifierKind, SymbolId},
    scope::{NodeId, Scope},
};

impl Scope {
    /// Allocate a fresh variable node.
    pub fn variable(&mut self) -> KernelResult<NodeId> {
        self.construct(NodeKind::Variable, 0, &[])
    }

    // ------------------------------------------------------------------
    // Connectives

    pub fn connective(&mut self, connective: Connective, operands: &[NodeId]) -> KernelResult<NodeId> {
        self.construct(NodeKind::Logical, connective as u32, operands)
    }

    pub fn not(&mut self, inner: NodeId) -> KernelResult<NodeId> {
        self.connective(Connective::Not, &[inner])
    }

    pub fn and(&mut self, lhs: NodeId, rhs: NodeId) -> KernelResult<NodeId> {
        self.connective(Connective::And, &[lhs, rhs])
    }

    pub fn or(&mut self, lhs: NodeId, rhs: NodeId) -> KernelResult<NodeId> {
        self.connective(Connective::Or, &[lhs, rhs])
    }

    pub fn implies(&mut self, lhs: NodeId, rhs: NodeId) -> KernelResult<NodeId> {
        self.connective(Connective::Imply, &[lhs, rhs])
    }

    pub fn iff(&mut self, lhs: NodeId, rhs: NodeId) -> KernelResult<NodeId> {
        self.connective(Connective::Iff, &[lhs, rhs])
    }

    // ------------------------------------------------------------------
    // Quantifiers

    /// Bind `variable` (a variable node) over the sentence `body`.
    ///
    /// Fails with a scope error if `body` already binds the same variable identity.
    pub fn quantify(
        &mut self,
        quantifier: QuantifierKind,
        variable: NodeId,
        body: NodeId,
    ) -> KernelResult<NodeId> {
        self.construct(NodeKind::Quantifier, quantifier as u32, &[variable, body])
    }

    pub fn forall(&mut self, variable: NodeId, body: NodeId) -> KernelResult<NodeId> {
        self.quantify(QuantifierKind::All, variable, body)
    }

    pub fn exists(&mut self, variable: NodeId, body: NodeId) -> KernelResult<NodeId> {
        self.quantify(QuantifierKind::Exist, variable, body)
    }

    pub fn unique(&mut self, variable: NodeId, body: NodeId) -> KernelResult<NodeId> {
        self.quantify(QuantifierKind::Unique, variable, body)
    }

    pub fn uniquely_exists(&mut self, variable: NodeId, body: NodeId) -> KernelResult<NodeId> {
        self.quantify(QuantifierKind::UniquelyExist, variable, body)
    }

    // ------------------------------------------------------------------
    // Relations and functions

    /// Relation `symbol(args...)`, a sentence.
    pub fn predicate(&mut self, symbol: impl Into<SymbolId>, args: &[NodeId]) -> KernelResult<NodeId> {
        self.construct(NodeKind::Property, symbol.into().raw(), args)
    }

    /// Function application `symbol(args...)`, a term.
    pub fn function(&mut self, symbol: impl Into<SymbolId>, args: &[NodeId]) -> KernelResult<NodeId> {
        self.construct(NodeKind::Function, symbol.into().raw(), args)
    }

    /// Equality: `lhs ⇔ rhs` between sentences, the *term* `lhs = rhs` between terms.
    ///
    /// Between terms the result is a function node tagged [`BuiltinSymbol::Equal`]; it can be
    /// nested inside other terms but not used where a sentence is expected. Use
    /// [`Scope::equals_relation`] for the sentence.
    pub fn equals(&mut self, lhs: NodeId, rhs: NodeId) -> KernelResult<NodeId> {
        let node = self.get(lhs)?;
        if node.is_sentence() {
            self.iff(lhs, rhs)
        } else if node.is_term() {
            self.function(BuiltinSymbol::Equal, &[lhs, rhs])
        } else {
            Err(KernelError::InvalidUsage {
                operation: "equals",
                kind: node.kind(),
            })
        }
    }

    /// The relation `lhs = rhs` between two terms, a sentence.
    pub fn equals_relation(&mut self, lhs: NodeId, rhs: NodeId) -> KernelResult<NodeId> {
        self.predicate(BuiltinSymbol::Equal, &[lhs, rhs])
    }

    /// `¬(lhs ⇔ rhs)` between sentences, `¬(lhs = rhs)` between terms using
    /// [`Scope::equals_relation`].
    pub fn not_equals(&mut self, lhs: NodeId, rhs: NodeId) -> KernelResult<NodeId> {
        let eq = if self.get(lhs)?.is_term() {
            self.equals_relation(lhs, rhs)?
        } else {
            self.equals(lhs, rhs)?
        };
        self.not(eq)
    }

    /// `element ∈ set`
    pub fn member_of(&mut self, element: NodeId, set: NodeId) -> KernelResult<NodeId> {
        self.predicate(BuiltinSymbol::In, &[element, set])
    }

    /// `lhs ⊆ rhs`
    pub fn subset_of(&mut self, lhs: NodeId, rhs: NodeId) -> KernelResult<NodeId> {
        self.predicate(BuiltinSymbol::Inclusion, &[lhs, rhs])
    }

    /// `lhs ⊊ rhs`
    pub fn proper_subset_of(&mut self, lhs: NodeId, rhs: NodeId) -> KernelResult<NodeId> {
        self.predicate(BuiltinSymbol::ProperInclusion, &[lhs, rhs])
    }

    /// `⋃ family`
    pub fn big_union(&mut self, family: NodeId) -> KernelResult<NodeId> {
        self.function(BuiltinSymbol::UnaryCup, &[family])
    }

    /// `⋂ family`
    pub fn big_intersection(&mut self, family: NodeId) -> KernelResult<NodeId> {
        self.function(BuiltinSymbol::UnaryCap, &[family])
    }

    /// `lhs ∪ rhs`
    pub fn union(&mut self, lhs: NodeId, rhs: NodeId) -> KernelResult<NodeId> {
        self.function(BuiltinSymbol::BinaryCup, &[lhs, rhs])
    }

    /// `lhs ∩ rhs`
    pub fn intersection(&mut self, lhs: NodeId, rhs: NodeId) -> KernelResult<NodeId> {
        self.function(BuiltinSymbol::BinaryCap, &[lhs, rhs])
    }

    /// Apply `head` to `args`.
    ///
    /// - Property or function head: a new *function* node reusing the head's symbol. A
    ///   property head therefore yields a term, not a sentence; use [`Scope::predicate`] to
    ///   build a relation instance.
    /// - Variable head: an [`BuiltinSymbol::Evaluation`] node over `args`, the variable acting
    ///   as an anonymous function symbol. The head itself is not a child of the result.
    pub fn apply(&mut self, head: NodeId, args: &[NodeId]) -> KernelResult<NodeId> {
        let node = self.get(head)?;
        match node.kind() {
            NodeKind::Property | NodeKind::Function => {
                let symbol = node.subtype();
                self.construct(NodeKind::Function, symbol, args)
            }
            NodeKind::Variable => self.function(BuiltinSymbol::Evaluation, args),
            kind => Err(KernelError::InvalidUsage {
                operation: "apply",
                kind,
            }),
        }
    }

    // ------------------------------------------------------------------
    // Blocks

    /// `assume assumption { steps... }`
    pub fn assume(&mut self, assumption: NodeId, steps: &[NodeId]) -> KernelResult<NodeId> {
        let children: Vec<NodeId> = std::iter::once(assumption)
            .chain(steps.iter().copied())
            .collect();
        self.construct(NodeKind::Assume, 0, &children)
    }

    /// `let variable such that assumption { steps... }`
    pub fn let_in(
        &mut self,
        variable: NodeId,
        assumption: NodeId,
        steps: &[NodeId],
    ) -> KernelResult<NodeId> {
        let children: Vec<NodeId> = [variable, assumption]
            .into_iter()
            .chain(steps.iter().copied())
            .collect();
        self.construct(NodeKind::Let, 0, &children)
    }

    /// A proof: an ordered sequence of sentences and `assume`/`let` blocks.
    pub fn proof(&mut self, steps: &[NodeId]) -> KernelResult<NodeId> {
        self.construct(NodeKind::Proof, 0, steps)
    }
}
