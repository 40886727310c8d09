//! Expression nodes: sentences, terms and proof blocks.
//!
//! Role
//! - A [`Node`] is immutable once it is inserted into a [`Scope`](crate::scope::Scope). Its
//!   children are [`NodeId`] handles, so a subtree can be shared by any number of parents.
//! - Free and bound variable sets are computed once by the invariant engine in [`check`] and
//!   cached on the node.
//! - Accessors are partial: each one is only defined for the kinds listed in its docs and
//!   returns [`KernelError::InvalidUsage`] otherwise.
pub mod check;

use std::{
    collections::BTreeSet,
    sync::atomic::{AtomicU32, Ordering},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumCount, EnumIs, EnumIter, FromRepr};

use crate::{
    error::{KernelError, KernelResult},
    scope::NodeId,
    variable::VariableId,
};

/// Outer constructor of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Display, EnumIs, EnumIter, EnumCount, FromRepr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[strum(serialize_all = "lowercase")]
#[repr(u32)]
pub enum NodeKind {
    /// Connective over sentences, see [`Connective`].
    Logical = 0,
    /// Binder construct, see [`QuantifierKind`].
    Quantifier = 1,
    /// Relation over terms producing a sentence.
    Property = 2,
    /// Function symbol over terms producing a term.
    Function = 3,
    Variable = 4,
    /// `assume A { ... }` block.
    Assume = 5,
    /// `let x such that A { ... }` block.
    Let = 6,
    /// Sequence of proof steps.
    Proof = 7,
}

/// Subtype of [`NodeKind::Logical`] nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Display, EnumIs, EnumIter, EnumCount, FromRepr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum Connective {
    Not = 0,
    And = 1,
    Or = 2,
    Imply = 3,
    Iff = 4,
}

impl Connective {
    pub fn arity(&self) -> usize {
        match self {
            Connective::Not => 1,
            _ => 2,
        }
    }
}

/// Subtype of [`NodeKind::Quantifier`] nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Display, EnumIs, EnumIter, EnumCount, FromRepr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum QuantifierKind {
    All = 0,
    Exist = 1,
    Unique = 2,
    UniquelyExist = 3,
}

/// Relation and function symbols known to the kernel.
///
/// Ids from [`BuiltinSymbol::COUNT`] onwards are free for user-defined symbols, see
/// [`SymbolId::fresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Display, EnumIs, EnumIter, EnumCount, FromRepr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum BuiltinSymbol {
    Equal = 0,
    In = 1,
    Inclusion = 2,
    ProperInclusion = 3,
    UnaryCup = 4,
    UnaryCap = 5,
    BinaryCup = 6,
    BinaryCap = 7,
    /// Application of a variable used as a function symbol.
    Evaluation = 8,
}

static SYMBOL_POOL: AtomicU32 = AtomicU32::new(BuiltinSymbol::COUNT as u32);

/// Subtype of [`NodeKind::Property`] and [`NodeKind::Function`] nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymbolId(u32);

impl SymbolId {
    pub fn new_from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Draw a never-before-issued user symbol from the process-wide pool.
    ///
    /// This is the only state shared between scopes; it is independent of node construction.
    pub fn fresh() -> KernelResult<Self> {
        SYMBOL_POOL
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map(SymbolId)
            .map_err(|_| KernelError::AllocationExhausted {
                pool: "symbol pool",
                limit: u32::MAX,
            })
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn builtin(&self) -> Option<BuiltinSymbol> {
        BuiltinSymbol::from_repr(self.0)
    }
}

impl From<BuiltinSymbol> for SymbolId {
    fn from(value: BuiltinSymbol) -> Self {
        SymbolId(value as u32)
    }
}

/// A validated expression node.
///
/// Nodes are only created through [`Scope`](crate::scope::Scope), which runs
/// [`check::validate`] first, so every `Node` in existence satisfies the construction
/// invariants of its kind.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) subtype: u32,
    pub(crate) children: SmallVec<NodeId, 2>,
    pub(crate) free: BTreeSet<VariableId>,
    pub(crate) bound: BTreeSet<VariableId>,
}

impl Node {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Raw subtype tag. Its meaning depends on [`Node::kind`]; for variables it is the id.
    #[inline]
    pub fn subtype(&self) -> u32 {
        self.subtype
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Variables occurring in this node without an enclosing binder inside it.
    pub fn free_variables(&self) -> &BTreeSet<VariableId> {
        &self.free
    }

    /// Variables introduced by a quantifier somewhere inside this node.
    pub fn bound_variables(&self) -> &BTreeSet<VariableId> {
        &self.bound
    }

    pub fn is_sentence(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Logical | NodeKind::Quantifier | NodeKind::Property
        )
    }

    pub fn is_term(&self) -> bool {
        matches!(self.kind, NodeKind::Function | NodeKind::Variable)
    }

    pub fn is_variable(&self) -> bool {
        self.kind.is_variable()
    }

    pub fn is_quantifier(&self) -> bool {
        self.kind.is_quantifier()
    }

    /// `true` for `assume`, `let` and proof blocks.
    pub fn is_block(&self) -> bool {
        matches!(self.kind, NodeKind::Assume | NodeKind::Let | NodeKind::Proof)
    }

    /// Whether this node may appear as a step inside an `assume`, `let` or proof block.
    pub fn is_block_or_sentence(&self) -> bool {
        self.is_sentence() || matches!(self.kind, NodeKind::Assume | NodeKind::Let)
    }

    /// A sentence without free variables.
    pub fn is_closed(&self) -> bool {
        self.is_sentence() && self.free.is_empty()
    }

    pub fn connective(&self) -> Option<Connective> {
        match self.kind {
            NodeKind::Logical => Connective::from_repr(self.subtype),
            _ => None,
        }
    }

    pub fn quantifier(&self) -> Option<QuantifierKind> {
        match self.kind {
            NodeKind::Quantifier => QuantifierKind::from_repr(self.subtype),
            _ => None,
        }
    }

    pub fn symbol(&self) -> Option<SymbolId> {
        match self.kind {
            NodeKind::Property | NodeKind::Function => Some(SymbolId(self.subtype)),
            _ => None,
        }
    }

    /// Identity of a variable node.
    pub fn variable_id(&self) -> KernelResult<VariableId> {
        match self.kind {
            NodeKind::Variable => Ok(VariableId::new_from_raw(self.subtype)),
            kind => Err(Self::usage("variable_id", kind)),
        }
    }

    /// The i-th child.
    pub fn child(&self, index: usize) -> KernelResult<NodeId> {
        self.children
            .get(index)
            .copied()
            .ok_or(KernelError::IndexOutOfRange {
                index,
                arity: self.arity(),
            })
    }

    /// Left operand of a binary connective.
    pub fn left(&self) -> KernelResult<NodeId> {
        if self.is_binary_connective() {
            Ok(self.children[0])
        } else {
            Err(Self::usage("left", self.kind))
        }
    }

    /// Right operand of a binary connective.
    pub fn right(&self) -> KernelResult<NodeId> {
        if self.is_binary_connective() {
            Ok(self.children[1])
        } else {
            Err(Self::usage("right", self.kind))
        }
    }

    /// Operand of a negation, or body of a quantifier.
    pub fn body(&self) -> KernelResult<NodeId> {
        match (self.kind, self.connective()) {
            (NodeKind::Logical, Some(Connective::Not)) => Ok(self.children[0]),
            (NodeKind::Quantifier, _) => Ok(self.children[1]),
            (kind, _) => Err(Self::usage("body", kind)),
        }
    }

    /// The binder (variable node) of a quantifier.
    pub fn bound(&self) -> KernelResult<NodeId> {
        match self.kind {
            NodeKind::Quantifier => Ok(self.children[0]),
            kind => Err(Self::usage("bound", kind)),
        }
    }

    /// Hypothesis of an `assume` or `let` block.
    pub fn assumption(&self) -> KernelResult<NodeId> {
        match self.kind {
            NodeKind::Assume => Ok(self.children[0]),
            NodeKind::Let => Ok(self.children[1]),
            kind => Err(Self::usage("assumption", kind)),
        }
    }

    /// Variable introduced by a `let` block.
    pub fn variable(&self) -> KernelResult<NodeId> {
        match self.kind {
            NodeKind::Let => Ok(self.children[0]),
            kind => Err(Self::usage("variable", kind)),
        }
    }

    fn is_binary_connective(&self) -> bool {
        self.kind == NodeKind::Logical && self.arity() == 2
    }

    fn usage(operation: &'static str, kind: NodeKind) -> KernelError {
        KernelError::InvalidUsage { operation, kind }
    }
}
