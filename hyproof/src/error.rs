use strum::{Display, EnumIs};
use thiserror::Error;

use crate::{node::NodeKind, scope::NodeId, variable::VariableId};

/// Coarse classification of kernel failures.
///
/// Every failure is a contract violation by the code building the formula, never bad external
/// input, so callers are not expected to recover from any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
pub enum ErrorKind {
    /// Wrong child kind, arity or subtype for the requested constructor.
    MalformedExpression,
    /// Duplicate binding of a variable, or a free/bound collision across connective operands.
    ScopeError,
    /// Out-of-bounds child index, or exhaustion of an id pool.
    RangeError,
    /// Operation invoked on a node it is not defined for.
    UsageError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("malformed {kind} node: {reason}")]
    MalformedExpression { kind: NodeKind, reason: String },

    #[error("variable {variable} {reason}")]
    ScopeViolation {
        variable: VariableId,
        reason: &'static str,
    },

    #[error("child index {index} is out of range for a node of arity {arity}")]
    IndexOutOfRange { index: usize, arity: usize },

    #[error("{pool} exhausted (limit {limit})")]
    AllocationExhausted { pool: &'static str, limit: u32 },

    #[error("`{operation}` is not defined for {kind} nodes")]
    InvalidUsage {
        operation: &'static str,
        kind: NodeKind,
    },

    #[error("node {0:?} is not alive in this scope")]
    DanglingNode(NodeId),

    #[error("node {0:?} was issued by another scope")]
    ForeignNode(NodeId),
}

impl KernelError {
    /// Map this error onto its contract failure kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KernelError::MalformedExpression { .. } => ErrorKind::MalformedExpression,
            KernelError::ScopeViolation { .. } => ErrorKind::ScopeError,
            KernelError::IndexOutOfRange { .. } | KernelError::AllocationExhausted { .. } => {
                ErrorKind::RangeError
            }
            KernelError::InvalidUsage { .. }
            | KernelError::DanglingNode(_)
            | KernelError::ForeignNode(_) => ErrorKind::UsageError,
        }
    }

    pub(crate) fn malformed(kind: NodeKind, reason: impl Into<String>) -> Self {
        KernelError::MalformedExpression {
            kind,
            reason: reason.into(),
        }
    }
}

pub type KernelResult<T> = Result<T, KernelError>;
