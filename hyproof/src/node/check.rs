//! Construction-time invariant engine.
//!
//! [`validate`] inspects the requested `(kind, subtype, children)` triple and either rejects it or
//! returns the free/bound variable sets of the node to be built. It never allocates ids nor
//! touches the arena, so a rejected construction leaves no trace.
use std::collections::BTreeSet;

use crate::{
    error::{KernelError, KernelResult},
    node::{Connective, Node, NodeKind, QuantifierKind},
    variable::VariableId,
};

/// Free and bound variable sets of a node that passed validation.
#[derive(Debug, Default)]
pub(crate) struct Scoping {
    pub free: BTreeSet<VariableId>,
    pub bound: BTreeSet<VariableId>,
}

pub(crate) fn validate(kind: NodeKind, subtype: u32, children: &[&Node]) -> KernelResult<Scoping> {
    match kind {
        NodeKind::Logical => validate_logical(subtype, children),
        NodeKind::Quantifier => validate_quantifier(subtype, children),
        NodeKind::Property | NodeKind::Function => validate_application(kind, children),
        NodeKind::Variable => {
            if !children.is_empty() {
                return Err(KernelError::malformed(kind, "variables take no children"));
            }
            // The id itself is drawn by the scope once validation succeeded.
            Ok(Scoping::default())
        }
        NodeKind::Assume => {
            expect_min_arity(kind, children, 1)?;
            expect(kind, children[0].is_sentence(), "assumption must be a sentence")?;
            expect_steps(kind, &children[1..])?;
            Ok(Scoping::default())
        }
        NodeKind::Let => {
            expect_min_arity(kind, children, 2)?;
            expect(kind, children[0].is_variable(), "let must introduce a variable")?;
            expect(kind, children[1].is_sentence(), "assumption must be a sentence")?;
            expect_steps(kind, &children[2..])?;
            Ok(Scoping::default())
        }
        NodeKind::Proof => {
            expect_steps(kind, children)?;
            Ok(Scoping::default())
        }
    }
}

fn validate_logical(subtype: u32, children: &[&Node]) -> KernelResult<Scoping> {
    let kind = NodeKind::Logical;
    let connective = Connective::from_repr(subtype)
        .ok_or_else(|| KernelError::malformed(kind, format!("unknown connective {subtype}")))?;
    if children.len() != connective.arity() {
        return Err(KernelError::malformed(
            kind,
            format!(
                "{connective} expects {} operand(s), got {}",
                connective.arity(),
                children.len()
            ),
        ));
    }
    expect(
        kind,
        children.iter().all(|c| c.is_sentence()),
        "operands must be sentences",
    )?;

    let mut scoping = Scoping {
        free: children[0].free.clone(),
        bound: children[0].bound.clone(),
    };
    if let [lhs, rhs] = children {
        if let Some(&v) = lhs.free.intersection(&rhs.bound).next() {
            return Err(collision(v, "is free in the left operand and bound in the right one"));
        }
        if let Some(&v) = lhs.bound.intersection(&rhs.free).next() {
            return Err(collision(v, "is bound in the left operand and free in the right one"));
        }
        if let Some(&v) = lhs.bound.intersection(&rhs.bound).next() {
            return Err(collision(v, "is bound in both operands"));
        }
        scoping.free.extend(rhs.free.iter().copied());
        scoping.bound.extend(rhs.bound.iter().copied());
    }
    Ok(scoping)
}

fn validate_quantifier(subtype: u32, children: &[&Node]) -> KernelResult<Scoping> {
    let kind = NodeKind::Quantifier;
    if QuantifierKind::from_repr(subtype).is_none() {
        return Err(KernelError::malformed(
            kind,
            format!("unknown quantifier {subtype}"),
        ));
    }
    let [binder, body] = children else {
        return Err(KernelError::malformed(
            kind,
            format!("expects a binder and a body, got {} children", children.len()),
        ));
    };
    let binder = binder.variable_id().map_err(|_| {
        KernelError::malformed(kind, format!("binder must be a variable, got {}", binder.kind))
    })?;
    expect(kind, body.is_sentence(), "body must be a sentence")?;

    if body.bound.contains(&binder) {
        return Err(collision(binder, "is already bound inside the quantifier body"));
    }

    let mut free = body.free.clone();
    free.remove(&binder);
    let mut bound = body.bound.clone();
    bound.insert(binder);
    Ok(Scoping { free, bound })
}

fn validate_application(kind: NodeKind, children: &[&Node]) -> KernelResult<Scoping> {
    let mut scoping = Scoping::default();
    for child in children {
        if !child.is_term() {
            return Err(KernelError::malformed(
                kind,
                format!("arguments must be terms, got a {} node", child.kind),
            ));
        }
        scoping.free.extend(child.free.iter().copied());
    }
    Ok(scoping)
}

fn expect(kind: NodeKind, condition: bool, reason: &'static str) -> KernelResult<()> {
    if condition {
        Ok(())
    } else {
        Err(KernelError::malformed(kind, reason))
    }
}

fn expect_min_arity(kind: NodeKind, children: &[&Node], min: usize) -> KernelResult<()> {
    if children.len() < min {
        return Err(KernelError::malformed(
            kind,
            format!("expects at least {min} children, got {}", children.len()),
        ));
    }
    Ok(())
}

fn expect_steps(kind: NodeKind, steps: &[&Node]) -> KernelResult<()> {
    expect(
        kind,
        steps.iter().all(|s| s.is_block_or_sentence()),
        "steps must be sentences, assume or let blocks",
    )
}

fn collision(variable: VariableId, reason: &'static str) -> KernelError {
    KernelError::ScopeViolation { variable, reason }
}
