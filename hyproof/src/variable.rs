//! Variable identifiers and their per-scope allocator.
//!
//! Role
//! - A [`VariableId`] is the identity of a variable node; it doubles as the node's subtype.
//! - Ids are issued by a [`VariableAllocator`] owned by exactly one
//!   [`Scope`](crate::scope::Scope). Two trees only share variable identity when they were built
//!   in the same scope.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

/// Identity of a variable, unique within the allocating scope.
///
/// Display
/// - Renders as `v<id>`, the same spelling used by term rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableId(u32);

impl VariableId {
    /// Create an identifier from its raw numeric value.
    pub fn new_from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw numeric id.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Strictly increasing id counter over a half-open range `[first, limit)`.
#[derive(Debug, Clone)]
pub struct VariableAllocator {
    next: u32,
    limit: u32,
}

impl VariableAllocator {
    /// Allocator covering the whole `u32` range (the last value is reserved as the bound).
    pub fn new() -> Self {
        Self::with_range(0, u32::MAX)
    }

    pub fn with_range(first: u32, limit: u32) -> Self {
        Self { next: first, limit }
    }

    /// Issue the next unused id.
    ///
    /// Fails with [`KernelError::AllocationExhausted`] once the range is used up; the counter is
    /// left untouched in that case so every later call fails the same way.
    pub fn new_variable(&mut self) -> KernelResult<VariableId> {
        if self.next >= self.limit {
            return Err(KernelError::AllocationExhausted {
                pool: "variable allocator",
                limit: self.limit,
            });
        }
        let id = VariableId(self.next);
        self.next += 1;
        Ok(id)
    }

    /// The id the next call to [`new_variable`](Self::new_variable) would return.
    pub fn peek(&self) -> Option<VariableId> {
        (self.next < self.limit).then_some(VariableId(self.next))
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.next)
    }
}

impl Default for VariableAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn ids_are_strictly_increasing() {
        let mut alloc = VariableAllocator::new();
        let a = alloc.new_variable().unwrap();
        let b = alloc.new_variable().unwrap();
        let c = alloc.new_variable().unwrap();
        assert_eq!(a.raw(), 0);
        assert!(a < b && b < c);
        assert_eq!(alloc.peek(), Some(VariableId::new_from_raw(3)));
    }

    #[test]
    fn exhaustion_is_a_range_error_and_sticky() {
        let mut alloc = VariableAllocator::with_range(u32::MAX - 2, u32::MAX);
        assert_eq!(alloc.remaining(), 2);
        alloc.new_variable().unwrap();
        alloc.new_variable().unwrap();
        let err = alloc.new_variable().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeError);
        assert!(alloc.new_variable().is_err());
        assert_eq!(alloc.peek(), None);
    }

    #[test]
    fn display_matches_term_rendering() {
        assert_eq!(VariableId::new_from_raw(42).to_string(), "v42");
    }
}
