//! Hand-off of accepted sentences to a long-lived theorem store.
//!
//! The kernel does not store or query theorems itself. It only promises that
//! [`Scope::get_hooks`] yields the strings a store should key on, and that a promoted sentence
//! survives [`Scope::collect`].
use std::collections::BTreeSet;

use log::debug;

use crate::{
    error::{KernelError, KernelResult},
    scope::{NodeId, Scope},
};

/// Receiver of promoted sentences, keyed by hook strings.
///
/// A store is expected to map each hook to the set of sentences carrying it; a lookup for a
/// candidate sentence then reduces to a non-empty intersection of hook sets. Implementations
/// shared across threads must provide their own synchronisation.
pub trait TheoremStore {
    fn accept(&mut self, hooks: &BTreeSet<String>, sentence: NodeId);
}

impl Scope {
    /// Preserve a sentence and hand it to `store` together with its hooks.
    ///
    /// Hooks are derived before anything is preserved, so a failure leaves the scope untouched.
    pub fn promote_into(
        &mut self,
        sentence: NodeId,
        store: &mut impl TheoremStore,
    ) -> KernelResult<()> {
        let node = self.get(sentence)?;
        if !node.is_sentence() {
            return Err(KernelError::InvalidUsage {
                operation: "promote_into",
                kind: node.kind(),
            });
        }

        let hooks = self.get_hooks(sentence)?;
        self.preserve(sentence)?;
        debug!("promoting {sentence:?} under {} hook(s)", hooks.len());
        store.accept(&hooks, sentence);
        Ok(())
    }
}
