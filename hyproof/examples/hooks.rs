use std::collections::BTreeSet;

use hyproof::prelude::*;

#[derive(Default)]
struct PrintingStore {
    accepted: usize,
}

impl TheoremStore for PrintingStore {
    fn accept(&mut self, hooks: &BTreeSet<String>, sentence: NodeId) {
        self.accepted += 1;
        println!("accepted {sentence:?} under {} hook(s)", hooks.len());
    }
}

fn main() -> KernelResult<()> {
    let mut scope = Scope::new();
    let mut store = PrintingStore::default();
    let f = SymbolId::fresh()?;

    // forall x. f(x) = f(x)
    let x = scope.variable()?;
    let lhs = scope.function(f, &[x])?;
    let rhs = scope.function(f, &[x])?;
    let eq = scope.equals_relation(lhs, rhs)?;
    let theorem = scope.forall(x, eq)?;

    println!("{} = {}", scope.term_to_string(lhs)?, scope.term_to_string(rhs)?);
    for hook in scope.get_hooks(eq)? {
        println!("  {hook}");
    }
    for hook in scope.get_hooks(theorem)? {
        println!("  {hook}");
    }

    scope.promote_into(theorem, &mut store)?;
    println!("collected {} scratch node(s)", scope.collect());
    println!("{} theorem(s) in store", store.accepted);
    Ok(())
}
