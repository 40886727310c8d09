use criterion::{Criterion, black_box, criterion_group, criterion_main};

use hyproof::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn build_simple_sentence(scope: &mut Scope, f: SymbolId) -> NodeId {
    // forall x. exists y. x in y /\ f(x) = f(x)
    let x = scope.variable().unwrap();
    let y = scope.variable().unwrap();
    let member = scope.member_of(x, y).unwrap();
    let lhs = scope.function(f, &[x]).unwrap();
    let rhs = scope.function(f, &[x]).unwrap();
    let eq = scope.equals_relation(lhs, rhs).unwrap();
    let and = scope.and(member, eq).unwrap();
    let exists = scope.exists(y, and).unwrap();
    scope.forall(x, exists).unwrap()
}

fn build_complex_sentence(scope: &mut Scope) -> NodeId {
    // Medium-sized sentence, seeded for determinism.
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    let free: Vec<NodeId> = (0..4).map(|_| scope.variable().unwrap()).collect();

    fn term(scope: &mut Scope, rng: &mut impl Rng, pool: &[NodeId], budget: usize) -> NodeId {
        if budget == 0 || rng.random_bool(0.4) {
            return pool[rng.random_range(0..pool.len())];
        }
        let a = term(scope, rng, pool, budget - 1);
        let b = term(scope, rng, pool, budget - 1);
        scope.union(a, b).unwrap()
    }

    fn next_create(
        scope: &mut Scope,
        rng: &mut impl Rng,
        pool: &mut Vec<NodeId>,
        budget: usize,
    ) -> NodeId {
        if budget == 0 || rng.random_bool(0.2) {
            let a = term(scope, rng, pool, 2);
            let b = term(scope, rng, pool, 2);
            return scope.member_of(a, b).unwrap();
        }
        match rng.random_range(0..=3) {
            0 => {
                let left = next_create(scope, rng, pool, budget - 1);
                let right = next_create(scope, rng, pool, budget - 1);
                scope.and(left, right).unwrap()
            }
            1 => {
                let left = next_create(scope, rng, pool, budget - 1);
                let right = next_create(scope, rng, pool, budget - 1);
                scope.implies(left, right).unwrap()
            }
            2 => {
                let inner = next_create(scope, rng, pool, budget - 1);
                scope.not(inner).unwrap()
            }
            _ => {
                let binder = scope.variable().unwrap();
                pool.push(binder);
                let body = next_create(scope, rng, pool, budget - 1);
                pool.pop();
                scope.forall(binder, body).unwrap()
            }
        }
    }

    let mut pool = free;
    next_create(scope, &mut rng, &mut pool, 8)
}

fn bench_construct(c: &mut Criterion) {
    let f = SymbolId::fresh().unwrap();

    c.bench_function("construct_simple", |b| {
        b.iter(|| {
            let mut scope = Scope::new();
            black_box(build_simple_sentence(&mut scope, f));
        });
    });

    c.bench_function("construct_complex", |b| {
        b.iter(|| {
            let mut scope = Scope::new();
            black_box(build_complex_sentence(&mut scope));
        });
    });
}

fn bench_hooks(c: &mut Criterion) {
    let f = SymbolId::fresh().unwrap();
    let mut scope = Scope::new();
    let simple = build_simple_sentence(&mut scope, f);
    let complex = build_complex_sentence(&mut scope);

    c.bench_function("hooks_simple", |b| {
        b.iter(|| black_box(scope.get_hooks(simple).unwrap()));
    });

    c.bench_function("hooks_complex", |b| {
        b.iter(|| black_box(scope.get_hooks(complex).unwrap()));
    });
}

fn bench_collect(c: &mut Criterion) {
    let f = SymbolId::fresh().unwrap();

    c.bench_function("preserve_and_collect", |b| {
        b.iter(|| {
            let mut scope = Scope::new();
            let keep = build_simple_sentence(&mut scope, f);
            build_complex_sentence(&mut scope);
            scope.preserve(keep).unwrap();
            black_box(scope.collect());
        });
    });
}

criterion_group!(benches, bench_construct, bench_hooks, bench_collect);
criterion_main!(benches);
