use std::hint::black_box;

use avlset::AvlSet;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::Lfsr;

#[derive(Debug)]
struct BenchName {
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new("iter/n_values", v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("iter");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

/// Measure the time needed to drain an in-order iterator over a tree of
/// `n_values` keys.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = AvlSet::default();

    for _i in 0..n_values {
        t.insert(rand.next_value()).unwrap();
    }

    let bench_name = BenchName { n_values };

    g.throughput(Throughput::Elements(n_values as _));
    // Values per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            for v in t.iter() {
                black_box(v);
            }
        })
    });
}
