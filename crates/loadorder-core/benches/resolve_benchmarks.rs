use criterion::{Criterion, black_box, criterion_group, criterion_main};
use loadorder_core::{Descriptor, InterfaceMeta, Resolver, SortContext, VersionRange};

/// A layered candidate set: each descriptor depends on one in the previous
/// layer and soft-orders after a sibling.
fn layered_candidates(count: usize) -> Vec<Descriptor> {
    (0..count)
        .rev()
        .map(|i| {
            let mut descriptor =
                Descriptor::new(format!("plugin-{}", i % 17), format!("d{i}"), "1.0.0").unwrap();
            if i >= 10 {
                let dep = i - 10;
                descriptor = descriptor.depends_on(
                    VersionRange::new(format!("plugin-{}", dep % 17), format!("d{dep}"), "1.0", "2.0")
                        .unwrap(),
                );
            }
            if i % 10 != 0 {
                descriptor = descriptor
                    .load_after(VersionRange::any(format!("plugin-{}", (i - 1) % 17), format!("d{}", i - 1)));
            }
            descriptor
        })
        .collect()
}

fn resolve_benchmark(c: &mut Criterion) {
    let resolver = Resolver::default();
    let meta = InterfaceMeta::new("bench").with_sort_context(SortContext::Reverse);

    for count in [100, 1000] {
        let candidates = layered_candidates(count);
        c.bench_function(&format!("Resolver::resolve ({count} descriptors)"), |b| {
            b.iter(|| {
                let resolution = resolver
                    .resolve(black_box(candidates.clone()), &meta)
                    .unwrap();
                black_box(resolution.order().len())
            })
        });
    }
}

fn resolve_context_benchmark(c: &mut Criterion) {
    let resolver = Resolver::default();
    let candidates = layered_candidates(1000);
    c.bench_function("Resolver::resolve_context (1000 descriptors)", |b| {
        b.iter(|| resolver.resolve_context(black_box(candidates.clone())).unwrap())
    });
}

criterion_group!(benches, resolve_benchmark, resolve_context_benchmark);
criterion_main!(benches);
