use std::time::Duration;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use library_catalog::{BookId, LibraryCatalog};
use rand::seq::SliceRandom;

fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(1))
        .warm_up_time(Duration::from_secs(1))
}

/// Catalog holding `ids` inserted in the given order
fn catalog_with(ids: &[BookId]) -> LibraryCatalog {
    let mut catalog = LibraryCatalog::new();
    for &id in ids {
        catalog.add_book(id, "Title", "Author", "ISBN");
    }
    catalog
}

fn insertion_order_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Insertion order");

    for size in [256_i64, 1024] {
        let sorted: Vec<BookId> = (0..size).collect();
        let mut shuffled = sorted.clone();
        shuffled.shuffle(&mut rand::rng());

        // Sorted keys degrade the tree into a list
        group.bench_with_input(BenchmarkId::new("sorted", size), &sorted, |b, ids| {
            b.iter(|| catalog_with(ids));
        });
        group.bench_with_input(BenchmarkId::new("shuffled", size), &shuffled, |b, ids| {
            b.iter(|| catalog_with(ids));
        });
    }

    group.finish();
}

fn borrow_return_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Borrow and return");

    let mut ids: Vec<BookId> = (0..1024).collect();
    ids.shuffle(&mut rand::rng());

    group.bench_function("borrow_return_cycle", |b| {
        b.iter_batched(
            || catalog_with(&ids),
            |mut catalog| {
                for &id in &ids {
                    drop(catalog.borrow_book(id, id % 16));
                }
                for &id in &ids {
                    drop(catalog.return_book(id, id % 16));
                }
                catalog
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("list_available", |b| {
        let catalog = catalog_with(&ids);
        b.iter(|| catalog.list_available_books());
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets = insertion_order_bench, borrow_return_bench
}
criterion_main!(benches);
