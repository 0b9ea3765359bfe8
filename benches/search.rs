//! This bench test measures keyword search over a large catalog of books.

#![allow(missing_docs)]

use std::hint::black_box;

use biblio::Catalog;
use criterion::{criterion_group, criterion_main, Criterion};

/// Builds a catalog with `count` books and a handful of members.
fn preseed_catalog(count: usize) -> Catalog {
    let mut catalog = Catalog::new();
    for i in 0..count {
        catalog
            .add_book(&format!("Book number {i}"), &format!("Author {}", i % 100))
            .unwrap();
    }
    for name in ["Ada", "Grace", "Alan"] {
        catalog.add_member(name).unwrap();
    }
    catalog
}

fn search_books(c: &mut Criterion) {
    let catalog = preseed_catalog(10_000);

    c.bench_function("search hit", |b| {
        b.iter(|| catalog.search_books(black_box("number 42")));
    });

    c.bench_function("search miss", |b| {
        b.iter(|| catalog.search_books(black_box("tolkien")));
    });
}

criterion_group!(benches, search_books);
criterion_main!(benches);
