//! Payload pipeline benchmarks.
//!
//! Every load and every keystroke in the query bar re-runs part of this
//! pipeline over the whole class, so it should stay well under a frame.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `normalize` | Shape detection + record extraction per payload shape |
//! | `card` | Field resolution and card layout for one class |
//! | `search` | Name filtering over one class for short and long queries |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench normalization_bench
//! open target/criterion/report/index.html
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use introboard_core::normalizer::normalize;
use introboard_core::search::filter_indices;
use introboard_core::{CardView, Record, Toggles};
use serde_json::{json, Value};

const CLASS_SIZES: [usize; 3] = [30, 300, 3000];

fn record(i: usize) -> Value {
    json!({
        "id": format!("s{i}"),
        "name": {"first": format!("First{i}"), "middleInitial": "Q", "last": format!("Last{i}")},
        "mascot": "Bench Badger",
        "media": {"hasImage": true, "src": format!("/media/s{i}.jpg"), "caption": "Me"},
        "personalStatement": "I write benchmarks.",
        "backgrounds": {"personal": "p", "academic": "a", "professional": "q"},
        "primaryComputer": "Laptop",
        "funFact": "Never sleeps.",
        "courses": "ITIS 3135, ITSC 3155; ITSC 3146",
        "quote": "Measure twice.",
        "quoteBy": "Someone",
        "links": {"GitHub": "https://github.com/example"}
    })
}

fn class(n: usize) -> Vec<Value> {
    (0..n).map(record).collect()
}

// ---------------------------------------------------------------------------
// Normalize
// ---------------------------------------------------------------------------

fn normalize_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for n in CLASS_SIZES {
        let records = class(n);
        let array = Value::Array(records.clone());
        let wrapped = json!({ "count": n, "students": records.clone() });
        let id_map = Value::Object(
            records
                .iter()
                .enumerate()
                .map(|(i, r)| (format!("u{i}"), r.clone()))
                .collect(),
        );

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("array", n), &array, |b, p| {
            b.iter(|| normalize(black_box(p)))
        });
        group.bench_with_input(BenchmarkId::new("wrapped", n), &wrapped, |b, p| {
            b.iter(|| normalize(black_box(p)))
        });
        group.bench_with_input(BenchmarkId::new("id_map", n), &id_map, |b, p| {
            b.iter(|| normalize(black_box(p)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

fn card_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("card");
    let toggles = Toggles::default();

    for n in CLASS_SIZES {
        let records = class(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("resolve_and_build", n), &records, |b, rs| {
            b.iter(|| {
                rs.iter()
                    .enumerate()
                    .map(|(i, raw)| {
                        let card = Record::new(raw, i).resolve(Some("https://dvonb.xyz"));
                        CardView::build(&card, &toggles)
                    })
                    .count()
            })
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn search_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for n in CLASS_SIZES {
        let records = class(n);
        group.throughput(Throughput::Elements(n as u64));
        for query in ["f", "last1", "no such student"] {
            group.bench_with_input(
                BenchmarkId::new(query.replace(' ', "_"), n),
                &records,
                |b, rs| b.iter(|| filter_indices(black_box(rs), black_box(query))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, normalize_bench, card_bench, search_bench);
criterion_main!(benches);
