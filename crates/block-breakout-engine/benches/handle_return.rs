use block_breakout_engine::{Block, BreakoutConfig, BreakoutEngine, Document, Selection};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// A document of `size` blocks alternating headings and list items
fn create_document(size: usize) -> Document {
    let blocks = (0..size)
        .map(|i| {
            if i % 2 == 0 {
                Block::new(format!("b{i}"), "header-two", format!("Section {i}"))
            } else {
                Block::new(format!("b{i}"), "unordered-list-item", format!("Item {i}"))
            }
        })
        .collect();
    Document::from_blocks(blocks).unwrap()
}

fn bench_decide(c: &mut Criterion) {
    let engine = BreakoutEngine::new(BreakoutConfig::editorial());
    let mut group = c.benchmark_group("decide");

    for size in [10, 100, 1000] {
        let document = create_document(size);
        let last = document.block_at(size - 1).unwrap();
        let caret = Selection::caret_at(last.key().clone(), last.len());

        group.bench_with_input(BenchmarkId::new("last_block", size), &size, |b, _| {
            b.iter(|| engine.decide(black_box(&document), black_box(&caret)))
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let engine = BreakoutEngine::new(BreakoutConfig::editorial());

    c.bench_function("classify", |b| {
        b.iter(|| engine.classifier().classify(black_box("ordered-list-item")))
    });
}

criterion_group!(benches, bench_decide, bench_classify);
criterion_main!(benches);
