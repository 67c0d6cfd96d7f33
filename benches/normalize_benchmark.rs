//! Benchmarks for the normalization and rewriting passes.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic generator output shaped like real
//! summaries: headings, bullets, key-value lines, pseudo-tables.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unsummary::{normalize_cornell, rewrite_smart, SummaryFormat, SummaryPipeline, TextNormalizer};

/// Builds a synthetic summary with the given number of sections.
fn create_test_summary(section_count: usize) -> String {
    let mut content = String::new();
    content.push_str("Smart Summary: Benchmark Document\n\n");

    for i in 0..section_count {
        content.push_str(&format!("{}. Section Heading Number {}\n", i + 1, i + 1));
        content.push_str("**Key Concept:** The core idea of this section\n");
        content.push_str("Some explanatory prose follows the concept line here.\n");
        content.push_str("- First bullet with `inline code`\n");
        content.push_str("  - Definition: a nested detail line\n");
        content.push_str("1.1. A decimal outline line\n");
        content.push_str("Part  Function  Size\n");
        content.push_str("Cerebrum  Thinking  Large\n");
        content.push_str("Cerebellum  Balance  Small\n");
        content.push_str("\n");
    }

    content.push_str("Additional Interesting Facts\n");
    content.push_str("The brain weighs about 1.4 kilograms.\n");
    content.push_str("It uses roughly twenty percent of the body's energy.\n");
    content
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = TextNormalizer::default();
    let small = create_test_summary(5);
    let large = create_test_summary(50);

    c.bench_function("normalize_5_sections", |b| {
        b.iter(|| normalizer.normalize(black_box(&small)))
    });
    c.bench_function("normalize_50_sections", |b| {
        b.iter(|| normalizer.normalize(black_box(&large)))
    });
}

fn bench_smart_rewrite(c: &mut Criterion) {
    let small = create_test_summary(5);
    let large = create_test_summary(50);

    c.bench_function("smart_rewrite_5_sections", |b| {
        b.iter(|| rewrite_smart(black_box(&small)))
    });
    c.bench_function("smart_rewrite_50_sections", |b| {
        b.iter(|| rewrite_smart(black_box(&large)))
    });
}

fn bench_cornell(c: &mut Criterion) {
    let mut table = String::from("| Cue | Notes |\n| :--- | :--- |\n");
    for i in 0..200 {
        table.push_str(&format!("| Question {i} | Answer text for question {i} |\n"));
    }

    c.bench_function("cornell_200_rows", |b| {
        b.iter(|| normalize_cornell(black_box(&table)))
    });
}

fn bench_full_html_path(c: &mut Criterion) {
    let pipeline = SummaryPipeline::new();
    let doc = create_test_summary(10);

    c.bench_function("render_html_smart_10_sections", |b| {
        b.iter(|| pipeline.render_html(black_box(&doc), SummaryFormat::Smart))
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_smart_rewrite,
    bench_cornell,
    bench_full_html_path
);
criterion_main!(benches);
