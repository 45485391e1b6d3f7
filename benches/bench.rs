//! Criterion benchmarks for Phonesis.
//!
//! Covers word segmentation, vocabulary training and text encoding.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use phonesis::prelude::*;
use std::hint::black_box;

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "each",
        "machine",
        "learning",
        "module",
        "experience",
        "contained",
        "strengths",
        "rhythm",
        "tokenization",
        "vocabulary",
        "syllable",
        "alphabet",
        "consonant",
        "vowel",
        "fragment",
        "segment",
        "training",
        "corpus",
        "phonetic",
        "language",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 20 + (i % 50);
        let doc_words: Vec<&str> = (0..doc_length)
            .map(|j| words[(i * 7 + j * 13) % words.len()])
            .collect();
        documents.push(doc_words.join(" "));
    }

    documents
}

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");
    let segmenter = Segmenter::new(Alphabet::english());
    let texts = generate_test_documents(100);

    group.bench_function("segment_word", |b| {
        b.iter(|| black_box(segmenter.segment(black_box("tokenization"))))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("segment_text_batch", |b| {
        b.iter(|| {
            for text in &texts {
                let _ = black_box(segmenter.segment_text(black_box(text)));
            }
        })
    });

    group.finish();
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    let texts = generate_test_documents(1000);

    group.throughput(Throughput::Elements(1000));
    group.bench_function("train_corpus", |b| {
        b.iter(|| {
            let mut trainer = Trainer::new(Alphabet::english());
            let added = trainer.run(black_box(&texts));
            black_box(added)
        })
    });

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    let texts = generate_test_documents(1000);

    let mut trainer = Trainer::new(Alphabet::english());
    trainer.run(&texts).unwrap();
    let tokenizer = trainer.into_tokenizer();

    group.bench_function("encode_single_text", |b| {
        b.iter(|| black_box(tokenizer.encode(black_box(&texts[0]))))
    });

    group.throughput(Throughput::Elements(1000));
    group.bench_function("forward_batch", |b| {
        b.iter(|| black_box(tokenizer.forward(black_box(&texts))))
    });

    group.bench_function("par_forward_batch", |b| {
        b.iter(|| black_box(tokenizer.par_forward(black_box(&texts))))
    });

    group.finish();
}

criterion_group!(benches, bench_segmentation, bench_training, bench_encoding);
criterion_main!(benches);
