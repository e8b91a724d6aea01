use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use minir::{tfidf, Index, IndexBuilder, Stopwords};

const WORDS: [&str; 20] = [
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "server", "request",
    "response", "error", "data", "cache", "index", "search", "query", "result", "rust", "trie",
];

fn generate_docs(n: usize, len: usize) -> Vec<String> {
    (0..n)
        .map(|d| {
            (0..len)
                .map(|i| WORDS[(d * 7 + i * 13) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn build(docs: &[String]) -> Index {
    let stop: Stopwords = ["the", "over"].into_iter().collect();
    let mut b = IndexBuilder::new(stop);
    for (i, text) in docs.iter().enumerate() {
        b.add_document(i as u32, text).expect("unique ids");
    }
    b.finish()
}

fn bench_build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");
    for n in [100, 1_000] {
        let docs = generate_docs(n, 200);
        group.bench_with_input(BenchmarkId::new("docs", n), &docs, |b, docs| {
            b.iter(|| build(black_box(docs)))
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let index = build(&generate_docs(1_000, 200));
    c.bench_function("rank_two_terms", |b| {
        b.iter(|| tfidf::rank(&index, black_box("cache search")))
    });
    c.bench_function("autocomplete", |b| {
        b.iter(|| index.autocomplete(black_box("re")))
    });
}

criterion_group!(benches, bench_build_index, bench_query);
criterion_main!(benches);
