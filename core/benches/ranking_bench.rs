use criterion::{criterion_group, criterion_main, Criterion};
use screener_core::tokenizer::tokenize;
use screener_core::{rank, summarize, Corpus, EngineConfig};

const RESUME: &str = "Senior backend engineer with 8+ years of experience building \
    microservices in Python, Django and FastAPI. Deployed on AWS with Docker and \
    Kubernetes, CI/CD through Jenkins. Comfortable with PostgreSQL, MongoDB and REST API \
    design, mentoring in agile scrum teams.";

fn build_corpus(n: usize) -> Corpus {
    let cfg = EngineConfig::default();
    let mut corpus = Corpus::new();
    for i in 0..n {
        let text = format!("{RESUME} candidate number {i} likes topic{}", i % 7);
        corpus.add(format!("candidate-{i}"), text, &cfg).expect("valid document");
    }
    corpus
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_resume", |b| b.iter(|| tokenize(RESUME)));
}

fn bench_rank(c: &mut Criterion) {
    let corpus = build_corpus(200);
    c.bench_function("rank_200_docs", |b| b.iter(|| rank(&corpus, "python docker kubernetes 5 years")));
    c.bench_function("summarize_200_docs", |b| b.iter(|| summarize(&corpus)));
}

criterion_group!(benches, bench_tokenize, bench_rank);
criterion_main!(benches);
