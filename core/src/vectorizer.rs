//! Batch TF-IDF vectorization.
//!
//! Vocabulary, document frequencies and weights are scoped to a single call.
//! Adding or removing a document from the batch changes every vector.

use std::collections::{HashMap, HashSet};

use crate::config::IdfWeighting;
use crate::tokenizer::{term_counts, TermCounts};

/// Sparse term weights. Terms that are absent weigh 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightVector {
    weights: HashMap<String, f64>,
}

impl WeightVector {
    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    pub fn dot(&self, other: &WeightVector) -> f64 {
        let (small, large) = if self.weights.len() <= other.weights.len() { (self, other) } else { (other, self) };
        small.weights.iter().map(|(t, w)| w * large.get(t)).sum()
    }

    pub fn magnitude(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }
}

/// Result of one vectorization call.
#[derive(Debug, Clone, Default)]
pub struct Vectorized {
    pub vocabulary: HashSet<String>,
    pub idf: HashMap<String, f64>,
    pub vectors: Vec<WeightVector>,
}

/// Vectorize raw texts; one vector per input, same order.
pub fn vectorize(documents: &[&str], weighting: IdfWeighting) -> Vectorized {
    let counts: Vec<TermCounts> = documents.iter().map(|d| term_counts(d)).collect();
    let refs: Vec<&TermCounts> = counts.iter().collect();
    vectorize_counts(&refs, weighting)
}

/// Vectorize documents whose term counts are already known.
pub fn vectorize_counts(batch: &[&TermCounts], weighting: IdfWeighting) -> Vectorized {
    let n = batch.len();
    let mut df: HashMap<&str, usize> = HashMap::new();
    for counts in batch {
        for term in counts.keys() {
            *df.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let idf: HashMap<String, f64> = df
        .iter()
        .map(|(term, df_t)| (term.to_string(), weighting.idf(n, *df_t)))
        .collect();

    let vectors = batch
        .iter()
        .map(|counts| {
            let weights = counts
                .iter()
                .map(|(term, tf)| (term.clone(), *tf as f64 * idf[term.as_str()]))
                .collect();
            WeightVector { weights }
        })
        .collect();

    tracing::debug!(num_docs = n, vocabulary = idf.len(), "vectorized batch");
    Vectorized { vocabulary: idf.keys().cloned().collect(), idf, vectors }
}

/// Cosine similarity; 0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &WeightVector, b: &WeightVector) -> f64 {
    let denom = a.magnitude() * b.magnitude();
    if denom == 0.0 {
        return 0.0;
    }
    let sim = a.dot(b) / denom;
    if sim.is_nan() { 0.0 } else { sim }
}
