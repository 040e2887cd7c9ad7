use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// Raw term frequencies for one piece of text.
pub type TermCounts = HashMap<String, u32>;

lazy_static! {
    // Whole words of ASCII letters only; anything touching a digit or underscore is dropped.
    static ref RE: Regex = Regex::new(r"\b[a-z]{2,}\b").expect("valid regex");
}

/// Tokenize text into lowercase alphabetic terms of length >= 2, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// Count how often each term of `text` occurs.
pub fn term_counts(text: &str) -> TermCounts {
    let mut counts = TermCounts::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}
