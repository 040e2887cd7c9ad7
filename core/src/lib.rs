//! Resume screening engine: ranks free-text documents against a query with
//! TF-IDF cosine similarity plus a skill-overlap bonus, and summarizes a corpus.
//!
//! Everything here is synchronous and free of I/O. Callers own the [`Corpus`]
//! and must serialize edits to it with respect to in-flight `rank`/`summarize`.

pub mod analytics;
pub mod config;
pub mod corpus;
pub mod error;
pub mod features;
pub mod ranker;
pub mod tokenizer;
pub mod vectorizer;

pub use analytics::{summarize, AnalyticsSnapshot, SkillCount};
pub use config::{EngineConfig, IdfWeighting, DEFAULT_ENGINE};
pub use corpus::{Corpus, DocId, Document};
pub use error::{Result, ScreenError};
pub use features::{ExperienceBand, ExperienceLevel, ExperiencePatterns, Features, SkillDictionary, SkillSet};
pub use ranker::{MatchResult, Query};

/// Extract skills and experience using the built-in tables.
pub fn extract_features(raw_text: &str) -> Features {
    extract_features_with(&DEFAULT_ENGINE, raw_text)
}

pub fn extract_features_with(config: &EngineConfig, raw_text: &str) -> Features {
    Features {
        skills: config.skills.extract(raw_text),
        experience: config.experience.extract(raw_text),
    }
}

/// Rank `corpus` against `query_text` using the built-in configuration.
pub fn rank(corpus: &Corpus, query_text: &str) -> Vec<MatchResult> {
    ranker::rank(corpus, query_text, &DEFAULT_ENGINE)
}
