use serde::Serialize;

use crate::config::{EngineConfig, MAX_MATCH_SCORE, MIN_MATCH_SCORE, SKILL_BONUS_WEIGHT};
use crate::corpus::{DocId, Document};
use crate::features::{ExperienceLevel, SkillSet};
use crate::tokenizer::term_counts;
use crate::vectorizer::{cosine_similarity, vectorize_counts};

/// One ranked document with the evidence behind its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub document_id: DocId,
    pub name: String,
    /// Final score in `[0, 100]`.
    pub score: f64,
    pub similarity: f64,
    pub base_score: f64,
    pub skill_bonus: f64,
    pub experience: ExperienceLevel,
    pub skills: SkillSet,
    pub matched_skills: SkillSet,
}

/// Search text chosen from a keyword box and a job description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
}

impl Query {
    /// Keywords win when they are not blank; otherwise the job description is used.
    /// Returns `None` when both are blank.
    pub fn from_inputs(keywords: Option<&str>, job_description: Option<&str>) -> Option<Self> {
        [keywords, job_description]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .map(|s| Query { text: s.to_string() })
    }
}

/// Score every document against `query_text` and return matches, best first.
///
/// The query is vectorized together with the whole corpus, so its own terms take
/// part in the IDF statistics. Cost grows with corpus size on every call.
pub fn rank<'a, I>(corpus: I, query_text: &str, config: &EngineConfig) -> Vec<MatchResult>
where
    I: IntoIterator<Item = &'a Document>,
{
    if query_text.trim().is_empty() {
        return Vec::new();
    }
    let docs: Vec<&Document> = corpus.into_iter().collect();

    let query_counts = term_counts(query_text);
    let mut batch: Vec<_> = docs.iter().map(|d| d.term_counts()).collect();
    batch.push(&query_counts);
    let vectorized = vectorize_counts(&batch, config.idf);
    let Some((query_vec, doc_vecs)) = vectorized.vectors.split_last() else {
        return Vec::new();
    };

    let query_skills = config.skills.extract(query_text);
    let mut results: Vec<MatchResult> = docs
        .iter()
        .zip(doc_vecs)
        .map(|(doc, vec)| {
            let similarity = cosine_similarity(query_vec, vec);
            let base_score = (similarity * 100.0).round();
            let matched_skills = doc.skills().intersection(&query_skills);
            let skill_bonus = matched_skills.len() as f64 / query_skills.len().max(1) as f64 * SKILL_BONUS_WEIGHT;
            let score = (base_score + skill_bonus).clamp(0.0, MAX_MATCH_SCORE);
            MatchResult {
                document_id: doc.id,
                name: doc.name.clone(),
                score,
                similarity,
                base_score,
                skill_bonus,
                experience: doc.experience(),
                skills: doc.skills().clone(),
                matched_skills,
            }
        })
        .filter(|r| r.score > MIN_MATCH_SCORE)
        .collect();

    // stable: equal scores keep corpus order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    tracing::debug!(candidates = docs.len(), matches = results.len(), "ranked corpus");
    results
}
