use serde::Serialize;
use std::collections::HashMap;

use crate::config::TOP_SKILLS_LIMIT;
use crate::corpus::Document;
use crate::features::ExperienceBand;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

/// Corpus-wide statistics. Recomputed from scratch on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub total_documents: usize,
    /// Most frequent skills, count descending, at most ten.
    pub top_skills: Vec<SkillCount>,
    /// All four bands, in fixed order, zero counts included.
    pub experience_distribution: Vec<(ExperienceBand, usize)>,
    /// 0 for an empty corpus.
    pub avg_skills_per_document: f64,
}

impl AnalyticsSnapshot {
    pub fn band_count(&self, band: ExperienceBand) -> usize {
        self.experience_distribution
            .iter()
            .find(|(b, _)| *b == band)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

pub fn summarize<'a, I>(corpus: I) -> AnalyticsSnapshot
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut total = 0usize;
    let mut skill_occurrences = 0usize;
    // first-seen order is the tie breaker
    let mut histogram: Vec<SkillCount> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut bands: HashMap<ExperienceBand, usize> = HashMap::new();

    for doc in corpus {
        total += 1;
        for skill in doc.skills() {
            skill_occurrences += 1;
            match slots.get(skill.as_str()) {
                Some(&i) => histogram[i].count += 1,
                None => {
                    slots.insert(skill.as_str(), histogram.len());
                    histogram.push(SkillCount { skill: skill.clone(), count: 1 });
                }
            }
        }
        *bands.entry(doc.experience().band()).or_insert(0) += 1;
    }

    histogram.sort_by(|a, b| b.count.cmp(&a.count));
    histogram.truncate(TOP_SKILLS_LIMIT);

    let avg_skills_per_document = if total == 0 { 0.0 } else { skill_occurrences as f64 / total as f64 };

    AnalyticsSnapshot {
        total_documents: total,
        top_skills: histogram,
        experience_distribution: ExperienceBand::ALL
            .iter()
            .map(|b| (*b, bands.get(b).copied().unwrap_or(0)))
            .collect(),
        avg_skills_per_document,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::corpus::Corpus;

    #[test]
    fn empty_corpus() {
        let snap = summarize(&Corpus::new());
        assert_eq!(snap.total_documents, 0);
        assert_eq!(snap.avg_skills_per_document, 0.0);
        assert!(snap.top_skills.is_empty());
        assert_eq!(snap.experience_distribution.len(), 4);
    }

    #[test]
    fn folds_senior_levels() {
        let cfg = EngineConfig::default();
        let mut c = Corpus::new();
        c.add("a", "8 years", &cfg).unwrap();
        c.add("b", "15 years", &cfg).unwrap();
        c.add("c", "1 year", &cfg).unwrap();
        let snap = summarize(&c);
        assert_eq!(snap.band_count(ExperienceBand::Senior), 2);
        assert_eq!(snap.band_count(ExperienceBand::Junior), 1);
        assert_eq!(snap.band_count(ExperienceBand::Fresher), 0);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let cfg = EngineConfig::default();
        let mut c = Corpus::new();
        c.add("a", "scrum", &cfg).unwrap();
        c.add("b", "agile", &cfg).unwrap();
        c.add("c", "agile", &cfg).unwrap();
        c.add("d", "scrum", &cfg).unwrap();
        let snap = summarize(&c);
        let names: Vec<&str> = snap.top_skills.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(names, vec!["scrum", "agile"]);
        assert_eq!(snap.avg_skills_per_document, 1.0);
    }
}
