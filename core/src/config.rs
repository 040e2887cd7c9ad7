//! Scoring constants, built-in extraction tables and the engine configuration.
//!
//! The constants are compile-time; everything a caller may want to substitute
//! (skill dictionary, experience patterns, IDF variant) lives in [`EngineConfig`].

use lazy_static::lazy_static;

use crate::features::{ExperiencePatterns, SkillDictionary};

/// Maximum bonus added for full overlap between query skills and document skills.
pub const SKILL_BONUS_WEIGHT: f64 = 20.0;

/// Results must score strictly above this to be returned.
pub const MIN_MATCH_SCORE: f64 = 10.0;

/// Upper clamp for the final score.
pub const MAX_MATCH_SCORE: f64 = 100.0;

/// Number of entries kept in the analytics skill histogram.
pub const TOP_SKILLS_LIMIT: usize = 10;

/// Built-in skill dictionary: languages, frameworks, platforms and practices.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "javascript", "react", "angular", "vue", "node",
    "django", "flask", "spring", "sql", "mongodb", "postgresql", "mysql",
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "git",
    "html", "css", "typescript", "c++", "c#", "php", "ruby", "go",
    "machine learning", "deep learning", "ai", "data science", "nlp",
    "tensorflow", "pytorch", "scikit-learn", "pandas", "numpy",
    "agile", "scrum", "devops", "ci/cd", "rest api", "graphql",
    "redux", "next.js", "express", "fastapi", "microservices",
];

/// "N years", "N yrs" and "experience: N", each allowing a trailing "+".
pub const DEFAULT_EXPERIENCE_PATTERNS: &[&str] = &[
    r"([0-9]+)\+?\s*years?",
    r"([0-9]+)\+?\s*yrs?",
    r"experience[:\s]*([0-9]+)",
];

/// How inverse document frequency is computed for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdfWeighting {
    /// `ln(N / max(df, 1))`
    #[default]
    Standard,
    /// `ln(1 + N / max(df, 1))`
    Smoothed,
}

impl IdfWeighting {
    pub fn idf(&self, num_docs: usize, df: usize) -> f64 {
        let ratio = num_docs as f64 / df.max(1) as f64;
        match self {
            IdfWeighting::Standard => ratio.ln(),
            IdfWeighting::Smoothed => (1.0 + ratio).ln(),
        }
    }
}

/// Immutable tables and switches shared by extraction and ranking.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub skills: SkillDictionary,
    pub experience: ExperiencePatterns,
    pub idf: IdfWeighting,
}

impl EngineConfig {
    pub fn with_skills(mut self, skills: SkillDictionary) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_idf(mut self, idf: IdfWeighting) -> Self {
        self.idf = idf;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        DEFAULT_ENGINE.clone()
    }
}

lazy_static! {
    /// The built-in configuration, compiled once.
    pub static ref DEFAULT_ENGINE: EngineConfig = EngineConfig {
        skills: SkillDictionary::new(DEFAULT_SKILLS).expect("valid default skills"),
        experience: ExperiencePatterns::new(DEFAULT_EXPERIENCE_PATTERNS).expect("valid default patterns"),
        idf: IdfWeighting::Standard,
    };
}
