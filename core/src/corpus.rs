use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{Result, ScreenError};
use crate::features::{ExperienceLevel, SkillSet};
use crate::tokenizer::{term_counts, TermCounts};

pub type DocId = u32;

/// A stored document with its extracted features.
///
/// Features and term counts are computed once at construction and never change.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: DocId,
    pub name: String,
    #[serde(skip)]
    raw_text: String,
    skills: SkillSet,
    experience: ExperienceLevel,
    #[serde(skip)]
    term_counts: TermCounts,
}

impl Document {
    pub fn new(id: DocId, name: impl Into<String>, raw_text: impl Into<String>, config: &EngineConfig) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScreenError::InvalidArgument("document name must not be blank".into()));
        }
        let raw_text = raw_text.into();
        let features = crate::extract_features_with(config, &raw_text);
        let term_counts = term_counts(&raw_text);
        Ok(Self { id, name, raw_text, skills: features.skills, experience: features.experience, term_counts })
    }

    pub fn raw_text(&self) -> &str { &self.raw_text }

    pub fn skills(&self) -> &SkillSet { &self.skills }

    pub fn experience(&self) -> ExperienceLevel { self.experience }

    pub fn term_counts(&self) -> &TermCounts { &self.term_counts }
}

/// Documents in insertion order. Mutated only by append, removal and clear.
#[derive(Debug, Default, Clone)]
pub struct Corpus {
    docs: Vec<Document>,
    next_id: DocId,
}

impl Corpus {
    pub fn new() -> Self { Self::default() }

    /// Extract features for `raw_text` and append it. Returns the new id.
    pub fn add(&mut self, name: impl Into<String>, raw_text: impl Into<String>, config: &EngineConfig) -> Result<DocId> {
        let id = self.next_id;
        let doc = Document::new(id, name, raw_text, config)?;
        tracing::debug!(doc_id = id, name = %doc.name, skills = doc.skills.len(), "document added");
        self.docs.push(doc);
        self.next_id += 1;
        Ok(id)
    }

    /// Append a batch. Nothing is added if any entry is rejected.
    pub fn add_batch<I, N, T>(&mut self, batch: I, config: &EngineConfig) -> Result<Vec<DocId>>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let mut staged = Vec::new();
        let mut id = self.next_id;
        for (name, text) in batch {
            staged.push(Document::new(id, name, text, config)?);
            id += 1;
        }
        let ids = staged.iter().map(|d| d.id).collect();
        self.docs.extend(staged);
        self.next_id = id;
        Ok(ids)
    }

    pub fn remove(&mut self, id: DocId) -> Result<Document> {
        let pos = self
            .docs
            .iter()
            .position(|d| d.id == id)
            .ok_or(ScreenError::DocumentNotFound(id))?;
        Ok(self.docs.remove(pos))
    }

    /// Drop every document. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.docs.clear();
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.iter().find(|d| d.id == id)
    }

    pub fn documents(&self) -> &[Document] { &self.docs }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> { self.docs.iter() }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter { self.docs.iter() }
}
