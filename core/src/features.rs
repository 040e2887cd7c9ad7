//! Structured facts pulled out of free text: the skill set and the experience level.
//!
//! Both extractors are table driven. The tables ([`SkillDictionary`] and
//! [`ExperiencePatterns`]) are immutable once built, so callers can swap in
//! smaller dictionaries without touching the matching code.

use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, ScreenError};

/// Ordered list of canonical, lowercase skill names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDictionary {
    entries: Vec<String>,
}

impl SkillDictionary {
    /// Build a dictionary, lowercasing entries and dropping repeats (first one wins).
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for entry in entries {
            let skill = entry.as_ref().trim().to_lowercase();
            if skill.is_empty() {
                return Err(ScreenError::InvalidArgument("skill dictionary entries must not be blank".into()));
            }
            if seen.insert(skill.clone()) {
                out.push(skill);
            }
        }
        Ok(Self { entries: out })
    }

    /// Parse one skill per line. Blank lines and `#` comments are skipped.
    pub fn from_lines(text: &str) -> Result<Self> {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    pub fn entries(&self) -> &[String] { &self.entries }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Every dictionary entry that occurs as a substring of the lowercased text.
    ///
    /// This is substring matching, not token matching: "java" is found inside
    /// "javascript" and "go" inside "good". Multi-word skills and punctuated ones
    /// like "ci/cd" match for the same reason.
    pub fn extract(&self, text: &str) -> SkillSet {
        let lowered = text.to_lowercase();
        SkillSet(
            self.entries
                .iter()
                .filter(|skill| lowered.contains(skill.as_str()))
                .cloned()
                .collect(),
        )
    }
}

/// Skills found in a text, in dictionary order, without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|s| s == skill)
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, String> { self.0.iter() }

    pub fn is_subset(&self, other: &SkillSet) -> bool {
        self.0.iter().all(|s| other.contains(s))
    }

    /// Skills present in both, in the order of `self`.
    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.iter().filter(|s| other.contains(s)).cloned().collect())
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// Regexes whose single capture group is a number of years.
#[derive(Debug, Clone)]
pub struct ExperiencePatterns {
    patterns: Vec<Regex>,
}

impl ExperiencePatterns {
    /// Compile case-insensitive patterns. Each must have exactly one capture group.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for p in patterns {
            let re = RegexBuilder::new(p.as_ref()).case_insensitive(true).build()?;
            if re.captures_len() != 2 {
                return Err(ScreenError::InvalidArgument(format!(
                    "experience pattern {:?} must have exactly one capture group",
                    p.as_ref()
                )));
            }
            compiled.push(re);
        }
        Ok(Self { patterns: compiled })
    }

    /// Largest year count mentioned by any pattern, 0 if none match.
    pub fn max_years(&self, text: &str) -> u64 {
        let mut max = 0;
        for re in &self.patterns {
            for caps in re.captures_iter(text) {
                let Some(m) = caps.get(1) else { continue };
                // the group is all digits, so only overflow can fail; saturate
                let years = m.as_str().parse::<u64>().unwrap_or(u64::MAX);
                max = max.max(years);
            }
        }
        max
    }

    pub fn extract(&self, text: &str) -> ExperienceLevel {
        ExperienceLevel::from_years(self.max_years(text))
    }
}

/// Per-document experience label. `Senior` keeps the literal year count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Fresher,
    Junior,
    MidLevel,
    Senior(u64),
}

impl ExperienceLevel {
    pub fn from_years(years: u64) -> Self {
        match years {
            0 => ExperienceLevel::Fresher,
            1..=2 => ExperienceLevel::Junior,
            3..=5 => ExperienceLevel::MidLevel,
            n => ExperienceLevel::Senior(n),
        }
    }

    /// The analytics bucket; every `Senior(n)` folds into one band.
    pub fn band(&self) -> ExperienceBand {
        match self {
            ExperienceLevel::Fresher => ExperienceBand::Fresher,
            ExperienceLevel::Junior => ExperienceBand::Junior,
            ExperienceLevel::MidLevel => ExperienceBand::MidLevel,
            ExperienceLevel::Senior(_) => ExperienceBand::Senior,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceLevel::Fresher => f.write_str("Fresher"),
            ExperienceLevel::Junior => f.write_str("Junior (0-2 years)"),
            ExperienceLevel::MidLevel => f.write_str("Mid-level (3-5 years)"),
            ExperienceLevel::Senior(n) => write!(f, "Senior ({n}+ years)"),
        }
    }
}

impl Serialize for ExperienceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fixed experience buckets used for corpus-wide counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExperienceBand {
    #[serde(rename = "Fresher")]
    Fresher,
    #[serde(rename = "Junior (0-2 years)")]
    Junior,
    #[serde(rename = "Mid-level (3-5 years)")]
    MidLevel,
    #[serde(rename = "Senior")]
    Senior,
}

impl ExperienceBand {
    pub const ALL: [ExperienceBand; 4] = [
        ExperienceBand::Fresher,
        ExperienceBand::Junior,
        ExperienceBand::MidLevel,
        ExperienceBand::Senior,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceBand::Fresher => "Fresher",
            ExperienceBand::Junior => "Junior (0-2 years)",
            ExperienceBand::MidLevel => "Mid-level (3-5 years)",
            ExperienceBand::Senior => "Senior",
        }
    }
}

/// Everything extracted from one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Features {
    pub skills: SkillSet,
    pub experience: ExperienceLevel,
}
