//! Turns files on disk into `(name, raw_text)` pairs for the corpus.
//!
//! Plain text (`.txt`, `.md`) becomes one document named after the file stem.
//! `.json` holds one record or an array of records, `.jsonl` one record per line.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct InputDoc {
    #[serde(alias = "id", alias = "title")]
    name: String,
    #[serde(alias = "body", alias = "content")]
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub name: String,
    pub text: String,
}

pub fn collect_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            let p = entry.path();
            if p.is_file() && is_supported(p) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        return Err(anyhow!("input path {} does not exist", input.display()));
    }
    Ok(files)
}

fn is_supported(p: &Path) -> bool {
    matches!(extension(p).as_deref(), Some("txt" | "md" | "json" | "jsonl"))
}

fn extension(p: &Path) -> Option<String> {
    p.extension().and_then(|s| s.to_str()).map(|s| s.to_ascii_lowercase())
}

/// Load every supported file under `input`. Non-UTF-8 files are an error, not skipped.
pub fn load(input: &Path) -> Result<Vec<RawDocument>> {
    let mut docs = Vec::new();
    for file in collect_files(input)? {
        match extension(&file).as_deref() {
            Some("jsonl") => read_jsonl(&file, &mut docs)?,
            Some("json") => read_json(&file, &mut docs)?,
            _ => docs.push(read_text(&file)?),
        }
    }
    tracing::info!(input = %input.display(), documents = docs.len(), "loaded documents");
    Ok(docs)
}

pub fn read_text(file: &Path) -> Result<RawDocument> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let name = file
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| file.display().to_string());
    Ok(RawDocument { name, text })
}

fn read_jsonl(file: &Path, docs: &mut Vec<RawDocument>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", file.display()))?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid record", file.display(), lineno + 1))?;
        docs.push(RawDocument { name: doc.name, text: doc.text });
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<RawDocument>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v)?;
                docs.push(RawDocument { name: doc.name, text: doc.text });
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json)?;
            docs.push(RawDocument { name: doc.name, text: doc.text });
        }
        _ => tracing::warn!(file = %file.display(), "skipping json that is neither object nor array"),
    }
    Ok(())
}
