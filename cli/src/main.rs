use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use screener_core::ranker::rank;
use screener_core::{
    extract_features_with, summarize, AnalyticsSnapshot, Corpus, EngineConfig, IdfWeighting, MatchResult, Query,
    SkillDictionary,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

mod acquire;

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Rank resumes against a job description with TF-IDF and skill matching", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EngineArgs {
    /// Skill dictionary file, one skill per line (defaults to the built-in list)
    #[arg(long)]
    skills: Option<PathBuf>,
    /// Use smoothed IDF = ln(1 + N/df) instead of ln(N/df)
    #[arg(long, default_value_t = false)]
    smoothed_idf: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents against keywords or a job description
    Rank {
        /// Input path (file or directory of .txt/.md/.json/.jsonl)
        #[arg(long)]
        input: PathBuf,
        /// Keyword query; takes precedence over --job-description when not blank
        #[arg(long)]
        query: Option<String>,
        /// File holding the job description
        #[arg(long)]
        job_description: Option<PathBuf>,
        /// Maximum rows to print
        #[arg(long)]
        top_k: Option<usize>,
        /// Emit JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Corpus-wide skill and experience statistics
    Analyze {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Show the skills and experience level extracted from one file
    Extract {
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Serialize)]
struct RankReport<'a> {
    generated_at: String,
    query: &'a str,
    total_documents: usize,
    total_matches: usize,
    results: &'a [MatchResult],
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { input, query, job_description, top_k, json, engine } => {
            let config = engine_config(&engine)?;
            let jd = job_description
                .map(|p| fs::read_to_string(&p).with_context(|| format!("reading {}", p.display())))
                .transpose()?;
            let query = Query::from_inputs(query.as_deref(), jd.as_deref())
                .ok_or_else(|| anyhow!("provide a non-blank --query or --job-description"))?;
            let corpus = load_corpus(&input, &config)?;
            run_rank(&corpus, &query, &config, top_k, json)
        }
        Commands::Analyze { input, json, engine } => {
            let config = engine_config(&engine)?;
            let corpus = load_corpus(&input, &config)?;
            let snapshot = summarize(&corpus);
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_analytics(&snapshot);
            }
            Ok(())
        }
        Commands::Extract { input, engine } => {
            let config = engine_config(&engine)?;
            let doc = acquire::read_text(&input)?;
            let features = extract_features_with(&config, &doc.text);
            println!("{}", serde_json::to_string_pretty(&features)?);
            Ok(())
        }
    }
}

fn engine_config(args: &EngineArgs) -> Result<EngineConfig> {
    let mut config = EngineConfig::default();
    if let Some(path) = &args.skills {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let dict = SkillDictionary::from_lines(&text)?;
        tracing::info!(skills = dict.len(), path = %path.display(), "loaded skill dictionary");
        config = config.with_skills(dict);
    }
    if args.smoothed_idf {
        config = config.with_idf(IdfWeighting::Smoothed);
    }
    Ok(config)
}

fn load_corpus(input: &Path, config: &EngineConfig) -> Result<Corpus> {
    let raw = acquire::load(input)?;
    let mut corpus = Corpus::new();
    corpus.add_batch(raw.into_iter().map(|d| (d.name, d.text)), config)?;
    Ok(corpus)
}

fn run_rank(corpus: &Corpus, query: &Query, config: &EngineConfig, top_k: Option<usize>, json: bool) -> Result<()> {
    let start = std::time::Instant::now();
    let mut results = rank(corpus, &query.text, config);
    let total_matches = results.len();
    if let Some(k) = top_k {
        results.truncate(k);
    }
    tracing::info!(documents = corpus.len(), matches = total_matches, took_s = start.elapsed().as_secs_f64(), "ranking complete");

    if json {
        let report = RankReport {
            generated_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default(),
            query: &query.text,
            total_documents: corpus.len(),
            total_matches,
            results: &results,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No candidates scored above the match threshold.");
        return Ok(());
    }
    println!("{:<5} {:<24} {:>7}  {:<24} {:<30} {}", "Rank", "Candidate", "Score", "Experience", "Matched Skills", "Skills");
    for (idx, r) in results.iter().enumerate() {
        println!(
            "{:<5} {:<24} {:>6.1}%  {:<24} {:<30} {}",
            idx + 1,
            r.name,
            r.score,
            r.experience.to_string(),
            join(&r.matched_skills),
            join(&r.skills),
        );
    }
    Ok(())
}

fn join<'a>(skills: impl IntoIterator<Item = &'a String>) -> String {
    skills.into_iter().map(String::as_str).collect::<Vec<_>>().join("; ")
}

fn print_analytics(snapshot: &AnalyticsSnapshot) {
    println!("Total documents: {}", snapshot.total_documents);
    println!("Average skills per document: {:.1}", snapshot.avg_skills_per_document);
    println!();
    println!("Top skills:");
    for s in &snapshot.top_skills {
        println!("  {:<20} {}", s.skill, s.count);
    }
    println!();
    println!("Experience distribution:");
    for (band, count) in &snapshot.experience_distribution {
        println!("  {:<24} {}", band.label(), count);
    }
}
