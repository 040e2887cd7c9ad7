use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use screener_core::{EngineConfig, SkillDictionary};
use screener_server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Skill dictionary file, one skill per line (defaults to the built-in list)
    #[arg(long)]
    skills: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut config = EngineConfig::default();
    if let Some(path) = &args.skills {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        config = config.with_skills(SkillDictionary::from_lines(&text)?);
    }
    tracing::info!(skills = config.skills.len(), "engine configured");
    let app: Router = build_app(config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
