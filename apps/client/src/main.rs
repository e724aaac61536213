use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compass_client::config::Config;
use compass_client::models::ResumeFile;
use compass_client::notify::TracingSink;
use compass_client::services::analysis::AnalysisClient;
use compass_client::services::catalog::CatalogClient;
use compass_client::services::intake::IntakeClient;
use compass_client::services::{build_http_client, probe_health};
use compass_client::session::{SessionOrchestrator, SubmitOutcome};

/// Upload a resume and print the career analysis.
#[derive(Debug, Parser)]
#[command(name = "compass", version)]
struct Args {
    /// Resume file (PDF, JPG, or PNG).
    file: PathBuf,

    /// Target role; must be in the backend catalog once it has loaded.
    #[arg(long)]
    role: Option<String>,

    /// Experience level sent to the analyzer (default: Intermediate).
    #[arg(long)]
    experience_level: Option<String>,

    /// Industry sent to the analyzer (default: Technology).
    #[arg(long)]
    industry: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "CareerCompass client v{} -> {}",
        env!("CARGO_PKG_VERSION"),
        config.api_base_url
    );

    let http = build_http_client(config.request_timeout_secs);
    let base = config.api_base_url.clone();
    let session = Arc::new(SessionOrchestrator::new(
        Arc::new(IntakeClient::new(http.clone(), base.clone())),
        Arc::new(AnalysisClient::new(http.clone(), base.clone())),
        Arc::new(CatalogClient::new(http.clone(), base.clone())),
        Arc::new(TracingSink),
    ));

    match probe_health(&http, &base).await {
        Ok(health) => info!(
            analyzer_available = health.analyzer_available,
            "backend is {}", health.status
        ),
        Err(e) => warn!("backend health probe failed: {e}"),
    }

    // Degraded role selection is fine; the session already reported it.
    if session.load_roles().await.is_ok() {
        info!("available roles: {}", session.snapshot().roles.join(", "));
    }

    if let Some(role) = args.role {
        session.select_role(role)?;
    }
    if let Some(level) = args.experience_level {
        session.set_experience_level(level);
    }
    if let Some(industry) = args.industry {
        session.set_industry(industry);
    }

    session.select_file(read_resume(&args.file)?)?;
    let outcome = session.submit().await?;

    let snapshot = session.snapshot();
    match outcome {
        SubmitOutcome::Analyzed => {
            if let Some(result) = &snapshot.analysis {
                println!("Analysis for role: {}", result.role);
                println!("Source: {}", result.source.label());
                println!("{}", serde_json::to_string_pretty(&result.analysis)?);
            }
        }
        SubmitOutcome::ExtractedOnly => {
            if let Some(profile) = &snapshot.profile {
                println!("Analyzer unavailable; extracted data only.");
                println!(
                    "Skills ({}): {}",
                    profile.skill_count,
                    profile.skills.join(", ")
                );
                println!("{}", profile.preview);
            }
        }
        SubmitOutcome::Superseded => {}
    }

    Ok(())
}

/// Reads the resume and derives the MIME type from the extension, the
/// way a file picker would report it. Unknown extensions fall through
/// to the validator, which rejects them with a readable message.
fn read_resume(path: &Path) -> Result<ResumeFile> {
    let data =
        std::fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("resume")
        .to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let mime = match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    };
    Ok(ResumeFile::new(name, mime, data))
}
