use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use flowpulse_core::AppConfig;
use flowpulse_ingest::IngestPacing;
use flowpulse_scoring::{recompute_scores, ScoreScope, ScoreWeights};
use flowpulse_trends::TrendsClient;
use flowpulse_youtube::YoutubeClient;

#[derive(Debug, Parser)]
#[command(name = "flowpulse-cli")]
#[command(about = "flowpulse batch entry points")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ingest YouTube video statistics for one country.
    IngestYoutube {
        /// ISO-like region code, e.g. US or IN.
        #[arg(long)]
        country: String,
    },
    /// Ingest Google Trends interest for the configured keywords in one
    /// country ("global" for worldwide).
    IngestTrends {
        #[arg(long)]
        country: String,
    },
    /// Recompute popularity scores for the whole store.
    RecomputeScores,
    /// Run pending database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = flowpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(e) = run(cli.command, &config).await {
        // The scheduler keys off the exit code; the log line carries the
        // full error chain for operators.
        tracing::error!(error = format!("{e:#}"), "batch failed");
        return Err(e);
    }
    Ok(())
}

async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    let pool_config = flowpulse_db::PoolConfig::from_app_config(config);
    let pool = flowpulse_db::connect_pool(&config.database_url, pool_config).await?;
    flowpulse_db::run_migrations(&pool).await?;

    match command {
        Commands::IngestYoutube { country } => ingest_youtube(&pool, config, &country).await,
        Commands::IngestTrends { country } => ingest_trends(&pool, config, &country).await,
        Commands::RecomputeScores => recompute(&pool).await,
        Commands::Migrate => {
            println!("migrations up to date");
            Ok(())
        }
    }
}

async fn ingest_youtube(pool: &PgPool, config: &AppConfig, country: &str) -> anyhow::Result<()> {
    // Missing credentials fail here, before any batch work starts.
    let api_key = config.youtube_api_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!("YOUTUBE_API_KEY is not set; cannot run YouTube ingestion")
    })?;

    let client = YoutubeClient::new(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )
    .map_err(|e| anyhow::anyhow!("failed to build YouTube client: {e}"))?;

    let pacing = IngestPacing::from_app_config(config);
    let summary = flowpulse_ingest::youtube::run_youtube_ingest(
        pool,
        &pacing,
        &client,
        &config.search_query,
        country,
        config.youtube_max_results,
    )
    .await?;

    println!(
        "youtube ingestion for {country}: {} inserted, {} updated, {} skipped",
        summary.inserted, summary.updated, summary.skipped
    );
    Ok(())
}

async fn ingest_trends(pool: &PgPool, config: &AppConfig, country: &str) -> anyhow::Result<()> {
    let keywords = flowpulse_core::load_keywords(&config.keywords_path)?;

    let client = TrendsClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )
    .map_err(|e| anyhow::anyhow!("failed to build trends client: {e}"))?;

    let pacing = IngestPacing::from_app_config(config);
    let summary = flowpulse_ingest::trends::run_trends_ingest(
        pool,
        &pacing,
        &client,
        &keywords,
        country,
        &config.trends_timeframe,
    )
    .await?;

    println!(
        "trends ingestion for {country}: {} inserted, {} updated, {} skipped",
        summary.inserted, summary.updated, summary.skipped
    );
    Ok(())
}

async fn recompute(pool: &PgPool) -> anyhow::Result<()> {
    let written = recompute_scores(pool, &ScoreScope::all(), &ScoreWeights::default()).await?;
    println!("recomputed popularity scores for {written} records");
    Ok(())
}
