mod pipeline;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use shotwire_answering::OpenAiAnswerer;
use shotwire_config::{Config, redact};
use shotwire_core::Region;
use shotwire_mailer::SmtpMailer;
use shotwire_understanding::GoogleVisionDescriber;

use pipeline::{Pipeline, RunOutcome};

#[derive(Parser)]
#[command(name = "shotwire")]
#[command(about = "Capture a screen region, answer it, and email the result")]
#[command(version)]
struct Cli {
    /// Capture region, overriding SHOTWIRE_REGION
    #[arg(long, value_name = "L,T,W,H")]
    region: Option<Region>,

    /// Capture the entire primary display
    #[arg(long, conflicts_with = "region")]
    full_screen: bool,

    /// Directory where screenshots are written
    #[arg(long, value_name = "PATH")]
    screenshot_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Some(region) = cli.region {
        config.capture_region = Some(region);
    }
    if cli.full_screen {
        config.capture_region = None;
    }
    if let Some(dir) = cli.screenshot_dir {
        config.screenshot_dir = dir;
    }

    info!(config = %redact::snapshot(&config), "configuration loaded");

    let answerer = Arc::new(OpenAiAnswerer::new(&config.openai_api_key));
    let describer = Arc::new(GoogleVisionDescriber::new(&config.vision_api_key));
    let mailer = Arc::new(SmtpMailer::new(
        &config.smtp.host,
        config.smtp.port,
        &config.smtp.username,
        &config.smtp.password,
        &config.from_email,
        &config.to_email,
    )?);

    let pipeline = Pipeline::new(&config, answerer, describer, mailer);
    match pipeline.run().await? {
        RunOutcome::Delivered { subject } => info!(%subject, "run complete"),
        RunOutcome::Aborted { stage } => warn!(stage, "run ended without delivery"),
    }

    Ok(())
}
