use std::path::PathBuf;
use clap::Parser;
use anyhow::{Result, Context};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use crate::flow::client::BASE_API_URL;
use crate::flow::{load_config, FlowClient, DEFAULT_CONFIG_PATH};
use crate::shell::{Session, Submission, TITLE};
use crate::tweaks::{ChatModel, EmbeddingModel, Settings, Temperature, Tweaks, DEFAULT_TWEAKS_PATH};

mod flow;
mod shell;
mod tweaks;

/// Chat with a Langflow flow from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Flow identifiers (JSON with langflow_id and flow_id)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Component tweaks sent with every run
    #[arg(long, default_value = DEFAULT_TWEAKS_PATH)]
    tweaks: PathBuf,

    /// Langflow API host
    #[arg(long, default_value = BASE_API_URL)]
    base_url: String,

    /// Chat model
    #[arg(short, long, value_enum, default_value_t = ChatModel::default())]
    model: ChatModel,

    /// Embedding model
    #[arg(short, long, value_enum, default_value_t = EmbeddingModel::default())]
    embedding_model: EmbeddingModel,

    /// Temperature between 0.0 and 1.0 (defaults to the tweaks file, then 0.7)
    #[arg(short, long)]
    temperature: Option<Temperature>,

    /// Send a single message and exit instead of starting a session
    #[arg(long)]
    message: Option<String>,

    /// Log level (debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level)?;

    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded environment from {}", path.display());
    }

    let config = load_config(&args.config)?;
    let tweaks = Tweaks::load(&args.tweaks)?;
    let settings = setup_settings(&args, &tweaks);
    let client = FlowClient::from_env(args.base_url.clone());

    let mut session = Session::new(config, client, tweaks, settings)?;

    let stdout = std::io::stdout();
    match &args.message {
        Some(message) => {
            let mut out = stdout.lock();
            if let Submission::Failed(reason) = session.submit(message, &mut out).await? {
                anyhow::bail!("Message was not delivered: {}", reason);
            }
        }
        None => {
            let stdin = std::io::stdin();
            session
                .run(stdin.lock(), stdout.lock())
                .await
                .context("Chat session failed")?;
        }
    }

    Ok(())
}

fn level_directive(log_level: &str) -> &'static str {
    match log_level.to_lowercase().as_str() {
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

fn setup_logging(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(log_level)));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_timer(tracing_subscriber::fmt::time::LocalTime::rfc_3339())
        .with_level(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {}", e))?;

    info!("{} starting", TITLE);
    Ok(())
}

fn setup_settings(args: &Args, tweaks: &Tweaks) -> Settings {
    Settings {
        model: args.model,
        embedding_model: args.embedding_model,
        temperature: args
            .temperature
            .or_else(|| tweaks.temperature())
            .unwrap_or_default(),
    }
}
