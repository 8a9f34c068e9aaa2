use anyhow::{Context, Result};
use clap::Parser;
use inference_ui::config::AppConfig;
use inference_ui::render::json::SYNTAX_SET;
use inference_ui::render::STYLESHEET;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inference-ui")]
#[command(about = "Web front-end for exercising the classifier and RAG inference services")]
struct Args {
    /// Address to listen on (or set INFERENCE_UI_BIND_ADDR)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    lazy_static::initialize(&SYNTAX_SET);
    lazy_static::initialize(&STYLESHEET);
    info!("inference-ui {} starting...", env!("CARGO_PKG_VERSION"));

    inference_ui::server::run(config).await.context("server stopped")?;
    Ok(())
}
