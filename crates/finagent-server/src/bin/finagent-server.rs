//! Finance agent HTTP server
//!
//! # Usage
//!
//! ```bash
//! export HF_TOKEN="hf_..."
//! export FINAGENT_API_TOKEN="change-me"   # optional
//!
//! cargo run --bin finagent-server -p finagent-server -- --bind 0.0.0.0:8000
//! ```

use anyhow::Context;
use clap::Parser;
use finagent_llm::providers::{OpenAIConfig, OpenAIProvider};
use finagent_market::{FinanceConfig, QueryHandler};
use finagent_server::{AppState, ServerConfig, build_app};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "finagent-server")]
#[command(about = "HTTP API for the finance query agent", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "FINAGENT_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Path prefix for every route
    #[arg(long, env = "FINAGENT_API_PREFIX", default_value = "/api/v1")]
    api_prefix: String,

    /// Bearer token required by auth and chat routes
    #[arg(long, env = "FINAGENT_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Allowed CORS origins (comma separated); any origin when omitted
    #[arg(long = "cors-origin", env = "FINAGENT_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,

    /// Chat model (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// OpenAI-compatible API base (overrides OPENAI_API_BASE)
    #[arg(long)]
    api_base: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    finagent_utils::init_tracing();

    let args = Args::parse();
    let app_config = finagent_utils::Config::from_env();

    let mut finance = FinanceConfig::builder().with_env();
    if let Some(model) = args.model {
        finance = finance.model(model);
    }
    let finance = finance.build().context("invalid finance configuration")?;

    let mut openai = OpenAIConfig::from_env().context("no LLM credentials configured")?;
    if let Some(api_base) = args.api_base {
        openai = openai.with_api_base(api_base);
    }
    let provider = Arc::new(OpenAIProvider::with_config(openai)?);

    let handler = Arc::new(QueryHandler::from_config(provider, &finance)?);

    let server_config = ServerConfig::default()
        .with_bind_addr(args.bind)
        .with_api_prefix(args.api_prefix)
        .with_api_token(args.api_token)
        .with_cors_origins(args.cors_origins);

    let listener = TcpListener::bind(server_config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", server_config.bind_addr))?;

    info!(
        addr = %listener.local_addr()?,
        prefix = %server_config.api_prefix,
        model = %finance.model,
        auth = server_config.api_token.is_some(),
        environment = %app_config.environment,
        "Starting finagent server"
    );

    let app = build_app(AppState::new(handler, server_config, app_config));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
