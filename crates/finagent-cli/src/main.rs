//! Command-line interface for the finance query agent
//!
//! Answers a single `--query`, or starts an interactive prompt when none is
//! given.
//!
//! ```bash
//! export HF_TOKEN="hf_..."
//! cargo run --bin finagent -p finagent-cli -- --query "Give me the Dividend Yield of RELIANCE"
//! ```

use anyhow::Context;
use clap::Parser;
use finagent_llm::providers::{OpenAIConfig, OpenAIProvider};
use finagent_market::{FinanceConfig, QueryHandler};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "finagent")]
#[command(about = "Ask questions about NSE-listed stocks", long_about = None)]
struct Args {
    /// Answer this query and exit
    #[arg(short, long)]
    query: Option<String>,

    /// Chat model (overrides OPENAI_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// OpenAI-compatible API base (overrides OPENAI_API_BASE)
    #[arg(long)]
    api_base: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    finagent_utils::init_tracing_with_default("warn,finagent_market=info");

    let args = Args::parse();

    let mut finance = FinanceConfig::builder().with_env();
    if let Some(model) = args.model {
        finance = finance.model(model);
    }
    let finance = finance.build().context("invalid finance configuration")?;

    let mut openai = OpenAIConfig::from_env().context("set OPENAI_API_KEY or HF_TOKEN")?;
    if let Some(api_base) = args.api_base {
        openai = openai.with_api_base(api_base);
    }

    info!(api_base = %openai.api_base, model = %finance.model, "Starting finagent");

    let provider = Arc::new(OpenAIProvider::with_config(openai)?);
    let handler = QueryHandler::from_config(provider, &finance)?;

    match args.query {
        Some(query) => {
            println!("{}", handler.handle_query(&query).await?);
            Ok(())
        }
        None => repl(&handler).await,
    }
}

async fn repl(handler: &QueryHandler) -> anyhow::Result<()> {
    println!("finagent: ask about NSE stocks. Type /exit to quit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "/exit" | "/quit") {
            println!("Goodbye!");
            break;
        }

        match handler.handle_query(input).await {
            Ok(answer) => println!("{answer}\n"),
            Err(e) => eprintln!("Error: {e}\n"),
        }
    }

    Ok(())
}
