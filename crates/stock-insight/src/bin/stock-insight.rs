//! Stock investment report CLI
//!
//! # Usage
//!
//! ```bash
//! export GROQ_API_KEY="..."
//! export NEWS_API_KEY="..."
//!
//! # One query
//! cargo run --bin stock-insight -- --query "Compare Apple and Tesla stocks"
//!
//! # One query per line until exit/quit/EOF
//! cargo run --bin stock-insight -- --interactive
//! ```

use clap::Parser;
use insight_utils::{env_opt, init_tracing, load_dotenv};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use stock_insight::config::{DEFAULT_QUERY, LLM_API_KEY_ENV};
use stock_insight::dashboard::render::PAGE_HEADER;
use stock_insight::{Dashboard, StockConfig, TerminalRenderer};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stock-insight")]
#[command(about = "AI-powered investment insights for any stock", long_about = None)]
struct Args {
    /// Query naming one or two companies
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    query: String,

    /// Read queries from stdin until exit, quit or EOF
    #[arg(short, long)]
    interactive: bool,

    /// Ticker table CSV (Company,Symbol)
    #[arg(long, value_name = "PATH")]
    tickers: Option<PathBuf>,

    /// Timeout in seconds for every external request
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    let args = Args::parse();

    let mut builder = StockConfig::builder();
    if let Some(path) = args.tickers {
        builder = builder.ticker_table_path(path);
    }
    if let Some(secs) = args.timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    let config = builder.with_env().build()?;

    info!("Loading tickers from {}", config.ticker_table_path.display());
    let mut dashboard = Dashboard::from_config(&config, env_opt(LLM_API_KEY_ENV))?;
    let renderer = TerminalRenderer::new();

    println!("{PAGE_HEADER}\n");

    if args.interactive {
        run_interactive(&mut dashboard, &renderer).await?;
    } else {
        run_once(&mut dashboard, &renderer, &args.query).await?;
    }

    Ok(())
}

async fn run_once(
    dashboard: &mut Dashboard,
    renderer: &TerminalRenderer,
    query: &str,
) -> stock_insight::Result<()> {
    let state = dashboard.submit(query).await?;
    if let Some(text) = renderer.render_state(state) {
        println!("{text}\n");
    }
    Ok(())
}

async fn run_interactive(dashboard: &mut Dashboard, renderer: &TerminalRenderer) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("🔍 Enter stock query: ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            println!();
            break;
        }

        let query = input.trim();
        if matches!(query, "exit" | "quit") {
            break;
        }

        if let Err(e) = run_once(dashboard, renderer, query).await {
            eprintln!("❌ Error: {e}\n");
        }
    }

    Ok(())
}
