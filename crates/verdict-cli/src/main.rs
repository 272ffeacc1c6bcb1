//! Interactive stock ranking CLI
//!
//! Collects an industry and up to N ticker symbols, runs the per-ticker
//! analysis pipeline, and prints the model's ranking.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables (or put them in .env)
//! export OPENAI_API_KEY="sk-..."
//! export OPENAI_MODEL="gpt-3.5-turbo-0125"
//!
//! cargo run --bin verdict -- --max-tickers 10
//! ```

mod form;

use anyhow::Context;
use clap::Parser;
use form::TickerForm;
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;
use verdict_engine::{AnalysisPipeline, EngineConfig, ExecutionMode, suggest_tickers};
use verdict_llm::providers::{OpenAIConfig, OpenAIProvider};

#[derive(Parser, Debug)]
#[command(name = "verdict")]
#[command(about = "Rank stock tickers with LLM-backed analysis", long_about = None)]
struct Args {
    /// Maximum number of ticker fields on the form
    #[arg(long, default_value_t = 10)]
    max_tickers: usize,

    /// Process one ticker start-to-finish at a time instead of
    /// stage-wise concurrently
    #[arg(long)]
    sequential: bool,

    /// Ask the model to propose tickers for the industry instead of
    /// entering them
    #[arg(long)]
    suggest: bool,

    /// Industry to analyze (prompted for when omitted)
    #[arg(long)]
    industry: Option<String>,

    /// Model identifier (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Price history lookback in years
    #[arg(long, default_value_t = 1)]
    years: u32,
}

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════╗
║                      stock-verdict                       ║
║                                                          ║
║  Enter an industry and a handful of tickers; get back a  ║
║  sentiment, industry, and final analysis per ticker and  ║
║  a ranking of the batch.                                 ║
╚══════════════════════════════════════════════════════════╝
"
    );
}

fn get_provider_config() -> OpenAIConfig {
    let api_key = env::var("OPENAI_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: OPENAI_API_KEY not set");
        "not-needed".to_string()
    });

    let mut config = OpenAIConfig::new(api_key).with_timeout(180);
    if let Ok(api_base) = env::var("OPENAI_API_BASE") {
        config = config.with_api_base(api_base);
    }
    config
}

/// Print a prompt and read one trimmed line from stdin
fn read_line(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("failed to read input")?;
    Ok(input.trim().to_string())
}

/// Walk the form interactively: count first, then one prompt per
/// visible field
fn fill_form_interactively(form: &mut TickerForm) -> anyhow::Result<()> {
    let count_input = read_line(&format!("Number of stock tickers (1-{}): ", form.max()))?;
    let count = count_input.parse::<usize>().unwrap_or(1);
    form.set_visible(count);

    for i in 0..form.visible() {
        let value = read_line(&format!("Stock ticker {}: ", i + 1))?;
        form.set_field(i, value);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,verdict=info".to_string()),
        )
        .init();

    let args = Args::parse();

    print_banner();

    let openai_config = get_provider_config();
    println!("Configuration:");
    println!("  API Base: {}", openai_config.api_base);

    let provider = Arc::new(OpenAIProvider::with_config(openai_config)?);

    let mut engine_config = EngineConfig::default().from_env_model();
    if let Some(model) = &args.model {
        engine_config.model.clone_from(model);
    }
    engine_config.lookback_years = args.years;
    engine_config.validate()?;

    println!("  Model: {}", engine_config.model);
    println!();

    let industry = match args.industry {
        Some(industry) => industry,
        None => read_line("Industry: ")?,
    };
    if industry.is_empty() {
        anyhow::bail!("no industry given");
    }

    let tickers = if args.suggest {
        let tickers =
            suggest_tickers(provider.as_ref(), &engine_config, &industry, args.max_tickers)
                .await?;
        println!("Proposed tickers: {}", tickers.join(", "));
        tickers
    } else {
        let mut form = TickerForm::new(args.max_tickers);
        fill_form_interactively(&mut form)?;
        form.submit()
    };

    if tickers.is_empty() {
        anyhow::bail!("no tickers given");
    }

    let mode = if args.sequential {
        ExecutionMode::Sequential
    } else {
        ExecutionMode::Concurrent
    };

    info!(?tickers, industry, ?mode, "starting analysis");
    println!("Analyzing {} ticker(s)...\n", tickers.len());

    let pipeline = AnalysisPipeline::new(provider, engine_config)?;
    let verdict = pipeline.run(&industry, &tickers, mode).await?;

    println!("{}", verdict.render());

    Ok(())
}
