//! symptom-insight CLI entrypoint.
//! Reads a symptom narrative, asks the diagnosis service for ranked
//! hypotheses and prints one card per prediction, revealing each confidence
//! meter on its staggered delay.

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use symptom_insight::config::clamp_top_k_value;
use symptom_insight::telemetry::init_tracing;
use symptom_insight::{analyze, AppConfig, HttpDiagnosisClient, ResultBoard, Session, Status};

#[derive(Parser)]
#[command(name = "symptom-insight")]
#[command(about = "Describe your symptoms and get ranked, educational-only hypotheses")]
struct Cli {
    /// Base URL of the diagnosis service (overrides API_URL)
    #[arg(long)]
    api_url: Option<String>,
    /// Number of hypotheses to request (1-5)
    #[arg(long)]
    top_k: Option<i64>,
    /// Print all cards together once every meter has settled
    #[arg(long)]
    no_animate: bool,
    /// Symptom narrative; read from stdin when omitted
    narrative: Vec<String>,
}

fn read_narrative(words: &[String]) -> Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Describe what you are feeling, then press Ctrl-D:");
    }
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .context("reading narrative from stdin")?;
    Ok(buf)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut cfg = AppConfig::load()?;
    if let Some(url) = cli.api_url {
        cfg = cfg.with_api_url(url);
    }
    if let Some(k) = cli.top_k {
        cfg.default_top_k = clamp_top_k_value(k);
    }

    let narrative = read_narrative(&cli.narrative)?;
    let mut session = Session::new(&cfg);
    let mut board = ResultBoard::new();

    if !session.can_submit(&narrative) {
        eprintln!("{}", session.status_label());
        return Ok(ExitCode::from(2));
    }

    let client = HttpDiagnosisClient::new(&cfg).context("building HTTP client")?;
    println!("Analyzing symptom narrative…");
    analyze(&client, &mut session, &mut board, &narrative).await;

    println!("{}", session.status_label());
    if session.status() == Status::Error {
        eprintln!("{}", session.error());
        return Ok(ExitCode::from(1));
    }

    if !cli.no_animate {
        // Cards reveal in index order; print each as soon as its meter lands.
        for card in board.cards_mut() {
            card.revealed().await;
            println!("\n{card}");
        }
    } else {
        board.settle().await;
        for card in board.cards() {
            println!("\n{card}");
        }
    }

    if let Some(at) = session.completed_at() {
        println!("Analyzed at {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!("\nEducational use only\n{}", session.disclaimer());
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = ?e, "symptom-insight failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
