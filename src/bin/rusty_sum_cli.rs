//! One-shot summarization from the command line.
//!
//! Reads pasted text from `--text`, a PDF from `--file`, or text from stdin, and prints the
//! summary on stdout. Shares configuration and the summary pipeline with the HTTP server.
use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use rustysum::{
    config::Config,
    logging,
    service::{SummaryApi, SummaryInput, SummaryService},
};
use serde_json::json;

#[derive(Parser)]
#[command(
    name = "rusty-sum-cli",
    about = "Summarize text or a PDF with the configured model"
)]
struct Cli {
    /// PDF file to summarize.
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
    /// Text to summarize; stdin is read when neither this nor `--file` is given.
    #[arg(long)]
    text: Option<String>,
    /// Override the word budget per model call.
    #[arg(long)]
    max_chunk_words: Option<usize>,
    /// Print the full report as JSON instead of the bare summary.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_cli_tracing();
    let cli = Cli::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(words) = cli.max_chunk_words {
        if words == 0 {
            bail!("--max-chunk-words must be greater than zero");
        }
        config.max_chunk_words = words;
    }

    let input = match (cli.file, cli.text) {
        (Some(path), _) => read_file_input(&path)?,
        (None, Some(text)) => SummaryInput::from_text(text),
        (None, None) => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read text from stdin")?;
            SummaryInput::from_text(text)
        }
    };

    let service = SummaryService::from_config(&config)
        .context("failed to initialize summarization model")?;
    let report = match service.summarize(input).await {
        Ok(report) => report,
        Err(error) => {
            let category = format!("{:?}", error.category()).to_lowercase();
            bail!("{category} error: {error}")
        }
    };

    if cli.json {
        let outcome = &report.outcome;
        let value = json!({
            "request_id": report.request_id,
            "source": report.source,
            "summary": outcome.summary,
            "path": outcome.path,
            "input_words": outcome.input_words,
            "chunk_count": outcome.chunk_count,
            "model_calls": outcome.model_calls,
            "recombined": outcome.recombined,
            "generated_at": report.generated_at,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", report.outcome.summary);
    }
    Ok(())
}

fn read_file_input(path: &Path) -> Result<SummaryInput> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(SummaryInput::from_file(file_name, bytes))
}
