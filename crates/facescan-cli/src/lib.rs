//! Command-line adapter around the Rekognition analyzer.
//!
//! Reads one base64 image from stdin and prints one JSON line. Failures are
//! reported through the `available`/`error` fields; the process always
//! exits with status 0.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use facescan_models::AnalysisResult;
use facescan_rekognition::{Analyzer, RekognitionConfig};

pub mod logging;

/// Error reported when stdin carries no payload.
pub const NO_INPUT_MESSAGE: &str = "No input data provided";

/// Error reported when the analyzer could not be set up.
pub const NOT_INITIALIZED_MESSAGE: &str = "Rekognition analyzer not initialized";

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "facescan", version, about = "Detect faces in a base64 image read from stdin")]
pub struct Cli {
    /// Dotenv file holding AWS credentials
    #[arg(long, env = "FACESCAN_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Print the JSON schema of the output and exit
    #[arg(long)]
    pub print_schema: bool,
}

/// Load environment variables from the dotenv file.
///
/// Without an explicit path the usual `.env` lookup applies. Returns the
/// loaded path; callers decide whether a failure matters.
pub fn load_env_file(path: Option<&PathBuf>) -> dotenvy::Result<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.clone()),
        None => dotenvy::dotenv(),
    }
}

/// Read the whole of stdin.
pub fn read_input() -> anyhow::Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    Ok(input)
}

/// Analyze one stdin payload.
pub async fn run(input: &str, config: &RekognitionConfig) -> AnalysisResult {
    let payload = input.trim();
    if payload.is_empty() {
        return AnalysisResult::unavailable(NO_INPUT_MESSAGE);
    }

    let analyzer = Analyzer::new(config);
    if !analyzer.is_available() {
        return AnalysisResult::unavailable(NOT_INITIALIZED_MESSAGE);
    }

    analyzer.analyze(payload).await
}

/// Run the analysis on a current-thread runtime.
///
/// Runtime construction errors and panics inside the analysis are folded
/// into an unavailable result.
pub fn run_blocking(input: String, config: RekognitionConfig) -> AnalysisResult {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => return AnalysisResult::unavailable(format!("Failed to start runtime: {}", e)),
    };

    runtime.block_on(async move {
        let task = tokio::spawn(async move { run(&input, &config).await });
        join_result(task.await)
    })
}

/// Result of the analysis task, with a panic or cancellation reported as
/// unavailable.
fn join_result(joined: Result<AnalysisResult, tokio::task::JoinError>) -> AnalysisResult {
    joined.unwrap_or_else(|e| AnalysisResult::unavailable(panic_message(e)))
}

fn panic_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }

    let payload = err.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "analysis task panicked".to_string()
    }
}

/// Pretty JSON schema of the output.
pub fn schema_json() -> String {
    serde_json::to_string_pretty(&facescan_models::output_schema())
        .unwrap_or_else(|e| AnalysisResult::unavailable(e.to_string()).to_json_line())
}
