//! facescan binary.

use std::io::Write;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, error, info, warn};

use facescan_cli::{load_env_file, logging, read_input, run_blocking, schema_json, Cli};
use facescan_models::AnalysisResult;
use facescan_rekognition::RekognitionConfig;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print().ok();
            return;
        }
        Err(e) => {
            emit(&AnalysisResult::unavailable(e.to_string().trim()));
            return;
        }
    };

    // Load environment variables
    let env_file = load_env_file(cli.env_file.as_ref());
    logging::init();

    match env_file {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if cli.env_file.is_some() => warn!("Failed to load env file: {}", e),
        Err(_) => {}
    }

    if cli.print_schema {
        emit_line(&schema_json());
        return;
    }

    let input = match read_input() {
        Ok(input) => input,
        Err(e) => {
            error!("{:#}", e);
            emit(&AnalysisResult::unavailable(format!("{:#}", e)));
            return;
        }
    };

    let config = RekognitionConfig::from_env();
    info!(
        region = %config.region,
        credentials = config.credentials.is_some(),
        input_len = input.len(),
        "Starting face analysis"
    );

    emit(&run_blocking(input, config));
}

fn emit(result: &AnalysisResult) {
    emit_line(&result.to_json_line());
}

fn emit_line(line: &str) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
        error!("Failed to write result: {}", e);
    }
}
