//! Rekognition analyzer.

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_rekognition::config::retry::RetryConfig;
use aws_sdk_rekognition::config::Builder;
use aws_sdk_rekognition::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_rekognition::operation::detect_faces::DetectFacesError;
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::{Attribute, Image};
use aws_sdk_rekognition::Client;
use aws_types::region::Region;
use facescan_models::{AnalysisResult, FaceDetail};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::{AwsCredentials, RekognitionConfig};
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::faces::summarize_faces;
use crate::payload::decode_image;

/// Target of the raw service response log line.
pub const RAW_RESPONSE_TARGET: &str = "facescan::raw_response";

/// Face analyzer backed by AWS Rekognition.
///
/// Availability is decided once in [`Analyzer::new`]: a missing or
/// unusable configuration leaves the analyzer unavailable and every call
/// returns without touching the network.
#[derive(Debug, Clone)]
pub struct Analyzer {
    client: Option<Client>,
    echo_raw_response: bool,
}

impl Analyzer {
    /// Create an analyzer from configuration.
    ///
    /// Never fails: configuration problems are logged and produce an
    /// unavailable analyzer.
    pub fn new(config: &RekognitionConfig) -> Self {
        let Some(credentials) = config.credentials.as_ref() else {
            warn!("AWS credentials not provided - Rekognition features disabled");
            return Self::unavailable(config);
        };

        match build_client(credentials, config) {
            Ok(client) => {
                info!(
                    region = %config.region,
                    endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
                    "AWS Rekognition client initialized successfully"
                );
                Self {
                    client: Some(client),
                    echo_raw_response: config.echo_raw_response,
                }
            }
            Err(e) => {
                error!("Failed to initialize AWS Rekognition: {}", e);
                Self::unavailable(config)
            }
        }
    }

    fn unavailable(config: &RekognitionConfig) -> Self {
        Self {
            client: None,
            echo_raw_response: config.echo_raw_response,
        }
    }

    /// Whether a client was constructed.
    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Detect faces in a base64 image payload.
    ///
    /// Sends exactly one `DetectFaces` request with all attributes.
    pub async fn detect_faces(&self, image: &str) -> AnalyzerResult<Vec<FaceDetail>> {
        let client = self.client.as_ref().ok_or(AnalyzerError::NotAvailable)?;

        let bytes = decode_image(image)?;
        debug!("Sending DetectFaces request with {} image bytes", bytes.len());

        let output = client
            .detect_faces()
            .image(Image::builder().bytes(Blob::new(bytes)).build())
            .attributes(Attribute::All)
            .send()
            .await
            .map_err(|e| AnalyzerError::remote_service(remote_error_message(e)))?;

        if self.echo_raw_response {
            info!(target: RAW_RESPONSE_TARGET, response = ?output, "DetectFaces response");
        } else {
            debug!(target: RAW_RESPONSE_TARGET, response = ?output, "DetectFaces response");
        }

        let faces = summarize_faces(output)?;
        info!(face_count = faces.len(), "Face analysis complete");
        Ok(faces)
    }

    /// Analyze a base64 image payload.
    ///
    /// Failures are folded into an unavailable result carrying the error
    /// message.
    pub async fn analyze(&self, image: &str) -> AnalysisResult {
        match self.detect_faces(image).await {
            Ok(faces) => AnalysisResult::success(faces),
            Err(e) => {
                warn!(error = %e, "Face analysis failed");
                AnalysisResult::unavailable(e.to_string())
            }
        }
    }
}

/// Short message for a failed `DetectFaces` call.
///
/// Service errors render as `<code>: <message>`; dispatch, timeout and
/// response errors render as their display chain. The raw HTTP response is
/// never included.
fn remote_error_message<R>(err: SdkError<DetectFacesError, R>) -> String
where
    R: std::fmt::Debug + 'static,
{
    match err {
        SdkError::ServiceError(context) => {
            let err = context.into_err();
            match (err.code(), err.message()) {
                (Some(code), Some(message)) => format!("{}: {}", code, message),
                (Some(code), None) => code.to_string(),
                (None, Some(message)) => message.to_string(),
                (None, None) => err.to_string(),
            }
        }
        other => error_chain(&other),
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn build_client(credentials: &AwsCredentials, config: &RekognitionConfig) -> AnalyzerResult<Client> {
    validate_key("AWS_ACCESS_KEY_ID", &credentials.access_key_id)?;
    validate_key("AWS_SECRET_ACCESS_KEY", &credentials.secret_access_key)?;
    validate_region(&config.region)?;

    let credentials = Credentials::new(
        &credentials.access_key_id,
        &credentials.secret_access_key,
        None,
        None,
        "facescan-env",
    );

    let mut builder = Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .retry_config(RetryConfig::disabled());

    if let Some(endpoint) = config.endpoint_url.as_deref() {
        validate_endpoint(endpoint)?;
        builder = builder.endpoint_url(endpoint);
    }

    Ok(Client::from_conf(builder.build()))
}

fn validate_key(name: &str, value: &str) -> AnalyzerResult<()> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_graphic()) {
        return Err(AnalyzerError::config_error(format!(
            "{} contains whitespace or non-printable characters",
            name
        )));
    }
    Ok(())
}

fn validate_region(region: &str) -> AnalyzerResult<()> {
    let valid = !region.is_empty()
        && !region.starts_with('-')
        && !region.ends_with('-')
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if !valid {
        return Err(AnalyzerError::config_error(format!("invalid region: {}", region)));
    }
    Ok(())
}

fn validate_endpoint(endpoint: &str) -> AnalyzerResult<()> {
    let url = Url::parse(endpoint)
        .map_err(|e| AnalyzerError::config_error(format!("invalid endpoint {}: {}", endpoint, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AnalyzerError::config_error(format!(
            "unsupported endpoint scheme: {}",
            other
        ))),
    }
}
