//! AWS Rekognition face analyzer.
//!
//! This crate provides:
//! - Credential and region configuration from the environment
//! - Base64 image payload decoding
//! - A single-shot `DetectFaces` call
//! - Reduction of the service response to [`facescan_models::FaceDetail`]

pub mod analyzer;
pub mod config;
pub mod error;
pub mod faces;
pub mod payload;

pub use analyzer::Analyzer;
pub use config::{AwsCredentials, RekognitionConfig, DEFAULT_REGION};
pub use error::{AnalyzerError, AnalyzerResult};
