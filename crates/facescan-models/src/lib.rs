//! Output models for facescan.
//!
//! This crate provides Serde-serializable types for:
//! - Per-face summaries reduced from the detection service response
//! - The single-line JSON result printed by the CLI

pub mod face;
pub mod result;

// Re-export common types
pub use face::{BoundingBox, FaceDetail, UNKNOWN_EMOTION};
pub use result::{output_schema, AnalysisResult};
