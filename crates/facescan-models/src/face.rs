//! Face summary models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Emotion label used when the service reports no emotion for a face.
pub const UNKNOWN_EMOTION: &str = "Unknown";

/// Axis-aligned face rectangle, passed through from the detection service.
///
/// Values are ratios of the overall image size. Field names keep the
/// service's casing (`Width`, `Height`, `Left`, `Top`); fields the service
/// omitted stay omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
}

impl BoundingBox {
    /// Fully populated box.
    pub fn new(width: f32, height: f32, left: f32, top: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            left: Some(left),
            top: Some(top),
        }
    }
}

/// Attributes of one detected face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceDetail {
    /// Detection confidence (0-100)
    pub confidence: f32,

    /// Whether the face is smiling
    pub smiling: bool,

    /// Confidence of the smile attribute (0-100)
    pub smile_confidence: f32,

    /// Whether the face has a beard
    pub has_beard: bool,

    /// First emotion reported for the face, or [`UNKNOWN_EMOTION`]
    pub primary_emotion: String,

    /// Face location
    pub bounding_box: BoundingBox,
}

impl Default for FaceDetail {
    fn default() -> Self {
        Self {
            confidence: 0.0,
            smiling: false,
            smile_confidence: 0.0,
            has_beard: false,
            primary_emotion: UNKNOWN_EMOTION.to_string(),
            bounding_box: BoundingBox::default(),
        }
    }
}
