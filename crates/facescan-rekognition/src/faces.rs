//! Reduction of `DetectFaces` responses to face summaries.
//!
//! `Confidence` and `BoundingBox` are required on every face; a response
//! lacking either is malformed. Optional attributes resolve to fixed
//! defaults: flags to `false`, the smile confidence to `0` and the emotion
//! to [`UNKNOWN_EMOTION`].

use aws_sdk_rekognition::operation::detect_faces::DetectFacesOutput;
use aws_sdk_rekognition::types::{
    BoundingBox as SdkBoundingBox, Emotion, FaceDetail as SdkFaceDetail,
};
use facescan_models::{BoundingBox, FaceDetail, UNKNOWN_EMOTION};

use crate::error::{AnalyzerError, AnalyzerResult};

/// Summaries for every face in the response, in service order.
pub fn summarize_faces(output: DetectFacesOutput) -> AnalyzerResult<Vec<FaceDetail>> {
    output
        .face_details
        .unwrap_or_default()
        .iter()
        .map(summarize_face)
        .collect()
}

/// Summary for one face.
pub fn summarize_face(face: &SdkFaceDetail) -> AnalyzerResult<FaceDetail> {
    let confidence = face
        .confidence
        .ok_or_else(|| AnalyzerError::malformed_response("Confidence"))?;
    let bounding_box = face
        .bounding_box
        .as_ref()
        .map(bounding_box)
        .ok_or_else(|| AnalyzerError::malformed_response("BoundingBox"))?;
    let smile = face.smile.as_ref();

    Ok(FaceDetail {
        confidence,
        smiling: smile.map(|s| flag(s.value)).unwrap_or(false),
        smile_confidence: smile.and_then(|s| s.confidence).unwrap_or(0.0),
        has_beard: face.beard.as_ref().map(|b| flag(b.value)).unwrap_or(false),
        primary_emotion: primary_emotion(face.emotions.as_deref().unwrap_or_default()),
        bounding_box,
    })
}

/// Type of the first emotion entry.
pub fn primary_emotion(emotions: &[Emotion]) -> String {
    emotions
        .first()
        .and_then(|e| e.r#type.as_ref())
        .map(|t| t.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_EMOTION.to_string())
}

fn bounding_box(b: &SdkBoundingBox) -> BoundingBox {
    BoundingBox {
        width: b.width,
        height: b.height,
        left: b.left,
        top: b.top,
    }
}

// Attribute values are modelled as plain or optional booleans depending on
// the SDK release.
fn flag(value: impl Into<Option<bool>>) -> bool {
    value.into().unwrap_or(false)
}
