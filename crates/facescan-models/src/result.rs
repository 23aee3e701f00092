//! Analysis result model.

use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::face::FaceDetail;

/// Result of one analysis run, printed as a single JSON line.
///
/// When `available` is true the result carries `face_count` and `faces`
/// (with `face_count == faces.len()`); otherwise it carries only `error`.
/// Use [`AnalysisResult::success`] and [`AnalysisResult::unavailable`] to
/// build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// Whether face detection could run at all
    pub available: bool,

    /// Failure reason when unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Number of detected faces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_count: Option<usize>,

    /// Detected faces, in service order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<FaceDetail>>,
}

impl AnalysisResult {
    /// Successful run with the given faces.
    pub fn success(faces: Vec<FaceDetail>) -> Self {
        Self {
            available: true,
            error: None,
            face_count: Some(faces.len()),
            faces: Some(faces),
        }
    }

    /// Failed or disabled run.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            available: false,
            error: Some(error.into()),
            face_count: None,
            faces: None,
        }
    }

    /// Serialize to a single line of JSON.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({ "available": false, "error": e.to_string() }).to_string()
        })
    }
}

/// JSON schema of the CLI output.
pub fn output_schema() -> RootSchema {
    schemars::schema_for!(AnalysisResult)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_omits_face_fields() {
        let line = AnalysisResult::unavailable("No input data provided").to_json_line();
        assert_eq!(line, r#"{"available":false,"error":"No input data provided"}"#);
    }

    #[test]
    fn test_success_without_faces() {
        let line = AnalysisResult::success(Vec::new()).to_json_line();
        assert_eq!(line, r#"{"available":true,"face_count":0,"faces":[]}"#);
    }

    #[test]
    fn test_face_count_matches_faces() {
        let result = AnalysisResult::success(vec![FaceDetail::default(), FaceDetail::default()]);
        assert_eq!(result.face_count, Some(2));
        assert_eq!(result.faces.as_ref().map(Vec::len), Some(2));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_json_line_has_no_newlines() {
        let line = AnalysisResult::success(vec![FaceDetail::default()]).to_json_line();
        assert!(!line.contains('\n'));

        let parsed: AnalysisResult = serde_json::from_str(&line).unwrap();
        assert!(parsed.available);
        assert_eq!(parsed.face_count, Some(1));
    }

    #[test]
    fn test_output_schema_lists_result_fields() {
        let schema = serde_json::to_value(output_schema()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("available").is_some());
        assert!(properties.get("faces").is_some());
        assert!(schema["definitions"].get("FaceDetail").is_some());
        assert!(schema["definitions"].get("BoundingBox").is_some());
    }
}
