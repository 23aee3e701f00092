//! Process-level tests of the facescan binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::{json, Value};
use tempfile::NamedTempFile;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AWS_VARS: &[&str] = &[
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_REGION",
    "AWS_ENDPOINT_URL",
    "AWS_ENDPOINT_URL_REKOGNITION",
];

/// Run the binary with a controlled environment and the given stdin.
fn facescan(env_file: &NamedTempFile, vars: &[(&str, String)], args: &[&str], stdin: &str) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_facescan"));
    for var in AWS_VARS {
        command.env_remove(var);
    }
    command
        .env("FACESCAN_ENV_FILE", env_file.path())
        .env("RUST_LOG", "off")
        .envs(vars.iter().map(|(k, v)| (*k, v.as_str())))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().expect("spawn facescan");
    if let Some(mut pipe) = child.stdin.take() {
        // The binary may exit before reading (flag errors, --print-schema).
        pipe.write_all(stdin.as_bytes()).ok();
    }
    child.wait_with_output().expect("facescan output")
}

fn empty_env_file() -> NamedTempFile {
    NamedTempFile::new().expect("temp env file")
}

fn single_json_line(output: &Output) -> Value {
    assert!(output.status.success(), "exit status: {:?}", output.status);

    let stdout = String::from_utf8(output.stdout.clone()).expect("utf-8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout: {}", stdout);
    serde_json::from_str(lines[0]).expect("json line")
}

#[test]
fn test_empty_stdin() {
    let output = facescan(&empty_env_file(), &[], &[], "  \n");
    assert_eq!(
        single_json_line(&output),
        json!({ "available": false, "error": "No input data provided" })
    );
}

#[test]
fn test_missing_credentials() {
    let output = facescan(&empty_env_file(), &[], &[], "aGVsbG8=\n");
    assert_eq!(
        single_json_line(&output),
        json!({ "available": false, "error": "Rekognition analyzer not initialized" })
    );
}

#[test]
fn test_unknown_flag_still_prints_json() {
    let output = facescan(&empty_env_file(), &[], &["--bogus"], "aGVsbG8=");
    let value = single_json_line(&output);
    assert_eq!(value["available"], false);
    assert!(value["error"].as_str().unwrap().contains("--bogus"));
}

#[test]
fn test_print_schema() {
    let output = facescan(&empty_env_file(), &[], &["--print-schema"], "");
    assert!(output.status.success());

    let schema: Value = serde_json::from_slice(&output.stdout).expect("schema json");
    assert_eq!(schema["title"], "AnalysisResult");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_end_to_end_with_env_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", "RekognitionService.DetectFaces"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            json!({
                "FaceDetails": [{
                    "BoundingBox": { "Width": 0.5, "Height": 0.25, "Left": 0.125, "Top": 0.0625 },
                    "Smile": { "Value": true, "Confidence": 98.0 },
                    "Beard": { "Value": true, "Confidence": 93.0 },
                    "Emotions": [{ "Type": "HAPPY", "Confidence": 96.0 }],
                    "Confidence": 99.5
                }]
            })
            .to_string(),
            "application/x-amz-json-1.1",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut env_file = empty_env_file();
    writeln!(env_file, "AWS_ACCESS_KEY_ID=AKIDEXAMPLE").unwrap();
    writeln!(env_file, "AWS_SECRET_ACCESS_KEY=secret").unwrap();
    writeln!(env_file, "AWS_REGION=us-east-1").unwrap();
    env_file.flush().unwrap();

    let endpoint = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        facescan(
            &env_file,
            &[("AWS_ENDPOINT_URL_REKOGNITION", endpoint)],
            &[],
            "data:image/jpeg;base64,aGVsbG8=\n",
        )
    })
    .await
    .expect("facescan task");

    assert_eq!(
        single_json_line(&output),
        json!({
            "available": true,
            "face_count": 1,
            "faces": [{
                "confidence": 99.5,
                "smiling": true,
                "smile_confidence": 98.0,
                "has_beard": true,
                "primary_emotion": "HAPPY",
                "bounding_box": { "Width": 0.5, "Height": 0.25, "Left": 0.125, "Top": 0.0625 }
            }]
        })
    );
}
