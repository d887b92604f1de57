use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use postmanify_core::config::ConvertConfig;
use postmanify_core::convert;
use serde_json::{Value, json};

const SPEC: &str = r#"
swagger: "2.0"
info:
  title: Pets
  version: "1.0"
host: petstore.io
basePath: /v1
schemes: [https]
produces: [application/json]
paths:
  "/pets/{petId}":
    get:
      tags: [pet]
      parameters:
        - name: petId
          in: path
          required: true
          type: integer
  /health:
    get:
      summary: untagged
"#;

fn postmanify(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_postmanify"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run postmanify")
}

fn read_json(path: &Path) -> Value {
    let content = fs::read_to_string(path).expect("output should exist");
    serde_json::from_str(&content).expect("output should be JSON")
}

#[test]
fn convert_writes_collection() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("swagger.yaml"), SPEC).unwrap();

    let out = postmanify(
        dir.path(),
        &["convert", "-i", "swagger.yaml", "-o", "out/postman.json"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let collection = read_json(&dir.path().join("out/postman.json"));
    assert_eq!(collection["info"]["name"], "Pets");
    assert_eq!(collection["item"].as_array().unwrap().len(), 1);

    let request = &collection["item"][0]["item"][0]["request"];
    assert_eq!(request["method"], "GET");
    assert_eq!(request["url"]["raw"], "https://petstore.io/v1/pets/{{petId}}");
    assert_eq!(request["url"]["variable"], json!([{"id": "petId"}]));
    assert_eq!(request["header"], json!([{"key": "Accept", "value": "application/json"}]));
}

#[test]
fn convert_matches_library_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("swagger.yaml"), SPEC).unwrap();

    let out = postmanify(dir.path(), &["convert", "-i", "swagger.yaml", "-o", "postman.json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Wrote postman.json"), "{stderr}");

    let written = fs::read_to_string(dir.path().join("postman.json")).unwrap();
    let expected = convert::convert_yaml(SPEC, &ConvertConfig::default()).unwrap();
    assert_eq!(written, expected);
}

#[test]
fn convert_applies_flags_over_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("swagger.yaml"), SPEC).unwrap();
    fs::write(
        dir.path().join(".postmanify.yaml"),
        "hostname: file.example.com\nhostname_prefix: dev.\nheaders:\n  - key: X-From\n    value: file\n",
    )
    .unwrap();

    let out = postmanify(
        dir.path(),
        &[
            "convert",
            "-i",
            "swagger.yaml",
            "-o",
            "postman.json",
            "--hostname",
            "api.example.com",
            "--scheme",
            "http",
            "-H",
            "Authorization: Bearer {{token}}",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let collection = read_json(&dir.path().join("postman.json"));
    let request = &collection["item"][0]["item"][0]["request"];
    assert_eq!(request["url"]["raw"], "http://dev.api.example.com/v1/pets/{{petId}}");
    assert_eq!(
        request["header"],
        json!([
            {"key": "Accept", "value": "application/json"},
            {"key": "X-From", "value": "file"},
            {"key": "Authorization", "value": "Bearer {{token}}"}
        ])
    );
}

#[test]
fn convert_rejects_malformed_header() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("swagger.yaml"), SPEC).unwrap();

    let out = postmanify(
        dir.path(),
        &["convert", "-i", "swagger.yaml", "-o", "postman.json", "-H", "nocolon"],
    );
    assert!(!out.status.success());
    assert!(!dir.path().join("postman.json").exists());
}

#[test]
fn convert_fails_on_invalid_spec() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "{\"swagger\": ").unwrap();

    let out = postmanify(dir.path(), &["convert", "-i", "broken.json", "-o", "postman.json"]);
    assert!(!out.status.success());
    assert!(!dir.path().join("postman.json").exists());
}

#[test]
fn validate_reports_operations() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("swagger.yaml"), SPEC).unwrap();

    let out = postmanify(dir.path(), &["validate", "-i", "swagger.yaml"]);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Operations: 2 (1 tagged)"), "{stderr}");
}

#[test]
fn init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();

    let out = postmanify(dir.path(), &["init"]);
    assert!(out.status.success());
    assert!(dir.path().join(".postmanify.yaml").exists());

    let again = postmanify(dir.path(), &["init"]);
    assert!(!again.status.success());

    let forced = postmanify(dir.path(), &["init", "--force"]);
    assert!(forced.status.success());
}
