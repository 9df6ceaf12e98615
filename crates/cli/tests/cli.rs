// ABOUTME: Integration tests for the docdir and docdir-batch binaries.
// ABOUTME: Runs them against a mocked Next.js directory and checks stdout, files, and exit codes.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn docdir_cmd() -> Command {
    Command::cargo_bin("docdir").unwrap()
}

fn batch_cmd() -> Command {
    Command::cargo_bin("docdir-batch").unwrap()
}

fn directory_html(total_pages: u32, entries: Value) -> String {
    let next_data = json!({
        "buildId": "cli-build",
        "props": {"pageProps": {"directoryDoctors": {"totalPages": total_pages, "data": entries}}}
    });
    format!(
        r#"<html><body><script id="__NEXT_DATA__" type="application/json">{next_data}</script></body></html>"#
    )
}

fn mock_directory(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/en/dir");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(directory_html(
                3,
                json!([
                    {"_id": "1", "Name": "Ana", "LastName": "Gómez",
                     "SubSpecialties": {"Specialty": {"SpecialityNameEnglish": "Gynecologist"}},
                     "Photos": "/img/x.jpg"},
                    {"_id": "2", "Name": "Luis",
                     "SubSpecialties": {"Specialty": {"SpecialityNameEnglish": "Cardiologist"}}}
                ]),
            ));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/_next/data/cli-build/en/dir.json")
            .query_param("page", "2");
        then.status(200).json_body(json!({"pageProps": {"directoryDoctors": {"data": [
            {"_id": "3", "Name": "Sara",
             "SubSpecialties": {"Specialty": {"SpecialityName": "Ginecóloga"}}},
            {"_id": "4", "Name": "Marta",
             "SubSpecialties": {"Specialty": {"SpecialityNameEnglish": "GYNECOLOGIST"}}}
        ]}}}));
    });
}

#[test]
fn prints_json_to_stdout() {
    let server = MockServer::start();
    mock_directory(&server);

    let output = docdir_cmd()
        .env_remove("RUST_LOG")
        .arg("--url")
        .arg(server.url("/en/dir"))
        .arg("--specialty")
        .arg("gynécologist")
        .arg("--max-pages")
        .arg("2")
        .assert()
        .success()
        .get_output()
        .clone();

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("filtering directory entries"), "{stderr}");
    assert!(stderr.contains("total=4"), "{stderr}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with("]\n"), "stdout should end with a newline: {stdout:?}");
    let records: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["1", "4"]);
    assert_eq!(records[0]["name"], "Ana Gómez");
    assert_eq!(records[0]["premium"], false);
    assert_eq!(records[0]["photo_url"], format!("{}/img/x.jpg", server.base_url()));
    assert_eq!(records[1]["city"], Value::Null);
    assert_eq!(records[1]["photo_url"], Value::Null);
}

#[test]
fn writes_csv_file() {
    let server = MockServer::start();
    mock_directory(&server);
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("gyn.csv");

    docdir_cmd()
        .arg("--url")
        .arg(server.url("/en/dir"))
        .arg("--specialty")
        .arg("Gynecolog")
        .arg("--format")
        .arg("csv")
        .arg("-o")
        .arg(&output_path)
        .arg("--max-pages")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,name,specialty,city,address,medical_center,office,highlighted_services,consult_value,premium,rating_average,rating_count,photo_url"
    );
    assert_eq!(lines.count(), 2);
}

#[test]
fn page_three_is_never_requested_with_cap() {
    let server = MockServer::start();
    mock_directory(&server);
    let page3 = server.mock(|when, then| {
        when.method(GET)
            .path("/_next/data/cli-build/en/dir.json")
            .query_param("page", "3");
        then.status(500);
    });

    docdir_cmd()
        .arg("--url")
        .arg(server.url("/en/dir"))
        .arg("--specialty")
        .arg("cardio")
        .arg("--max-pages")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Luis"));

    // Without the cap the 500 on page 3 aborts the run.
    docdir_cmd()
        .arg("--url")
        .arg(server.url("/en/dir"))
        .arg("--specialty")
        .arg("cardio")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"));
    page3.assert();
}

#[test]
fn missing_data_island_fails_with_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/en/dir");
        then.status(200).body("<html><body>new layout</body></html>");
    });

    docdir_cmd()
        .arg("--url")
        .arg(server.url("/en/dir"))
        .arg("--specialty")
        .arg("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("site layout may have changed"));
}

#[test]
fn rejects_zero_max_pages_and_unknown_format() {
    docdir_cmd()
        .args(["--url", "https://example.com/en/dir", "--specialty", "x", "--max-pages", "0"])
        .assert()
        .failure();

    docdir_cmd()
        .args(["--url", "https://example.com/en/dir", "--specialty", "x", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn requires_url_and_specialty() {
    docdir_cmd()
        .args(["--specialty", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url"));
}

#[test]
fn batch_writes_files_per_specialty() {
    let server = MockServer::start();
    mock_directory(&server);
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("out");
    let config_path = temp_dir.path().join("config.json");
    fs::write(
        &config_path,
        json!({
            "directories": [{"url": server.url("/en/dir"), "specialties": ["Gynecologist", "Cardio"]}],
            "output_format": "json",
            "max_pages": 2,
            "output_dir": out_dir
        })
        .to_string(),
    )
    .unwrap();

    batch_cmd().arg("--config").arg(&config_path).assert().success();

    let gyn: Vec<Value> =
        serde_json::from_str(&fs::read_to_string(out_dir.join("dir-gynecologist.json")).unwrap())
            .unwrap();
    assert_eq!(gyn.len(), 2);
    let cardio: Vec<Value> =
        serde_json::from_str(&fs::read_to_string(out_dir.join("dir-cardio.json")).unwrap())
            .unwrap();
    assert_eq!(cardio[0]["name"], "Luis");
}

#[test]
fn batch_invalid_config_fails_before_network() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{"directories": [{"url": "http://127.0.0.1:9/never"}]}"#,
    )
    .unwrap();

    batch_cmd()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("'specialties' list"));
}
