use serde_json::{Value, json};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run_cli(args: &[&str], cwd: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_swan-cli"))
        .args(args)
        .current_dir(cwd)
        .env_remove("SWAN_API")
        .env_remove("SWAN_API_TIMEOUT_SECS")
        .env_remove("RUST_LOG")
        .output()
        .expect("cli process should start")
}

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().expect("tempdir should create");
    let output = run_cli(&["--help"], temp.path());

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf8");
    assert!(stdout.contains("machines"));
    assert!(stdout.contains("providers"));
    assert!(stdout.contains("detail"));
}

#[test]
fn providers_empty_region_fails_before_network() {
    let temp = TempDir::new().expect("tempdir should create");
    let output = run_cli(
        &["--api-url", "http://127.0.0.1:1", "providers", "--region", ""],
        temp.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr should be utf8");
    assert!(stderr.contains("error: invalid input"), "stderr:\n{stderr}");
}

#[test]
fn invalid_api_url_is_reported() {
    let temp = TempDir::new().expect("tempdir should create");
    let output = run_cli(&["--api-url", "localhost:8080", "machines"], temp.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr should be utf8");
    assert!(stderr.contains("invalid configuration"), "stderr:\n{stderr}");
}

#[test]
fn unreachable_api_reports_request_error() {
    let temp = TempDir::new().expect("tempdir should create");
    let output = run_cli(&["--api-url", "http://127.0.0.1:1", "machines"], temp.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr should be utf8");
    assert!(stderr.contains("error: swan request error"), "stderr:\n{stderr}");
}

#[test]
fn swan_api_is_read_from_dotenv_file() {
    let temp = TempDir::new().expect("tempdir should create");
    std::fs::write(temp.path().join(".env"), "SWAN_API=not-a-url\n")
        .expect(".env write should succeed");

    let output = run_cli(&["machines"], temp.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr should be utf8");
    assert!(stderr.contains("not-a-url"), "stderr:\n{stderr}");
}

async fn run_cli_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let temp = TempDir::new().expect("tempdir should create");
    tokio::process::Command::new(env!("CARGO_BIN_EXE_swan-cli"))
        .arg("--api-url")
        .arg(server.uri())
        .args(args)
        .current_dir(temp.path())
        .env_remove("SWAN_API")
        .env_remove("SWAN_API_TIMEOUT_SECS")
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("cli process should start")
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|error| {
        panic!(
            "stdout should be json ({error}):\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

#[tokio::test(flavor = "current_thread")]
async fn machines_prints_hardware_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cp/machines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "hardware": [
                    {"name": "Machine 1", "cpu": "Intel i7"},
                    {"name": "Machine 2", "cpu": "AMD Ryzen 5"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let output = run_cli_against(&server, &["machines"]).await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_json(&output),
        json!([
            {"name": "Machine 1", "cpu": "Intel i7"},
            {"name": "Machine 2", "cpu": "AMD Ryzen 5"}
        ])
    );
}

#[tokio::test(flavor = "current_thread")]
async fn providers_prints_provider_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cp/providers"))
        .and(body_string("region=eu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"provider": "Provider A"}, {"provider": "Provider B"}]
        })))
        .mount(&server)
        .await;

    let output = run_cli_against(&server, &["providers", "--region", "eu"]).await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_json(&output),
        json!([{"provider": "Provider A"}, {"provider": "Provider B"}])
    );
}

#[tokio::test(flavor = "current_thread")]
async fn detail_ok_prints_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cp_id": "123",
            "name": "Test CP"
        })))
        .mount(&server)
        .await;

    let output = run_cli_against(&server, &["detail", "123"]).await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_json(&output),
        json!({"status": 200, "body": {"cp_id": "123", "name": "Test CP"}})
    );
}

#[tokio::test(flavor = "current_thread")]
async fn detail_not_found_prints_body_and_exits_two() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "cp not found"})))
        .mount(&server)
        .await;

    let output = run_cli_against(&server, &["detail", "x"]).await;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stdout_json(&output),
        json!({"status": 404, "body": {"message": "cp not found"}})
    );
}
