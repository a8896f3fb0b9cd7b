use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const ENV_VARS: &[&str] = &[
    "USERMANAGER_FORMAT",
    "USERMANAGER_PROFILE",
    "USERMANAGER_CONFIG",
    "USERMANAGER_ENV_ID",
    "USERMANAGER_CLIENT_ID",
    "USERMANAGER_CLIENT_SECRET",
    "USERMANAGER_AUTH_HOST",
    "USERMANAGER_API_HOST",
    "USERMANAGER_WORKERS",
    "USERMANAGER_DEBUG",
];

/// The binary with a clean environment and a private profile file
fn usermanager(config: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("usermanager"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config);
    cmd
}

fn write_profiles(dir: &Path) -> PathBuf {
    let path = dir.join("profiles.json");
    fs::write(
        &path,
        r#"{ "prod": { "env_id": "env-prod", "cl_id": "client-prod" } }"#,
    )
    .expect("failed to write profiles");
    path
}

#[test]
fn version_prints_package_version() {
    let temp = tempdir().unwrap();

    usermanager(&temp.path().join("profiles.json"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn profile_list_with_no_file_is_empty() {
    let temp = tempdir().unwrap();

    usermanager(&temp.path().join("missing.json"))
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No profiles saved"));
}

#[test]
fn malformed_profile_file_is_reported() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("profiles.json");
    fs::write(&path, "{ not json").unwrap();

    usermanager(&path)
        .args(["profile", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse profile file"));
}

#[test]
fn unknown_profile_is_an_error() {
    let temp = tempdir().unwrap();
    let path = write_profiles(temp.path());

    usermanager(&path)
        .args(["--profile", "staging", "users", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'staging' not found"));
}

#[test]
fn users_list_requires_credentials() {
    let temp = tempdir().unwrap();

    usermanager(&temp.path().join("profiles.json"))
        .args(["users", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing environment ID"));
}

#[test]
fn delete_without_ids_is_an_error() {
    let temp = tempdir().unwrap();

    usermanager(&temp.path().join("profiles.json"))
        .args(["users", "delete", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user IDs given"));
}

/// Credentials and hosts pointing at `server`
fn connected(config: &Path, server: &mockito::ServerGuard) -> Command {
    let mut cmd = usermanager(config);
    cmd.args([
        "--env-id",
        "env-1",
        "--client-id",
        "client-1",
        "--client-secret",
        "secret-1",
    ])
    .arg("--auth-host")
    .arg(server.url())
    .arg("--api-host")
    .arg(server.url());
    cmd
}

fn mock_token(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/env-1/as/token")
        .match_body(mockito::Matcher::UrlEncoded(
            "grant_type".into(),
            "client_credentials".into(),
        ))
        .with_status(200)
        .with_body(r#"{"access_token":"tok-1","token_type":"Bearer","expires_in":3600}"#)
        .create()
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn users_list_json_follows_pages() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _token = mock_token(&mut server);

    let _populations = server
        .mock("GET", "/v1/environments/env-1/populations")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_body(
            r#"{"_embedded":{"populations":[{"id":"pop-1","name":"Employees"}]}}"#,
        )
        .create();

    let page_one = format!(
        r#"{{
            "_embedded": {{ "users": [
                {{ "id": "u1", "username": "ada", "email": "ada@example.com",
                   "name": {{ "given": "Ada", "family": "Lovelace" }},
                   "population": {{ "id": "pop-1" }} }}
            ] }},
            "_links": {{ "next": {{ "href": "{}/page/2" }} }}
        }}"#,
        server.url()
    );
    let _users = server
        .mock("GET", "/v1/environments/env-1/users")
        .with_status(200)
        .with_body(page_one)
        .create();
    let _page_two = server
        .mock("GET", "/page/2")
        .with_status(200)
        .with_body(
            r#"{"_embedded":{"users":[{"id":"u2","username":"grace","population":{"id":"pop-9"}}]},
                "_links":{"next":{"href":""}}}"#,
        )
        .create();

    let temp = tempdir()?;
    let assert = connected(&temp.path().join("profiles.json"), &server)
        .args(["--format", "json", "users", "list"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout)?;

    assert_eq!(json["stats"]["users"], 2);
    assert_eq!(json["stats"]["populations"], 1);
    assert_eq!(json["data"][0]["population"], "Employees");
    assert_eq!(json["data"][1]["population"], "pop-9");
    assert!(!stdout.contains("secret-1"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn users_list_reports_auth_failure() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _token = server
        .mock("POST", "/env-1/as/token")
        .with_status(401)
        .with_body(r#"{"error":"invalid_client"}"#)
        .create();

    let temp = tempdir()?;
    connected(&temp.path().join("profiles.json"), &server)
        .args(["users", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Auth Failed. Check credentials."));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn users_delete_counts_failures() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _token = mock_token(&mut server);

    let deleted = server
        .mock("DELETE", "/v1/environments/env-1/users/u1")
        .match_header("authorization", "Bearer tok-1")
        .with_status(204)
        .expect(1)
        .create();
    let missing = server
        .mock("DELETE", "/v1/environments/env-1/users/u2")
        .with_status(404)
        .expect(1)
        .create();

    let temp = tempdir()?;
    let assert = connected(&temp.path().join("profiles.json"), &server)
        .args([
            "--format",
            "json",
            "users",
            "delete",
            "u1",
            "u2",
            "--yes",
            "--no-refresh",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(json["data"]["deleted"], 1);
    assert_eq!(json["data"]["total"], 2);
    assert!(json.get("stats").is_none());

    deleted.assert();
    missing.assert();

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn users_delete_json_reports_refreshed_counts() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _token = mock_token(&mut server);

    let deleted = server
        .mock("DELETE", "/v1/environments/env-1/users/u1")
        .with_status(204)
        .expect(1)
        .create();
    let _populations = server
        .mock("GET", "/v1/environments/env-1/populations")
        .with_status(200)
        .with_body(r#"{"_embedded":{"populations":[{"id":"pop-1","name":"Employees"}]}}"#)
        .create();
    let refreshed = server
        .mock("GET", "/v1/environments/env-1/users")
        .with_status(200)
        .with_body(r#"{"_embedded":{"users":[{"id":"u2","population":{"id":"pop-1"}}]}}"#)
        .expect(1)
        .create();

    let temp = tempdir()?;
    let assert = connected(&temp.path().join("profiles.json"), &server)
        .args(["--format", "json", "users", "delete", "u1", "--yes"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(json["data"]["deleted"], 1);
    assert_eq!(json["stats"]["users"], 1);
    assert_eq!(json["stats"]["populations"], 1);

    deleted.assert();
    refreshed.assert();

    Ok(())
}
