//! Status command tests over fixture state files

mod common;

use predicates::prelude::*;

#[test]
fn test_status_lists_items_and_lines() {
    let server = common::TestServer::with_state();
    server
        .cmd()
        .args(["status", "--mods-path", &common::arg(&server.mods)])
        .assert()
        .success()
        .stdout(predicate::str::contains("450814997"))
        .stdout(predicate::str::contains("@cba_a3"))
        .stdout(predicate::str::contains("vanilla_plus"))
        .stdout(predicate::str::contains("@ace;@cba_a3"));
}

#[test]
fn test_status_json() {
    let server = common::TestServer::with_state();
    let output = server
        .cmd()
        .args(["status", "--json", "--mods-path", &common::arg(&server.mods)])
        .output()
        .expect("run modsync");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("status --json prints JSON");
    assert_eq!(json["items"]["463939057"]["directory_name"], "@ace");
    assert_eq!(json["lines"]["vanilla_plus"][1], "@cba_a3");
}

#[test]
fn test_status_from_settings_file() {
    let server = common::TestServer::with_state();
    let settings = server.write_settings(&format!("mods_path: {}\n", common::arg(&server.mods)));
    server
        .cmd()
        .args(["--config", &common::arg(&settings), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed items: (2)"));
}

#[test]
fn test_status_missing_mods_dir() {
    let server = common::TestServer::new();
    server
        .cmd()
        .args(["status", "--mods-path", &common::arg(&server.mods)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mods directory not found"));
}

#[test]
fn test_status_corrupt_state() {
    let server = common::TestServer::with_state();
    std::fs::write(server.mods.join("mods_details.json"), "{ not json").expect("write");
    server
        .cmd()
        .args(["status", "--mods-path", &common::arg(&server.mods)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mods_details.json"));
}

#[test]
fn test_status_does_not_write() {
    let server = common::TestServer::with_state();
    let before = server.read_mods_file("mods_details.json");
    server
        .cmd()
        .args(["status", "--mods-path", &common::arg(&server.mods)])
        .assert()
        .success();
    assert_eq!(server.read_mods_file("mods_details.json"), before);
    assert!(!server.mods_file_exists(".modsync.lock"));
}
