//! Integration tests for the `init` command.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_init_creates_database_and_config() {
    let env = TestEnv::new();
    assert!(!env.data_dir.exists());

    env.command()
        .args(["init", "--with-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized fausse in"))
        .stdout(predicate::str::contains("Created data directory"));

    let conn = rusqlite::Connection::open(env.data_dir.join("fausse.db")).unwrap();
    let tables: Vec<String> = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    for table in ["metadata", "newsletter_subscribers", "reservations"] {
        assert!(tables.iter().any(|t| t == table), "missing table {table}");
    }

    let config = std::fs::read_to_string(env.data_dir.join("config.yaml")).unwrap();
    assert!(config.starts_with("# Fausse configuration file"));
}

#[test]
fn test_init_refuses_existing_database() {
    let env = TestEnv::new();
    env.command().arg("init").assert().success();

    env.command()
        .arg("init")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--overwrite"));
}

#[test]
fn test_init_overwrite_discards_reservations() {
    let env = TestEnv::new();
    env.command().arg("init").assert().success();
    env.reserve("Avery", 2, "19:00");

    env.command()
        .args(["init", "--overwrite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recreated"));

    env.command()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_init_dry_run_changes_nothing() {
    let env = TestEnv::new();

    env.command()
        .args(["init", "--dry-run", "--with-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Create data directory"))
        .stdout(predicate::str::contains("Write default"));

    assert!(!env.data_dir.exists());
}

#[test]
fn test_disable_autoinit_requires_init() {
    let env = TestEnv::new();

    env.command()
        .args(["--disable-autoinit", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Data directory not found"));

    env.command().arg("init").assert().success();
    env.command()
        .args(["--disable-autoinit", "list"])
        .assert()
        .success();
}

#[test]
fn test_show_data_dir_follows_flag() {
    let env = TestEnv::new();

    env.command()
        .arg("show-data-dir")
        .assert()
        .success()
        .stdout(predicate::str::contains("fausse-data"));
}

#[test]
fn test_show_data_dir_marks_missing_files() {
    let env = TestEnv::new();

    env.command()
        .args(["show-data-dir", "--files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fausse.db (missing)"));

    env.command().arg("init").assert().success();
    env.command()
        .args(["show-data-dir", "--files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fausse.db\n"))
        .stdout(predicate::str::contains("config.yaml (missing)"));
}
