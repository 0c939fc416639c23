//! Integration tests for the tplload CLI
//!
//! These tests exercise the commands end-to-end using assert_cmd against
//! temporary catalog databases.

use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a tplload command
fn tplload() -> Command {
    Command::cargo_bin("tplload").unwrap()
}

fn write_source(tmp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn db_path(tmp: &TempDir) -> PathBuf {
    tmp.path().join("catalog.db")
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

const FINANCE_LINE: &str =
    "Finance|example.com|https|login.example.com|/signin|1|0|1|none|Fake bank login\n";

// ============================================================================
// Load
// ============================================================================

#[test]
fn test_load_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(&tmp, "tpls.txt", FINANCE_LINE);
    let db = db_path(&tmp);

    tplload()
        .args(["load", source.to_str().unwrap(), "--database", db.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Records inserted:  1"));

    let conn = Connection::open(&db).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM sls_tpl_categories"), 1);
    assert_eq!(
        count(
            &conn,
            "SELECT COUNT(*) FROM sls_tpl_categories WHERE category = 'Finance'"
        ),
        1
    );
    let (alive, twofa, high): (i64, i64, i64) = conn
        .query_row(
            "SELECT alive, twofa_required, high_value FROM sls_tpls",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!((alive, twofa, high), (1, 0, 1));
}

#[test]
fn test_load_skips_nine_field_row() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(
        &tmp,
        "tpls.txt",
        "Finance|example.com|https|login.example.com|/signin|1|0|1|none\n",
    );
    let db = db_path(&tmp);

    tplload()
        .args(["load", source.to_str().unwrap(), "--database", db.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped"))
        .stdout(predicate::str::contains("Records inserted:  0"));

    let conn = Connection::open(&db).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM sls_tpls"), 0);
}

#[test]
fn test_load_shares_category_between_rows() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(
        &tmp,
        "tpls.txt",
        "Finance|example.com|https|login.example.com|/signin|1|0|1|none|a\n\
         Finance|example.net|https|sso.example.net|/auth|1|1|0|none|b\n",
    );
    let db = db_path(&tmp);

    tplload()
        .args(["load", source.to_str().unwrap(), "--database", db.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Records inserted:  2"));

    let conn = Connection::open(&db).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM sls_tpl_categories"), 1);
    assert_eq!(
        count(&conn, "SELECT COUNT(DISTINCT fk_category_id) FROM sls_tpls"),
        1
    );
}

#[test]
fn test_load_applies_boolean_defaults() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(
        &tmp,
        "tpls.txt",
        "Finance|example.com|https|login.example.com|/signin|x|y|z|none|d\n",
    );
    let db = db_path(&tmp);

    tplload()
        .args(["load", source.to_str().unwrap(), "--database", db.to_str().unwrap()])
        .assert()
        .success();

    let conn = Connection::open(&db).unwrap();
    let (alive, twofa, high): (i64, i64, i64) = conn
        .query_row(
            "SELECT alive, twofa_required, high_value FROM sls_tpls",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!((alive, twofa, high), (1, 0, 0));
}

#[test]
fn test_load_continues_past_bad_rows() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(
        &tmp,
        "tpls.txt",
        "|example.com|https|login.example.com|/signin|1|0|1|none|empty category\n\
         Cloud|example.org|https|portal.example.org|/login|1|0|0|none|ok\n",
    );
    let db = db_path(&tmp);

    tplload()
        .args(["load", source.to_str().unwrap(), "--database", db.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("category lookup failed"))
        .stdout(predicate::str::contains("Records inserted:  1"));

    let conn = Connection::open(&db).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM sls_tpls"), 1);
}

#[test]
fn test_load_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    let db = db_path(&tmp);

    tplload()
        .args(["load", "no-such-file.txt", "--database", db.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    // the catalog was still created and cleanly released, with no rows
    let conn = Connection::open(&db).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM sls_tpls"), 0);
}

#[test]
fn test_load_unreachable_database_fails() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(&tmp, "tpls.txt", FINANCE_LINE);
    let db = tmp.path().join("missing-dir").join("catalog.db");

    tplload()
        .args(["load", source.to_str().unwrap(), "--database", db.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open catalog database"));
}

#[test]
fn test_load_dry_run_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(&tmp, "tpls.txt", FINANCE_LINE);
    let db = db_path(&tmp);

    tplload()
        .args([
            "load",
            source.to_str().unwrap(),
            "--dry-run",
            "--database",
            db.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("would insert"))
        .stdout(predicate::str::contains("Nothing was written"));

    let conn = Connection::open(&db).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM sls_tpls"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM sls_tpl_categories"), 0);
}

#[test]
fn test_test_flag_selects_test_catalog() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(&tmp, "tpls.txt", FINANCE_LINE);
    let test_db = tmp.path().join("test_catalog.db");

    tplload()
        .env("TPLLOAD_TEST_DATABASE", test_db.to_str().unwrap())
        .current_dir(tmp.path())
        .args(["load", source.to_str().unwrap(), "--test"])
        .assert()
        .success();

    let conn = Connection::open(&test_db).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM sls_tpls"), 1);
}

// ============================================================================
// Init
// ============================================================================

#[test]
fn test_init_creates_schema() {
    let tmp = TempDir::new().unwrap();
    let db = db_path(&tmp);

    tplload()
        .args(["init", db.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created catalog"));

    let conn = Connection::open(&db).unwrap();
    assert_eq!(
        count(
            &conn,
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
             AND name IN ('sls_tpls', 'sls_tpl_categories')"
        ),
        2
    );
}

#[test]
fn test_init_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let db = db_path(&tmp);

    tplload().args(["init", db.to_str().unwrap()]).assert().success();
    tplload()
        .args(["init", db.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

// ============================================================================
// Categories / Stats
// ============================================================================

#[test]
fn test_categories_lists_counts() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(
        &tmp,
        "tpls.txt",
        "Finance|example.com|https|login.example.com|/signin|1|0|1|none|a\n\
         Finance|example.net|https|sso.example.net|/auth|1|1|0|none|b\n\
         Cloud|example.org|https|portal.example.org|/login|1|0|0|none|c\n",
    );
    let db = db_path(&tmp);

    tplload()
        .args(["load", source.to_str().unwrap(), "--database", db.to_str().unwrap()])
        .assert()
        .success();

    tplload()
        .args(["categories", "--database", db.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finance"))
        .stdout(predicate::str::contains("Cloud"))
        .stdout(predicate::str::contains("2 category(s)"));
}

#[test]
fn test_stats_reports_metrics() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(&tmp, "tpls.txt", FINANCE_LINE);
    let db = db_path(&tmp);

    tplload()
        .args(["load", source.to_str().unwrap(), "--database", db.to_str().unwrap()])
        .assert()
        .success();

    tplload()
        .args(["stats", "--database", db.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Templates:    1"))
        .stdout(predicate::str::contains("Categories:   1"));
}

// ============================================================================
// CLI basics
// ============================================================================

#[test]
fn test_help_displays() {
    tplload()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("template catalog"));
}

#[test]
fn test_completions_generate() {
    tplload()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tplload"));
}
