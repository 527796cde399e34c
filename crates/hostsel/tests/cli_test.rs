//! Integration tests for the `hostsel` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! listing-driven commands and error handling against temporary files.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Fixtures ────────────────────────────────────────────────────────

const LISTING: &str = r#"{
  "hosts": [
    {"id": 1, "name": "web-1", "hostname": "10.0.1.1", "port": 22, "category": "prod/web", "tags": ["nginx", "edge"]},
    {"id": 2, "name": "web-2", "hostname": "10.0.1.2", "port": 22, "category": "prod/web", "tags": ["nginx"]},
    {"id": 3, "name": "db-1", "hostname": "10.0.2.1", "port": 5432, "category": "prod/db", "tags": ["postgres"]},
    {"id": 4, "name": "lab-1", "hostname": "10.9.0.1", "port": 22, "category": "lab"},
    {"id": 5, "name": "prd-1", "hostname": "10.5.0.1", "port": 2222, "category": "production", "tags": ["edge"]}
  ],
  "categories": [
    {"id": 1, "name": "prod"},
    {"id": 2, "name": "web", "parent_id": 1},
    {"id": 3, "name": "db", "parent_id": 1},
    {"id": 4, "name": "lab"},
    {"id": 5, "name": "production"}
  ]
}"#;

/// A scratch directory holding a listing and an (initially absent) config.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hosts.json"), LISTING).unwrap();
        Self { dir }
    }

    fn listing(&self) -> PathBuf {
        self.dir.path().join("hosts.json")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Build a [`Command`] for the `hostsel` binary with env isolation.
    ///
    /// Clears all `HOSTSEL_*` env vars the CLI reads and points the config
    /// at this workspace so tests never touch the user's configuration.
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("hostsel");
        cmd.env("HOSTSEL_CONFIG", self.config())
            .env_remove("HOSTSEL_PROFILE")
            .env_remove("HOSTSEL_OUTPUT")
            .env_remove("RUST_LOG");
        cmd
    }

    fn hosts(&self) -> assert_cmd::Command {
        let mut cmd = self.cmd();
        cmd.args(["-o", "plain", "hosts", "--listing"])
            .arg(self.listing());
        cmd
    }
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let ws = Workspace::new();
    let output = ws.cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    Workspace::new().cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("hosts")
            .and(predicate::str::contains("perms"))
            .and(predicate::str::contains("select")),
    );
}

#[test]
fn test_version_flag() {
    Workspace::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostsel"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    Workspace::new()
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    Workspace::new()
        .cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Hosts ───────────────────────────────────────────────────────────

#[test]
fn test_hosts_unfiltered() {
    Workspace::new()
        .hosts()
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n2\n3\n4\n5\n"));
}

#[test]
fn test_hosts_category_is_segment_wise() {
    Workspace::new()
        .hosts()
        .args(["--category", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n2\n3\n"));
}

#[test]
fn test_hosts_string_prefix_mode() {
    Workspace::new()
        .hosts()
        .args(["--category", "prod", "--path-match", "string-prefix"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n2\n3\n5\n"));
}

#[test]
fn test_hosts_tags_are_anded() {
    Workspace::new()
        .hosts()
        .args(["--tag", "nginx", "--tag", "edge"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

#[test]
fn test_hosts_name_is_case_insensitive() {
    Workspace::new()
        .hosts()
        .args(["--name", "WEB"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n2\n"));
}

#[test]
fn test_hosts_role_scope_does_not_inherit() {
    Workspace::new()
        .hosts()
        .args(["--role-perms", "1,4"])
        .assert()
        .success()
        .stdout(predicate::str::diff("4\n"));
}

#[test]
fn test_hosts_json_output() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["-o", "json", "hosts", "--name", "db", "--listing"])
        .arg(ws.listing())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hostname\": \"10.0.2.1\""));
}

#[test]
fn test_hosts_empty_segment_is_usage_error() {
    Workspace::new()
        .hosts()
        .args(["--category", "prod//web"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("empty segment"));
}

#[test]
fn test_hosts_without_listing() {
    Workspace::new()
        .cmd()
        .arg("hosts")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No host listing"));
}

#[test]
fn test_hosts_broken_listing() {
    let ws = Workspace::new();
    let broken = ws.write("broken.json", r#"{"hosts": [{"id": "x"}]}"#);
    ws.cmd()
        .args(["hosts", "--listing", &path_arg(&broken)])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unusable"));
}

// ── Categories & tags ───────────────────────────────────────────────

#[test]
fn test_categories_zones() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["-o", "plain", "categories", "--zones", "--listing"])
        .arg(ws.listing())
        .assert()
        .success()
        .stdout(predicate::str::diff("lab\nprod/db\nprod/web\nproduction\n"));
}

#[test]
fn test_categories_tree_under_role() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["categories", "--tree", "--role-perms", "3", "--color", "never", "--listing"])
        .arg(ws.listing())
        .assert()
        .success()
        .stdout(predicate::str::diff("prod\n  db\n"));
}

#[test]
fn test_tags() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["-o", "plain", "tags", "--listing"])
        .arg(ws.listing())
        .assert()
        .success()
        .stdout(predicate::str::diff("edge\nnginx\npostgres\n"));
}

// ── Permissions ─────────────────────────────────────────────────────

#[test]
fn test_perms_update_payload() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args([
            "-o",
            "json-compact",
            "perms",
            "--role",
            "7",
            "--current",
            "1,3",
            "--grant",
            "5",
            "--revoke",
            "3",
            "--listing",
        ])
        .arg(ws.listing())
        .output()
        .unwrap();
    assert!(output.status.success());
    insta::assert_snapshot!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        @r#"{"id":7,"category_perms":[1,5]}"#
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("+5 -3"));
}

#[test]
fn test_perms_transfer_view() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["-o", "plain", "perms", "--role", "1", "--set", "2,3", "--search", "PROD/"])
        .arg("--listing")
        .arg(ws.listing())
        .assert()
        .success()
        .stdout(predicate::str::diff("prod/db\nprod/web\n"));
}

#[test]
fn test_perms_unknown_category() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["perms", "--role", "1", "--grant", "99", "--listing"])
        .arg(ws.listing())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("category '99' not found"));
}

// ── Selection ───────────────────────────────────────────────────────

#[test]
fn test_select_keeps_hosts_across_filters() {
    let ws = Workspace::new();
    let script = ws.write(
        "script.json",
        r#"[
            {"filter": {"category": "prod/web"}},
            {"bulk": [1, 2]},
            {"filter": {"category": "lab"}},
            {"bulk": [4]},
            {"filter": {"category": "prod/web"}},
            {"bulk": [2]}
        ]"#,
    );
    ws.cmd()
        .args(["-o", "plain", "select", "--script", &path_arg(&script), "--listing"])
        .arg(ws.listing())
        .assert()
        .success()
        .stdout(predicate::str::diff("4\n2\n"))
        .stderr(predicate::str::contains("2 hosts selected"));
}

#[test]
fn test_select_from_stdin_cancelled() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["select", "--script", "-", "--listing"])
        .arg(ws.listing())
        .write_stdin(r#"[{"toggle": 1}, "cancel"]"#)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("selection cancelled"));
}

#[test]
fn test_select_unknown_host() {
    let ws = Workspace::new();
    let script = ws.write("script.json", r#"[{"toggle": 42}]"#);
    ws.cmd()
        .args(["select", "--script", &path_arg(&script), "--listing"])
        .arg(ws.listing())
        .assert()
        .code(4);
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_config_path_honours_env() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_profile_supplies_listing_and_scope() {
    let ws = Workspace::new();
    let config = format!(
        "[profiles.web]\nlisting = {:?}\nrole_perms = [2]\n",
        path_arg(&ws.listing())
    );
    ws.write("config.toml", &config);

    ws.cmd()
        .args(["-o", "plain", "--profile", "web", "hosts"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n2\n"));
}

#[test]
fn test_config_default_output() {
    let ws = Workspace::new();
    ws.write("config.toml", "[defaults]\noutput = \"plain\"\n");
    ws.cmd()
        .args(["tags", "--listing"])
        .arg(ws.listing())
        .assert()
        .success()
        .stdout(predicate::str::diff("edge\nnginx\npostgres\n"));
}

#[test]
fn test_unknown_profile() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["--profile", "nope", "hosts", "--listing"])
        .arg(ws.listing())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Profile 'nope' not found"));
}

#[test]
fn test_config_use_switches_default() {
    let ws = Workspace::new();
    ws.write("config.toml", "[profiles.lab]\nsuperuser = true\n");
    ws.cmd().args(["config", "use", "lab"]).assert().success();

    let saved = std::fs::read_to_string(ws.config()).unwrap();
    assert!(saved.contains("default_profile = \"lab\""), "{saved}");
}
