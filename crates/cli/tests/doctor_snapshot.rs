use assert_cmd::prelude::*;
use predicates::prelude::*;
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn normalize_paths(s: &str) -> String {
    let cfg = Regex::new(r"(?m)^path: .*$").unwrap();
    let vault = Regex::new(r"(?m)^vault_root: .*$").unwrap();
    let s = cfg.replace(s, "path: <CFG>");
    vault.replace(&s, "vault_root: <VAULT>").to_string()
}

#[test]
fn doctor_snapshot_default_profile() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    write_file(&vault.join("A.md"), "See [[B]].");
    write_file(&vault.join("B.md"), "# B");

    let cfg = tmp.path().join("config.toml");
    let toml = format!(
        r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "{}"
"#,
        vault.display()
    );
    write_file(&cfg, &toml);

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("vq"))
        .args(["doctor", "--config", cfg.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK   vq doctor"));

    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let norm = normalize_paths(&out);

    insta::assert_snapshot!("doctor_default_profile", norm.trim_end());
}
