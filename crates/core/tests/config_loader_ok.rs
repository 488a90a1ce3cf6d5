use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;
use vaultquery_core::config::loader::ConfigLoader;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/vault"
excluded_folders = ["templates", "/elsewhere/archive"]

[logging]
level = "debug"
file = "{{vault_root}}/.vaultquery/vq.log"

[search]
max_results = 5
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/vault");
    assert_eq!(
        rc.excluded_folders,
        vec![PathBuf::from("/tmp/vault/templates"), PathBuf::from("/elsewhere/archive")]
    );
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(rc.logging.file, Some(PathBuf::from("/tmp/vault/.vaultquery/vq.log")));
    assert_eq!(rc.search.max_results, 5);
    assert_eq!(rc.search.context_lines, 2);
    assert_eq!(rc.search.max_depth, 2);
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("vaultquery/config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/def"

[profiles.work]
vault_root = "/tmp/work"
extensions = ["md", "markdown"]
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), Some("work")).expect("should load");
    assert_eq!(rc.active_profile, "work");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/work");
    assert_eq!(rc.logging.level, "info");
    assert_eq!(rc.exclusion_rules().extensions, vec!["md", "markdown"]);
}

#[test]
fn exclusion_rules_are_relative_to_the_vault() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
[profiles.default]
vault_root = "/tmp/v"
excluded_folders = ["Archive"]
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    let rules = rc.exclusion_rules();
    assert_eq!(rules.excluded_folders, vec![PathBuf::from("Archive")]);
    assert_eq!(rules.extensions, vec!["md"]);
}
