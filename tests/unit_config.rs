// tests/unit_config.rs
use healthcheck_core::config::{Config, CONFIG_FILE};
use healthcheck_core::discovery::{DEFAULT_EXCLUDE_PATTERNS, DEFAULT_INCLUDE_PATTERNS};
use std::collections::HashMap;
use std::fs;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let c = Config::new();
    assert_eq!(c.include, DEFAULT_INCLUDE_PATTERNS);
    assert_eq!(c.exclude, DEFAULT_EXCLUDE_PATTERNS);
    assert!(c.policy.fail_on_error);
    assert!(c.policy.fail_threshold.abs() < f64::EPSILON);
    assert!(c.annotations);
    assert!(c.comment_on_pr);
    assert!(!c.show_successes);
    assert!(c.plugin_path.is_none());
}

#[test]
fn test_load_toml() {
    let d = tempfile::tempdir().unwrap();
    fs::write(
        d.path().join(CONFIG_FILE),
        "include = [\"app/**/*.tsx\"]\nfail_on_error = false\nfail_threshold = 15.0\n",
    )
    .unwrap();
    let c = Config::load(Some(d.path()), &env(&[])).unwrap();
    assert_eq!(c.include, ["app/**/*.tsx"]);
    assert_eq!(c.exclude, DEFAULT_EXCLUDE_PATTERNS);
    assert!(!c.policy.fail_on_error);
    assert!((c.policy.fail_threshold - 15.0).abs() < f64::EPSILON);
}

#[test]
fn test_invalid_toml_is_an_error() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join(CONFIG_FILE), "no_such_key = 1\n").unwrap();
    assert!(Config::load(Some(d.path()), &env(&[])).is_err());
}

#[test]
fn test_action_inputs_override_toml() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join(CONFIG_FILE), "annotations = true\nshow_successes = false\n").unwrap();
    let lookup = env(&[
        ("INPUT_ANNOTATIONS", "false"),
        ("INPUT_SHOW-SUCCESSES", "true"),
        ("INPUT_EXCLUDE", "**/stories/**, **/*.stories.tsx"),
        ("INPUT_FAIL-THRESHOLD", "not a number"),
    ]);
    let c = Config::load(Some(d.path()), &lookup).unwrap();
    assert!(!c.annotations);
    assert!(c.show_successes);
    assert_eq!(c.exclude, ["**/stories/**", "**/*.stories.tsx"]);
    assert!(c.policy.fail_threshold.abs() < f64::EPSILON);
}

#[test]
fn test_working_directory_input() {
    let d = tempfile::tempdir().unwrap();
    let dir = d.path().to_string_lossy().into_owned();
    let c = Config::load(None, &env(&[("INPUT_WORKING-DIRECTORY", &dir)])).unwrap();
    assert_eq!(c.cwd, d.path());
}

#[test]
fn test_cwd_override_beats_input() {
    let d = tempfile::tempdir().unwrap();
    let c = Config::load(Some(d.path()), &env(&[("INPUT_WORKING-DIRECTORY", "/nonexistent")])).unwrap();
    assert_eq!(c.cwd, d.path());
}

#[test]
fn test_blank_inputs_are_ignored() {
    let d = tempfile::tempdir().unwrap();
    let c = Config::load(Some(d.path()), &env(&[("INPUT_INCLUDE", "   ")])).unwrap();
    assert_eq!(c.include, DEFAULT_INCLUDE_PATTERNS);
}
