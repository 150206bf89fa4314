//! Tests for entry-point probing and launch planning.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use gantry_cli::entry::{self, LaunchPlan, TEST_MODE_ENV, TEST_MODE_VALUE};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A scratch project root, removed on drop.
struct Scratch {
    root: PathBuf,
}

impl Scratch {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!(
            "gantry-entry-test-{}-{}",
            std::process::id(),
            DIR_COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    fn touch(&self, relative: &str) {
        let path = self.root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

#[test]
fn test_probe_finds_conventional_entry() {
    let scratch = Scratch::new();
    scratch.touch("src/main.rs");

    let found = entry::probe(&scratch.root).unwrap();
    assert_eq!(found, scratch.root.join("src/main.rs"));
}

#[test]
fn test_probe_prefers_bin_directory() {
    let scratch = Scratch::new();
    scratch.touch("src/main.rs");
    scratch.touch("src/bin/server.rs");

    let found = entry::probe(&scratch.root).unwrap();
    assert_eq!(found, scratch.root.join("src/bin/server.rs"));
}

#[test]
fn test_probe_prefers_server_over_main() {
    let scratch = Scratch::new();
    scratch.touch("src/main.rs");
    scratch.touch("src/server.rs");

    let found = entry::probe(&scratch.root).unwrap();
    assert_eq!(found, scratch.root.join("src/server.rs"));
}

#[test]
fn test_probe_misses_empty_project() {
    let scratch = Scratch::new();
    assert!(entry::probe(&scratch.root).is_none());
}

#[test]
fn test_plan_for_root_entry_is_plain_run() {
    let plan = LaunchPlan::for_entry(Path::new("src/main.rs"));
    assert_eq!(plan.program, "cargo");
    assert_eq!(plan.args, vec!["run"]);
    assert!(plan.env.is_empty());
}

#[test]
fn test_plan_for_bin_entry_selects_target() {
    let plan = LaunchPlan::for_entry(Path::new("src/bin/server.rs"));
    assert_eq!(plan.args, vec!["run", "--bin", "server"]);
}

#[test]
fn test_test_plan_exports_test_mode() {
    let plan = LaunchPlan::for_tests(None);
    assert_eq!(plan.args, vec!["test"]);
    assert_eq!(
        plan.env,
        vec![(TEST_MODE_ENV.to_string(), TEST_MODE_VALUE.to_string())]
    );
}

#[test]
fn test_test_plan_forwards_reporter() {
    let plan = LaunchPlan::for_tests(Some("json"));
    assert_eq!(plan.args, vec!["test", "--", "--format", "json"]);
}
