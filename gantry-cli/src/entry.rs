//! Entry-point resolution and launch planning for the dev runner.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::console::Console;
use crate::error::SupervisorError;

/// Conventional directories probed for an entry point, in order.
pub const PROBE_DIRS: &[&str] = &["src/bin", "src"];
/// Conventional entry file names probed within each directory, in order.
pub const PROBE_FILES: &[&str] = &["server.rs", "main.rs", "app.rs"];

/// Environment variable exported to the test runner child.
pub const TEST_MODE_ENV: &str = "GANTRY_ENV";
/// Value of [`TEST_MODE_ENV`] signaling test mode.
pub const TEST_MODE_VALUE: &str = "test";

/// How to launch a child process: program, arguments, extra environment.
///
/// A reload reuses the plan verbatim, so every respawn gets identical
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl LaunchPlan {
    /// Plan for running an application entry point.
    ///
    /// Entries map to a debug-profile `cargo run`, which keeps debug
    /// assertions enabled in the child; entries under `src/bin/` select
    /// their binary target by file stem.
    pub fn for_entry(entry: &Path) -> Self {
        let mut args = vec!["run".to_string()];
        let in_bin_dir = entry
            .parent()
            .is_some_and(|dir| dir.ends_with("src/bin") || dir.ends_with("bin"));
        if in_bin_dir
            && let Some(stem) = entry.file_stem().and_then(|s| s.to_str())
        {
            args.push("--bin".to_string());
            args.push(stem.to_string());
        }
        Self {
            program: "cargo".to_string(),
            args,
            env: Vec::new(),
        }
    }

    /// Plan for running the project test suite in test mode.
    pub fn for_tests(reporter: Option<&str>) -> Self {
        let mut args = vec!["test".to_string()];
        if let Some(reporter) = reporter {
            args.push("--".to_string());
            args.push("--format".to_string());
            args.push(reporter.to_string());
        }
        Self {
            program: "cargo".to_string(),
            args,
            env: vec![(TEST_MODE_ENV.to_string(), TEST_MODE_VALUE.to_string())],
        }
    }
}

/// Probe the conventional locations for an entry point under `root`.
pub fn probe(root: &Path) -> Option<PathBuf> {
    for dir in PROBE_DIRS {
        for file in PROBE_FILES {
            let candidate = root.join(dir).join(file);
            if candidate.is_file() {
                debug!("entry probe hit: {}", candidate.display());
                return Some(candidate);
            }
        }
    }
    None
}

/// Resolve the entry point: explicit override, conventional probe, then an
/// interactive prompt that retries until the operator names a real file.
pub async fn resolve<W: Write>(
    root: &Path,
    explicit: Option<&Path>,
    console: &mut Console<W>,
) -> Result<PathBuf, SupervisorError> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        console.warn(&format!("no entry point at {}", path.display()))?;
    }

    if let Some(path) = probe(root) {
        return Ok(path);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        console.prompt("entry point path: ")?;
        let Some(line) = lines.next_line().await? else {
            return Err(SupervisorError::InputClosed);
        };
        let path = root.join(line.trim());
        if path.is_file() {
            return Ok(path);
        }
        console.warn(&format!("no entry point at {}", path.display()))?;
    }
}
