//! Error types for the gantry CLI.

use std::io;
use std::process::ExitStatus;

/// Errors the dev runner can surface to the operator.
#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    /// Terminal or prompt I/O failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The child process could not be spawned.
    #[error("failed to spawn application process: {0}")]
    Spawn(io::Error),

    /// The operator input stream closed while a line was expected.
    #[error("operator input closed")]
    InputClosed,

    /// The test runner finished unsuccessfully.
    #[error("test runner exited with {0}")]
    TestsFailed(ExitStatus),
}
