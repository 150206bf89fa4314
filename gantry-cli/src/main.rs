//! gantry - dev tooling for gantry applications.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use simplelog::{Config, LevelFilter, WriteLogger};

use gantry_cli::console::Console;
use gantry_cli::entry::{self, LaunchPlan};
use gantry_cli::error::SupervisorError;
use gantry_cli::supervisor::{Supervisor, TokioSpawner};
use gantry_cli::terminal::{self, RawModeGuard};

#[derive(Parser)]
#[command(name = "gantry", version, about = "Dev tooling for gantry applications")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the application under the interactive dev supervisor.
    Run {
        /// Entry point override; conventional locations are probed when absent.
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Run the project test suite in test mode.
    Test {
        /// Reporter forwarded to the test runner.
        #[arg(long)]
        reporter: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Log to a file: the child process owns the terminal.
    let log_file = File::create("gantry.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { path } => run_command(path).await,
        Commands::Test { reporter } => test_command(reporter).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run_command(path: Option<PathBuf>) -> Result<(), SupervisorError> {
    let mut console = Console::stdout();
    let root = std::env::current_dir()?;
    let entry = entry::resolve(&root, path.as_deref(), &mut console).await?;
    let plan = LaunchPlan::for_entry(&entry);

    console.banner()?;
    console.info(&format!("starting {}", entry.display()))?;

    let _guard = RawModeGuard::new()?;
    let mut supervisor = Supervisor::new(TokioSpawner, console, plan);
    supervisor.run(terminal::key_stream()).await?;
    Ok(())
}

async fn test_command(reporter: Option<String>) -> Result<(), SupervisorError> {
    let mut console = Console::stdout();
    let plan = LaunchPlan::for_tests(reporter.as_deref());

    console.info("running test suite")?;
    let mut command = tokio::process::Command::new(&plan.program);
    command.args(&plan.args);
    for (key, value) in &plan.env {
        command.env(key, value);
    }
    let status = command.status().await?;
    if !status.success() {
        return Err(SupervisorError::TestsFailed(status));
    }
    console.success("all tests passed")?;
    Ok(())
}
