// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hq - the file-sorting agent CLI

use clap::{Parser, Subcommand, ValueEnum};
use hq_engine::Registry;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for configuration mistakes, distinct from runtime faults.
const EXIT_CONFIG: u8 = 2;

#[derive(Parser)]
#[command(name = "hq", version, about = "A file-sorting agent for your NAS")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agents declared in the given configuration file
    Takeoff {
        /// Path to the agents file
        config: PathBuf,
        /// Log level
        #[arg(short = 'l', long = "level", value_enum, ignore_case = true, default_value_t)]
        level: LogLevel,
    },
    /// List the registered processors
    ListProcessors,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::ListProcessors => {
            for entry in Registry::standard().entries() {
                println!("{:<16} {}", entry.name, entry.summary);
            }
            ExitCode::SUCCESS
        }
        Commands::Takeoff { config, level } => takeoff(&config, level),
    }
}

fn takeoff(config: &std::path::Path, level: LogLevel) -> ExitCode {
    init_logging(level);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(hq_daemon::run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_config_error() => {
            eprintln!("configuration error: {e}");
            ExitCode::from(EXIT_CONFIG)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: LogLevel) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
