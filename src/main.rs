use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use verify_deps::config;
use verify_deps::verify::{UpgradeMode, VerifyOptions, verify_deps};

#[derive(Parser)]
#[command(name = "verify-deps")]
#[command(version, about = "Checks existing dependencies for available updates")]
struct Cli {
    /// Automatically run all suggested upgrades
    #[arg(short = 'u', long)]
    auto_upgrade: bool,

    /// Project directory containing package.json (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Query this npm registry over HTTP instead of running `npm view`
    #[arg(long, value_name = "URL")]
    registry: Option<String>,
}

/// Diagnostics go to a log file; stdout carries the report
fn init_logging() -> anyhow::Result<WorkerGuard> {
    let data_dir = config::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(config::LOG_FILE_NAME)
        .build(&data_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let mut options = VerifyOptions::new(dir);
    options.mode = if cli.auto_upgrade {
        UpgradeMode::Auto
    } else {
        UpgradeMode::Manual
    };
    options.registry_url = cli.registry;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(verify_deps(options))?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    // Logging is best effort; an unwritable data dir must not block the check
    let _guard = init_logging().ok();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
