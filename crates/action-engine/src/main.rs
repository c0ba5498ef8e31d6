/*
[INPUT]:  CLI arguments, optional YAML configuration file, OS shutdown signals
[OUTPUT]: Interactive task list session with the terminal restored on exit
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, logging setup, or shutdown handling
*/

mod tui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use action_engine::logging::{LogBuffer, LogBufferHandle, LogWriterFactory};
use action_engine::{EngineConfig, TaskListController};

#[derive(Parser, Debug)]
#[command(
    name = "action-engine",
    version,
    about = "Execute tasks, automate workflows, and extend your reach"
)]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<String>,
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[arg(long = "execution-delay-ms", value_name = "MS")]
    execution_delay_ms: Option<u64>,
    #[arg(long = "dry-run")]
    dry_run: bool,
}

enum LogSink {
    Stderr,
    Buffer(LogBufferHandle),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config = resolve_config(&args)?;

    if args.dry_run {
        let _guard = init_tracing(&config.log_level, LogSink::Stderr, args.log_file.as_deref())?;
        info!(
            execution_delay_ms = config.execution_delay_ms,
            tick_ms = config.ui.tick_ms,
            "dry-run requested; configuration validated"
        );
        return Ok(());
    }

    let log_buffer = LogBuffer::shared(config.log_buffer_capacity);
    let _guard = init_tracing(
        &config.log_level,
        LogSink::Buffer(log_buffer.clone()),
        args.log_file.as_deref(),
    )?;
    info!(
        execution_delay_ms = config.execution_delay_ms,
        "starting action-engine"
    );

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    let controller = TaskListController::with_execution_delay(config.execution_delay());
    tui::run_tui(controller, &config, log_buffer, shutdown)
        .await
        .context("run terminal ui")?;

    info!("action-engine exited");
    Ok(())
}

fn resolve_config(args: &Cli) -> Result<EngineConfig> {
    let mut config = EngineConfig::load(args.config_path.as_deref()).context("load config")?;
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    if let Some(delay_ms) = args.execution_delay_ms {
        config.execution_delay_ms = delay_ms;
    }
    config.validate().context("validate config")?;
    Ok(config)
}

/// Install the global subscriber.
///
/// While the UI owns the terminal, events go to the in-memory buffer instead
/// of stderr. The returned guard must live until exit to flush the log file.
fn init_tracing(
    log_level: &str,
    sink: LogSink,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let (stderr_layer, buffer_layer) = match sink {
        LogSink::Stderr => (Some(fmt::layer().with_writer(std::io::stderr)), None),
        LogSink::Buffer(buffer) => (
            None,
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(LogWriterFactory::new(buffer)),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(buffer_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}

fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .context("log file path must name a file")?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("create log directory {}", directory.display()))?;
    let appender = tracing_appender::rolling::never(directory, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
