/*
[INPUT]:  CLI arguments, optional YAML configuration, demo script
[OUTPUT]: A scripted run of the example state machine with background downloads
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the startup flow
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use screenflow_app::config::AppConfig;
use screenflow_app::script::{default_script, spawn_driver};
use screenflow_app::states::example_states;
use screenflow_app::tasks::DownloadTaskFactory;
use screenflow_core::{HeadlessBackend, StateMachine};

#[derive(Parser, Debug)]
#[command(name = "screenflow-app", version, about = "Scripted multi-window state machine demo")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(
        long = "file-url",
        value_name = "URL",
        default_value = "https://example.com/file.bin"
    )]
    file_url: String,
    #[arg(long = "dry-run")]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = match &args.config_path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    info!(
        workers = config.workers,
        scripted_steps = config.script.len(),
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let (backend, handle) = HeadlessBackend::new();
    let mut machine = StateMachine::new(Box::new(backend), config.machine_config());
    for state in example_states() {
        machine.register_state(state)?;
    }
    machine.set_task_factory(Box::new(DownloadTaskFactory::new(
        config.download_step_delay(),
    )));

    let steps = if config.script.is_empty() {
        default_script(&args.file_url)
    } else {
        config.script.clone()
    };
    let driver = spawn_driver(handle, steps);

    machine.run("initial").context("run state machine")?;

    driver
        .join()
        .map_err(|_| anyhow!("demo driver panicked"))?;
    info!("demo complete");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<AppConfig> {
    let path_str = path.to_str().context("config path must be valid utf-8")?;
    AppConfig::from_file(path_str).context("load config")
}
