use std::fs::OpenOptions;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use passforge::cli::{self, Args, CliCommand};
use passforge::{Config, Engine};

fn init_logging(config: &Config) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(true)
        // RUST_LOG still wins when set
        .parse_default_env();

    if let Some(log_file) = &config.log_file {
        if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("failed to open log file {}", log_file.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("logger already initialised")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();

    let mut config = Config::load();
    if let Some(ms) = args.interval_ms {
        config.reveal_interval = std::time::Duration::from_millis(ms);
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = Some(log_file.clone());
    }

    init_logging(&config)?;
    log::debug!("Loaded config: {:?}", config);

    let mut engine = Engine::new(&config).context("invalid configuration")?;

    let should_exit = Arc::new(AtomicBool::new(false));
    {
        let should_exit = Arc::clone(&should_exit);
        ctrlc::set_handler(move || {
            log::info!("Ctrl+C received, stopping");
            should_exit.store(true, Ordering::SeqCst);
        })
        .context("failed to set Ctrl+C handler")?;
    }

    match args.command {
        Some(CliCommand::Generate { length, classes, no_reveal, json }) => {
            cli::handlers::handle_generate(
                &mut engine,
                length,
                classes.selection(),
                no_reveal,
                json,
                &should_exit,
            )
            .await?;
        }
        Some(CliCommand::Strength { classes, json }) => {
            let classes = classes.selection().unwrap_or(config.default_classes);
            cli::handlers::handle_strength(classes, json)?;
        }
        None => {
            cli::menu::run_cli_menu(engine, should_exit).await?;
        }
    }

    Ok(())
}
