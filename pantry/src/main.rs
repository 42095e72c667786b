mod carousel;
mod cli;
mod client;
mod command;
mod config;
mod event;
mod key;
mod player;
mod state;
mod taxonomy;
mod ui;
mod utils;
mod view;

use std::{io::Write, path::Path, sync::Arc};

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};

fn init_app_cli_arguments() -> Result<ArgMatches> {
    let default_config_folder = config::get_config_folder_path()?;
    let default_cache_folder = config::get_cache_folder_path()?;

    let cmd = Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .subcommand(cli::init_get_subcommand())
        .arg(
            Arg::new("config-folder")
                .long("config-folder")
                .global(true)
                .default_value(default_config_folder.to_string_lossy().into_owned())
                .help("Path to the application's config folder"),
        )
        .arg(
            Arg::new("cache-folder")
                .short('C')
                .long("cache-folder")
                .global(true)
                .default_value(default_cache_folder.to_string_lossy().into_owned())
                .help("Path to the application's cache folder"),
        )
        .arg(
            Arg::new("user-id")
                .short('u')
                .long("user-id")
                .global(true)
                .help("Catalog user whose playlists are displayed, overrides the configured one"),
        );

    Ok(cmd.get_matches())
}

fn init_logging(cache_folder: &Path) -> Result<()> {
    let log_prefix = format!(
        "pantry-{}",
        chrono::Local::now().format("%y-%m-%d-%H-%M")
    );

    // initialize the application's logging
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "pantry=info,pantry_proxy=info");
    }
    let log_file = std::fs::File::create(cache_folder.join(format!("{log_prefix}.log")))
        .context("failed to create log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    // initialize the application's panic backtrace
    let backtrace_file =
        std::fs::File::create(cache_folder.join(format!("{log_prefix}.backtrace")))
            .context("failed to create backtrace file")?;
    let backtrace_file = std::sync::Mutex::new(backtrace_file);
    std::panic::set_hook(Box::new(move |info| {
        let mut file = backtrace_file.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let backtrace = backtrace::Backtrace::new();
        let _ = writeln!(file, "Got a panic: {info:#?}\n");
        let _ = writeln!(file, "Stack backtrace:\n{backtrace:?}");
    }));

    Ok(())
}

fn start_app(state: &state::SharedState) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build the tokio runtime")?;

    let app_config = &config::get_config().app_config;
    let (client_pub, client_sub) = flume::unbounded::<client::ClientRequest>();

    // client request handler task
    runtime.spawn({
        let state = state.clone();
        let client = client::Client::from_config(app_config);
        client::start_client_handler(state, client, client_sub)
    });

    client_pub.send(client::ClientRequest::GetPlaylists {
        user_id: app_config.user_id.clone(),
        force: false,
    })?;

    // terminal event handler thread
    std::thread::Builder::new()
        .name("terminal_event_handler".to_string())
        .spawn({
            let state = state.clone();
            move || {
                event::start_event_handler(state, client_pub);
            }
        })?;

    // the UI renders on the main thread, the application exits once it stops
    let result = ui::run(state);
    runtime.shutdown_background();
    result
}

fn main() -> Result<()> {
    let args = init_app_cli_arguments()?;

    let config_folder: std::path::PathBuf = args
        .get_one::<String>("config-folder")
        .context("config-folder has a default value")?
        .into();
    let cache_folder: std::path::PathBuf = args
        .get_one::<String>("cache-folder")
        .context("cache-folder has a default value")?
        .into();

    if !config_folder.exists() {
        std::fs::create_dir_all(&config_folder)?;
    }
    if !cache_folder.exists() {
        std::fs::create_dir_all(&cache_folder)?;
    }

    let mut configs = config::Configs::new(&config_folder, &cache_folder)?;
    if let Some(user_id) = args.get_one::<String>("user-id") {
        configs.app_config.user_id.clone_from(user_id);
    }
    config::set_config(configs);

    match args.subcommand() {
        None => {
            init_logging(&cache_folder).context("failed to initialize logging")?;
            tracing::info!(
                "Starting the gallery of user {}",
                config::get_config().app_config.user_id
            );

            let state = Arc::new(state::State::new(&config::get_config().app_config));
            start_app(&state)
        }
        Some((cmd, args)) => cli::handle_cli_subcommand(cmd, args),
    }
}
