mod cli;
mod repl;
mod setup;

use std::process::ExitCode;
use std::time::Duration;

use beacon_chat::ChatController;
use beacon_config::{BeaconConfig, LogLevel};
use tracing_subscriber::EnvFilter;

/// Logging goes to stderr so it never interleaves with the conversation.
/// Precedence: `--log-level`, then `RUST_LOG`, then the config file.
fn init_logging(flag: Option<&str>, level: LogLevel) {
    let filter = match flag {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|e| {
            eprintln!("invalid --log-level {directive:?}: {e}");
            EnvFilter::new(level.directive())
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.directive())),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(config: BeaconConfig, args: &cli::Args) -> ExitCode {
    let store = match setup::history_store(args, &config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("history storage unavailable: {e}");
            return ExitCode::FAILURE;
        }
    };

    let settings = setup::chat_settings(&config.chat);
    tracing::info!(base_url = %settings.base_url, "connecting to backend");
    let chat = match ChatController::with_http(&settings, store) {
        Ok(chat) => chat,
        Err(e) => {
            tracing::error!("could not build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let max_input_chars = config.chat.max_input_chars as usize;
    match repl::run(chat, max_input_chars).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("terminal i/o failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args = cli::parse();

    let config = setup::load_config(&args);
    let level = config
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or_default();
    init_logging(args.log_level.as_deref(), level);

    tracing::info!("Beacon v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(run(config, &args));
    // The stdin reader thread may still be parked on a read.
    runtime.shutdown_timeout(Duration::from_millis(200));
    tracing::info!("Shutdown complete");
    code
}
