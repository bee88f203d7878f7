use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use chatrelay_ai::{ChatRelay, OpenAIClient};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Build the relay from the `[chatgpt]` section of the config.
pub fn prepare_relay(config: &CliConfig) -> Result<ChatRelay> {
    let chatgpt = &config.chatgpt;
    let Some(key) = chatgpt.api_key() else {
        bail!(
            "API key not found: set chatgpt.key in {} or OPENAI_API_KEY",
            CliConfig::config_path().display()
        );
    };

    let mut client = OpenAIClient::new(key)?
        .with_model(chatgpt.model.clone())
        .with_base_url(chatgpt.base_url());
    if let Some(proxy) = chatgpt.proxy() {
        client = client.with_proxy(proxy)?;
    }

    Ok(ChatRelay::new(Arc::new(client), chatgpt.relay_config()))
}

/// Send logs to a daily file so the chat loop's stdout stays clean.
///
/// Logging is skipped, not fatal, when the log directory is unusable.
pub fn init_logging(verbose: bool) -> Option<WorkerGuard> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chatrelay")
        .join("logs");

    let file_appender = match file_appender(&log_dir) {
        Ok(appender) => appender,
        Err(err) => {
            eprintln!(
                "Warning: File logging disabled ({}): {err}",
                log_dir.display()
            );
            return None;
        }
    };
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    Some(guard)
}

fn file_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir).ok();
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("chatrelay.log")
        .build(log_dir)?;
    Ok(appender)
}
