//! # Sentiment - interactive sentiment analyzer
//!
//! Reads a line at a time, asks a chat-completion model to rate it between
//! -1 and 1, and prints a colored label for the score. The whole
//! conversation is sent on every turn so the model keeps context.

#[macro_use]
extern crate rust_i18n;

// Load locale files from `locales/` directory, default to English
i18n!("locales", fallback = "en");

mod ai;
mod app;
mod config;
pub mod constants;
mod logging;
mod sentiment;
mod ui;
mod utils;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use ai::{OpenAiClient, SentimentClient};
use config::Config;
use ui::{paint, ColorClass};

/// Sentiment - rate the mood of whatever you type
#[derive(Parser, Debug)]
#[command(
    name = "sentiment",
    version,
    about = "Interactive sentiment analyzer backed by a chat-completion model",
    long_about = "Type a message and get its sentiment. Type 'exit', 'quit' or 'salir' to leave.\n\
                  Requires OPENAI_API_KEY (environment or .env). Optional settings live in \
                  ~/.config/sentiment/config.toml."
)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    // .env first so a RUST_LOG set there reaches the log filter
    config::load_env_files();
    let config = Config::load();
    logging::init(&config.log_level);

    // Set UI language (config > default "en")
    let lang = config.lang.as_str();
    rust_i18n::set_locale(lang);

    let api_key = match Config::api_key() {
        Ok(key) => key,
        Err(config::ConfigError::MissingApiKey(var)) => {
            eprintln!(
                "{}",
                paint(
                    ColorClass::Red,
                    &t!("error.missing_api_key", locale = lang, var = var)
                )
            );
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run(&config, api_key));

    // The stdin reader may still be parked in a blocking read; don't wait on it.
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config, api_key: String) -> Result<()> {
    let backend = OpenAiClient::new(api_key, &config.api_base_url, config.request_timeout())?;
    let lang = config.lang.as_str();
    let system_prompt = t!("system_prompt", locale = lang);
    let client = SentimentClient::new(backend, &system_prompt, &config.model, config.max_tokens);
    let mut app = app::App::new(client, &config.lang);

    tracing::info!(model = %config.model, base_url = %config.api_base_url, lang = %config.lang, "starting");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let interrupt = async {
        // If the handler can't be installed, fall back to the default SIGINT behavior.
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    app.run(stdin, &mut stdout, interrupt).await?;
    Ok(())
}
